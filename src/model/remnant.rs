//! Remnant pieces produced by cutting.

use super::stock::size_label;
use crate::config::float_cmp;
use serde::{Deserialize, Serialize};

/// A remnant size (mm) and how many of it there are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemnantSpec {
    pub width: f64,
    pub length: f64,
    pub count: u64,
}

impl RemnantSpec {
    pub fn new(width: f64, length: f64, count: u64) -> Self {
        Self {
            width,
            length,
            count,
        }
    }

    /// Area of one piece in mm².
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Area of all pieces in mm².
    pub fn total_area(&self) -> f64 {
        self.area() * self.count as f64
    }

    fn key(&self) -> (i64, i64) {
        (
            float_cmp::quantize(self.width),
            float_cmp::quantize(self.length),
        )
    }
}

impl std::fmt::Display for RemnantSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", size_label(self.width, self.length), self.count)
    }
}

/// Remnants keyed by quantized size, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemnantSet {
    items: Vec<RemnantSpec>,
}

impl RemnantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` pieces of a size, accumulating onto an existing size.
    pub fn add(&mut self, width: f64, length: f64, count: u64) {
        if count == 0 {
            return;
        }
        let incoming = RemnantSpec::new(width, length, count);
        match self.items.iter_mut().find(|r| r.key() == incoming.key()) {
            Some(existing) => existing.count += count,
            None => self.items.push(incoming),
        }
    }

    /// Multiply every count, e.g. from per-sheet to per-order.
    pub fn scaled(&self, factor: u64) -> Self {
        let mut scaled = Self::new();
        for r in &self.items {
            scaled.add(r.width, r.length, r.count * factor);
        }
        scaled
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemnantSpec> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count for a size, if present.
    pub fn count_of(&self, width: f64, length: f64) -> Option<u64> {
        let wanted = RemnantSpec::new(width, length, 0).key();
        self.items.iter().find(|r| r.key() == wanted).map(|r| r.count)
    }

    /// Combined area of all remnants in mm².
    pub fn total_area(&self) -> f64 {
        self.items.iter().map(RemnantSpec::total_area).sum()
    }

    pub fn to_vec(&self) -> Vec<RemnantSpec> {
        self.items.clone()
    }
}

impl<'a> IntoIterator for &'a RemnantSet {
    type Item = &'a RemnantSpec;
    type IntoIter = std::slice::Iter<'a, RemnantSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
