//! Production orders and the order history log.

use super::{RemnantSpec, StockKey};
use crate::config::Unit;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which base sheet the yield is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutStrategy {
    /// Fixed orientation against the drawn stock entry's own size.
    #[default]
    Sequential,
    /// Best of both orientations against the configured reference sheet.
    ReferenceSheet,
}

/// An order as entered, before any yield is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Order reference (free text, not required to be unique).
    pub order_ref: String,
    pub customer: String,
    pub description: String,
    /// Declared order value.
    pub order_value: f64,
    pub cut_width: f64,
    pub cut_length: f64,
    /// Unit of `cut_width` and `cut_length`.
    pub unit: Unit,
    /// Finished pieces required.
    pub quantity: u32,
    /// Stock entry to draw base sheets from.
    pub stock_key: StockKey,
    #[serde(default)]
    pub strategy: CutStrategy,
}

impl OrderRequest {
    /// Cut width in millimetres.
    pub fn cut_width_mm(&self) -> f64 {
        self.unit.to_mm(self.cut_width)
    }

    /// Cut length in millimetres.
    pub fn cut_length_mm(&self) -> f64 {
        self.unit.to_mm(self.cut_length)
    }
}

/// A confirmed order. Records are only ever appended to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_ref: String,
    pub customer: String,
    pub description: String,
    pub order_value: f64,
    /// Cut width in mm.
    pub cut_width: f64,
    /// Cut length in mm.
    pub cut_length: f64,
    pub quantity: u32,
    pub stock_key: StockKey,
    /// Model label of the consumed entry at commit time.
    pub stock_model: String,
    pub paper_type: String,
    pub basis_weight: f64,
    pub sheets_consumed: u32,
    pub remnants: Vec<RemnantSpec>,
    /// Weight of the finished pieces in kg.
    pub finished_weight_kg: f64,
    pub timestamp: NaiveDateTime,
}

impl OrderRecord {
    /// Remnants as a single human-readable string, e.g. `"1680x200 (4), 80x300 (32)"`.
    pub fn remnant_description(&self) -> String {
        self.remnants
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
