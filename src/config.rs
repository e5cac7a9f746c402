//! Configuration constants and settings for the stock ledger.

use serde::{Deserialize, Serialize};

/// Leftovers at or below this length (mm) are treated as cutting noise, not remnants.
pub const REMNANT_TOLERANCE: f64 = 0.1;

/// Key quantization: lengths (mm) and basis weights (g/m²) are keyed in steps of 0.1.
pub const QUANTA_PER_UNIT: f64 = 10.0;

/// Floating-point slack when counting whole pieces along an axis.
pub const EPS: f64 = 1e-9;

/// Price per kg given to newly created remnant entries until corrected by hand.
pub const REMNANT_PLACEHOLDER_PRICE: f64 = 0.01;

/// Model label prefix for entries created from remnants.
pub const REMNANT_LABEL_PREFIX: &str = "RETALHO";

/// Conversion factor: metres to millimetres.
pub const CONV_M_MM: f64 = 1000.0;

/// Conversion factor: centimetres to millimetres.
pub const CONV_CM_MM: f64 = 10.0;

/// Default reference sheet width (mm) for best-orientation cutting.
pub const REFERENCE_SHEET_WIDTH_MM: f64 = 1680.0;

/// Default reference sheet length (mm) for best-orientation cutting.
pub const REFERENCE_SHEET_LENGTH_MM: f64 = 2600.0;

/// Unit of measurement for lengths crossing the crate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Millimeters,
    Centimeters,
    Meters,
}

impl Unit {
    /// Parse a unit from a short name ("mm", "cm", "m").
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Some(Unit::Millimeters),
            "cm" => Some(Unit::Centimeters),
            "m" => Some(Unit::Meters),
            _ => None,
        }
    }

    /// Get the conversion factor from this unit to millimetres.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            Unit::Millimeters => 1.0,
            Unit::Centimeters => CONV_CM_MM,
            Unit::Meters => CONV_M_MM,
        }
    }

    /// Convert a value in this unit to millimetres.
    pub fn to_mm(&self, value: f64) -> f64 {
        value * self.to_mm_factor()
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Millimeters => write!(f, "mm"),
            Unit::Centimeters => write!(f, "cm"),
            Unit::Meters => write!(f, "m"),
        }
    }
}

/// How stock entries are identified when adding stock or resolving an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// (model label, paper type, basis weight).
    #[default]
    ByModel,
    /// (width, length, paper type, basis weight).
    ByDimensions,
}

/// Shape of the remnant left along the width axis in sequential cutting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemnantPolicy {
    /// One strip per row of pieces: `pieces_along_length` x (leftover width x cut length).
    #[default]
    SpanCutLength,
    /// A single strip of (leftover width x base length) per sheet.
    SpanBaseLength,
}

/// A rectangular sheet size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width: f64,
    pub length: f64,
}

impl SheetSize {
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// The same sheet turned by 90 degrees.
    pub fn rotated(&self) -> Self {
        Self {
            width: self.length,
            length: self.width,
        }
    }
}

impl std::fmt::Display for SheetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}x{:.0}", self.width, self.length)
    }
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Identity used for stock lookups.
    pub match_mode: MatchMode,
    /// Remnant shape along the width axis.
    pub remnant_policy: RemnantPolicy,
    /// Price per kg for freshly created remnant entries.
    pub remnant_placeholder_price: f64,
    /// Fixed sheet used by best-orientation cutting.
    pub reference_sheet: SheetSize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            remnant_policy: RemnantPolicy::default(),
            remnant_placeholder_price: REMNANT_PLACEHOLDER_PRICE,
            reference_sheet: SheetSize::new(REFERENCE_SHEET_WIDTH_MM, REFERENCE_SHEET_LENGTH_MM),
        }
    }
}

impl LedgerConfig {
    /// Create a configuration with the given match mode.
    pub fn new(match_mode: MatchMode) -> Self {
        Self {
            match_mode,
            ..Default::default()
        }
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Utility functions for floating-point comparisons and key quantization.
pub mod float_cmp {
    use super::{EPS, QUANTA_PER_UNIT, REMNANT_TOLERANCE};

    /// Quantize a value to an integer number of 0.1 steps.
    #[inline]
    pub fn quantize(value: f64) -> i64 {
        (value * QUANTA_PER_UNIT).round() as i64
    }

    /// Inverse of [`quantize`].
    #[inline]
    pub fn dequantize(steps: i64) -> f64 {
        steps as f64 / QUANTA_PER_UNIT
    }

    /// Number of whole `part` lengths that fit in `whole`, or `None` past `u32::MAX`.
    #[inline]
    pub fn whole_fits(whole: f64, part: f64) -> Option<u32> {
        let count = ((whole / part) + EPS).floor();
        (count <= f64::from(u32::MAX)).then_some(count as u32)
    }

    /// Check if two lengths land on the same quantized key.
    #[inline]
    pub fn same_quantum(a: f64, b: f64) -> bool {
        quantize(a) == quantize(b)
    }

    /// Check if a leftover is large enough to count as a remnant.
    #[inline]
    pub fn exceeds_tolerance(leftover: f64) -> bool {
        leftover > REMNANT_TOLERANCE
    }
}
