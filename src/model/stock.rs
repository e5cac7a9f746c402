//! Stock entries and their identity keys.

use crate::config::{float_cmp, MatchMode, SheetSize, Unit, CONV_M_MM, REMNANT_LABEL_PREFIX};
use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};

/// Weight in kg of one sheet of the given size (mm) and basis weight (g/m²).
pub fn sheet_weight_kg(width_mm: f64, length_mm: f64, basis_weight: f64) -> f64 {
    (width_mm / CONV_M_MM) * (length_mm / CONV_M_MM) * (basis_weight / 1000.0)
}

/// Identity of a stock entry. Numeric parts are quantized to 0.1 steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockKey {
    Model {
        model: String,
        paper_type: String,
        basis_weight: i64,
    },
    Dimensions {
        width: i64,
        length: i64,
        paper_type: String,
        basis_weight: i64,
    },
}

impl StockKey {
    /// Key by model label, paper type and basis weight.
    pub fn by_model(model: &str, paper_type: &str, basis_weight: f64) -> Self {
        StockKey::Model {
            model: model.trim().to_string(),
            paper_type: paper_type.trim().to_string(),
            basis_weight: float_cmp::quantize(basis_weight),
        }
    }

    /// Key by sheet size (mm), paper type and basis weight.
    pub fn by_dimensions(width: f64, length: f64, paper_type: &str, basis_weight: f64) -> Self {
        StockKey::Dimensions {
            width: float_cmp::quantize(width),
            length: float_cmp::quantize(length),
            paper_type: paper_type.trim().to_string(),
            basis_weight: float_cmp::quantize(basis_weight),
        }
    }

    /// Key a ledger in the given match mode looks entries up by.
    ///
    /// `ByModel` needs the model label and `ByDimensions` needs the sheet size (mm); the
    /// other one is ignored.
    pub fn for_mode(
        mode: MatchMode,
        model: Option<&str>,
        size: Option<SheetSize>,
        paper_type: &str,
        basis_weight: f64,
    ) -> Result<Self> {
        match mode {
            MatchMode::ByModel => {
                let model = model.filter(|m| !m.trim().is_empty()).ok_or_else(|| {
                    StockError::validation("model", "required when matching by model")
                })?;
                Ok(Self::by_model(model, paper_type, basis_weight))
            }
            MatchMode::ByDimensions => {
                let size = size.ok_or_else(|| {
                    StockError::validation("sheet_size", "required when matching by dimensions")
                })?;
                Ok(Self::by_dimensions(size.width, size.length, paper_type, basis_weight))
            }
        }
    }

    /// Paper type part of the key.
    pub fn paper_type(&self) -> &str {
        match self {
            StockKey::Model { paper_type, .. } | StockKey::Dimensions { paper_type, .. } => {
                paper_type
            }
        }
    }

    /// Basis weight part of the key, in g/m².
    pub fn basis_weight(&self) -> f64 {
        match self {
            StockKey::Model { basis_weight, .. } | StockKey::Dimensions { basis_weight, .. } => {
                float_cmp::dequantize(*basis_weight)
            }
        }
    }
}

impl std::fmt::Display for StockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockKey::Model {
                model, paper_type, ..
            } => write!(f, "{} / {} / {}g", model, paper_type, self.basis_weight()),
            StockKey::Dimensions {
                width,
                length,
                paper_type,
                ..
            } => write!(
                f,
                "{}x{} / {} / {}g",
                float_cmp::dequantize(*width),
                float_cmp::dequantize(*length),
                paper_type,
                self.basis_weight()
            ),
        }
    }
}

/// Where a stock entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Purchased base sheets.
    #[default]
    Stock,
    /// Offcuts credited back by an order.
    Remnant,
}

/// Input for adding or topping up a stock entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInput {
    pub model: String,
    pub width: f64,
    pub length: f64,
    /// Unit of `width` and `length`.
    pub unit: Unit,
    pub paper_type: String,
    /// Basis weight in g/m².
    pub basis_weight: f64,
    /// Sheets to add; negative values remove sheets.
    pub quantity: i64,
    pub price_per_kg: f64,
}

impl StockInput {
    /// Width in millimetres.
    pub fn width_mm(&self) -> f64 {
        self.unit.to_mm(self.width)
    }

    /// Length in millimetres.
    pub fn length_mm(&self) -> f64 {
        self.unit.to_mm(self.length)
    }
}

/// One row of the stock table.
///
/// Total weight and value are derived and kept private so they can only change
/// through methods that recompute them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockEntry {
    /// Sheet model label.
    pub model: String,
    /// Width in mm.
    pub width: f64,
    /// Length in mm.
    pub length: f64,
    pub paper_type: String,
    /// Basis weight in g/m².
    pub basis_weight: f64,
    sheet_count: i64,
    price_per_kg: f64,
    pub origin: EntryOrigin,
    /// Set on remnant entries created with the placeholder price.
    pub price_is_placeholder: bool,
    total_weight_kg: f64,
    total_value: f64,
}

impl StockEntry {
    /// Create a stock entry from purchased sheets.
    pub fn new(
        model: impl Into<String>,
        width: f64,
        length: f64,
        paper_type: impl Into<String>,
        basis_weight: f64,
        sheet_count: i64,
        price_per_kg: f64,
    ) -> Self {
        let mut entry = Self {
            model: model.into().trim().to_string(),
            width,
            length,
            paper_type: paper_type.into().trim().to_string(),
            basis_weight,
            sheet_count,
            price_per_kg,
            origin: EntryOrigin::Stock,
            price_is_placeholder: false,
            total_weight_kg: 0.0,
            total_value: 0.0,
        };
        entry.recompute();
        entry
    }

    /// Create an entry for an offcut that has not been seen before.
    pub fn new_remnant(
        width: f64,
        length: f64,
        paper_type: impl Into<String>,
        basis_weight: f64,
        sheet_count: i64,
        placeholder_price: f64,
    ) -> Self {
        let mut entry = Self::new(
            remnant_label(width, length),
            width,
            length,
            paper_type,
            basis_weight,
            sheet_count,
            placeholder_price,
        );
        entry.origin = EntryOrigin::Remnant;
        entry.price_is_placeholder = true;
        entry
    }

    /// Create an entry from validated stock input.
    pub fn from_input(input: &StockInput) -> Self {
        Self::new(
            input.model.as_str(),
            input.width_mm(),
            input.length_mm(),
            input.paper_type.as_str(),
            input.basis_weight,
            input.quantity,
            input.price_per_kg,
        )
    }

    /// Identity key under the given match mode.
    pub fn key(&self, mode: MatchMode) -> StockKey {
        match mode {
            MatchMode::ByModel => StockKey::by_model(&self.model, &self.paper_type, self.basis_weight),
            MatchMode::ByDimensions => self.dimension_key(),
        }
    }

    /// Identity key by size, used for remnant matching regardless of mode.
    pub fn dimension_key(&self) -> StockKey {
        StockKey::by_dimensions(self.width, self.length, &self.paper_type, self.basis_weight)
    }

    /// Sheets on hand. May be negative after a backordered commit.
    pub fn sheet_count(&self) -> i64 {
        self.sheet_count
    }

    pub fn price_per_kg(&self) -> f64 {
        self.price_per_kg
    }

    pub fn total_weight_kg(&self) -> f64 {
        self.total_weight_kg
    }

    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Weight of a single sheet in kg.
    pub fn sheet_weight_kg(&self) -> f64 {
        sheet_weight_kg(self.width, self.length, self.basis_weight)
    }

    /// Add (or with a negative delta, remove) sheets, keeping the current price.
    pub fn adjust_quantity(&mut self, delta: i64) {
        self.sheet_count = self.sheet_count.saturating_add(delta);
        self.recompute();
    }

    /// Replace the price per kg. Clears the placeholder flag.
    pub fn set_price(&mut self, price_per_kg: f64) {
        self.price_per_kg = price_per_kg;
        self.price_is_placeholder = false;
        self.recompute();
    }

    /// Check whether this entry holds the given size, paper and basis weight.
    pub fn matches_dimensions(
        &self,
        width: f64,
        length: f64,
        paper_type: &str,
        basis_weight: f64,
    ) -> bool {
        float_cmp::same_quantum(self.width, width)
            && float_cmp::same_quantum(self.length, length)
            && self.paper_type == paper_type.trim()
            && float_cmp::same_quantum(self.basis_weight, basis_weight)
    }

    /// Get display dimensions (width x length) in mm.
    pub fn dimensions_string(&self) -> String {
        size_label(self.width, self.length)
    }

    fn recompute(&mut self) {
        self.total_weight_kg = self.sheet_weight_kg() * self.sheet_count as f64;
        self.total_value = self.total_weight_kg * self.price_per_kg;
    }
}

/// `WxL` in mm at key resolution, e.g. `80x300` or `80.4x300`.
pub(crate) fn size_label(width: f64, length: f64) -> String {
    format!(
        "{}x{}",
        float_cmp::dequantize(float_cmp::quantize(width)),
        float_cmp::dequantize(float_cmp::quantize(length))
    )
}

/// Model label given to remnant entries.
///
/// Sizes that land on different keys get different labels.
pub fn remnant_label(width: f64, length: f64) -> String {
    format!("{} {}", REMNANT_LABEL_PREFIX, size_label(width, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kraft_sheet(count: i64) -> StockEntry {
        StockEntry::new("CH-01", 1680.0, 2600.0, "KRAFT", 150.0, count, 4.5)
    }

    #[test]
    fn test_derived_fields_on_creation() {
        let entry = kraft_sheet(10);
        assert!((entry.total_weight_kg() - 6.552).abs() < 1e-9);
        assert!((entry.total_value() - 29.484).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_quantity_recomputes() {
        let mut entry = kraft_sheet(10);
        entry.adjust_quantity(-12);
        assert_eq!(entry.sheet_count(), -2);
        assert!((entry.total_weight_kg() + 1.3104).abs() < 1e-9);
        assert!((entry.total_value() - entry.total_weight_kg() * 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_set_price_clears_placeholder() {
        let mut entry = StockEntry::new_remnant(1680.0, 200.0, "KRAFT", 150.0, 4, 0.01);
        assert!(entry.price_is_placeholder);
        assert_eq!(entry.origin, EntryOrigin::Remnant);
        assert_eq!(entry.model, "RETALHO 1680x200");

        entry.set_price(3.0);
        assert!(!entry.price_is_placeholder);
        assert!((entry.total_value() - entry.total_weight_kg() * 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_remnant_label_resolution() {
        assert_eq!(remnant_label(80.0, 300.0), "RETALHO 80x300");
        assert_eq!(remnant_label(80.39999999999986, 300.0), "RETALHO 80.4x300");
        assert_eq!(remnant_label(0.08 * 1000.0, 300.0), "RETALHO 80x300");
        assert_ne!(remnant_label(80.0, 300.0), remnant_label(80.4, 300.0));

        let entry = StockEntry::new_remnant(80.4, 300.0, "KRAFT", 150.0, 8, 0.01);
        assert_eq!(entry.dimensions_string(), "80.4x300");
    }

    #[test]
    fn test_keys_by_mode() {
        let entry = kraft_sheet(1);
        assert_eq!(
            entry.key(MatchMode::ByModel),
            StockKey::by_model(" CH-01 ", "KRAFT", 150.0)
        );
        assert_eq!(
            entry.key(MatchMode::ByDimensions),
            StockKey::by_dimensions(1680.0, 2600.0, "KRAFT", 150.0)
        );
        assert_ne!(entry.key(MatchMode::ByModel), entry.key(MatchMode::ByDimensions));
    }

    #[test]
    fn test_key_for_mode() {
        let size = Some(SheetSize::new(1680.0, 2600.0));
        assert_eq!(
            StockKey::for_mode(MatchMode::ByModel, Some("CH-01"), size, "KRAFT", 150.0).unwrap(),
            kraft_sheet(1).key(MatchMode::ByModel)
        );
        assert_eq!(
            StockKey::for_mode(MatchMode::ByDimensions, None, size, "KRAFT", 150.0).unwrap(),
            kraft_sheet(1).key(MatchMode::ByDimensions)
        );

        let missing_model =
            StockKey::for_mode(MatchMode::ByModel, Some(" "), size, "KRAFT", 150.0);
        assert!(matches!(missing_model, Err(StockError::Validation { .. })));
        let missing_size =
            StockKey::for_mode(MatchMode::ByDimensions, Some("CH-01"), None, "KRAFT", 150.0);
        assert!(matches!(missing_size, Err(StockError::Validation { .. })));
    }

    #[test]
    fn test_key_display() {
        let key = StockKey::by_model("CH-01", "KRAFT", 150.0);
        assert_eq!(key.to_string(), "CH-01 / KRAFT / 150g");
        let key = StockKey::by_dimensions(80.0, 300.0, "TESTLINER", 125.5);
        assert_eq!(key.to_string(), "80x300 / TESTLINER / 125.5g");
        assert_eq!(key.paper_type(), "TESTLINER");
    }

    #[test]
    fn test_matches_dimensions_tolerates_float_noise() {
        let entry = StockEntry::new("X", 0.08 * 1000.0, 300.0, "KRAFT", 150.0, 0, 1.0);
        assert!(entry.matches_dimensions(80.0, 300.0, "KRAFT", 150.0));
        assert!(!entry.matches_dimensions(80.0, 300.0, "KRAFT", 125.0));
        assert!(!entry.matches_dimensions(300.0, 80.0, "KRAFT", 150.0));
    }

    #[test]
    fn test_input_unit_conversion() {
        let input = StockInput {
            model: "CH-01".into(),
            width: 1.68,
            length: 2.6,
            unit: Unit::Meters,
            paper_type: "KRAFT".into(),
            basis_weight: 150.0,
            quantity: 5,
            price_per_kg: 4.5,
        };
        let entry = StockEntry::from_input(&input);
        assert!(float_cmp::same_quantum(entry.width, 1680.0));
        assert!(float_cmp::same_quantum(entry.length, 2600.0));
        assert_eq!(entry.sheet_count(), 5);
    }
}
