//! Validation logic for stock input, orders and imported stock files.

use crate::error::{Result, StockError};
use crate::model::{OrderRequest, StockInput};
use crate::parser::StockRow;

/// Outcome of checking imported stock rows.
///
/// Errors name rows that were rejected; warnings name rows that loaded with a caveat.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// False once any row has been rejected.
    pub passed: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// A result rejecting one row.
    pub fn error(message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_error(message);
        result
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Fold the findings for another row into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.passed &= other.passed;
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StockError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StockError::validation(
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(())
}

/// Validate input for adding or updating a stock entry.
pub fn validate_stock_input(input: &StockInput) -> Result<()> {
    require_text("model", &input.model)?;
    require_text("paper_type", &input.paper_type)?;
    require_positive("width", input.width)?;
    require_positive("length", input.length)?;
    require_positive("basis_weight", input.basis_weight)?;
    require_positive("price_per_kg", input.price_per_kg)?;
    Ok(())
}

/// Validate an order before its yield is computed.
pub fn validate_order_request(request: &OrderRequest) -> Result<()> {
    require_text("order_ref", &request.order_ref)?;
    require_text("customer", &request.customer)?;
    require_positive("cut_width", request.cut_width)?;
    require_positive("cut_length", request.cut_length)?;
    if request.quantity == 0 {
        return Err(StockError::validation(
            "quantity",
            "must be at least one piece",
        ));
    }
    if !request.order_value.is_finite() || request.order_value < 0.0 {
        return Err(StockError::validation(
            "order_value",
            format!("must not be negative, got {}", request.order_value),
        ));
    }
    Ok(())
}

/// Validate one imported stock row. Missing values are errors for that row only.
pub fn validate_stock_row(row: &StockRow) -> ValidationResult {
    let missing = row.missing_fields();
    if !missing.is_empty() {
        return ValidationResult::error(format!(
            "Line {}: missing or malformed {}",
            row.line,
            missing.join(", ")
        ));
    }

    let mut result = ValidationResult::ok();
    if let Some(input) = row.to_input() {
        if let Err(err) = validate_stock_input(&input) {
            return ValidationResult::error(format!("Line {}: {}", row.line, err));
        }
        if input.quantity < 0 {
            result.add_warning(format!(
                "Line {}: {} has a negative sheet count ({})",
                row.line, input.model, input.quantity
            ));
        }
    }

    if row.sheet_count.is_some_and(|c| c.fract() != 0.0) {
        result.add_warning(format!(
            "Line {}: fractional sheet count rounded to whole sheets",
            row.line
        ));
    }

    result
}

/// Validate all rows of an imported stock file.
pub fn validate_stock_rows(rows: &[StockRow]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if rows.is_empty() {
        result.add_warning("Stock file has no rows");
    }

    for row in rows {
        result.merge(validate_stock_row(row));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Unit;
    use crate::model::{CutStrategy, StockKey};

    fn stock_input() -> StockInput {
        StockInput {
            model: "CH-01".into(),
            width: 1680.0,
            length: 2600.0,
            unit: Unit::Millimeters,
            paper_type: "KRAFT".into(),
            basis_weight: 150.0,
            quantity: 10,
            price_per_kg: 4.5,
        }
    }

    fn order_request() -> OrderRequest {
        OrderRequest {
            order_ref: "OS-100".into(),
            customer: "ACME".into(),
            description: "Shipping boxes".into(),
            order_value: 1500.0,
            cut_width: 400.0,
            cut_length: 300.0,
            unit: Unit::Millimeters,
            quantity: 100,
            stock_key: StockKey::by_model("CH-01", "KRAFT", 150.0),
            strategy: CutStrategy::Sequential,
        }
    }

    fn row() -> StockRow {
        StockRow {
            line: 2,
            model: "CH-01".into(),
            width: Some(1680.0),
            length: Some(2600.0),
            paper_type: "KRAFT".into(),
            basis_weight: Some(150.0),
            sheet_count: Some(10.0),
            price_per_kg: Some(4.5),
        }
    }

    // ==================== validate_stock_rows tests ====================

    #[test]
    fn test_rejected_row_fails_the_file() {
        let mut bad = row();
        bad.line = 3;
        bad.basis_weight = None;
        let mut negative = row();
        negative.line = 4;
        negative.sheet_count = Some(-1.0);

        let result = validate_stock_rows(&[row(), bad, negative]);
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Line 3"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Line 4"));
    }

    #[test]
    fn test_out_of_range_row_rejected() {
        let mut row = row();
        row.price_per_kg = Some(0.0);
        let result = validate_stock_row(&row);
        assert!(!result.passed);
        assert!(result.warnings.is_empty());
        assert!(result.errors[0].contains("price_per_kg"));
    }

    // ==================== validate_stock_input tests ====================

    #[test]
    fn test_stock_input_valid() {
        assert!(validate_stock_input(&stock_input()).is_ok());
    }

    #[test]
    fn test_stock_input_rejects_non_positive_numbers() {
        for field in ["width", "length", "basis_weight", "price_per_kg"] {
            let mut input = stock_input();
            match field {
                "width" => input.width = 0.0,
                "length" => input.length = -1.0,
                "basis_weight" => input.basis_weight = 0.0,
                _ => input.price_per_kg = f64::NAN,
            }
            match validate_stock_input(&input).unwrap_err() {
                StockError::Validation { field: failed, .. } => assert_eq!(failed, field),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_stock_input_rejects_empty_text() {
        let mut input = stock_input();
        input.paper_type = "   ".into();
        match validate_stock_input(&input).unwrap_err() {
            StockError::Validation { field, .. } => assert_eq!(field, "paper_type"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_stock_input_allows_negative_delta() {
        let mut input = stock_input();
        input.quantity = -5;
        assert!(validate_stock_input(&input).is_ok());
    }

    // ==================== validate_order_request tests ====================

    #[test]
    fn test_order_request_valid() {
        assert!(validate_order_request(&order_request()).is_ok());
    }

    #[test]
    fn test_order_request_zero_quantity() {
        let mut request = order_request();
        request.quantity = 0;
        match validate_order_request(&request).unwrap_err() {
            StockError::Validation { field, .. } => assert_eq!(field, "quantity"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_order_request_missing_reference() {
        let mut request = order_request();
        request.order_ref = String::new();
        assert!(validate_order_request(&request).is_err());
    }

    #[test]
    fn test_order_request_negative_value() {
        let mut request = order_request();
        request.order_value = -1.0;
        assert!(validate_order_request(&request).is_err());
    }

    // ==================== stock row tests ====================

    #[test]
    fn test_stock_row_valid() {
        let result = validate_stock_row(&row());
        assert!(result.passed);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_stock_row_missing_values() {
        let mut row = row();
        row.width = None;
        row.price_per_kg = None;
        let result = validate_stock_row(&row);
        assert!(!result.passed);
        assert!(result.errors[0].contains("Line 2"));
        assert!(result.errors[0].contains("width"));
        assert!(result.errors[0].contains("price_per_kg"));
    }

    #[test]
    fn test_stock_row_negative_count_warns() {
        let mut row = row();
        row.sheet_count = Some(-2.0);
        let result = validate_stock_row(&row);
        assert!(result.passed);
        assert!(result.warnings[0].contains("negative sheet count"));
    }

    #[test]
    fn test_stock_rows_empty_warns() {
        let result = validate_stock_rows(&[]);
        assert!(result.passed);
        assert_eq!(result.warnings.len(), 1);
    }
}
