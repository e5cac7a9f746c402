//! Number formatting for decimal-comma spreadsheet files.

/// Maximum decimal places written for measured quantities.
const MAX_DECIMALS: usize = 4;

/// Format a number with up to four decimals, trailing zeros trimmed, comma as separator.
pub fn format_decimal(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Whole numbers need no separator at all
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.prec$}", value, prec = MAX_DECIMALS);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    if trimmed.is_empty() || trimmed == "-" || trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.replace('.', ",")
    }
}

/// Format a currency amount with exactly two decimals.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        return "0,00".to_string();
    }
    formatted.replace('.', ",")
}

/// Format a size given in mm as metres, e.g. `0,4x0,3`.
pub fn format_size_m(width_mm: f64, length_mm: f64) -> String {
    format!(
        "{}x{}",
        format_decimal(width_mm / crate::config::CONV_M_MM),
        format_decimal(length_mm / crate::config::CONV_M_MM)
    )
}
