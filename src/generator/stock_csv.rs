//! Stock table export.

use super::format::{format_decimal, format_money};
use crate::config::CONV_M_MM;
use crate::error::Result;
use crate::model::StockEntry;
use crate::parser::columns;
use std::io::Write;
use std::path::Path;

/// Header row written for stock files. Lengths are in metres.
pub const STOCK_HEADER: [&str; 9] = [
    columns::MODEL,
    columns::WIDTH_M,
    columns::LENGTH_M,
    columns::PAPER_TYPE,
    columns::BASIS_WEIGHT,
    columns::SHEET_COUNT,
    columns::PRICE_PER_KG,
    columns::TOTAL_WEIGHT,
    columns::TOTAL_VALUE,
];

/// Write the stock table, including derived weight and value columns.
pub fn write_stock_csv<W: Write>(writer: W, entries: &[StockEntry]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    csv_writer.write_record(STOCK_HEADER)?;

    for entry in entries {
        csv_writer.write_record([
            entry.model.clone(),
            format_decimal(entry.width / CONV_M_MM),
            format_decimal(entry.length / CONV_M_MM),
            entry.paper_type.clone(),
            format_decimal(entry.basis_weight),
            entry.sheet_count().to_string(),
            format_decimal(entry.price_per_kg()),
            format_decimal(entry.total_weight_kg()),
            format_money(entry.total_value()),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the stock table to a file, replacing it.
pub fn write_stock_file(path: &Path, entries: &[StockEntry]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_stock_csv(file, entries)
}
