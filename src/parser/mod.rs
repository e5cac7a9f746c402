//! Stock file parser module.

mod stock_csv;

pub(crate) use stock_csv::columns;
pub use stock_csv::{parse_decimal, read_stock_csv, read_stock_file, StockRow};
