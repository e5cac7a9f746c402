//! Stock and order history file generator module.

mod format;
mod orders_csv;
mod stock_csv;

pub use format::{format_decimal, format_money, format_size_m};
pub use orders_csv::{append_orders_file, write_orders_csv, ORDER_HEADER, TIMESTAMP_FORMAT};
pub use stock_csv::{write_stock_csv, write_stock_file, STOCK_HEADER};
