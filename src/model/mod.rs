//! Data model types for the stock ledger.

mod order;
mod remnant;
mod stock;

pub use order::{CutStrategy, OrderRecord, OrderRequest};
pub use remnant::{RemnantSet, RemnantSpec};
pub use stock::{remnant_label, sheet_weight_kg, EntryOrigin, StockEntry, StockInput, StockKey};
