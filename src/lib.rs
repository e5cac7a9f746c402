//! gbs-stock - Sheet-stock yield calculation and remnant tracking.
//!
//! This library keeps the stock of corrugated base sheets for a box converter. It works
//! out how many pieces of a given cut size come out of one base sheet, how many sheets
//! an order consumes, and which offcuts are left over, then applies that to the stock
//! table: consumed sheets are deducted and remnants are credited back as stock.
//!
//! # Example
//!
//! ```no_run
//! use gbs_stock::{load_stock_file, CutStrategy, LedgerConfig, OrderRequest, StockKey, Unit};
//! use std::path::Path;
//!
//! let (mut ledger, _report) =
//!     load_stock_file(Path::new("estoque.csv"), LedgerConfig::default()).unwrap();
//! let request = OrderRequest {
//!     order_ref: "OS-100".into(),
//!     customer: "ACME".into(),
//!     description: "Shipping boxes".into(),
//!     order_value: 1500.0,
//!     cut_width: 0.4,
//!     cut_length: 0.3,
//!     unit: Unit::Meters,
//!     quantity: 100,
//!     stock_key: StockKey::by_model("CH-01", "KRAFT", 150.0),
//!     strategy: CutStrategy::Sequential,
//! };
//! let proposal = ledger.compute_order(&request).unwrap();
//! println!("{} sheet(s) needed", proposal.sheets_needed);
//! ledger.commit_order(proposal).unwrap();
//! ```

pub mod config;
pub mod cutting;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod validation;

// Re-exports for convenience
pub use config::{LedgerConfig, MatchMode, RemnantPolicy, SheetSize, Unit};
pub use cutting::{best_orientation_cut, sequential_cut, CutLayout};
pub use error::{Result, StockError};
pub use generator::{append_orders_file, write_orders_csv, write_stock_csv, write_stock_file};
pub use ledger::{CommitOutcome, InventorySummary, Ledger, ProposedTransaction, StockShortage};
pub use model::{
    CutStrategy, EntryOrigin, OrderRecord, OrderRequest, RemnantSet, RemnantSpec, StockEntry,
    StockInput, StockKey,
};
pub use parser::{read_stock_csv, read_stock_file, StockRow};
pub use validation::ValidationResult;

/// Load a stock file into a new ledger.
///
/// A missing file gives an empty ledger. Rows that cannot be loaded are listed in the
/// returned validation result instead of failing the whole load.
pub fn load_stock_file(
    path: &std::path::Path,
    config: LedgerConfig,
) -> Result<(Ledger, ValidationResult)> {
    if !path.exists() {
        tracing::info!("No stock file at {}, starting empty", path.display());
        return Ok((Ledger::new(config), ValidationResult::ok()));
    }

    let rows = read_stock_file(path)?;
    let (ledger, report) = Ledger::from_rows(config, &rows);

    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }

    Ok((ledger, report))
}

/// Write a ledger's stock table back to a file.
pub fn save_stock_file(path: &std::path::Path, ledger: &Ledger) -> Result<()> {
    write_stock_file(path, ledger.entries())?;
    tracing::debug!("Wrote {} entries to {}", ledger.entries().len(), path.display());
    Ok(())
}
