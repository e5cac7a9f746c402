//! The stock ledger: stock entries, order history and the order transaction.

mod summary;
mod transaction;

pub use summary::InventorySummary;
pub use transaction::{CommitOutcome, ProposedTransaction, StockShortage};

use crate::config::{LedgerConfig, REMNANT_LABEL_PREFIX};
use crate::error::{Result, StockError};
use crate::model::{EntryOrigin, OrderRecord, StockEntry, StockInput, StockKey};
use crate::parser::StockRow;
use crate::validation::{validate_stock_input, validate_stock_rows, ValidationResult};
use tracing::{debug, warn};

/// In-memory stock table and append-only order log.
///
/// All mutation goes through `&mut self`, so a ledger has exactly one writer at a time.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    config: LedgerConfig,
    entries: Vec<StockEntry>,
    orders: Vec<OrderRecord>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Build a ledger from imported stock rows.
    ///
    /// Rows with missing or out-of-range values are skipped and reported; the rest are
    /// loaded. Rows repeating an identity are merged by adding their sheet counts.
    pub fn from_rows(config: LedgerConfig, rows: &[StockRow]) -> (Self, ValidationResult) {
        let mut ledger = Self::new(config);
        let mut report = validate_stock_rows(rows);

        for row in rows {
            let Some(input) = row.to_input() else {
                continue;
            };
            if validate_stock_input(&input).is_err() {
                continue;
            }

            let mut entry = StockEntry::from_input(&input);
            if entry.model.starts_with(REMNANT_LABEL_PREFIX) {
                entry.origin = EntryOrigin::Remnant;
                entry.price_is_placeholder =
                    entry.price_per_kg() <= ledger.config.remnant_placeholder_price;
            }

            let key = entry.key(ledger.config.match_mode);
            match ledger.position(&key) {
                Some(idx) => {
                    report.add_warning(format!(
                        "Line {}: duplicate entry {} merged",
                        row.line, key
                    ));
                    ledger.entries[idx].adjust_quantity(entry.sheet_count());
                }
                None => ledger.entries.push(entry),
            }
        }

        if !report.passed {
            for err in &report.errors {
                warn!("Skipped stock row: {}", err);
            }
        }
        debug!("Loaded {} stock entries", ledger.entries.len());

        (ledger, report)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Stock entries in insertion order.
    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    /// Confirmed orders, oldest first.
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    /// Identity key of an entry under this ledger's match mode.
    pub fn key_of(&self, entry: &StockEntry) -> StockKey {
        entry.key(self.config.match_mode)
    }

    fn position(&self, key: &StockKey) -> Option<usize> {
        self.entries.iter().position(|e| self.key_of(e) == *key)
    }

    /// Find an entry by identity key.
    pub fn find(&self, key: &StockKey) -> Option<&StockEntry> {
        self.position(key).map(|idx| &self.entries[idx])
    }

    fn find_required(&self, key: &StockKey) -> Result<usize> {
        self.position(key).ok_or_else(|| StockError::NotFound {
            key: key.to_string(),
        })
    }

    /// Index of an entry holding the given size, paper and basis weight.
    fn position_by_dimensions(
        &self,
        width: f64,
        length: f64,
        paper_type: &str,
        basis_weight: f64,
    ) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.matches_dimensions(width, length, paper_type, basis_weight))
    }

    /// Add sheets to an existing entry, or create the entry.
    ///
    /// An existing entry keeps its own price; the input price only applies to new entries.
    pub fn add_or_update_stock(&mut self, input: &StockInput) -> Result<StockEntry> {
        validate_stock_input(input)?;

        let candidate = StockEntry::from_input(input);
        let key = self.key_of(&candidate);

        let idx = match self.position(&key) {
            Some(idx) => {
                self.entries[idx].adjust_quantity(input.quantity);
                debug!(
                    "Updated {}: {:+} sheet(s), now {}",
                    key,
                    input.quantity,
                    self.entries[idx].sheet_count()
                );
                idx
            }
            None => {
                debug!("Created {} with {} sheet(s)", key, input.quantity);
                self.entries.push(candidate);
                self.entries.len() - 1
            }
        };

        Ok(self.entries[idx].clone())
    }

    /// Correct the price of an entry, e.g. one created from remnants.
    pub fn set_price(&mut self, key: &StockKey, price_per_kg: f64) -> Result<StockEntry> {
        if !price_per_kg.is_finite() || price_per_kg <= 0.0 {
            return Err(StockError::validation(
                "price_per_kg",
                format!("must be greater than zero, got {}", price_per_kg),
            ));
        }
        let idx = self.find_required(key)?;
        self.entries[idx].set_price(price_per_kg);
        Ok(self.entries[idx].clone())
    }
}
