//! Inventory totals for reporting.

use super::Ledger;
use crate::model::{EntryOrigin, StockKey};
use serde::Serialize;

/// Totals over the whole stock table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventorySummary {
    pub entry_count: usize,
    pub remnant_entry_count: usize,
    /// Sum of sheet counts, negative counts included.
    pub total_sheets: i64,
    pub total_weight_kg: f64,
    pub total_value: f64,
    /// Entries at zero or below.
    pub depleted: Vec<StockKey>,
    /// Remnant entries still carrying the placeholder price.
    pub placeholder_priced: Vec<StockKey>,
    pub order_count: usize,
}

impl Ledger {
    /// Compute inventory totals.
    pub fn summary(&self) -> InventorySummary {
        let mut summary = InventorySummary {
            entry_count: self.entries.len(),
            order_count: self.orders.len(),
            ..Default::default()
        };

        for entry in &self.entries {
            summary.total_sheets += entry.sheet_count();
            summary.total_weight_kg += entry.total_weight_kg();
            summary.total_value += entry.total_value();

            if entry.origin == EntryOrigin::Remnant {
                summary.remnant_entry_count += 1;
            }
            if entry.sheet_count() <= 0 {
                summary.depleted.push(self.key_of(entry));
            }
            if entry.price_is_placeholder {
                summary.placeholder_priced.push(self.key_of(entry));
            }
        }

        summary
    }
}

impl std::fmt::Display for InventorySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Entries: {} ({} remnant)",
            self.entry_count, self.remnant_entry_count
        )?;
        writeln!(f, "Sheets: {}", self.total_sheets)?;
        writeln!(f, "Weight: {:.3} kg", self.total_weight_kg)?;
        writeln!(f, "Value: {:.2}", self.total_value)?;
        writeln!(f, "Orders: {}", self.order_count)?;
        for key in &self.depleted {
            writeln!(f, "Depleted: {}", key)?;
        }
        for key in &self.placeholder_priced {
            writeln!(f, "Placeholder price: {}", key)?;
        }
        Ok(())
    }
}
