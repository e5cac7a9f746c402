//! Two-phase order transaction: compute a proposal, then commit it.

use super::Ledger;
use crate::config::{CONV_M_MM, SheetSize};
use crate::cutting::{best_orientation_cut, sequential_cut, CutLayout};
use crate::error::{Result, StockError};
use crate::model::{
    remnant_label, CutStrategy, OrderRecord, OrderRequest, RemnantSpec, StockEntry, StockKey,
};
use crate::validation::validate_order_request;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Not enough sheets on hand to cover an order. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockShortage {
    pub key: StockKey,
    pub on_hand: i64,
    pub required: i64,
}

impl StockShortage {
    /// Sheets missing to cover the order.
    pub fn shortfall(&self) -> i64 {
        self.required - self.on_hand.max(0)
    }
}

impl std::fmt::Display for StockShortage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Insufficient stock for {}: {} sheet(s) on hand, {} required",
            self.key, self.on_hand, self.required
        )
    }
}

/// The full effect of an order, computed without touching the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposedTransaction {
    pub request: OrderRequest,
    /// Model label of the source entry.
    pub stock_model: String,
    pub paper_type: String,
    pub basis_weight: f64,
    /// Per-sheet layout, remnants counted per base sheet.
    pub layout: CutLayout,
    pub sheets_needed: u32,
    /// Remnants for the whole order.
    pub remnants: Vec<RemnantSpec>,
    /// Weight of the finished pieces in kg.
    pub finished_weight_kg: f64,
    /// Set when the source entry holds fewer sheets than needed.
    pub shortage: Option<StockShortage>,
}

impl ProposedTransaction {
    /// Pieces produced beyond the requested quantity.
    pub fn surplus_pieces(&self) -> u64 {
        u64::from(self.sheets_needed) * u64::from(self.layout.yield_per_sheet)
            - u64::from(self.request.quantity)
    }
}

/// Result of committing an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitOutcome {
    /// Entries changed by the commit, source first, after the change.
    pub touched: Vec<StockEntry>,
    /// The record appended to the order history.
    pub record: OrderRecord,
}

fn cut_layout(ledger: &Ledger, entry: &StockEntry, request: &OrderRequest) -> Result<CutLayout> {
    let piece = SheetSize::new(request.cut_width_mm(), request.cut_length_mm());
    match request.strategy {
        CutStrategy::Sequential => sequential_cut(
            SheetSize::new(entry.width, entry.length),
            piece,
            ledger.config.remnant_policy,
        ),
        CutStrategy::ReferenceSheet => best_orientation_cut(ledger.config.reference_sheet, piece),
    }
}

impl Ledger {
    /// Work out what an order would consume and produce.
    ///
    /// Nothing in the ledger changes; calling this again with the same request against the
    /// same ledger gives an equal proposal.
    pub fn compute_order(&self, request: &OrderRequest) -> Result<ProposedTransaction> {
        validate_order_request(request)?;

        let idx = self.find_required(&request.stock_key)?;
        let entry = &self.entries[idx];

        let layout = cut_layout(self, entry, request)?;
        if layout.yield_per_sheet == 0 {
            return Err(StockError::DoesNotFit {
                cut_width: request.cut_width_mm(),
                cut_length: request.cut_length_mm(),
                base_width: layout.base.width,
                base_length: layout.base.length,
            });
        }

        let sheets_needed = request.quantity.div_ceil(layout.yield_per_sheet);
        let remnants = layout.remnants.scaled(u64::from(sheets_needed)).to_vec();

        let cut_area_m2 =
            (request.cut_width_mm() / CONV_M_MM) * (request.cut_length_mm() / CONV_M_MM);
        let finished_weight_kg =
            cut_area_m2 * (entry.basis_weight / 1000.0) * f64::from(request.quantity);

        let required = i64::from(sheets_needed);
        let shortage = (entry.sheet_count() < required).then(|| StockShortage {
            key: request.stock_key.clone(),
            on_hand: entry.sheet_count(),
            required,
        });

        debug!(
            "Order {}: {} piece(s) at {} per sheet needs {} sheet(s) of {}",
            request.order_ref,
            request.quantity,
            layout.yield_per_sheet,
            sheets_needed,
            request.stock_key
        );

        Ok(ProposedTransaction {
            request: request.clone(),
            stock_model: entry.model.clone(),
            paper_type: entry.paper_type.clone(),
            basis_weight: entry.basis_weight,
            layout,
            sheets_needed,
            remnants,
            finished_weight_kg,
            shortage,
        })
    }

    /// Apply a proposal, stamping the order record with the current local time.
    pub fn commit_order(&mut self, proposal: ProposedTransaction) -> Result<CommitOutcome> {
        self.commit_order_at(proposal, Local::now().naive_local())
    }

    /// Apply a proposal: consume base sheets, credit remnants, log the order.
    ///
    /// The source entry is resolved before anything changes, so a failed commit leaves
    /// the ledger as it was. Sheet counts may go negative.
    pub fn commit_order_at(
        &mut self,
        proposal: ProposedTransaction,
        timestamp: NaiveDateTime,
    ) -> Result<CommitOutcome> {
        let source_idx = self.find_required(&proposal.request.stock_key)?;

        let consumed = i64::from(proposal.sheets_needed);
        self.entries[source_idx].adjust_quantity(-consumed);
        let mut touched = vec![self.entries[source_idx].clone()];

        if self.entries[source_idx].sheet_count() < 0 {
            warn!(
                "{} is now at {} sheet(s) after order {}",
                proposal.request.stock_key,
                self.entries[source_idx].sheet_count(),
                proposal.request.order_ref
            );
        }

        for remnant in &proposal.remnants {
            let count = i64::try_from(remnant.count).unwrap_or(i64::MAX);
            let idx = match self.position_by_dimensions(
                remnant.width,
                remnant.length,
                &proposal.paper_type,
                proposal.basis_weight,
            ) {
                Some(idx) => {
                    self.entries[idx].adjust_quantity(count);
                    idx
                }
                None => {
                    let mut entry = StockEntry::new_remnant(
                        remnant.width,
                        remnant.length,
                        proposal.paper_type.as_str(),
                        proposal.basis_weight,
                        count,
                        self.config.remnant_placeholder_price,
                    );
                    // A hand-made entry may already carry the label with another size
                    let mut suffix = 2;
                    while self.position(&self.key_of(&entry)).is_some() {
                        entry.model = format!(
                            "{} #{}",
                            remnant_label(remnant.width, remnant.length),
                            suffix
                        );
                        suffix += 1;
                    }
                    warn!(
                        "New remnant {} {} {}g priced at placeholder {}/kg",
                        entry.model,
                        proposal.paper_type,
                        proposal.basis_weight,
                        self.config.remnant_placeholder_price
                    );
                    self.entries.push(entry);
                    self.entries.len() - 1
                }
            };
            touched.push(self.entries[idx].clone());
        }

        let request = proposal.request;
        let record = OrderRecord {
            cut_width: request.cut_width_mm(),
            cut_length: request.cut_length_mm(),
            order_ref: request.order_ref,
            customer: request.customer,
            description: request.description,
            order_value: request.order_value,
            quantity: request.quantity,
            stock_key: request.stock_key,
            stock_model: proposal.stock_model,
            paper_type: proposal.paper_type,
            basis_weight: proposal.basis_weight,
            sheets_consumed: proposal.sheets_needed,
            remnants: proposal.remnants,
            finished_weight_kg: proposal.finished_weight_kg,
            timestamp,
        };
        self.orders.push(record.clone());

        info!(
            "Committed order {}: {} sheet(s) consumed, {} remnant size(s) credited",
            record.order_ref,
            record.sheets_consumed,
            record.remnants.len()
        );

        Ok(CommitOutcome { touched, record })
    }
}
