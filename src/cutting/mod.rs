//! Yield and remnant calculation for cutting pieces out of a base sheet.

mod layout;
mod orientation;
mod sequential;

pub use layout::CutLayout;
pub use orientation::best_orientation_cut;
pub use sequential::sequential_cut;

use crate::config::SheetSize;
use crate::error::{Result, StockError};

/// Reject sizes that would make the piece counts meaningless.
fn check_sizes(base: SheetSize, piece: SheetSize) -> Result<()> {
    for (field, value) in [
        ("base_width", base.width),
        ("base_length", base.length),
        ("cut_width", piece.width),
        ("cut_length", piece.length),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(StockError::validation(
                field,
                format!("must be a positive length, got {}", value),
            ));
        }
    }
    Ok(())
}

fn does_not_fit(base: SheetSize, piece: SheetSize) -> StockError {
    StockError::DoesNotFit {
        cut_width: piece.width,
        cut_length: piece.length,
        base_width: base.width,
        base_length: base.length,
    }
}
