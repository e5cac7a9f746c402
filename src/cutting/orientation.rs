//! Best-of-two-orientations cutting against a fixed reference sheet.

use super::{check_sizes, does_not_fit, CutLayout};
use crate::config::{float_cmp, SheetSize};
use crate::error::Result;
use tracing::debug;

/// Cut `piece` from `base` both as given and rotated, keeping the higher yield.
///
/// Ties keep the piece as given. The chosen layout carries one remnant per axis with a
/// count of 1: the strip past the last row (full base width) and the strip beside the
/// columns (as long as the rows that were cut).
pub fn best_orientation_cut(base: SheetSize, piece: SheetSize) -> Result<CutLayout> {
    check_sizes(base, piece)?;

    let as_given = CutLayout::grid(base, piece, false)?;
    let rotated = CutLayout::grid(base, piece.rotated(), true)?;

    debug!(
        "Orientation yields for {} on {}: as given {}, rotated {}",
        piece, base, as_given.yield_per_sheet, rotated.yield_per_sheet
    );

    let mut layout = if rotated.yield_per_sheet > as_given.yield_per_sheet {
        rotated
    } else {
        as_given
    };

    if !layout.fits() {
        return Err(does_not_fit(base, piece));
    }

    if float_cmp::exceeds_tolerance(layout.leftover_length) {
        layout.remnants.add(base.width, layout.leftover_length, 1);
    }

    if float_cmp::exceeds_tolerance(layout.leftover_width) {
        let cut_span = f64::from(layout.pieces_along_length) * layout.piece.length;
        layout.remnants.add(layout.leftover_width, cut_span, 1);
    }

    Ok(layout)
}
