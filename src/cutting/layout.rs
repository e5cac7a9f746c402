//! Result of laying pieces out on one base sheet.

use crate::config::{float_cmp, SheetSize};
use crate::error::{Result, StockError};
use crate::model::RemnantSet;
use serde::Serialize;

/// How pieces and remnants come out of a single base sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutLayout {
    /// Base sheet (mm).
    pub base: SheetSize,
    /// Piece as placed on the sheet (mm), after any rotation.
    pub piece: SheetSize,
    /// Whether the piece was turned 90 degrees from the requested size.
    pub rotated: bool,
    pub pieces_along_length: u32,
    pub pieces_along_width: u32,
    pub yield_per_sheet: u32,
    /// Leftover along the length axis (mm).
    pub leftover_length: f64,
    /// Leftover along the width axis (mm).
    pub leftover_width: f64,
    /// Remnants per base sheet.
    pub remnants: RemnantSet,
}

impl CutLayout {
    /// Lay out pieces without deciding on remnants yet.
    ///
    /// Fails when the piece count per sheet does not fit in a `u32`.
    pub(crate) fn grid(base: SheetSize, piece: SheetSize, rotated: bool) -> Result<Self> {
        let too_many = || {
            StockError::validation(
                "cut_size",
                format!(
                    "{} on {} gives more pieces per sheet than can be counted",
                    piece, base
                ),
            )
        };

        let pieces_along_length =
            float_cmp::whole_fits(base.length, piece.length).ok_or_else(too_many)?;
        let pieces_along_width =
            float_cmp::whole_fits(base.width, piece.width).ok_or_else(too_many)?;
        let yield_per_sheet = pieces_along_length
            .checked_mul(pieces_along_width)
            .ok_or_else(too_many)?;

        Ok(Self {
            base,
            piece,
            rotated,
            pieces_along_length,
            pieces_along_width,
            yield_per_sheet,
            leftover_length: base.length - f64::from(pieces_along_length) * piece.length,
            leftover_width: base.width - f64::from(pieces_along_width) * piece.width,
            remnants: RemnantSet::new(),
        })
    }

    /// Whether any piece fits.
    pub fn fits(&self) -> bool {
        self.yield_per_sheet > 0
    }

    /// Area of the finished pieces on one sheet (mm²).
    pub fn used_area(&self) -> f64 {
        self.piece.area() * f64::from(self.yield_per_sheet)
    }

    /// Area of one sheet that is neither a piece nor a tracked remnant (mm²).
    pub fn waste_area(&self) -> f64 {
        (self.base.area() - self.used_area() - self.remnants.total_area()).max(0.0)
    }

    /// Share of the base sheet turned into finished pieces, in percent.
    pub fn efficiency_percent(&self) -> f64 {
        self.used_area() / self.base.area() * 100.0
    }
}

impl std::fmt::Display for CutLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {}: {} x {} = {} per sheet ({:.1}%)",
            self.piece,
            self.base,
            self.pieces_along_length,
            self.pieces_along_width,
            self.yield_per_sheet,
            self.efficiency_percent()
        )?;
        if self.rotated {
            write!(f, " rotated")?;
        }
        Ok(())
    }
}
