//! Single-orientation cutting: rows along the length first, then columns across the width.

use super::{check_sizes, does_not_fit, CutLayout};
use crate::config::{float_cmp, RemnantPolicy, SheetSize};
use crate::error::Result;
use tracing::debug;

/// Cut `piece` from `base` in the given orientation only.
///
/// The length axis is cut first: whatever is left past the last full row becomes one
/// remnant spanning the whole base width. The strip left along the width axis is then
/// split according to `policy`. A piece that does not fit as given is an error; the
/// rotated orientation is not tried.
pub fn sequential_cut(
    base: SheetSize,
    piece: SheetSize,
    policy: RemnantPolicy,
) -> Result<CutLayout> {
    check_sizes(base, piece)?;

    let mut layout = CutLayout::grid(base, piece, false)?;
    if !layout.fits() {
        return Err(does_not_fit(base, piece));
    }

    if float_cmp::exceeds_tolerance(layout.leftover_length) {
        layout
            .remnants
            .add(base.width, layout.leftover_length, 1);
    }

    if float_cmp::exceeds_tolerance(layout.leftover_width) {
        match policy {
            RemnantPolicy::SpanCutLength => layout.remnants.add(
                layout.leftover_width,
                piece.length,
                u64::from(layout.pieces_along_length),
            ),
            RemnantPolicy::SpanBaseLength => {
                layout
                    .remnants
                    .add(layout.leftover_width, base.length, 1)
            }
        }
    }

    debug!(
        "Sequential cut {} from {}: {} per sheet, {} remnant size(s)",
        piece,
        base,
        layout.yield_per_sheet,
        layout.remnants.len()
    );

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use pretty_assertions::assert_eq;

    fn base() -> SheetSize {
        SheetSize::new(1680.0, 2600.0)
    }

    #[test]
    fn test_reference_example() {
        let layout = sequential_cut(
            base(),
            SheetSize::new(400.0, 300.0),
            RemnantPolicy::SpanCutLength,
        )
        .expect("piece fits");
        assert_eq!(layout.pieces_along_length, 8);
        assert_eq!(layout.pieces_along_width, 4);
        assert_eq!(layout.yield_per_sheet, 32);
        assert_eq!(layout.remnants.len(), 2);
        assert_eq!(layout.remnants.count_of(1680.0, 200.0), Some(1));
        assert_eq!(layout.remnants.count_of(80.0, 300.0), Some(8));
        assert!(!layout.rotated);
    }

    #[test]
    fn test_span_base_length_policy() {
        let layout = sequential_cut(
            base(),
            SheetSize::new(400.0, 300.0),
            RemnantPolicy::SpanBaseLength,
        )
        .expect("piece fits");
        assert_eq!(layout.remnants.count_of(1680.0, 200.0), Some(1));
        assert_eq!(layout.remnants.count_of(80.0, 2600.0), Some(1));
        assert_eq!(layout.remnants.count_of(80.0, 300.0), None);
    }

    #[test]
    fn test_exact_fit_has_no_remnants() {
        let layout = sequential_cut(
            SheetSize::new(1200.0, 2400.0),
            SheetSize::new(400.0, 300.0),
            RemnantPolicy::SpanCutLength,
        )
        .expect("piece fits");
        assert_eq!(layout.yield_per_sheet, 24);
        assert!(layout.remnants.is_empty());
        assert_eq!(layout.efficiency_percent(), 100.0);
    }

    #[test]
    fn test_leftover_within_tolerance_suppressed() {
        let layout = sequential_cut(
            SheetSize::new(1200.05, 2400.08),
            SheetSize::new(400.0, 300.0),
            RemnantPolicy::SpanCutLength,
        )
        .expect("piece fits");
        assert!(layout.remnants.is_empty());
    }

    #[test]
    fn test_only_length_leftover() {
        let layout = sequential_cut(
            SheetSize::new(1600.0, 2600.0),
            SheetSize::new(400.0, 300.0),
            RemnantPolicy::SpanCutLength,
        )
        .expect("piece fits");
        assert_eq!(layout.remnants.len(), 1);
        assert_eq!(layout.remnants.count_of(1600.0, 200.0), Some(1));
    }

    #[test]
    fn test_does_not_rotate() {
        // Fits rotated (300 wide, 1700 long) but not as given.
        let result = sequential_cut(
            base(),
            SheetSize::new(1700.0, 300.0),
            RemnantPolicy::SpanCutLength,
        );
        match result {
            Err(StockError::DoesNotFit {
                cut_width,
                base_width,
                ..
            }) => {
                assert_eq!(cut_width, 1700.0);
                assert_eq!(base_width, 1680.0);
            }
            other => panic!("Expected DoesNotFit, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let result = sequential_cut(
            base(),
            SheetSize::new(0.0, 300.0),
            RemnantPolicy::SpanCutLength,
        );
        assert!(matches!(result, Err(StockError::Validation { .. })));
    }

    #[test]
    fn test_piece_count_overflow_rejected() {
        // 100000 x 100000 pieces per sheet does not fit a u32
        let result = sequential_cut(
            SheetSize::new(100_000.0, 100_000.0),
            SheetSize::new(1.0, 1.0),
            RemnantPolicy::SpanCutLength,
        );
        match result {
            Err(StockError::Validation { field, .. }) => assert_eq!(field, "cut_size"),
            other => panic!("Expected Validation, got {:?}", other),
        }

        // 65536 x 65535 still fits
        let layout = sequential_cut(
            SheetSize::new(65_535.0, 65_536.0),
            SheetSize::new(1.0, 1.0),
            RemnantPolicy::SpanCutLength,
        )
        .expect("largest countable grid");
        assert_eq!(layout.yield_per_sheet, 65_536 * 65_535);
    }

    #[test]
    fn test_area_conservation() {
        let cases = [
            (1680.0, 2600.0, 400.0, 300.0),
            (1000.0, 1000.0, 333.0, 150.0),
            (2100.0, 1550.0, 710.0, 420.5),
            (950.5, 3000.0, 120.25, 777.0),
        ];
        for (bw, bl, pw, pl) in cases {
            let layout = sequential_cut(
                SheetSize::new(bw, bl),
                SheetSize::new(pw, pl),
                RemnantPolicy::SpanCutLength,
            )
            .expect("piece fits");
            let covered = layout.used_area() + layout.remnants.total_area();
            assert!(
                (covered - bw * bl).abs() < 1e-6 * bw * bl,
                "area not conserved for {}x{} / {}x{}",
                bw,
                bl,
                pw,
                pl
            );
            assert!(layout.waste_area() < 1e-3);
        }
    }

    #[test]
    fn test_yield_formula_holds() {
        for (bw, bl, pw, pl) in [
            (1680.0_f64, 2600.0_f64, 400.0_f64, 300.0_f64),
            (500.0, 500.0, 500.0, 500.0),
            (1234.0, 987.0, 11.0, 13.0),
        ] {
            let layout = sequential_cut(
                SheetSize::new(bw, bl),
                SheetSize::new(pw, pl),
                RemnantPolicy::SpanCutLength,
            )
            .expect("piece fits");
            let expected = (bl / pl).floor() as u32 * (bw / pw).floor() as u32;
            assert_eq!(layout.yield_per_sheet, expected);
            assert!(layout.yield_per_sheet > 0);
        }
    }
}
