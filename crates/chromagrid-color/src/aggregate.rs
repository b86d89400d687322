//! Predominant-color reduction from a fine grid to a coarse cell grid.

use chromagrid_core::{ColorGrid, ColorLabel};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::ColorError;

/// Fraction of a cell's pixels the winning label must exceed.
pub const DEFAULT_MIN_MAJORITY_FRACTION: f64 = 0.15;

/// Order in which labels may overtake the current maximum. A label only
/// takes over on a strictly greater count, so earlier entries win ties.
pub const TIE_BREAK_ORDER: [ColorLabel; 6] = [
    ColorLabel::Red,
    ColorLabel::Blue,
    ColorLabel::Green,
    ColorLabel::Yellow,
    ColorLabel::White,
    ColorLabel::Black,
];

/// Number of cells along each axis of the reduced grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDivisions {
    pub x: usize,
    pub y: usize,
}

impl CellDivisions {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Source pixels per cell along x and y, if the divisions fit `width × height` exactly.
    pub fn cell_size(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        if self.x == 0 || self.y == 0 || width % self.x != 0 || height % self.y != 0 {
            return None;
        }
        Some((width / self.x, height / self.y))
    }
}

fn default_min_majority_fraction() -> f64 {
    DEFAULT_MIN_MAJORITY_FRACTION
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateParams {
    pub divisions: CellDivisions,
    /// A cell keeps its winning label only if the label's count exceeds
    /// `pixels_per_cell * min_majority_fraction`.
    #[serde(default = "default_min_majority_fraction")]
    pub min_majority_fraction: f64,
}

impl AggregateParams {
    pub fn new(divisions: CellDivisions) -> Self {
        Self {
            divisions,
            min_majority_fraction: DEFAULT_MIN_MAJORITY_FRACTION,
        }
    }
}

/// Per-label sample counts for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelHistogram {
    counts: [u32; 7],
}

impl LabelHistogram {
    #[inline]
    pub fn add(&mut self, label: ColorLabel) {
        self.counts[label.index()] += 1;
    }

    #[inline]
    pub fn count(&self, label: ColorLabel) -> u32 {
        self.counts[label.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Label with the strictly greatest count and that count.
    ///
    /// The undefined count is the starting baseline: a palette label has to
    /// beat it to be selected, otherwise the result is `Undefined` with the
    /// baseline count.
    pub fn predominant(&self) -> (ColorLabel, u32) {
        TIE_BREAK_ORDER.iter().fold(
            (ColorLabel::Undefined, self.count(ColorLabel::Undefined)),
            |(best, highest), &label| {
                let n = self.count(label);
                if n > highest {
                    (label, n)
                } else {
                    (best, highest)
                }
            },
        )
    }
}

/// Reduce `source` to a `divisions.x × divisions.y` grid of majority labels.
///
/// Each source cell `(x, y)` counts towards cell `(x / cell_w, y / cell_h)`.
/// A cell whose winning label does not clear the majority threshold is
/// forced to `Undefined`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(source, params),
        fields(x_div = params.divisions.x, y_div = params.divisions.y)
    )
)]
pub fn aggregate(source: &ColorGrid, params: &AggregateParams) -> Result<ColorGrid, ColorError> {
    let divisions = params.divisions;
    let (cell_w, cell_h) = divisions
        .cell_size(source.width(), source.height())
        .ok_or(ColorError::InvalidDivisions {
            x_div: divisions.x,
            y_div: divisions.y,
            width: source.width(),
            height: source.height(),
        })?;
    let fraction = params.min_majority_fraction;
    if !(0.0..=1.0).contains(&fraction) {
        return Err(ColorError::InvalidMajorityFraction(fraction));
    }

    let mut histograms = vec![LabelHistogram::default(); divisions.x * divisions.y];
    for (x, y, label) in source.iter_cells() {
        histograms[(y / cell_h) * divisions.x + x / cell_w].add(label);
    }

    let pixels_per_cell = (cell_w * cell_h) as f64;
    let threshold = pixels_per_cell * fraction;
    let labels: Vec<ColorLabel> = histograms
        .iter()
        .map(|hist| match hist.predominant() {
            (label, n) if f64::from(n) > threshold => label,
            _ => ColorLabel::Undefined,
        })
        .collect();

    let grid = ColorGrid::from_labels(divisions.x, divisions.y, labels)?;
    log::debug!(
        "aggregated {}x{} -> {}x{} cells ({} px/cell, threshold {:.2}), {} undefined",
        source.width(),
        source.height(),
        divisions.x,
        divisions.y,
        cell_w * cell_h,
        threshold,
        grid.count(ColorLabel::Undefined)
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 source split into 2x2 cells of 5x5 pixels; `fill` paints the
    /// first `n` pixels (row-major) of cell (0, 0).
    fn source_with_cell(fill: &[(ColorLabel, usize)]) -> ColorGrid {
        let mut grid = ColorGrid::new(10, 10).unwrap();
        let mut k = 0;
        for &(label, n) in fill {
            for _ in 0..n {
                grid.set(k % 5, k / 5, label);
                k += 1;
            }
        }
        grid
    }

    fn params_2x2() -> AggregateParams {
        AggregateParams::new(CellDivisions::new(2, 2))
    }

    #[test]
    fn strong_majority_keeps_label() {
        let src = source_with_cell(&[(ColorLabel::Red, 20)]);
        let out = aggregate(&src, &params_2x2()).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.get(0, 0), Some(ColorLabel::Red));
        assert_eq!(out.get(1, 0), Some(ColorLabel::Undefined));
        assert_eq!(out.get(1, 1), Some(ColorLabel::Undefined));
    }

    #[test]
    fn label_below_threshold_is_rejected() {
        let src = source_with_cell(&[(ColorLabel::Red, 10), (ColorLabel::Blue, 9)]);
        let params = AggregateParams {
            min_majority_fraction: 0.5,
            ..params_2x2()
        };
        // 10 > 6 undefined, but 10 <= 12.5.
        let out = aggregate(&src, &params).unwrap();
        assert_eq!(out.get(0, 0), Some(ColorLabel::Undefined));

        let out = aggregate(&src, &params_2x2()).unwrap();
        assert_eq!(out.get(0, 0), Some(ColorLabel::Red));
    }

    #[test]
    fn label_must_beat_undefined_baseline() {
        let src = source_with_cell(&[(ColorLabel::Green, 12)]);
        // 12 green vs 13 undefined.
        let out = aggregate(&src, &params_2x2()).unwrap();
        assert_eq!(out.get(0, 0), Some(ColorLabel::Undefined));
    }

    #[test]
    fn ties_keep_the_earlier_label() {
        let mut hist = LabelHistogram::default();
        for _ in 0..9 {
            hist.add(ColorLabel::Green);
            hist.add(ColorLabel::Blue);
        }
        assert_eq!(hist.predominant(), (ColorLabel::Blue, 9));

        for _ in 0..9 {
            hist.add(ColorLabel::Red);
        }
        assert_eq!(hist.predominant(), (ColorLabel::Red, 9));
        assert_eq!(hist.total(), 27);
    }

    #[test]
    fn undefined_cell_does_not_inherit_previous_cell() {
        let mut src = ColorGrid::filled(4, 2, ColorLabel::Yellow).unwrap();
        for y in 0..2 {
            for x in 2..4 {
                src.set(x, y, ColorLabel::Undefined);
            }
        }
        let out = aggregate(&src, &AggregateParams::new(CellDivisions::new(2, 1))).unwrap();
        assert_eq!(out.row(0).unwrap(), &[ColorLabel::Yellow, ColorLabel::Undefined]);
    }

    #[test]
    fn rejects_uneven_or_zero_divisions() {
        let src = ColorGrid::new(10, 10).unwrap();
        for divisions in [
            CellDivisions::new(3, 2),
            CellDivisions::new(0, 2),
            CellDivisions::new(2, 20),
        ] {
            let err = aggregate(&src, &AggregateParams::new(divisions)).unwrap_err();
            assert!(matches!(err, ColorError::InvalidDivisions { .. }), "{divisions:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        let src = ColorGrid::new(4, 4).unwrap();
        let params = AggregateParams {
            min_majority_fraction: 1.5,
            ..AggregateParams::new(CellDivisions::new(2, 2))
        };
        assert_eq!(
            aggregate(&src, &params),
            Err(ColorError::InvalidMajorityFraction(1.5))
        );
    }

    #[test]
    fn params_default_fraction_when_missing() {
        let params: AggregateParams =
            serde_json::from_str(r#"{"divisions":{"x":4,"y":3}}"#).unwrap();
        assert_eq!(params.divisions, CellDivisions::new(4, 3));
        assert_eq!(params.min_majority_fraction, DEFAULT_MIN_MAJORITY_FRACTION);
    }
}
