//! Rotation estimate from the two bottom fiducial markers.

use std::ops::Range;

use chromagrid_core::{CellCoords, ColorGrid, ColorLabel};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::scan::{BandScan, Probe};
use crate::{CalibrationError, CalibrationParams};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation needed to bring the panel back to axis alignment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Magnitude in radians, never negative.
    pub angle: f64,
    pub direction: RotationDirection,
}

impl Rotation {
    pub const NONE: Rotation = Rotation {
        angle: 0.0,
        direction: RotationDirection::CounterClockwise,
    };

    /// Angle with counter-clockwise positive.
    pub fn signed_angle(&self) -> f64 {
        match self.direction {
            RotationDirection::CounterClockwise => self.angle,
            RotationDirection::Clockwise => -self.angle,
        }
    }

    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

/// Anchor points of the two bottom markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerAnchors {
    pub bottom_left: CellCoords,
    pub bottom_right: CellCoords,
    /// `false` when the left half had no anchor and the fallback was used.
    pub left_found: bool,
    pub right_found: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationEstimate {
    pub rotation: Rotation,
    pub anchors: MarkerAnchors,
    /// Last row of the top marker band, where the anchor search starts.
    pub top_row: usize,
}

/// Locate the bottom-left and bottom-right markers and derive the rotation.
///
/// The grid is scanned top-down for the first marker band; its last row is
/// the start of the anchor search. In each half of the grid the anchor is
/// the first row with a marker cell directly above another marker cell
/// (rightmost such column in that row). A half without anchor falls back
/// to `(0, top)` on the left and `(width / 2, top)` on the right.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn detect_rotation(
    grid: &ColorGrid,
    params: &CalibrationParams,
) -> Result<RotationEstimate, CalibrationError> {
    let marker = params.marker;
    let top_row = find_top_band_row(grid, marker, params.rotation.max_trailing_empty_rows);

    let half = grid.width() / 2;
    let left = find_anchor(grid, marker, top_row, 0..half);
    let right = find_anchor(grid, marker, top_row, half..grid.width());

    let to_i32 = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
    let anchors = MarkerAnchors {
        bottom_left: left.unwrap_or(CellCoords::new(0, to_i32(top_row))),
        bottom_right: right.unwrap_or(CellCoords::new(to_i32(half), to_i32(top_row))),
        left_found: left.is_some(),
        right_found: right.is_some(),
    };
    if !anchors.left_found || !anchors.right_found {
        log::warn!(
            "bottom marker anchor missing (left found: {}, right found: {}), using fallback",
            anchors.left_found,
            anchors.right_found
        );
    }

    let rotation = rotation_from_anchors(anchors.bottom_left, anchors.bottom_right)?;
    log::debug!(
        "rotation {:.3} deg {:?} from anchors {:?} / {:?} (top row {})",
        rotation.degrees(),
        rotation.direction,
        anchors.bottom_left,
        anchors.bottom_right,
        top_row
    );

    Ok(RotationEstimate {
        rotation,
        anchors,
        top_row,
    })
}

/// Rotation implied by two anchor points.
///
/// Fails when the right anchor lies left of the left one. The right marker
/// sitting higher in the image than the left one means a clockwise
/// correction.
pub fn rotation_from_anchors(
    bottom_left: CellCoords,
    bottom_right: CellCoords,
) -> Result<Rotation, CalibrationError> {
    let dx = bottom_right.x - bottom_left.x;
    let dy = bottom_left.y - bottom_right.y;
    if dx < 0 {
        return Err(CalibrationError::Rotation {
            left_x: bottom_left.x,
            right_x: bottom_right.x,
        });
    }

    let angle = if dy == 0 {
        0.0
    } else {
        // dx == 0 yields atan(inf) = pi/2.
        (f64::from(dy.abs()) / f64::from(dx)).atan()
    };
    let direction = if dy > 0 {
        RotationDirection::Clockwise
    } else {
        RotationDirection::CounterClockwise
    };
    Ok(Rotation { angle, direction })
}

fn find_top_band_row(grid: &ColorGrid, marker: ColorLabel, max_trailing: usize) -> usize {
    let probes = (0..grid.height()).map(|y| {
        let probe = if grid.row_contains(y, marker) {
            Probe::Hit
        } else {
            Probe::Miss
        };
        (y, probe)
    });
    BandScan::new(max_trailing)
        .run(probes)
        .last_hit()
        .unwrap_or(0)
}

fn find_anchor(
    grid: &ColorGrid,
    marker: ColorLabel,
    from_row: usize,
    columns: Range<usize>,
) -> Option<CellCoords> {
    let is_marker = |x: usize, y: usize| grid.get(x, y) == Some(marker);
    (from_row..grid.height().saturating_sub(1)).find_map(|y| {
        columns
            .clone()
            .rev()
            .find(|&x| is_marker(x, y) && is_marker(x, y + 1))
            .map(|x| CellCoords::new(x as i32, y as i32))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const M: ColorLabel = ColorLabel::Black;

    /// 16x16 grid with a top marker band on rows 1-2 and two-row bottom
    /// markers whose upper cells sit at `left` and `right`.
    fn panel(left: (usize, usize), right: (usize, usize)) -> ColorGrid {
        let mut grid = ColorGrid::filled(16, 16, ColorLabel::White).unwrap();
        for y in 1..=2 {
            for x in [1, 2, 12, 13] {
                grid.set(x, y, M);
            }
        }
        for (x, y) in [left, right] {
            grid.set(x, y, M);
            grid.set(x, y + 1, M);
        }
        grid
    }

    #[test]
    fn level_markers_need_no_rotation() {
        let grid = panel((2, 10), (10, 10));
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert_eq!(est.top_row, 2);
        assert_eq!(est.anchors.bottom_left, CellCoords::new(2, 10));
        assert_eq!(est.anchors.bottom_right, CellCoords::new(10, 10));
        assert_eq!(est.rotation.angle, 0.0);
    }

    #[test]
    fn higher_right_marker_rotates_clockwise() {
        let grid = panel((2, 10), (10, 8));
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert_eq!(est.anchors.bottom_right, CellCoords::new(10, 8));
        assert_eq!(est.rotation.direction, RotationDirection::Clockwise);
        assert_relative_eq!(est.rotation.angle, (2.0f64 / 8.0).atan());
        assert_relative_eq!(est.rotation.signed_angle(), -(2.0f64 / 8.0).atan());
    }

    #[test]
    fn lower_right_marker_rotates_counter_clockwise() {
        let grid = panel((2, 8), (10, 11));
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert_eq!(est.rotation.direction, RotationDirection::CounterClockwise);
        assert_relative_eq!(est.rotation.angle, (3.0f64 / 8.0).atan());
    }

    #[test]
    fn crossed_anchors_fail() {
        let err = rotation_from_anchors(CellCoords::new(10, 5), CellCoords::new(4, 5)).unwrap_err();
        assert_eq!(
            err,
            CalibrationError::Rotation {
                left_x: 10,
                right_x: 4
            }
        );
    }

    #[test]
    fn rightmost_column_of_first_row_is_the_anchor() {
        let mut grid = panel((2, 10), (10, 10));
        grid.set(5, 10, M);
        grid.set(5, 11, M);
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert_eq!(est.anchors.bottom_left, CellCoords::new(5, 10));
    }

    #[test]
    fn missing_anchor_uses_fallback() {
        let mut grid = panel((2, 10), (10, 10));
        grid.set(10, 10, ColorLabel::White);
        grid.set(10, 11, ColorLabel::White);
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert!(est.anchors.left_found);
        assert!(!est.anchors.right_found);
        assert_eq!(est.anchors.bottom_right, CellCoords::new(8, 2));
        assert_eq!(est.rotation.direction, RotationDirection::Clockwise);
    }

    #[test]
    fn single_empty_row_does_not_end_top_band() {
        let mut grid = panel((2, 10), (10, 10));
        // Band rows 1-2, gap on row 3, band continues on row 4.
        grid.set(1, 4, M);
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert_eq!(est.top_row, 4);
    }

    #[test]
    fn empty_grid_yields_zero_rotation() {
        let grid = ColorGrid::filled(8, 8, ColorLabel::White).unwrap();
        let est = detect_rotation(&grid, &CalibrationParams::default()).unwrap();
        assert_eq!(est.rotation.angle, 0.0);
        assert!(!est.anchors.left_found && !est.anchors.right_found);
    }
}
