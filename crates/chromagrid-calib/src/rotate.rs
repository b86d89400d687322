//! Discrete grid rotation.

use chromagrid_core::ColorGrid;
use nalgebra::{Point2, Rotation2};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::Rotation;

/// Rotate `grid` by `rotation`, returning a grid of the same size.
///
/// Forward mapping: each source cell `(i, j)` is rotated as the point
/// `(i, height - j)`, truncated, and written only if the destination lies
/// inside the grid. Destination cells nobody writes stay `Undefined`. The
/// result is flipped vertically once, as the last step, to return to
/// top-down row order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid), fields(angle = rotation.signed_angle()))
)]
pub fn rotate(grid: &ColorGrid, rotation: &Rotation) -> ColorGrid {
    let rot = Rotation2::new(rotation.signed_angle());
    let height = grid.height() as f64;

    let mut rotated = grid.blank_like();
    let mut dropped = 0usize;
    for (i, j, label) in grid.iter_cells() {
        let p = rot * Point2::new(i as f64, height - j as f64);
        if !rotated.set_signed(p.x.floor() as i64, p.y.floor() as i64, label) {
            dropped += 1;
        }
    }
    log::debug!(
        "rotated {}x{} grid by {:.4} rad, {} cells fell outside",
        grid.width(),
        grid.height(),
        rotation.signed_angle(),
        dropped
    );

    flip_vertically(&rotated)
}

/// Mirror rows: row `j` moves to `height - j`.
///
/// Row 0 has no in-bounds destination and is dropped, so row 0 of the
/// result is always `Undefined`.
pub fn flip_vertically(grid: &ColorGrid) -> ColorGrid {
    let height = grid.height();
    let mut flipped = grid.blank_like();
    for (i, j, label) in grid.iter_cells() {
        flipped.set(i, height - j, label);
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RotationDirection;
    use chromagrid_core::ColorLabel;

    fn striped(width: usize, height: usize) -> ColorGrid {
        let mut grid = ColorGrid::new(width, height).unwrap();
        for (x, y, _) in grid.clone().iter_cells() {
            let label = ColorLabel::PALETTE[(x + 2 * y) % ColorLabel::PALETTE.len()];
            grid.set(x, y, label);
        }
        grid
    }

    #[test]
    fn zero_angle_is_identity_below_the_first_row() {
        let grid = striped(7, 5);
        let out = rotate(&grid, &Rotation::NONE);
        assert_eq!((out.width(), out.height()), (7, 5));
        assert!(out.row(0).unwrap().iter().all(|&c| c == ColorLabel::Undefined));
        for y in 1..5 {
            assert_eq!(out.row(y), grid.row(y), "row {y}");
        }
    }

    #[test]
    fn zero_angle_clockwise_matches_counter_clockwise() {
        let grid = striped(6, 6);
        let cw = Rotation {
            angle: 0.0,
            direction: RotationDirection::Clockwise,
        };
        assert_eq!(rotate(&grid, &cw), rotate(&grid, &Rotation::NONE));
    }

    #[test]
    fn small_rotation_moves_a_single_cell() {
        let mut grid = ColorGrid::new(20, 20).unwrap();
        grid.set(10, 10, ColorLabel::Red);

        let ccw = Rotation {
            angle: 0.1,
            direction: RotationDirection::CounterClockwise,
        };
        let out = rotate(&grid, &ccw);
        assert_eq!(out.count(ColorLabel::Red), 1);
        assert_eq!(out.get(8, 10), Some(ColorLabel::Red));

        let cw = Rotation {
            angle: 0.1,
            direction: RotationDirection::Clockwise,
        };
        let out = rotate(&grid, &cw);
        assert_eq!(out.get(10, 12), Some(ColorLabel::Red));
    }

    #[test]
    fn cells_rotated_out_of_bounds_leave_undefined_gaps() {
        let grid = ColorGrid::filled(10, 10, ColorLabel::Green).unwrap();
        let quarter = Rotation {
            angle: std::f64::consts::FRAC_PI_4,
            direction: RotationDirection::CounterClockwise,
        };
        let out = rotate(&grid, &quarter);
        let green = out.count(ColorLabel::Green);
        assert!(green > 0 && green < 100, "green = {green}");
        assert_eq!(green + out.count(ColorLabel::Undefined), 100);
    }

    #[test]
    fn flip_moves_rows_to_mirrored_index() {
        let mut grid = ColorGrid::new(2, 4).unwrap();
        grid.set(0, 0, ColorLabel::Red);
        grid.set(1, 1, ColorLabel::Blue);
        grid.set(0, 3, ColorLabel::Yellow);
        let out = flip_vertically(&grid);
        assert_eq!(out.count(ColorLabel::Red), 0);
        assert_eq!(out.get(1, 3), Some(ColorLabel::Blue));
        assert_eq!(out.get(0, 1), Some(ColorLabel::Yellow));
    }
}
