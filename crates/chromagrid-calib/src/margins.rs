//! Marker-bounded content region: margin detection and cropping.

use chromagrid_core::{ColorGrid, ColorLabel};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::scan::{BandScan, Probe};
use crate::{CalibrationError, CalibrationParams};

/// Rectangle bounds, half-open: `[left, right) × [top, bottom)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Margins {
    pub fn width(&self) -> usize {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn scaled(&self, sx: usize, sy: usize) -> Margins {
        Margins {
            left: self.left * sx,
            top: self.top * sy,
            right: self.right * sx,
            bottom: self.bottom * sy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginDetection {
    /// Inner marker rows/columns as found in the grid: last row of the top
    /// band, first row of the bottom band, last column of the left band,
    /// first column of the right band.
    pub bands: Margins,
    /// Content region in grid cells, one cell inside the top and left bands.
    pub cells: Margins,
    /// `cells` scaled to buffer pixels.
    pub pixels: Margins,
    /// Buffer pixels per grid cell, `(x, y)`.
    pub scale: (usize, usize),
}

/// Find the marker-enclosed content region of `grid`.
///
/// `buffer_width` and `buffer_height` are the dimensions of the frame the
/// grid was computed from; each grid cell spans `floor(buffer / grid)`
/// pixels on that axis.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, params), fields(width = grid.width(), height = grid.height()))
)]
pub fn detect_margins(
    grid: &ColorGrid,
    buffer_width: usize,
    buffer_height: usize,
    params: &CalibrationParams,
) -> Result<MarginDetection, CalibrationError> {
    let (grid_w, grid_h) = (grid.width(), grid.height());
    if buffer_width < grid_w || buffer_height < grid_h {
        return Err(CalibrationError::BufferSmallerThanGrid {
            buffer_width,
            buffer_height,
            grid_width: grid_w,
            grid_height: grid_h,
        });
    }
    let marker = params.marker;

    let top = find_top(grid, marker);
    let bottom = (top + 1..grid_h)
        .find(|&y| grid.row_contains(y, marker))
        .ok_or(CalibrationError::MarkerBandMissing { edge: "bottom" })?;
    let left = find_left(grid, marker, params.margins.max_column_gap);
    let right = (left + 1..grid_w.saturating_sub(1))
        .find(|&x| grid.column_contains(x, marker) && grid.column_contains(x + 1, marker))
        .ok_or(CalibrationError::MarkerBandMissing { edge: "right" })?;

    let bands = Margins {
        left,
        top,
        right,
        bottom,
    };
    let cells = Margins {
        left: left + 1,
        top: top + 1,
        ..bands
    };
    if left > right || top > bottom || cells.is_empty() {
        return Err(CalibrationError::Margins {
            left,
            top,
            right,
            bottom,
        });
    }

    let scale = (buffer_width / grid_w, buffer_height / grid_h);
    let pixels = cells.scaled(scale.0, scale.1);
    log::debug!("marker bands {bands:?}, content cells {cells:?}, pixels {pixels:?}");

    Ok(MarginDetection {
        bands,
        cells,
        pixels,
        scale,
    })
}

/// Last row of the first marker band; the band ends at the first empty row.
fn find_top(grid: &ColorGrid, marker: ColorLabel) -> usize {
    let probes = (0..grid.height()).map(|y| {
        let probe = if grid.row_contains(y, marker) {
            Probe::Hit
        } else {
            Probe::Miss
        };
        (y, probe)
    });
    BandScan::new(1).run(probes).last_hit().unwrap_or(0)
}

/// Last column of the left band that has a marker column on its left.
/// The scan gives up after more than `max_gap` consecutive empty columns.
fn find_left(grid: &ColorGrid, marker: ColorLabel, max_gap: usize) -> usize {
    let probes = (1..grid.width()).map(|x| {
        let probe = match (
            grid.column_contains(x, marker),
            grid.column_contains(x - 1, marker),
        ) {
            (true, true) => Probe::Hit,
            (true, false) => Probe::Touch,
            (false, _) => Probe::Miss,
        };
        (x, probe)
    });
    BandScan::new(max_gap + 1)
        .run(probes)
        .last_hit()
        .unwrap_or(0)
}

/// Copy `[left, right) × [top, bottom)` of `grid` into a new grid.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(grid)))]
pub fn crop(grid: &ColorGrid, bounds: &Margins) -> Result<ColorGrid, CalibrationError> {
    let invalid = || CalibrationError::InvalidCrop {
        left: bounds.left,
        top: bounds.top,
        right: bounds.right,
        bottom: bounds.bottom,
        width: grid.width(),
        height: grid.height(),
    };
    if bounds.is_empty() || bounds.right > grid.width() || bounds.bottom > grid.height() {
        return Err(invalid());
    }

    let labels: Vec<ColorLabel> = (bounds.top..bounds.bottom)
        .filter_map(|y| grid.row(y))
        .flat_map(|row| row[bounds.left..bounds.right].iter().copied())
        .collect();
    Ok(ColorGrid::from_labels(
        bounds.width(),
        bounds.height(),
        labels,
    )?)
}
