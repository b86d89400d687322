use serde::{Deserialize, Serialize};

use crate::ColorLabel;

/// Errors for grids built with inconsistent shapes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (width={width}, height={height})")]
    ZeroSized { width: usize, height: usize },
    #[error("label buffer length mismatch (expected {expected} labels, got {got})")]
    LengthMismatch { expected: usize, got: usize },
}

/// Signed integer cell coordinates, `x` along a row and `y` down the columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellCoords {
    pub x: i32,
    pub y: i32,
}

impl CellCoords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size 2D grid of color labels, stored row-major.
///
/// Width and height are set at construction and never change. Reads and
/// writes go through bounds-checked accessors, so out-of-range coordinates
/// produce `None` / `false` instead of touching a neighbouring row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct ColorGrid {
    width: usize,
    height: usize,
    cells: Vec<ColorLabel>,
}

impl ColorGrid {
    /// Grid with every cell set to [`ColorLabel::Undefined`].
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::filled(width, height, ColorLabel::Undefined)
    }

    pub fn filled(width: usize, height: usize, label: ColorLabel) -> Result<Self, GridError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![label; len],
        })
    }

    /// Wrap a row-major label buffer.
    pub fn from_labels(
        width: usize,
        height: usize,
        cells: Vec<ColorLabel>,
    ) -> Result<Self, GridError> {
        let expected = checked_len(width, height)?;
        if cells.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from a list of equally long rows.
    pub fn from_rows(rows: &[Vec<ColorLabel>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let cells: Vec<ColorLabel> = rows.iter().flatten().copied().collect();
        if rows.iter().any(|r| r.len() != width) {
            return Err(GridError::LengthMismatch {
                expected: width * height,
                got: cells.len(),
            });
        }
        Self::from_labels(width, height, cells)
    }

    /// All-`Undefined` grid with the same dimensions as `self`.
    pub fn blank_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![ColorLabel::Undefined; self.cells.len()],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<ColorLabel> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Signed lookup; negative coordinates are out of bounds.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<ColorLabel> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.get(x, y)
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut ColorLabel> {
        let i = self.offset(x, y)?;
        Some(&mut self.cells[i])
    }

    /// Write `label` at `(x, y)`. Returns `false` and leaves the grid untouched
    /// when the coordinates fall outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, label: ColorLabel) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = label;
                true
            }
            None => false,
        }
    }

    /// Signed variant of [`ColorGrid::set`].
    #[inline]
    pub fn set_signed(&mut self, x: i64, y: i64, label: ColorLabel) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.set(x, y, label),
            _ => false,
        }
    }

    pub fn row(&self, y: usize) -> Option<&[ColorLabel]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ColorLabel]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Iterate `(x, y, label)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, ColorLabel)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &label)| (i % w, i / w, label))
    }

    pub fn labels(&self) -> &[ColorLabel] {
        &self.cells
    }

    pub fn into_labels(self) -> Vec<ColorLabel> {
        self.cells
    }

    pub fn count(&self, label: ColorLabel) -> usize {
        self.cells.iter().filter(|&&c| c == label).count()
    }

    pub fn row_count(&self, y: usize, label: ColorLabel) -> usize {
        self.row(y)
            .map_or(0, |row| row.iter().filter(|&&c| c == label).count())
    }

    pub fn row_contains(&self, y: usize, label: ColorLabel) -> bool {
        self.row(y).is_some_and(|row| row.contains(&label))
    }

    pub fn column_contains(&self, x: usize, label: ColorLabel) -> bool {
        x < self.width && (0..self.height).any(|y| self.cells[y * self.width + x] == label)
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroSized { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GridError::ZeroSized { width, height })
}

#[derive(Serialize, Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    cells: Vec<ColorLabel>,
}

impl TryFrom<GridRepr> for ColorGrid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        ColorGrid::from_labels(repr.width, repr.height, repr.cells)
    }
}

impl From<ColorGrid> for GridRepr {
    fn from(grid: ColorGrid) -> Self {
        GridRepr {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}
