//! RGBA preview of a color grid.

use chromagrid_core::{ColorGrid, ColorLabel, RGBA_CHANNELS};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("preview {width}x{height} is smaller than the {grid_width}x{grid_height} grid")]
    TooSmall {
        width: usize,
        height: usize,
        grid_width: usize,
        grid_height: usize,
    },
}

/// Render `grid` into a `width × height` RGBA8 buffer.
///
/// Each cell covers `floor(width / grid_width)` by `floor(height / grid_height)`
/// pixels; leftover pixels on the right and bottom repeat the last cell.
/// `Undefined` is fully transparent. With `enable_lines`, pixels on a cell
/// boundary are painted opaque black.
pub fn render_rgba(
    grid: &ColorGrid,
    width: usize,
    height: usize,
    enable_lines: bool,
) -> Result<Vec<u8>, RenderError> {
    let (gw, gh) = (grid.width(), grid.height());
    if width < gw || height < gh {
        return Err(RenderError::TooSmall {
            width,
            height,
            grid_width: gw,
            grid_height: gh,
        });
    }
    let (step_x, step_y) = (width / gw, height / gh);
    let line = ColorLabel::Black.rgba();

    let mut out = Vec::with_capacity(width * height * RGBA_CHANNELS);
    for j in 0..height {
        let cy = (j / step_y).min(gh - 1);
        for i in 0..width {
            let cx = (i / step_x).min(gw - 1);
            let on_line = enable_lines && (i % step_x == 0 || j % step_y == 0);
            let rgba = if on_line {
                line
            } else {
                grid.get(cx, cy).unwrap_or_default().rgba()
            };
            out.extend_from_slice(&rgba);
        }
    }
    Ok(out)
}
