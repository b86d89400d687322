use crate::pipeline::{CalibrationOutcome, Calibrator, PipelineError, PipelineParams};
use crate::render::{render_rgba, RenderError};
use chromagrid_core::{ColorGrid, RgbaImageView, RGBA_CHANNELS};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the image-facing helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid RGBA image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbaBuffer { expected: usize, got: usize },

    #[error("invalid RGBA image dimensions (width={width}, height={height})")]
    InvalidRgbaDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Borrow an `image::RgbaImage` as the lightweight core view type.
pub fn rgba_view(img: &::image::RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode any format supported by `image` and convert it to RGBA8.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<::image::RgbaImage, DetectError> {
    Ok(::image::open(path)?.to_rgba8())
}

/// Build an `image::RgbaImage` from a raw RGBA8 buffer.
pub fn rgba_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::RgbaImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidRgbaDimensions { width, height });
    };
    let Some(expected) = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS))
    else {
        return Err(DetectError::InvalidRgbaDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidRgbaBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::RgbaImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidRgbaDimensions { width, height })
}

/// Run one calibration pass over an `image::RgbaImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn calibrate_image(
    img: &::image::RgbaImage,
    params: PipelineParams,
) -> Result<CalibrationOutcome, DetectError> {
    let calibrator = Calibrator::new(params);
    Ok(calibrator.calibrate(&rgba_view(img))?)
}

/// Calibrate a raw RGBA8 buffer.
pub fn calibrate_from_rgba_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: PipelineParams,
) -> Result<CalibrationOutcome, DetectError> {
    let img = rgba_image_from_slice(width, height, pixels)?;
    calibrate_image(&img, params)
}

/// Render `grid` as an `image::RgbaImage` of the given size.
pub fn render_image(
    grid: &ColorGrid,
    width: u32,
    height: u32,
    enable_lines: bool,
) -> Result<::image::RgbaImage, DetectError> {
    let buf = render_rgba(grid, width as usize, height as usize, enable_lines)?;
    rgba_image_from_slice(width, height, &buf)
}

/// Render `grid` and save it; the format follows the file extension.
pub fn save_preview(
    grid: &ColorGrid,
    width: u32,
    height: u32,
    enable_lines: bool,
    path: impl AsRef<Path>,
) -> Result<(), DetectError> {
    render_image(grid, width, height, enable_lines)?.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromagrid_core::ColorLabel;

    #[test]
    fn rejects_short_buffers() {
        let err = rgba_image_from_slice(2, 2, &[0; 15]).unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidRgbaBuffer {
                expected: 16,
                got: 15
            }
        ));
    }

    #[test]
    fn view_borrows_image_pixels() {
        let img = ::image::RgbaImage::from_pixel(3, 2, ::image::Rgba([1, 2, 3, 4]));
        let view = rgba_view(&img);
        assert_eq!((view.width, view.height), (3, 2));
        assert_eq!(view.pixel(2, 1), Some([1, 2, 3, 4]));
    }

    #[test]
    fn render_image_matches_grid_colors() {
        let grid = ColorGrid::filled(2, 1, ColorLabel::Yellow).unwrap();
        let img = render_image(&grid, 4, 2, false).unwrap();
        assert_eq!(img.get_pixel(3, 1).0, [255, 255, 0, 255]);
    }
}
