use chromagrid_core::{ColorGrid, RgbaImageView, RGBA_CHANNELS};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::classify::classify_rgb;
use crate::ColorError;

/// Classify every pixel of an RGBA8 frame into a pixel-resolution grid.
///
/// Alpha is ignored. The output has exactly the frame's width and height.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(image), fields(width = image.width, height = image.height))
)]
pub fn quantize(image: &RgbaImageView<'_>) -> Result<ColorGrid, ColorError> {
    if image.width == 0 || image.height == 0 {
        return Err(ColorError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    let expected = image.expected_len().ok_or(ColorError::InvalidDimensions {
        width: image.width,
        height: image.height,
    })?;
    if image.data.len() != expected {
        return Err(ColorError::InvalidBuffer {
            expected,
            got: image.data.len(),
        });
    }

    let labels = image
        .data
        .chunks_exact(RGBA_CHANNELS)
        .map(|px| classify_rgb(px[0], px[1], px[2]))
        .collect();
    let grid = ColorGrid::from_labels(image.width, image.height, labels)?;

    log::debug!(
        "quantized {}x{} frame, {} undefined pixels",
        grid.width(),
        grid.height(),
        grid.count(chromagrid_core::ColorLabel::Undefined)
    );
    Ok(grid)
}
