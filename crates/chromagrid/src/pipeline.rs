//! One calibration pass: classify, align, crop.

use chromagrid_calib::{
    crop, detect_margins, detect_rotation, rotate, CalibrationError, CalibrationParams,
    MarginDetection, RotationEstimate,
};
use chromagrid_color::{
    aggregate, quantize, AggregateParams, CellDivisions, ColorError,
    DEFAULT_MIN_MAJORITY_FRACTION,
};
use chromagrid_core::{ColorGrid, RgbaImageView};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Settings for a full calibration pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Reduce the pixel grid to this many cells before calibrating.
    /// `None` calibrates at pixel resolution.
    pub divisions: Option<CellDivisions>,
    pub min_majority_fraction: f64,
    pub calibration: CalibrationParams,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            divisions: None,
            min_majority_fraction: DEFAULT_MIN_MAJORITY_FRACTION,
            calibration: CalibrationParams::default(),
        }
    }
}

impl PipelineParams {
    pub fn with_divisions(x: usize, y: usize) -> Self {
        Self {
            divisions: Some(CellDivisions::new(x, y)),
            ..Self::default()
        }
    }

    fn aggregate_params(&self) -> Option<AggregateParams> {
        self.divisions.map(|divisions| AggregateParams {
            divisions,
            min_majority_fraction: self.min_majority_fraction,
        })
    }
}

/// Result of one calibration pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    pub frame_width: usize,
    pub frame_height: usize,
    pub rotation: RotationEstimate,
    /// Whether the rotation was large enough to be applied.
    pub rotated: bool,
    /// Grid the margins were detected on (after rotation, if any).
    pub aligned: ColorGrid,
    pub margins: MarginDetection,
    /// Cropped content region of `aligned`.
    pub grid: ColorGrid,
}

/// Runs calibration passes with fixed parameters.
#[derive(Clone, Debug, Default)]
pub struct Calibrator {
    params: PipelineParams,
}

impl Calibrator {
    pub fn new(params: PipelineParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Quantize a frame and, if configured, reduce it to cell resolution.
    pub fn classify(&self, image: &RgbaImageView<'_>) -> Result<ColorGrid, ColorError> {
        let pixels = quantize(image)?;
        match self.params.aggregate_params() {
            Some(agg) => aggregate(&pixels, &agg),
            None => Ok(pixels),
        }
    }

    /// Full pass over a captured frame.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn calibrate(
        &self,
        image: &RgbaImageView<'_>,
    ) -> Result<CalibrationOutcome, PipelineError> {
        let classified = self.classify(image)?;
        Ok(self.calibrate_grid(&classified, image.width, image.height)?)
    }

    /// Calibrate an already classified grid computed from a
    /// `frame_width × frame_height` frame.
    pub fn calibrate_grid(
        &self,
        classified: &ColorGrid,
        frame_width: usize,
        frame_height: usize,
    ) -> Result<CalibrationOutcome, CalibrationError> {
        let params = &self.params.calibration;

        let rotation = detect_rotation(classified, params)?;
        let rotated = rotation.rotation.angle >= params.min_rotation_angle;
        let aligned = if rotated {
            rotate(classified, &rotation.rotation)
        } else {
            classified.clone()
        };

        let margins = detect_margins(&aligned, frame_width, frame_height, params)?;
        let grid = crop(&aligned, &margins.cells)?;
        log::info!(
            "calibrated {}x{} frame: rotation {:.2} deg ({}), content {}x{} cells",
            frame_width,
            frame_height,
            rotation.rotation.degrees(),
            if rotated { "applied" } else { "skipped" },
            grid.width(),
            grid.height()
        );

        Ok(CalibrationOutcome {
            frame_width,
            frame_height,
            rotation,
            rotated,
            aligned,
            margins,
            grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromagrid_core::ColorLabel;

    #[test]
    fn params_deserialize_with_defaults() {
        let params: PipelineParams =
            serde_json::from_str(r#"{"divisions":{"x":8,"y":6}}"#).unwrap();
        assert_eq!(params.divisions, Some(CellDivisions::new(8, 6)));
        assert_eq!(params.min_majority_fraction, DEFAULT_MIN_MAJORITY_FRACTION);
        assert_eq!(params.calibration.marker, ColorLabel::Black);
    }

    #[test]
    fn classify_without_divisions_keeps_pixel_resolution() {
        let data = [255u8, 0, 0, 255].repeat(6);
        let grid = Calibrator::default()
            .classify(&RgbaImageView::new(3, 2, &data))
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.count(ColorLabel::Red), 6);
    }

    #[test]
    fn classify_with_divisions_reduces_to_cells() {
        let data = [0u8, 0, 255, 255].repeat(16);
        let grid = Calibrator::new(PipelineParams::with_divisions(2, 2))
            .classify(&RgbaImageView::new(4, 4, &data))
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.count(ColorLabel::Blue), 4);
    }
}
