use chromagrid_core::ColorLabel;
use serde::{Deserialize, Serialize};

/// Limits for the top-band scan of the rotation detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationScanParams {
    /// Stop the top-band scan after this many consecutive marker-free rows.
    pub max_trailing_empty_rows: usize,
}

impl Default for RotationScanParams {
    fn default() -> Self {
        Self {
            max_trailing_empty_rows: 2,
        }
    }
}

/// Limits for the margin detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginScanParams {
    /// Marker-free columns tolerated inside the left marker band before the
    /// left edge is fixed.
    pub max_column_gap: usize,
}

impl Default for MarginScanParams {
    fn default() -> Self {
        Self { max_column_gap: 3 }
    }
}

/// Calibration settings shared by rotation and margin detection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Label painted on the physical fiducial markers.
    ///
    /// One of the palette labels. Content rows and columns between the
    /// marker bands must not contain it.
    pub marker: ColorLabel,
    pub rotation: RotationScanParams,
    pub margins: MarginScanParams,
    /// Rotations below this angle (radians) are not applied.
    pub min_rotation_angle: f64,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            marker: ColorLabel::Black,
            rotation: RotationScanParams::default(),
            margins: MarginScanParams::default(),
            min_rotation_angle: 1e-6,
        }
    }
}

impl CalibrationParams {
    pub fn with_marker(marker: ColorLabel) -> Self {
        Self {
            marker,
            ..Self::default()
        }
    }
}
