//! Geometric calibration of color grids from fiducial markers.
//!
//! One calibration pass over a classified grid:
//! - [`detect_rotation`]: find the two bottom markers and the rotation that
//!   levels them,
//! - [`rotate`]: apply that rotation with a forward-mapped rotation matrix,
//! - [`detect_margins`]: find the content region enclosed by the markers,
//! - [`crop`]: copy that region into a fresh grid.
//!
//! Every stage takes a grid by reference and returns a new one; nothing is
//! mutated in place. Marker scans are bounded by [`scan::BandScan`].

mod error;
mod margins;
mod params;
mod rotate;
mod rotation;
pub mod scan;

pub use error::CalibrationError;
pub use margins::{crop, detect_margins, MarginDetection, Margins};
pub use params::{CalibrationParams, MarginScanParams, RotationScanParams};
pub use rotate::{flip_vertically, rotate};
pub use rotation::{
    detect_rotation, rotation_from_anchors, MarkerAnchors, Rotation, RotationDirection,
    RotationEstimate,
};
