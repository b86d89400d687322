//! Color quantization for semantic color grids.
//!
//! - [`HsvSample`] / [`classify_rgb`]: map one RGB sample onto the closed
//!   [`ColorLabel`](chromagrid_core::ColorLabel) palette using fixed HSV bands,
//! - [`quantize`]: classify every pixel of an RGBA frame,
//! - [`aggregate`]: reduce a fine grid to a coarse grid of majority labels.
//!
//! Geometry (marker scanning, rotation, cropping) lives in `chromagrid-calib`.

mod aggregate;
pub mod classify;
mod error;
mod hsv;
mod quantize;

pub use aggregate::{
    aggregate, AggregateParams, CellDivisions, LabelHistogram, DEFAULT_MIN_MAJORITY_FRACTION,
    TIE_BREAK_ORDER,
};
pub use classify::{classify_hsv, classify_rgb};
pub use error::ColorError;
pub use hsv::HsvSample;
pub use quantize::quantize;
