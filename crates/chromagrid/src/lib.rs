//! High-level facade crate for the `chromagrid-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying crates,
//! - [`Calibrator`]: one calibration pass from an RGBA frame to a cropped,
//!   axis-aligned grid of color labels,
//! - an RGBA preview renderer and JSON config/report helpers,
//! - (feature-gated) helpers working on `image::RgbaImage`.
//!
//! ## Quickstart
//!
//! ```no_run
//! use chromagrid::detect;
//! use chromagrid::PipelineParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = detect::load_rgba("panel.png")?;
//! let outcome = detect::calibrate_image(&img, PipelineParams::with_divisions(32, 24))?;
//! for row in outcome.grid.rows() {
//!     println!("{row:?}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `chromagrid::core`: labels, grids, image views, logger.
//! - `chromagrid::color`: HSV classification, quantization, aggregation.
//! - `chromagrid::calib`: marker scans, rotation, margins, cropping.
//! - `chromagrid::detect` (feature `image`): helpers from `image::RgbaImage`.

pub use chromagrid_calib as calib;
pub use chromagrid_color as color;
pub use chromagrid_core as core;

pub use chromagrid_calib::{CalibrationError, CalibrationParams, Margins, Rotation};
pub use chromagrid_color::{CellDivisions, ColorError};
pub use chromagrid_core::{ColorGrid, ColorLabel, RgbaImageView};

pub mod io;
pub mod pipeline;
pub mod render;

pub use pipeline::{CalibrationOutcome, Calibrator, PipelineError, PipelineParams};

#[cfg(feature = "image")]
pub mod detect;
