//! Core types for semantic color grids.
//!
//! This crate is intentionally small: the closed color palette, the owned
//! label grid every pipeline stage produces, a borrowed RGBA view for input
//! frames, and the logger used by the binaries. It knows nothing about color
//! models or marker geometry.

mod grid;
mod image;
mod label;
mod logger;

pub use grid::{CellCoords, ColorGrid, GridError};
pub use image::{RgbaImageView, RGBA_CHANNELS};
pub use label::{ColorLabel, ParseColorLabelError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
