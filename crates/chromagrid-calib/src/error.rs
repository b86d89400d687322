use chromagrid_core::GridError;

/// Errors returned by the calibration stages.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("unable to calculate rotation: right marker x={right_x} lies left of left marker x={left_x}")]
    Rotation { left_x: i32, right_x: i32 },

    #[error("unable to calculate margins: no {edge} marker band")]
    MarkerBandMissing { edge: &'static str },

    #[error(
        "unable to calculate margins: inverted bounds (left={left}, top={top}, right={right}, bottom={bottom})"
    )]
    Margins {
        left: usize,
        top: usize,
        right: usize,
        bottom: usize,
    },

    #[error(
        "buffer {buffer_width}x{buffer_height} is smaller than the {grid_width}x{grid_height} grid"
    )]
    BufferSmallerThanGrid {
        buffer_width: usize,
        buffer_height: usize,
        grid_width: usize,
        grid_height: usize,
    },

    #[error(
        "crop [{left}, {right}) x [{top}, {bottom}) does not fit a {width}x{height} grid"
    )]
    InvalidCrop {
        left: usize,
        top: usize,
        right: usize,
        bottom: usize,
        width: usize,
        height: usize,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}
