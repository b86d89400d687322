use chromagrid_core::GridError;

/// Errors from quantization and aggregation. All of them are caller
/// contract violations; nothing here is recovered internally.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error(
        "cell divisions {x_div}x{y_div} do not evenly divide a {width}x{height} grid"
    )]
    InvalidDivisions {
        x_div: usize,
        y_div: usize,
        width: usize,
        height: usize,
    },

    #[error("majority fraction must be within [0, 1], got {0}")]
    InvalidMajorityFraction(f64),

    #[error(transparent)]
    Grid(#[from] GridError),
}
