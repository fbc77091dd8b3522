//! Error types for specfilt-core
//!
//! Provides a unified error type for the raster containers.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// specfilt-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for specfilt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Check that `width x height` is a usable raster size and return the
/// number of samples.
pub(crate) fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok((width as usize) * (height as usize))
}

/// Check that a data buffer holds exactly `width x height` samples.
pub(crate) fn check_data_len(width: u32, height: u32, len: usize) -> Result<()> {
    let expected = checked_len(width, height)?;
    if len != expected {
        return Err(Error::InvalidParameter(format!(
            "data length {} doesn't match {}x{} = {}",
            len, width, height, expected
        )));
    }
    Ok(())
}
