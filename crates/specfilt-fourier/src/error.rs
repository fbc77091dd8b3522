//! Error types for specfilt-fourier

use thiserror::Error;

/// Errors that can occur during spectral filtering
#[derive(Debug, Error)]
pub enum FourierError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] specfilt_core::Error),

    /// Unknown response shape or band type, or inconsistent cutoffs
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Grids that cannot be combined, or a reconstruction that is not real
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Result type for spectral filtering operations
pub type FourierResult<T> = Result<T, FourierError>;
