//! specfilt - Frequency-domain image filtering
//!
//! Filters a grayscale image by transforming it into a centered spectrum
//! with the direct 2D DFT, multiplying the spectrum by a radial mask and
//! transforming back.
//!
//! # Example
//!
//! ```
//! use specfilt::{FilterConfig, Pix, ResponseShape};
//!
//! let pix = Pix::new_with_value(8, 8, 128).unwrap();
//! let config = FilterConfig::low_pass(ResponseShape::Gaussian, 2.0).unwrap();
//! let smoothed = specfilt::fourier::apply_filter(&pix, &config).unwrap();
//! assert_eq!(smoothed.dimensions(), (8, 8));
//! ```

pub mod cli;

// Re-export core types (primary data structures used everywhere)
pub use specfilt_core::*;

// Filter configuration is used by almost every caller
pub use specfilt_fourier::{
    BandType, FilterConfig, ResponseShape, TransformMethod, TransformOptions,
};

// Re-export domain crates as modules to avoid name conflicts
pub use specfilt_fourier as fourier;
pub use specfilt_io as io;
