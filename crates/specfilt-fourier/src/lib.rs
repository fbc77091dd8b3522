//! specfilt-fourier - Frequency-domain filtering
//!
//! This crate provides:
//!
//! - Spectral centering (`(-1)^(x+y)` sign flip)
//! - Direct 2D DFT and its inverse ([`analyze`], [`synthesize`])
//! - Filter masks: ideal, Gaussian and Butterworth responses in low-pass,
//!   high-pass, band-pass and band-stop variants ([`generate_mask`])
//! - The full pipeline ([`apply_filter`])
//! - Log-magnitude rendering of a spectrum ([`log_magnitude`])

pub mod center;
pub mod dft;
mod error;
pub mod mask;
pub mod pipeline;
pub mod spectrum;

pub use center::{Centering, center};
pub use dft::{
    TransformMethod, TransformOptions, analyze, analyze_dpix, analyze_with, synthesize,
    synthesize_dpix, synthesize_with,
};
pub use error::{FourierError, FourierResult};
pub use mask::{
    BandType, DEFAULT_ORDER, FilterConfig, MAX_ORDER, ResponseShape, apply_mask, generate_mask,
};
pub use pipeline::{apply_filter, apply_filter_spectrum, apply_filter_with, filter_spectrum};
pub use spectrum::log_magnitude;
