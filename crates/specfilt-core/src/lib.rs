//! specfilt-core - Raster containers for frequency-domain filtering
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit grayscale image (immutable / mutable)
//! - [`DPix`] - Double-precision real image
//! - [`CPix`] - Complex-valued image (spectra and filter masks)
//! - [`ImageFormat`] - File formats understood by `specfilt-io`

pub mod cpix;
pub mod dpix;
pub mod error;
pub mod pix;

pub use cpix::CPix;
pub use dpix::DPix;
pub use error::{Error, Result};
pub use num_complex::Complex64;
pub use pix::{ImageFormat, Pix, PixMut};
