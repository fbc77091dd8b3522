//! CPix - Complex-valued image
//!
//! `CPix` holds one `Complex<f64>` per pixel. Spectra produced by the
//! forward transform and the multiplicative filter masks are both `CPix`,
//! so a mask applies to a spectrum by elementwise complex multiplication.

use crate::dpix::DPix;
use crate::error::{Error, Result, check_data_len, checked_len};
use num_complex::Complex64;

/// Complex-valued image
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct CPix {
    width: u32,
    height: u32,
    data: Vec<Complex64>,
}

impl CPix {
    /// Create a new CPix with all pixels set to zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, Complex64::new(0.0, 0.0))
    }

    /// Create a new CPix with all pixels set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: Complex64) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(CPix {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Create a CPix from raw data in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<Complex64>) -> Result<Self> {
        check_data_len(width, height, data.len())?;
        Ok(CPix {
            width,
            height,
            data,
        })
    }

    /// Lift a real image into the complex plane (imaginary parts zero).
    pub fn from_dpix(dpix: &DPix) -> Self {
        CPix {
            width: dpix.width(),
            height: dpix.height(),
            data: dpix
                .data()
                .iter()
                .map(|&re| Complex64::new(re, 0.0))
                .collect(),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get pixel value at (x, y), or `None` if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Complex64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: Complex64) -> Result<()> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        self.data[idx] = value;
        Ok(())
    }

    /// Raw read-only data access.
    #[inline]
    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    /// Raw mutable data access.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Complex64] {
        &mut self.data
    }

    /// Elementwise complex product with another CPix of the same size.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the sizes differ.
    pub fn mul(&self, other: &CPix) -> Result<CPix> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .collect();
        Ok(CPix {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Real parts as a DPix.
    pub fn real(&self) -> DPix {
        self.map_to_dpix(|c| c.re)
    }

    /// Magnitudes `|c|` as a DPix.
    pub fn norm(&self) -> DPix {
        self.map_to_dpix(|c| c.norm())
    }

    /// Largest absolute imaginary component.
    pub fn max_abs_imag(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, c| acc.max(c.im.abs()))
    }

    fn map_to_dpix(&self, f: impl Fn(&Complex64) -> f64) -> DPix {
        DPix::from_raw_parts(self.width, self.height, self.data.iter().map(f).collect())
    }
}
