//! DPix - Double-precision floating-point image
//!
//! `DPix` is a 2D array of `f64` values. The spectral pipeline uses it for
//! the centered spatial signal and for the real-valued reconstruction that
//! comes out of the inverse transform before it is quantized.
//!
//! # Examples
//!
//! ```
//! use specfilt_core::DPix;
//!
//! let mut dpix = DPix::new(8, 8).unwrap();
//! dpix.set_pixel(2, 3, -1.5).unwrap();
//! assert_eq!(dpix.get_pixel(2, 3).unwrap(), -1.5);
//! ```

use crate::error::{Error, Result, check_data_len, checked_len};
use crate::pix::Pix;

/// Double-precision floating-point image
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct DPix {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f64>,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
}

impl DPix {
    /// Create a new DPix with all pixels set to zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new DPix with all pixels set to the specified value.
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(DPix {
            width,
            height,
            data: vec![value; len],
            xres: 0,
            yres: 0,
        })
    }

    /// Create a DPix from raw data in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        check_data_len(width, height, data.len())?;
        Ok(DPix {
            width,
            height,
            data,
            xres: 0,
            yres: 0,
        })
    }

    /// Build from parts whose sizes the caller has already validated.
    pub(crate) fn from_raw_parts(width: u32, height: u32, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        DPix {
            width,
            height,
            data,
            xres: 0,
            yres: 0,
        }
    }

    /// Create a DPix from an 8-bit image, one `f64` per sample.
    pub fn from_pix(pix: &Pix) -> Self {
        DPix {
            width: pix.width(),
            height: pix.height(),
            data: pix.data().iter().map(|&v| f64::from(v)).collect(),
            xres: pix.xres(),
            yres: pix.yres(),
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

    /// Get pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(self.data[idx])
    }

    /// Set pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
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
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Raw mutable data access.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get the smallest and largest values.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Convert to an 8-bit image.
    ///
    /// Every value is clamped to `[0, 255]` and rounded to the nearest
    /// integer. Resolution metadata is preserved.
    pub fn to_pix(&self) -> Result<Pix> {
        let data = self
            .data
            .iter()
            .map(|&v| (v.clamp(0.0, 255.0) + 0.5) as u8)
            .collect();
        let pix = Pix::from_data(self.width, self.height, data)?;
        let mut pm = pix.to_mut();
        pm.set_resolution(self.xres, self.yres);
        Ok(pm.into())
    }
}
