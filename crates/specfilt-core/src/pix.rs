//! PIX - The 8-bit grayscale image container
//!
//! `Pix` is the integer raster that enters and leaves the spectral
//! pipeline. Every sample is one byte in `[0, 255]`.
//!
//! # Pixel layout
//!
//! - One `u8` per pixel, row-major, no padding
//! - The pixel at (x, y) is at index `y * width + x`
//! - `x` is the column in `[0, width)`, `y` the row in `[0, height)`
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

use crate::error::{Error, Result, check_data_len, checked_len};
use std::path::Path;
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// PNM format (PGM/PPM)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pnm => "pgm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    ///
    /// Returns [`ImageFormat::Unknown`] for unrecognized extensions.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "pgm" | "pnm" | "ppm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }

    /// Guess the format from the extension of a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// X resolution (ppi), 0 if unknown
    xres: i32,
    /// Y resolution (ppi), 0 if unknown
    yres: i32,
    /// Input file format
    informat: ImageFormat,
    /// The image samples
    data: Vec<u8>,
}

/// PIX - 8-bit grayscale image
///
/// # Examples
///
/// ```
/// use specfilt_core::Pix;
///
/// let pix = Pix::new(64, 32).unwrap();
/// assert_eq!(pix.width(), 64);
/// assert_eq!(pix.height(), 32);
/// assert_eq!(pix.get_pixel(3, 4), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0)
    }

    /// Create a new PIX with all samples set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: u8) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self::from_parts(width, height, vec![value; len]))
    }

    /// Create a PIX from row-major sample data.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length
    /// doesn't match `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_data_len(width, height, data.len())?;
        Ok(Self::from_parts(width, height, data))
    }

    fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        Pix {
            inner: Arc::new(PixData {
                width,
                height,
                xres: 0,
                yres: 0,
                informat: ImageFormat::Unknown,
                data,
            }),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the X resolution (ppi).
    #[inline]
    pub fn xres(&self) -> i32 {
        self.inner.xres
    }

    /// Get the Y resolution (ppi).
    #[inline]
    pub fn yres(&self) -> i32 {
        self.inner.yres
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get a sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[(y as usize) * (self.inner.width as usize) + (x as usize)]
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                xres: self.inner.xres,
                yres: self.inner.yres,
                informat: self.inner.informat,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Set both resolutions.
    #[inline]
    pub fn set_resolution(&mut self, xres: i32, yres: i32) {
        self.inner.xres = xres;
        self.inner.yres = yres;
    }

    /// Set the input format.
    #[inline]
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get a sample at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[(y as usize) * (self.inner.width as usize) + (x as usize)])
    }

    /// Set a sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        let idx = (y as usize) * (self.inner.width as usize) + (x as usize);
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.inner.data.len(),
            });
        }
        self.inner.data[idx] = val;
        Ok(())
    }

    /// Set a sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let idx = (y as usize) * (self.inner.width as usize) + (x as usize);
        self.inner.data[idx] = val;
    }

    /// Get mutable access to the samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Copy resolution from another image.
    pub fn copy_resolution_from(&mut self, src: &Pix) {
        self.inner.xres = src.xres();
        self.inner.yres = src.yres();
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(10, 20).unwrap();
        assert_eq!(pix.dimensions(), (10, 20));
        assert!(pix.data().iter().all(|&v| v == 0));
        assert_eq!(pix.informat(), ImageFormat::Unknown);
    }

    #[test]
    fn test_pix_invalid_dimensions() {
        assert!(Pix::new(0, 5).is_err());
        assert!(Pix::new(5, 0).is_err());
        assert!(Pix::from_data(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn test_pix_access() {
        let pix = Pix::from_data(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(1));
        assert_eq!(pix.get_pixel(2, 1), Some(6));
        assert_eq!(pix.get_pixel(3, 0), None);
    }

    #[test]
    fn test_pix_mut_roundtrip() {
        let pix = Pix::new(4, 4).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_pixel(1, 2, 200).unwrap();
        assert!(pm.set_pixel(4, 0, 1).is_err());
        pm.set_informat(ImageFormat::Png);
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(1, 2), Some(200));
        assert_eq!(pix.informat(), ImageFormat::Png);
    }

    #[test]
    fn test_shared_pix_is_not_mutable_in_place() {
        let pix = Pix::new(2, 2).unwrap();
        let other = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        let mut copy = other.to_mut();
        copy.set_pixel(0, 0, 9).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path("a/b.PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("x.jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("x.pgm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("x.tif"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_path("noext"), ImageFormat::Unknown);
    }
}
