//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use specfilt_core::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PNM formats
    pub const PNM: &[&[u8]] = &[b"P1", b"P2", b"P3", b"P4", b"P5", b"P6"];

    /// Formats we recognize but cannot decode
    pub const BMP: &[u8] = b"BM";
    pub const GIF: &[u8] = b"GIF8";
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
///
/// # Errors
///
/// Returns `IoError::InvalidData` if fewer than two bytes are given and
/// `IoError::UnsupportedFormat` if the header matches no readable format.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }
    if magic::PNM.iter().any(|m| data.starts_with(m)) {
        return Ok(ImageFormat::Pnm);
    }

    let name = if data.starts_with(magic::BMP) {
        "bmp"
    } else if data.starts_with(magic::GIF) {
        "gif"
    } else if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        "tiff"
    } else {
        "unrecognized header"
    };
    Err(IoError::UnsupportedFormat(name.to_string()))
}
