//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate (8-bit grayscale and
//! 24-bit RGB, the latter converted to gray) and writes 8-bit grayscale
//! JPEG with `jpeg-encoder`.

use crate::{IoError, IoResult, rgb_to_gray};
use jpeg_decoder::{Decoder, PixelFormat};
use specfilt_core::Pix;
use std::io::{Read, Write};

/// Quality used when encoding JPEG output.
pub const DEFAULT_QUALITY: u8 = 95;

/// Read a JPEG image from a reader.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG info missing after decode".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let gray = match info.pixel_format {
        PixelFormat::L8 => pixels,
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|p| rgb_to_gray(p[0], p[1], p[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    Ok(Pix::from_data(width, height, gray)?)
}

/// Write a `Pix` as 8-bit grayscale JPEG.
pub fn write_jpeg<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (width, height) = pix.dimensions();
    let (w16, h16) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "JPEG dimensions limited to 65535, got {}x{}",
                width, height
            )));
        }
    };

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, DEFAULT_QUALITY);
    encoder
        .encode(pix.data(), w16, h16, jpeg_encoder::ColorType::Luma)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    writer.write_all(&jpeg_buf)?;
    Ok(())
}
