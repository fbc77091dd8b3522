//! PNG image format support
//!
//! Every PNG color type is decoded to 8-bit gray: palettes are resolved,
//! color is converted with BT.601 luma weights, alpha is dropped and
//! 16-bit samples keep their high byte. Output is always 8-bit grayscale.

use crate::{IoError, IoResult, rgb_to_gray};
use png::{BitDepth, ColorType, Decoder, Encoder};
use specfilt_core::Pix;
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette: Option<Vec<u8>> = info.palette.as_ref().map(|p| p.to_vec());

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let wide = bit_depth == BitDepth::Sixteen;

    let pix = Pix::new(width, height)?;
    let mut pix_mut = pix.to_mut();

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let val = match color_type {
                ColorType::Grayscale => scaled_low_depth(row, x, bit_depth),
                ColorType::Indexed => {
                    let index = packed_sample(row, x, bit_depth) as usize;
                    palette_gray(palette.as_deref(), index)?
                }
                ColorType::GrayscaleAlpha => {
                    let samples = if wide { 4 } else { 2 };
                    row[x as usize * samples]
                }
                ColorType::Rgb => {
                    let samples = if wide { 6 } else { 3 };
                    let step = if wide { 2 } else { 1 };
                    let idx = x as usize * samples;
                    rgb_to_gray(row[idx], row[idx + step], row[idx + 2 * step])
                }
                ColorType::Rgba => {
                    let samples = if wide { 8 } else { 4 };
                    let step = if wide { 2 } else { 1 };
                    let idx = x as usize * samples;
                    rgb_to_gray(row[idx], row[idx + step], row[idx + 2 * step])
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Extract the raw sample at column `x` from a packed row.
///
/// 16-bit rows return their high byte.
fn packed_sample(row: &[u8], x: u32, bit_depth: BitDepth) -> u8 {
    match bit_depth {
        BitDepth::One => (row[(x / 8) as usize] >> (7 - (x % 8))) & 1,
        BitDepth::Two => (row[(x / 4) as usize] >> (6 - (x % 4) * 2)) & 3,
        BitDepth::Four => (row[(x / 2) as usize] >> (4 - (x % 2) * 4)) & 0xF,
        BitDepth::Eight => row[x as usize],
        BitDepth::Sixteen => row[x as usize * 2],
    }
}

/// Gray sample at column `x`, stretched to the full 8-bit range.
fn scaled_low_depth(row: &[u8], x: u32, bit_depth: BitDepth) -> u8 {
    let raw = packed_sample(row, x, bit_depth);
    match bit_depth {
        BitDepth::One => raw * 255,
        BitDepth::Two => raw * 85,
        BitDepth::Four => raw * 17,
        BitDepth::Eight | BitDepth::Sixteen => raw,
    }
}

fn palette_gray(palette: Option<&[u8]>, index: usize) -> IoResult<u8> {
    let palette =
        palette.ok_or_else(|| IoError::InvalidData("indexed PNG without palette".to_string()))?;
    match palette.get(index * 3..index * 3 + 3) {
        Some(rgb) => Ok(rgb_to_gray(rgb[0], rgb[1], rgb[2])),
        None => Err(IoError::InvalidData(format!(
            "palette index {} out of range ({} entries)",
            index,
            palette.len() / 3
        ))),
    }
}

/// Write a PNG image as 8-bit grayscale
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(pix.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
