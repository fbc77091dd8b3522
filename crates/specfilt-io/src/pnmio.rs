//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with any
//! `maxval` up to 65535; PPM is converted to gray and samples are rescaled
//! to `[0, 255]`. Writes binary PGM (P5). PBM (P1/P4) is not supported.

use crate::{IoError, IoResult, rgb_to_gray};
use specfilt_core::Pix;
use std::io::{Read, Write};

/// Read a PNM image from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let mut header = Header::new(&bytes);

    let magic = header.token()?;
    let (ascii, channels) = match magic {
        b"P2" => (true, 1),
        b"P3" => (true, 3),
        b"P5" => (false, 1),
        b"P6" => (false, 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {}",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let width = header.number()?;
    let height = header.number()?;
    let maxval = header.number()?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PNM maxval {} out of range", maxval)));
    }

    let too_large = || IoError::InvalidData("PNM dimensions too large".to_string());
    let count = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(too_large)?;
    let samples: Vec<u32> = if ascii {
        (0..count).map(|_| header.number()).collect::<IoResult<_>>()?
    } else {
        // Exactly one whitespace byte separates maxval from the raster.
        let start = header.pos + 1;
        let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
        let end = count
            .checked_mul(bytes_per_sample)
            .and_then(|n| n.checked_add(start))
            .ok_or_else(too_large)?;
        let raster = bytes
            .get(start..end)
            .ok_or_else(|| IoError::InvalidData("PNM raster truncated".to_string()))?;
        if bytes_per_sample == 2 {
            raster
                .chunks_exact(2)
                .map(|b| u32::from(u16::from_be_bytes([b[0], b[1]])))
                .collect()
        } else {
            raster.iter().map(|&b| u32::from(b)).collect()
        }
    };

    let scale = |v: u32| -> u8 {
        let v = v.min(maxval);
        if maxval == 255 {
            v as u8
        } else {
            ((v * 255 + maxval / 2) / maxval) as u8
        }
    };

    let gray = if channels == 1 {
        samples.into_iter().map(scale).collect()
    } else {
        samples
            .chunks_exact(3)
            .map(|p| rgb_to_gray(scale(p[0]), scale(p[1]), scale(p[2])))
            .collect()
    };

    Ok(Pix::from_data(width, height, gray)?)
}

/// Write a `Pix` as binary PGM (P5).
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", pix.width(), pix.height())?;
    writer.write_all(pix.data())?;
    Ok(())
}

/// Whitespace/comment aware tokenizer over a PNM header.
struct Header<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Header<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Header { bytes, pos: 0 }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> IoResult<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("unexpected end of PNM data".to_string()));
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn number(&mut self) -> IoResult<u32> {
        let tok = self.token()?;
        std::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "invalid PNM number '{}'",
                    String::from_utf8_lossy(tok)
                ))
            })
    }
}
