//! specfilt-io - Grayscale image reading and writing
//!
//! The spectral pipeline works on single-channel 8-bit rasters. This crate
//! decodes image files into a [`Pix`] (converting color input to gray) and
//! encodes a [`Pix`] back to a file.
//!
//! Supported formats (each behind a cargo feature, all on by default):
//!
//! - PNG (`png-format`): read all color types, write 8-bit gray
//! - JPEG (`jpeg`): read 8-bit gray and RGB, write 8-bit gray
//! - PNM (`pnm`): read P2/P3/P5/P6, write P5

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpegio;
#[cfg(feature = "png-format")]
pub mod pngio;
#[cfg(feature = "pnm")]
pub mod pnmio;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use specfilt_core::ImageFormat;

use specfilt_core::Pix;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image file into an 8-bit grayscale `Pix`.
///
/// The format is detected from the file contents, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let pix = read_image_mem(&data)?;
    log::debug!(
        "read {} ({}x{}, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.informat()
    );
    Ok(pix)
}

/// Decode an in-memory image into an 8-bit grayscale `Pix`.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    let pix = match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => pngio::read_png(cursor)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpegio::read_jpeg(cursor)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnmio::read_pnm(cursor)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} support is not enabled",
                other
            )));
        }
    };
    Ok(with_informat(pix, format))
}

/// Write a `Pix` to a file in the given format.
///
/// [`ImageFormat::Unknown`] picks the format from the path extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => ImageFormat::from_path(path),
        f => f,
    };
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    log::debug!("wrote {} as {:?}", path.display(), format);
    Ok(())
}

/// Encode a `Pix` into an in-memory buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => pngio::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpegio::write_jpeg(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnmio::write_pnm(pix, writer),
        other => {
            drop(writer);
            Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?}",
                other
            )))
        }
    }
}

fn with_informat(pix: Pix, format: ImageFormat) -> Pix {
    match pix.try_into_mut() {
        Ok(mut pm) => {
            pm.set_informat(format);
            pm.into()
        }
        Err(pix) => pix,
    }
}

/// Convert an RGB triple to gray using ITU-R BT.601 luma weights.
#[inline]
pub(crate) fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    (y + 0.5).min(255.0) as u8
}
