//! Spectrum visualization

use crate::FourierResult;
use specfilt_core::{CPix, DPix, Pix};

/// Render `ln(1 + |F|)` stretched to `[0, 255]`.
///
/// The brightest sample is the largest log-magnitude; a spectrum that is
/// zero everywhere renders black. For a centered spectrum the DC term
/// appears in the middle of the image.
pub fn log_magnitude(spectrum: &CPix) -> FourierResult<Pix> {
    let mut mags = spectrum.norm();
    mags.data_mut().iter_mut().for_each(|v| *v = v.ln_1p());

    let (_, max) = mags.min_max();
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    let data = mags.data().iter().map(|&v| v * scale).collect();

    let (width, height) = spectrum.dimensions();
    Ok(DPix::from_data(width, height, data)?.to_pix()?)
}
