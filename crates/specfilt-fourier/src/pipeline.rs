//! Analyze, mask, synthesize

use crate::dft::{TransformOptions, analyze_with, synthesize_with};
use crate::mask::{FilterConfig, apply_mask, generate_mask};
use crate::FourierResult;
use specfilt_core::{CPix, Pix};
use std::time::Instant;

/// Multiply a centered spectrum by the mask `config` describes.
pub fn filter_spectrum(spectrum: &CPix, config: &FilterConfig) -> FourierResult<CPix> {
    let (width, height) = spectrum.dimensions();
    let mask = generate_mask(width, height, config)?;
    apply_mask(spectrum, &mask)
}

/// Filter an image in the frequency domain with default transform options.
///
/// # Examples
///
/// ```
/// use specfilt_core::Pix;
/// use specfilt_fourier::{FilterConfig, ResponseShape, apply_filter};
///
/// let pix = Pix::new_with_value(4, 4, 100).unwrap();
/// let config = FilterConfig::low_pass(ResponseShape::Ideal, 100.0).unwrap();
/// let out = apply_filter(&pix, &config).unwrap();
/// assert_eq!(out.data(), pix.data());
/// ```
pub fn apply_filter(pix: &Pix, config: &FilterConfig) -> FourierResult<Pix> {
    apply_filter_with(pix, config, &TransformOptions::default())
}

/// Filter an image in the frequency domain.
///
/// The output has the same dimensions and resolution as the input.
pub fn apply_filter_with(
    pix: &Pix,
    config: &FilterConfig,
    options: &TransformOptions,
) -> FourierResult<Pix> {
    let (output, _) = apply_filter_spectrum(pix, config, options)?;
    Ok(output)
}

/// Filter an image and also return the filtered spectrum.
pub fn apply_filter_spectrum(
    pix: &Pix,
    config: &FilterConfig,
    options: &TransformOptions,
) -> FourierResult<(Pix, CPix)> {
    let (width, height) = pix.dimensions();
    let start = Instant::now();

    let spectrum = analyze_with(pix, options)?;
    log::debug!("forward transform {}x{}: {:?}", width, height, start.elapsed());

    let t = Instant::now();
    let filtered = filter_spectrum(&spectrum, config)?;
    log::debug!("mask {}: {:?}", config, t.elapsed());

    let t = Instant::now();
    let output = synthesize_with(&filtered, options)?;
    log::debug!("inverse transform: {:?}", t.elapsed());

    let mut pm = output.to_mut();
    pm.copy_resolution_from(pix);
    log::info!(
        "applied {} to {}x{} image in {:?}",
        config,
        width,
        height,
        start.elapsed()
    );
    Ok((pm.into(), filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BandType, ResponseShape, TransformMethod};

    #[test]
    fn test_pass_everything() {
        let pix = Pix::new_with_value(4, 4, 100).unwrap();
        let lp = FilterConfig::low_pass(ResponseShape::Ideal, 100.0).unwrap();
        assert_eq!(apply_filter(&pix, &lp).unwrap().data(), pix.data());
        let hp = FilterConfig::high_pass(ResponseShape::Ideal, 0.0).unwrap();
        assert_eq!(apply_filter(&pix, &hp).unwrap().data(), pix.data());
    }

    #[test]
    fn test_high_pass_removes_dc() {
        let pix = Pix::new_with_value(4, 4, 100).unwrap();
        let hp = FilterConfig::high_pass(ResponseShape::Ideal, 1.0).unwrap();
        let out = apply_filter(&pix, &hp).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_dimensions_and_resolution_preserved() {
        let mut pm = Pix::new_with_value(5, 3, 40).unwrap().to_mut();
        pm.set_resolution(300, 150);
        let pix: Pix = pm.into();
        let config =
            FilterConfig::new(ResponseShape::Butterworth, BandType::BandStop, 1.0, Some(2.0), 3)
                .unwrap();
        let opts = TransformOptions::default().with_method(TransformMethod::Separable);
        let out = apply_filter_with(&pix, &config, &opts).unwrap();
        assert_eq!(out.dimensions(), (5, 3));
        assert_eq!((out.xres(), out.yres()), (300, 150));
    }
}
