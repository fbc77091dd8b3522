//! Direct two-dimensional discrete Fourier transform
//!
//! The forward transform of an `N x M` image (`N` = height, `M` = width) is
//!
//! ```text
//! F(u, v) = 1/(N·M) · Σ_y Σ_x c(x, y) · exp(-i·2π·(u·y/N + v·x/M))
//! ```
//!
//! where `c` is the image after [centering](crate::center), so the
//! zero-frequency term of `F` lands at `(N/2, M/2)`. The inverse sums with
//! the opposite sign and no normalization, keeps the real part and undoes
//! the centering.
//!
//! # Cost
//!
//! [`TransformMethod::Direct`] visits every input sample for every output
//! coefficient, `O(N²·M²)`. [`TransformMethod::Separable`] evaluates the same
//! sums one axis at a time, `O(N·M·(N+M))`. Both fan out over output rows
//! with rayon.

use crate::center::center;
use crate::{FourierError, FourierResult};
use num_complex::Complex64;
use rayon::prelude::*;
use specfilt_core::{CPix, DPix, Pix};
use std::f64::consts::PI;

/// Imaginary residue (in intensity units) above which the inverse
/// transform logs a warning when no tolerance is configured.
const IMAGINARY_WARN_LEVEL: f64 = 0.5;

/// How the 2D sums are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMethod {
    /// Every output coefficient sums over the whole grid
    #[default]
    Direct,
    /// Rows first, then columns (same sums, fewer operations)
    Separable,
}

/// Options for the forward and inverse transforms
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformOptions {
    /// Evaluation strategy
    pub method: TransformMethod,
    /// When set, the inverse transform fails if the largest imaginary
    /// component of the reconstruction exceeds this value. `None` discards
    /// the imaginary part silently.
    pub imaginary_tolerance: Option<f64>,
}

impl TransformOptions {
    /// Set the evaluation strategy.
    pub fn with_method(mut self, method: TransformMethod) -> Self {
        self.method = method;
        self
    }

    /// Reject reconstructions whose imaginary residue exceeds `tolerance`.
    pub fn with_imaginary_tolerance(mut self, tolerance: f64) -> Self {
        self.imaginary_tolerance = Some(tolerance);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }
}

/// Forward transform of an 8-bit image with default options.
pub fn analyze(pix: &Pix) -> FourierResult<CPix> {
    analyze_with(pix, &TransformOptions::default())
}

/// Forward transform of an 8-bit image.
pub fn analyze_with(pix: &Pix, options: &TransformOptions) -> FourierResult<CPix> {
    analyze_dpix(&DPix::from_pix(pix), options)
}

/// Forward transform of a real-valued image.
///
/// The image is centered first; the result is normalized by `1/(N·M)`.
pub fn analyze_dpix(dpix: &DPix, options: &TransformOptions) -> FourierResult<CPix> {
    let centered = CPix::from_dpix(&center(dpix));
    let mut spectrum = transform(&centered, Direction::Forward, options.method)?;

    let scale = 1.0 / (spectrum.width() as f64 * spectrum.height() as f64);
    spectrum.data_mut().par_iter_mut().for_each(|c| *c *= scale);
    Ok(spectrum)
}

/// Inverse transform back to an 8-bit image with default options.
pub fn synthesize(spectrum: &CPix) -> FourierResult<Pix> {
    synthesize_with(spectrum, &TransformOptions::default())
}

/// Inverse transform back to an 8-bit image.
///
/// Values are clamped to `[0, 255]` and rounded to the nearest integer.
pub fn synthesize_with(spectrum: &CPix, options: &TransformOptions) -> FourierResult<Pix> {
    Ok(synthesize_dpix(spectrum, options)?.to_pix()?)
}

/// Inverse transform to a real-valued image, before clipping.
///
/// # Errors
///
/// Returns [`FourierError::MalformedInput`] if `options.imaginary_tolerance`
/// is set and the reconstruction has a larger imaginary component.
pub fn synthesize_dpix(spectrum: &CPix, options: &TransformOptions) -> FourierResult<DPix> {
    let signal = transform(spectrum, Direction::Inverse, options.method)?;

    let residue = signal.max_abs_imag();
    log::debug!("inverse transform imaginary residue: {:e}", residue);
    match options.imaginary_tolerance {
        Some(tolerance) if residue > tolerance => {
            return Err(FourierError::MalformedInput(format!(
                "reconstruction imaginary residue {:e} exceeds tolerance {:e}",
                residue, tolerance
            )));
        }
        None if residue > IMAGINARY_WARN_LEVEL => {
            log::warn!(
                "discarding imaginary residue {:.3} from inverse transform",
                residue
            );
        }
        _ => {}
    }

    Ok(center(&signal.real()))
}

/// Unnormalized 2D DFT in the given direction.
fn transform(input: &CPix, direction: Direction, method: TransformMethod) -> FourierResult<CPix> {
    let (width, height) = input.dimensions();
    let row_twiddles = twiddles(width as usize, direction);
    let col_twiddles = twiddles(height as usize, direction);

    let data = match method {
        TransformMethod::Direct => direct(input, &row_twiddles, &col_twiddles),
        TransformMethod::Separable => separable(input, &row_twiddles, &col_twiddles),
    };
    Ok(CPix::from_data(width, height, data)?)
}

/// `exp(±i·2π·k/n)` for `k` in `[0, n)`.
///
/// Since `exp(±i·2π·u·x/n)` is periodic in `u·x` with period `n`, the
/// kernel for any frequency/sample pair is `table[(u·x) % n]`.
fn twiddles(n: usize, direction: Direction) -> Vec<Complex64> {
    let step = direction.sign() * 2.0 * PI / n as f64;
    (0..n)
        .map(|k| (Complex64::i() * (step * k as f64)).exp())
        .collect()
}

fn direct(input: &CPix, row_tw: &[Complex64], col_tw: &[Complex64]) -> Vec<Complex64> {
    let width = row_tw.len();
    let height = col_tw.len();
    let src = input.data();
    let mut out = vec![Complex64::new(0.0, 0.0); width * height];

    out.par_chunks_mut(width).enumerate().for_each(|(u, out_row)| {
        for (v, cell) in out_row.iter_mut().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (y, in_row) in src.chunks_exact(width).enumerate() {
                let wy = col_tw[(u * y) % height];
                for (x, &sample) in in_row.iter().enumerate() {
                    acc += sample * wy * row_tw[(v * x) % width];
                }
            }
            *cell = acc;
        }
    });

    out
}

fn separable(input: &CPix, row_tw: &[Complex64], col_tw: &[Complex64]) -> Vec<Complex64> {
    let width = row_tw.len();
    let height = col_tw.len();
    let src = input.data();

    // Pass 1: transform each row along x.
    let mut rows = vec![Complex64::new(0.0, 0.0); width * height];
    rows.par_chunks_mut(width)
        .zip(src.par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (v, cell) in out_row.iter_mut().enumerate() {
                *cell = in_row
                    .iter()
                    .enumerate()
                    .map(|(x, &sample)| sample * row_tw[(v * x) % width])
                    .sum();
            }
        });

    // Pass 2: transform each column along y.
    let mut out = vec![Complex64::new(0.0, 0.0); width * height];
    out.par_chunks_mut(width).enumerate().for_each(|(u, out_row)| {
        for (v, cell) in out_row.iter_mut().enumerate() {
            *cell = (0..height)
                .map(|y| rows[y * width + v] * col_tw[(u * y) % height])
                .sum();
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(width: u32, height: u32) -> Pix {
        let data = (0..width * height)
            .map(|i| ((i * 37 + 11) % 256) as u8)
            .collect();
        Pix::from_data(width, height, data).unwrap()
    }

    #[test]
    fn test_constant_image_has_single_centered_coefficient() {
        let pix = Pix::new_with_value(4, 4, 100).unwrap();
        let spectrum = analyze(&pix).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let c = spectrum.get_pixel(x, y).unwrap();
                let expected = if (x, y) == (2, 2) { 100.0 } else { 0.0 };
                assert_abs_diff_eq!(c.re, expected, epsilon = 1e-9);
                assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_roundtrip_even_and_odd_sizes() {
        for &(w, h) in &[(4, 4), (8, 6), (5, 3), (1, 7), (1, 1)] {
            let pix = ramp(w, h);
            let back = synthesize(&analyze(&pix).unwrap()).unwrap();
            assert_eq!(back.dimensions(), pix.dimensions());
            for (&a, &b) in pix.data().iter().zip(back.data()) {
                assert!(a.abs_diff(b) <= 1, "{}x{}: {} vs {}", w, h, a, b);
            }
        }
    }

    #[test]
    fn test_separable_matches_direct() {
        let pix = ramp(6, 5);
        let direct = analyze(&pix).unwrap();
        let opts = TransformOptions::default().with_method(TransformMethod::Separable);
        let separable = analyze_with(&pix, &opts).unwrap();
        for (a, b) in direct.data().iter().zip(separable.data()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-9);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-9);
        }

        let back = synthesize_dpix(&separable, &opts).unwrap();
        let expected = DPix::from_pix(&pix);
        for (a, b) in back.data().iter().zip(expected.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_matches_definition() {
        // Compare one coefficient with the literal double sum.
        let pix = ramp(3, 4);
        let spectrum = analyze(&pix).unwrap();
        let (m, n) = (3.0, 4.0);
        let (u, v) = (1.0, 2.0);
        let mut acc = Complex64::new(0.0, 0.0);
        for y in 0..4u32 {
            for x in 0..3u32 {
                let sign = if (x + y) % 2 == 0 { 1.0 } else { -1.0 };
                let sample = sign * f64::from(pix.get_pixel(x, y).unwrap());
                let theta = 2.0 * PI * (u * y as f64 / n + v * x as f64 / m);
                acc += sample * (Complex64::i() * -theta).exp();
            }
        }
        acc /= m * n;
        let c = spectrum.get_pixel(2, 1).unwrap();
        assert_abs_diff_eq!(c.re, acc.re, epsilon = 1e-9);
        assert_abs_diff_eq!(c.im, acc.im, epsilon = 1e-9);
    }

    #[test]
    fn test_synthesize_clamps() {
        // A centered DC term of 400 reconstructs to a constant 400.
        let mut spectrum = CPix::new(2, 2).unwrap();
        spectrum.set_pixel(1, 1, Complex64::new(400.0, 0.0)).unwrap();
        let pix = synthesize(&spectrum).unwrap();
        assert_eq!(pix.data(), &[255, 255, 255, 255]);

        spectrum.set_pixel(1, 1, Complex64::new(-50.0, 0.0)).unwrap();
        let pix = synthesize(&spectrum).unwrap();
        assert_eq!(pix.data(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_imaginary_tolerance() {
        let pix = ramp(4, 4);
        let spectrum = analyze(&pix).unwrap();
        let strict = TransformOptions::default().with_imaginary_tolerance(1e-6);
        assert!(synthesize_with(&spectrum, &strict).is_ok());

        // A lone off-center coefficient is not Hermitian.
        let mut skewed = CPix::new(4, 4).unwrap();
        skewed.set_pixel(3, 2, Complex64::new(10.0, 0.0)).unwrap();
        assert!(matches!(
            synthesize_with(&skewed, &strict),
            Err(FourierError::MalformedInput(_))
        ));
        assert!(synthesize(&skewed).is_ok());
    }
}
