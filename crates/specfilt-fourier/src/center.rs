//! Spectral centering
//!
//! Multiplying a grid by the checkerboard `(-1)^(x+y)` before the forward
//! transform moves the zero-frequency coefficient from `(0, 0)` to
//! `(height/2, width/2)` of the spectrum. Applying it again to the inverse
//! result undoes the shift. The operation is its own inverse.

use num_complex::Complex64;
use specfilt_core::{CPix, DPix};
use std::ops::Neg;

/// A grid that can be multiplied by the `(-1)^(x+y)` checkerboard.
pub trait Centering: Sized {
    /// Return a copy with every sample at odd `x + y` negated.
    fn centered(&self) -> Self;
}

impl Centering for DPix {
    fn centered(&self) -> Self {
        let mut out = self.clone();
        flip_checkerboard::<f64>(out.data_mut(), self.width());
        out
    }
}

impl Centering for CPix {
    fn centered(&self) -> Self {
        let mut out = self.clone();
        flip_checkerboard::<Complex64>(out.data_mut(), self.width());
        out
    }
}

/// Apply the centering checkerboard to a real or complex grid.
///
/// `center(&center(&g)) == g` holds exactly.
pub fn center<G: Centering>(grid: &G) -> G {
    grid.centered()
}

fn flip_checkerboard<T: Copy + Neg<Output = T>>(data: &mut [T], width: u32) {
    let width = width as usize;
    for (y, row) in data.chunks_exact_mut(width).enumerate() {
        // Odd rows start with a negated sample.
        for v in row.iter_mut().skip(1 - y % 2).step_by(2) {
            *v = -*v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_sign_pattern() {
        let dpix = DPix::new_with_value(3, 3, 2.0).unwrap();
        let c = center(&dpix);
        assert_eq!(
            c.data(),
            &[2.0, -2.0, 2.0, -2.0, 2.0, -2.0, 2.0, -2.0, 2.0]
        );
    }

    #[test]
    fn test_center_even_width() {
        let dpix = DPix::from_data(4, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        let c = center(&dpix);
        assert_eq!(c.data(), &[1.0, -2.0, 3.0, -4.0, -5.0, 6.0, -7.0, 8.0]);
    }

    #[test]
    fn test_center_is_involution() {
        let data: Vec<f64> = (0..35).map(|i| (i as f64 * 0.37).sin() * 100.0).collect();
        let dpix = DPix::from_data(7, 5, data).unwrap();
        assert_eq!(center(&center(&dpix)), dpix);

        let cdata: Vec<Complex64> = (0..12)
            .map(|i| Complex64::new(i as f64 - 5.5, 0.25 * i as f64))
            .collect();
        let cpix = CPix::from_data(3, 4, cdata).unwrap();
        assert_eq!(center(&center(&cpix)), cpix);
    }

    #[test]
    fn test_center_complex_negates_both_parts() {
        let cpix = CPix::new_with_value(2, 1, Complex64::new(1.0, -3.0)).unwrap();
        let c = center(&cpix);
        assert_eq!(c.data()[0], Complex64::new(1.0, -3.0));
        assert_eq!(c.data()[1], Complex64::new(-1.0, 3.0));
    }
}
