//! Frequency-domain filter masks
//!
//! A mask is a real-valued grid in `[0, 1]` (stored as complex with a zero
//! imaginary part) whose value at each cell depends only on the distance
//! `d` from the spectrum center `(height/2, width/2)`.
//!
//! Three response shapes are combined with four band types:
//!
//! | band       | ideal                    | gaussian / butterworth     |
//! |------------|--------------------------|----------------------------|
//! | low-pass   | `d <= d0`                | `LP(d0)`                   |
//! | high-pass  | `d >= d0`                | `1 - LP(d0)`               |
//! | band-pass  | `d0 <= d <= d1`          | `min(HP(d0), LP(d1))`      |
//! | band-stop  | `d <= d0` or `d >= d1`   | `max(LP(d0), HP(d1))`      |
//!
//! with `LP_gauss(d) = exp(-d²/(2·d0²))` and
//! `LP_butter(d) = 1/(1 + (d/d0)^(2n))`.

use crate::{FourierError, FourierResult};
use num_complex::Complex64;
use rayon::prelude::*;
use specfilt_core::CPix;
use std::fmt;
use std::str::FromStr;

/// Largest accepted Butterworth order.
pub const MAX_ORDER: u32 = 100;

/// Default Butterworth order.
pub const DEFAULT_ORDER: u32 = 2;

/// Transition shape of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// Hard threshold
    Ideal,
    /// Smooth exponential rolloff
    Gaussian,
    /// Rational rolloff with tunable order
    Butterworth,
}

impl ResponseShape {
    /// All response shapes
    pub const ALL: [ResponseShape; 3] = [Self::Ideal, Self::Gaussian, Self::Butterworth];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::Gaussian => "gaussian",
            Self::Butterworth => "butterworth",
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResponseShape {
    type Err = FourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ideal" => Ok(Self::Ideal),
            // "guassian" is a common misspelling kept for compatibility
            "gaussian" | "guassian" => Ok(Self::Gaussian),
            "butterworth" => Ok(Self::Butterworth),
            _ => Err(FourierError::InvalidParameter(format!(
                "unknown filter shape '{}', expected one of: ideal, gaussian, butterworth",
                s
            ))),
        }
    }
}

/// Which frequencies a filter keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandType {
    LowPass,
    HighPass,
    BandPass,
    BandStop,
}

impl BandType {
    /// All band types
    pub const ALL: [BandType; 4] = [
        Self::LowPass,
        Self::HighPass,
        Self::BandPass,
        Self::BandStop,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::LowPass => "low-pass",
            Self::HighPass => "high-pass",
            Self::BandPass => "band-pass",
            Self::BandStop => "band-stop",
        }
    }

    /// Whether this band needs both `d0` and `d1`
    pub fn requires_two_cutoffs(self) -> bool {
        matches!(self, Self::BandPass | Self::BandStop)
    }
}

impl fmt::Display for BandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandType {
    type Err = FourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low-pass" => Ok(Self::LowPass),
            "high-pass" => Ok(Self::HighPass),
            "band-pass" => Ok(Self::BandPass),
            "band-stop" => Ok(Self::BandStop),
            _ => Err(FourierError::InvalidParameter(format!(
                "unknown filter type '{}', expected one of: \
                 low-pass, high-pass, band-pass, band-stop",
                s
            ))),
        }
    }
}

/// Validated filter parameters
///
/// Construction checks every parameter, so a `FilterConfig` that exists is
/// always usable by [`generate_mask`].
///
/// # Examples
///
/// ```
/// use specfilt_fourier::{BandType, FilterConfig, ResponseShape};
///
/// let config = FilterConfig::band_pass(ResponseShape::Gaussian, 10.0, 40.0).unwrap();
/// assert_eq!(config.band(), BandType::BandPass);
/// assert!(FilterConfig::band_pass(ResponseShape::Ideal, 40.0, 10.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    shape: ResponseShape,
    band: BandType,
    d0: f64,
    d1: Option<f64>,
    order: u32,
}

impl FilterConfig {
    /// Build and validate a configuration.
    ///
    /// `d1` is only consulted for band-pass and band-stop; it is dropped for
    /// the other bands.
    ///
    /// # Errors
    ///
    /// Returns [`FourierError::InvalidParameter`] if
    /// - `d0` is negative or not finite, or zero for a smooth shape
    /// - a band type is missing `d1`, or `d1 <= d0`
    /// - `order` is outside `1..=MAX_ORDER`
    pub fn new(
        shape: ResponseShape,
        band: BandType,
        d0: f64,
        d1: Option<f64>,
        order: u32,
    ) -> FourierResult<Self> {
        check_cutoff("d0", d0, shape)?;

        let d1 = if band.requires_two_cutoffs() {
            let d1 = d1.ok_or_else(|| {
                FourierError::InvalidParameter(format!("{} filter requires d1", band))
            })?;
            check_cutoff("d1", d1, shape)?;
            if d0 >= d1 {
                return Err(FourierError::InvalidParameter(format!(
                    "d0 ({}) must be less than d1 ({}) for {} filter",
                    d0, d1, band
                )));
            }
            Some(d1)
        } else {
            None
        };

        if order == 0 || order > MAX_ORDER {
            return Err(FourierError::InvalidParameter(format!(
                "order must be between 1 and {}, got {}",
                MAX_ORDER, order
            )));
        }

        Ok(Self {
            shape,
            band,
            d0,
            d1,
            order,
        })
    }

    /// Low-pass filter with the default order.
    pub fn low_pass(shape: ResponseShape, d0: f64) -> FourierResult<Self> {
        Self::new(shape, BandType::LowPass, d0, None, DEFAULT_ORDER)
    }

    /// High-pass filter with the default order.
    pub fn high_pass(shape: ResponseShape, d0: f64) -> FourierResult<Self> {
        Self::new(shape, BandType::HighPass, d0, None, DEFAULT_ORDER)
    }

    /// Band-pass filter keeping `d0..=d1`, default order.
    pub fn band_pass(shape: ResponseShape, d0: f64, d1: f64) -> FourierResult<Self> {
        Self::new(shape, BandType::BandPass, d0, Some(d1), DEFAULT_ORDER)
    }

    /// Band-stop filter rejecting the band between `d0` and `d1`, default order.
    pub fn band_stop(shape: ResponseShape, d0: f64, d1: f64) -> FourierResult<Self> {
        Self::new(shape, BandType::BandStop, d0, Some(d1), DEFAULT_ORDER)
    }

    /// Replace the Butterworth order, revalidating.
    pub fn with_order(self, order: u32) -> FourierResult<Self> {
        Self::new(self.shape, self.band, self.d0, self.d1, order)
    }

    /// Response shape
    pub fn shape(&self) -> ResponseShape {
        self.shape
    }

    /// Band type
    pub fn band(&self) -> BandType {
        self.band
    }

    /// Inner (or only) cutoff distance
    pub fn d0(&self) -> f64 {
        self.d0
    }

    /// Outer cutoff (band types only)
    pub fn d1(&self) -> Option<f64> {
        self.d1
    }

    /// Butterworth order
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Mask value at distance `d` from the spectrum center.
    pub fn response(&self, d: f64) -> f64 {
        let lp = |cutoff: f64| low_pass_response(self.shape, d, cutoff, self.order);
        let hp = |cutoff: f64| high_pass_response(self.shape, d, cutoff, self.order);
        // Cutoffs were validated at construction.
        let d1 = self.d1.unwrap_or(self.d0);

        match (self.band, self.shape) {
            (BandType::LowPass, _) => lp(self.d0),
            (BandType::HighPass, _) => hp(self.d0),
            (BandType::BandPass, ResponseShape::Ideal) => indicator(self.d0 <= d && d <= d1),
            (BandType::BandStop, ResponseShape::Ideal) => indicator(d <= self.d0 || d >= d1),
            (BandType::BandPass, _) => hp(self.d0).min(lp(d1)),
            (BandType::BandStop, _) => lp(self.d0).max(hp(d1)),
        }
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} d0={}", self.shape, self.band, self.d0)?;
        if let Some(d1) = self.d1 {
            write!(f, " d1={}", d1)?;
        }
        if self.shape == ResponseShape::Butterworth {
            write!(f, " order={}", self.order)?;
        }
        Ok(())
    }
}

fn check_cutoff(name: &str, value: f64, shape: ResponseShape) -> FourierResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(FourierError::InvalidParameter(format!(
            "{} must be a finite non-negative distance, got {}",
            name, value
        )));
    }
    if value == 0.0 && shape != ResponseShape::Ideal {
        return Err(FourierError::InvalidParameter(format!(
            "{} must be positive for {} filter",
            name, shape
        )));
    }
    Ok(())
}

fn indicator(keep: bool) -> f64 {
    if keep { 1.0 } else { 0.0 }
}

fn low_pass_response(shape: ResponseShape, d: f64, d0: f64, order: u32) -> f64 {
    match shape {
        ResponseShape::Ideal => indicator(d <= d0),
        ResponseShape::Gaussian => (-(d * d) / (2.0 * d0 * d0)).exp(),
        ResponseShape::Butterworth => 1.0 / (1.0 + (d / d0).powi(2 * order as i32)),
    }
}

fn high_pass_response(shape: ResponseShape, d: f64, d0: f64, order: u32) -> f64 {
    match shape {
        ResponseShape::Ideal => indicator(d >= d0),
        _ => 1.0 - low_pass_response(shape, d, d0, order),
    }
}

/// Generate a `width x height` mask for `config`.
///
/// Distances are measured from `(height / 2, width / 2)` in real division,
/// so odd sizes center between cells.
pub fn generate_mask(width: u32, height: u32, config: &FilterConfig) -> FourierResult<CPix> {
    let mut mask = CPix::new(width, height)?;
    let cy = f64::from(height) / 2.0;
    let cx = f64::from(width) / 2.0;

    mask.data_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let dy = y as f64 - cy;
            for (x, cell) in row.iter_mut().enumerate() {
                let dx = x as f64 - cx;
                let d = (dy * dy + dx * dx).sqrt();
                *cell = Complex64::new(config.response(d), 0.0);
            }
        });

    Ok(mask)
}

/// Multiply a spectrum by a mask cell by cell.
///
/// # Errors
///
/// Returns [`FourierError::MalformedInput`] if the sizes differ.
pub fn apply_mask(spectrum: &CPix, mask: &CPix) -> FourierResult<CPix> {
    spectrum.mul(mask).map_err(|e| match e {
        specfilt_core::Error::DimensionMismatch { expected, actual } => {
            FourierError::MalformedInput(format!(
                "mask size {:?} does not match spectrum size {:?}",
                actual, expected
            ))
        }
        other => FourierError::Core(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn all_configs() -> Vec<FilterConfig> {
        let mut configs = Vec::new();
        for shape in ResponseShape::ALL {
            for band in BandType::ALL {
                configs.push(FilterConfig::new(shape, band, 3.0, Some(6.0), 2).unwrap());
            }
        }
        configs
    }

    #[test]
    fn test_parse_names() {
        for shape in ResponseShape::ALL {
            assert_eq!(shape.name().parse::<ResponseShape>().unwrap(), shape);
        }
        for band in BandType::ALL {
            assert_eq!(band.to_string().parse::<BandType>().unwrap(), band);
        }
        assert_eq!(
            "guassian".parse::<ResponseShape>().unwrap(),
            ResponseShape::Gaussian
        );
    }

    #[test]
    fn test_parse_unknown_names_allowed_values() {
        let err = "box".parse::<ResponseShape>().unwrap_err().to_string();
        assert!(err.contains("ideal") && err.contains("butterworth"));
        let err = "notch".parse::<BandType>().unwrap_err().to_string();
        assert!(err.contains("band-stop"));
    }

    #[test]
    fn test_validation() {
        use ResponseShape::*;
        assert!(FilterConfig::band_pass(Ideal, 5.0, 5.0).is_err());
        assert!(FilterConfig::band_stop(Gaussian, 8.0, 2.0).is_err());
        assert!(FilterConfig::new(Ideal, BandType::BandPass, 1.0, None, 2).is_err());
        assert!(FilterConfig::low_pass(Ideal, -1.0).is_err());
        assert!(FilterConfig::low_pass(Ideal, f64::NAN).is_err());
        assert!(FilterConfig::low_pass(Gaussian, 0.0).is_err());
        assert!(FilterConfig::high_pass(Butterworth, 0.0).is_err());
        assert!(FilterConfig::high_pass(Ideal, 0.0).is_ok());

        let lp = FilterConfig::low_pass(Butterworth, 4.0).unwrap();
        assert!(lp.with_order(0).is_err());
        assert!(lp.with_order(MAX_ORDER + 1).is_err());
        assert_eq!(lp.with_order(5).unwrap().order(), 5);

        // d1 is ignored outside band types
        let lp = FilterConfig::new(Ideal, BandType::LowPass, 4.0, Some(1.0), 2).unwrap();
        assert_eq!(lp.d1(), None);
    }

    #[test]
    fn test_mask_range() {
        for config in all_configs() {
            let mask = generate_mask(9, 12, &config).unwrap();
            for c in mask.data() {
                assert!((0.0..=1.0).contains(&c.re), "{}: {}", config, c.re);
                assert_eq!(c.im, 0.0);
            }
        }
    }

    #[test]
    fn test_band_composition() {
        for shape in [ResponseShape::Gaussian, ResponseShape::Butterworth] {
            let bp = FilterConfig::band_pass(shape, 3.0, 6.0).unwrap();
            let bs = FilterConfig::band_stop(shape, 3.0, 6.0).unwrap();
            let lp0 = FilterConfig::low_pass(shape, 3.0).unwrap();
            let hp0 = FilterConfig::high_pass(shape, 3.0).unwrap();
            let lp1 = FilterConfig::low_pass(shape, 6.0).unwrap();
            let hp1 = FilterConfig::high_pass(shape, 6.0).unwrap();
            for i in 0..40 {
                let d = i as f64 * 0.25;
                assert_abs_diff_eq!(bp.response(d), hp0.response(d).min(lp1.response(d)));
                assert_abs_diff_eq!(bs.response(d), lp0.response(d).max(hp1.response(d)));
            }
        }
    }

    #[test]
    fn test_butterworth_half_power_at_cutoff() {
        for order in 1..=6 {
            let lp = FilterConfig::low_pass(ResponseShape::Butterworth, 7.5)
                .unwrap()
                .with_order(order)
                .unwrap();
            assert_abs_diff_eq!(lp.response(7.5), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gaussian_values() {
        let lp = FilterConfig::low_pass(ResponseShape::Gaussian, 2.0).unwrap();
        assert_abs_diff_eq!(lp.response(0.0), 1.0);
        assert_abs_diff_eq!(lp.response(2.0), (-0.5_f64).exp(), epsilon = 1e-12);
        let hp = FilterConfig::high_pass(ResponseShape::Gaussian, 2.0).unwrap();
        assert_abs_diff_eq!(hp.response(2.0), 1.0 - (-0.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_ideal_edges_inclusive() {
        let lp = FilterConfig::low_pass(ResponseShape::Ideal, 3.0).unwrap();
        let mask = generate_mask(8, 8, &lp).unwrap();
        // Center (4, 4): (x=7, y=4) is at distance 3, (x=7, y=5) at sqrt(10)
        assert_eq!(mask.get_pixel(7, 4).unwrap().re, 1.0);
        assert_eq!(mask.get_pixel(7, 5).unwrap().re, 0.0);
        assert_eq!(mask.get_pixel(4, 4).unwrap().re, 1.0);

        let hp = FilterConfig::high_pass(ResponseShape::Ideal, 3.0).unwrap();
        assert_eq!(hp.response(3.0), 1.0);
        let bp = FilterConfig::band_pass(ResponseShape::Ideal, 2.0, 4.0).unwrap();
        assert_eq!(bp.response(2.0), 1.0);
        assert_eq!(bp.response(4.0), 1.0);
        assert_eq!(bp.response(4.01), 0.0);
        let bs = FilterConfig::band_stop(ResponseShape::Ideal, 2.0, 4.0).unwrap();
        assert_eq!(bs.response(2.0), 1.0);
        assert_eq!(bs.response(3.0), 0.0);
        assert_eq!(bs.response(4.0), 1.0);
    }

    #[test]
    fn test_odd_size_center() {
        // 3x3 has its center at (1.5, 1.5): the four inner corners tie.
        let lp = FilterConfig::low_pass(ResponseShape::Gaussian, 1.0).unwrap();
        let mask = generate_mask(3, 3, &lp).unwrap();
        let a = mask.get_pixel(1, 1).unwrap().re;
        let b = mask.get_pixel(2, 2).unwrap().re;
        assert_abs_diff_eq!(a, b, epsilon = 1e-15);
    }

    #[test]
    fn test_apply_mask_size_mismatch() {
        let spectrum = CPix::new(4, 4).unwrap();
        let mask = CPix::new(4, 3).unwrap();
        assert!(matches!(
            apply_mask(&spectrum, &mask),
            Err(FourierError::MalformedInput(_))
        ));
    }
}
