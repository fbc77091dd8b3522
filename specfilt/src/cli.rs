//! Command-line front end
//!
//! ```text
//! specfilt [OPTIONS] <INPUT> <OUTPUT> <BAND> <SHAPE> <D0> [D1]
//! ```
//!
//! Relative image paths are resolved inside `--input-dir` and
//! `--output-dir`; absolute paths are used as given.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use log::LevelFilter;
use specfilt_core::ImageFormat;
use specfilt_fourier::{
    BandType, DEFAULT_ORDER, FilterConfig, ResponseShape, TransformMethod, TransformOptions,
    apply_filter_spectrum, log_magnitude,
};
use std::fs;
use std::path::PathBuf;

/// Transform evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    /// Definition-level double sum per coefficient
    #[default]
    Direct,
    /// Rows first, then columns
    Separable,
}

impl From<Method> for TransformMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Direct => TransformMethod::Direct,
            Method::Separable => TransformMethod::Separable,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "specfilt",
    version,
    about = "Filter a grayscale image in the frequency domain",
    long_about = None
)]
pub struct Args {
    /// Input image (relative to --input-dir)
    pub input: PathBuf,

    /// Output image (relative to --output-dir); the extension picks the format
    pub output: PathBuf,

    /// Band type: low-pass, high-pass, band-pass or band-stop
    pub band: BandType,

    /// Response shape: ideal, gaussian or butterworth
    pub shape: ResponseShape,

    /// Cutoff distance from the spectrum center
    pub d0: u32,

    /// Outer cutoff, required for band-pass and band-stop
    pub d1: Option<u32>,

    /// Butterworth order
    #[arg(long, default_value_t = DEFAULT_ORDER)]
    pub order: u32,

    /// Transform evaluation strategy
    #[arg(long, value_enum, default_value_t = Method::Direct)]
    pub method: Method,

    /// Directory that relative input paths are read from
    #[arg(long, default_value = "input")]
    pub input_dir: PathBuf,

    /// Directory that relative output paths are written to
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Also write the log-magnitude of the filtered spectrum to this file
    #[arg(long, value_name = "FILE")]
    pub spectrum: Option<PathBuf>,

    /// Fail if the reconstruction has an imaginary part larger than TOL
    #[arg(long, value_name = "TOL")]
    pub strict_imaginary: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Build the filter configuration.
    ///
    /// A missing `D1` for a band type, or cutoffs the filter rejects, are
    /// reported as usage errors.
    pub fn filter_config(&self) -> std::result::Result<FilterConfig, clap::Error> {
        let d1 = match (self.band.requires_two_cutoffs(), self.d1) {
            (true, None) => {
                return Err(Args::command().error(
                    ErrorKind::MissingRequiredArgument,
                    format!("{} filter requires <D1>", self.band),
                ));
            }
            (true, Some(d1)) => f64::from(d1),
            // Unused outside band types
            (false, d1) => f64::from(d1.unwrap_or(self.d0.saturating_add(1))),
        };

        FilterConfig::new(self.shape, self.band, f64::from(self.d0), Some(d1), self.order)
            .map_err(|e| Args::command().error(ErrorKind::ValueValidation, e))
    }

    /// Transform options selected on the command line.
    pub fn transform_options(&self) -> TransformOptions {
        let options = TransformOptions::default().with_method(self.method.into());
        match self.strict_imaginary {
            Some(tol) => options.with_imaginary_tolerance(tol),
            None => options,
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.input_dir.join(&self.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output)
    }

    pub fn spectrum_path(&self) -> Option<PathBuf> {
        self.spectrum.as_ref().map(|p| self.output_dir.join(p))
    }

    /// Log level implied by the `-v` count.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Read, filter and write one image.
pub fn run(args: &Args, config: &FilterConfig) -> Result<()> {
    let input = args.input_path();
    let output = args.output_path();

    let pixs = specfilt_io::read_image(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    log::info!(
        "loaded {} ({}x{})",
        input.display(),
        pixs.width(),
        pixs.height()
    );

    let (pixd, spectrum) = apply_filter_spectrum(&pixs, config, &args.transform_options())
        .with_context(|| format!("failed to apply {}", config))?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    specfilt_io::write_image(&pixd, &output, ImageFormat::Unknown)
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("wrote {}", output.display());

    if let Some(path) = args.spectrum_path() {
        let view = log_magnitude(&spectrum)?;
        specfilt_io::write_image(&view, &path, ImageFormat::Unknown)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote spectrum {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("specfilt").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_low_pass_defaults() {
        let args = parse(&["a.png", "b.png", "low-pass", "ideal", "30"]).unwrap();
        assert_eq!(args.band, BandType::LowPass);
        assert_eq!(args.shape, ResponseShape::Ideal);
        assert_eq!(args.order, DEFAULT_ORDER);
        assert_eq!(args.method, Method::Direct);
        assert_eq!(args.input_path(), PathBuf::from("input/a.png"));
        assert_eq!(args.output_path(), PathBuf::from("output/b.png"));
        assert_eq!(args.log_level(), LevelFilter::Warn);

        let config = args.filter_config().unwrap();
        assert_eq!(config.d0(), 30.0);
        assert_eq!(config.d1(), None);
    }

    #[test]
    fn test_band_type_requires_d1() {
        let args = parse(&["a.png", "b.png", "band-pass", "gaussian", "10"]).unwrap();
        let err = args.filter_config().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let args = parse(&["a.png", "b.png", "band-stop", "butterworth", "10", "20"]).unwrap();
        let config = args.filter_config().unwrap();
        assert_eq!(config.d1(), Some(20.0));

        let args = parse(&["a.png", "b.png", "band-stop", "ideal", "20", "10"]).unwrap();
        assert_eq!(
            args.filter_config().unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_rejects_unknown_names_and_arity() {
        assert!(parse(&["a.png", "b.png", "notch", "ideal", "10"]).is_err());
        assert!(parse(&["a.png", "b.png", "low-pass", "box", "10"]).is_err());
        assert!(parse(&["a.png", "b.png", "low-pass"]).is_err());
        assert!(parse(&["a.png", "b.png", "low-pass", "ideal", "-3"]).is_err());
    }

    #[test]
    fn test_options() {
        let args = parse(&[
            "-vv",
            "--method",
            "separable",
            "--order",
            "4",
            "--strict-imaginary",
            "1e-6",
            "--input-dir",
            "in",
            "--output-dir",
            "/tmp/out",
            "--spectrum",
            "s.png",
            "/abs/a.pgm",
            "b.pgm",
            "low-pass",
            "guassian",
            "5",
        ])
        .unwrap();
        assert_eq!(args.log_level(), LevelFilter::Debug);
        assert_eq!(args.shape, ResponseShape::Gaussian);
        assert_eq!(args.input_path(), PathBuf::from("/abs/a.pgm"));
        assert_eq!(args.output_path(), PathBuf::from("/tmp/out/b.pgm"));
        assert_eq!(args.spectrum_path(), Some(PathBuf::from("/tmp/out/s.png")));

        let opts = args.transform_options();
        assert_eq!(opts.method, TransformMethod::Separable);
        assert_eq!(opts.imaginary_tolerance, Some(1e-6));
        assert_eq!(args.filter_config().unwrap().order(), 4);
    }
}
