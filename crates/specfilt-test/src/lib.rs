//! specfilt-test - Regression test framework for specfilt
//!
//! Tracks a sequence of numbered checks inside one regression test and
//! reports every failure at the end instead of stopping at the first one.
//! Two modes are supported:
//!
//! - **Compare**: run all checks (default)
//! - **Display**: also write intermediate images to `tests/regout` for
//!   visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use specfilt_test::RegParams;
//!
//! let mut rp = RegParams::new("dft");
//! rp.compare_values(100.0, mean, 0.5);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "ramp16.pgm")
pub fn load_test_image(name: &str) -> TestResult<specfilt_core::Pix> {
    let path = test_data_path(name);
    specfilt_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // specfilt-test is at crates/specfilt-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
