//! Forward/inverse transform regression test
//!
//! Round trips the fixture images through `analyze` and `synthesize` with
//! both evaluation methods and checks the location and value of the DC
//! coefficient.

use specfilt_core::DPix;
use specfilt_fourier::{
    TransformMethod, TransformOptions, analyze, analyze_with, synthesize, synthesize_dpix,
};
use specfilt_test::{RegParams, load_test_image};

fn mean(values: &[u8]) -> f64 {
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

#[test]
fn dft_reg_roundtrip() {
    let mut rp = RegParams::new("dft_roundtrip");

    for name in ["ramp16.pgm", "checker8.pgm", "stripes16.pgm"] {
        let pixs = load_test_image(name).expect("load fixture");
        let spectrum = analyze(&pixs).expect("analyze");
        rp.compare_values(f64::from(pixs.width()), f64::from(spectrum.width()), 0.0);
        rp.compare_values(f64::from(pixs.height()), f64::from(spectrum.height()), 0.0);

        let pixd = synthesize(&spectrum).expect("synthesize");
        rp.compare_pix(&pixs, &pixd, 1);
        rp.write_pix_for_display(&pixd, name).expect("write");
    }

    assert!(rp.cleanup());
}

#[test]
fn dft_reg_dc_term() {
    let mut rp = RegParams::new("dft_dc");

    let pixs = load_test_image("ramp16.pgm").expect("load ramp16.pgm");
    let spectrum = analyze(&pixs).expect("analyze");
    let dc = spectrum.get_pixel(8, 8).expect("center");
    rp.compare_values(mean(pixs.data()), dc.re, 1e-9);
    rp.compare_values(0.0, dc.im, 1e-9);

    // Stripes carry energy only at DC and at the horizontal Nyquist pair.
    let stripes = load_test_image("stripes16.pgm").expect("load stripes16.pgm");
    let spectrum = analyze(&stripes).expect("analyze");
    rp.compare_values(100.0, spectrum.get_pixel(8, 8).expect("dc").re, 1e-9);
    rp.compare_values(100.0, spectrum.get_pixel(0, 8).expect("nyquist").norm(), 1e-9);
    let others: f64 = spectrum
        .data()
        .iter()
        .map(|c| c.norm())
        .sum::<f64>()
        - 200.0;
    rp.compare_values(0.0, others, 1e-7);

    assert!(rp.cleanup());
}

#[test]
fn dft_reg_separable_matches_direct() {
    let mut rp = RegParams::new("dft_separable");

    let pixs = load_test_image("checker8.pgm").expect("load checker8.pgm");
    let direct = analyze(&pixs).expect("direct");
    let opts = TransformOptions::default().with_method(TransformMethod::Separable);
    let separable = analyze_with(&pixs, &opts).expect("separable");

    let worst = direct
        .data()
        .iter()
        .zip(separable.data())
        .map(|(a, b)| (a - b).norm())
        .fold(0.0_f64, f64::max);
    rp.compare_values(0.0, worst, 1e-9);

    let recon = synthesize_dpix(&separable, &opts).expect("inverse");
    rp.compare_dpix(&DPix::from_pix(&pixs), &recon, 1e-6);

    assert!(rp.cleanup());
}
