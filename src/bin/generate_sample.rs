//! Write synthetic `.KD` and `.SD` files for trying out the converter.

use anyhow::{Context, Result};

use rusty_uvvis::fixture::ContainerBuilder;
use rusty_uvvis::{HeaderEncoding, WavelengthRange};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Sum of Gaussian bands over a small baseline ripple. `phase` shifts the
/// ripple so repeated measurements of one sample do not come out identical.
fn generate_spectrum(range: WavelengthRange, bands: &[(f64, f64, f64)], phase: f64) -> Vec<f64> {
    range
        .wavelengths()
        .map(|nm| {
            let x = f64::from(nm);
            let signal: f64 = bands
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(x, mu, sigma, amp))
                .sum();
            signal + 0.002 * (x * 0.37 + phase).sin() * (x * 0.05).cos()
        })
        .collect()
}

fn main() -> Result<()> {
    let range = WavelengthRange::default();

    let samples: [(&str, Vec<(f64, f64, f64)>); 3] = [
        ("Blank", vec![]),
        ("Methyl orange", vec![(464.0, 45.0, 0.9), (270.0, 20.0, 0.4)]),
        ("Crystal violet", vec![(590.0, 30.0, 1.1), (300.0, 25.0, 0.5)]),
    ];
    let concentrations = [0.25, 0.5, 1.0];

    // Kinetics-style run: one dye measured repeatedly, no names, spaced headers
    let mut kd = ContainerBuilder::new(HeaderEncoding::Spaced).filler(256);
    for (i, &conc) in concentrations.iter().enumerate() {
        let bands: Vec<_> = samples[1]
            .1
            .iter()
            .map(|&(mu, sigma, amp)| (mu, sigma, amp * conc))
            .collect();
        kd = kd
            .absorbance(&generate_spectrum(range, &bands, i as f64))
            .filler(64 + i * 8);
    }

    // Sample log: named measurements, compact headers
    let mut sd = ContainerBuilder::new(HeaderEncoding::Compact).filler(128);
    for (i, (name, bands)) in samples.iter().enumerate() {
        sd = sd
            .sample_name(name)
            .filler(32)
            .absorbance(&generate_spectrum(range, bands, 10.0 + i as f64))
            .filler(48);
    }

    let outputs = [("sample_run.KD", kd), ("sample_log.SD", sd)];
    for (path, builder) in outputs {
        let size = builder.len();
        std::fs::write(path, builder.build()).with_context(|| format!("writing {path}"))?;
        println!("Wrote {path} ({size} bytes, {range})");
    }
    Ok(())
}
