use std::io::Write;

use anyhow::{Context, Result};
use rfk_core::spectrum::Spectrum;
use serde::Serialize;

/// Everything one `rfk` run reports.
#[derive(Debug, Serialize)]
pub struct Report {
    pub size: usize,
    pub strategy: &'static str,
    pub frequencies: Vec<f32>,
    pub frames: Vec<FrameReport>,
    /// Max |x - inverse(forward(x))| over all frames, with `--inverse-check`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_trip_error: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct FrameReport {
    pub real: Vec<f32>,
    pub imag: Vec<f32>,
    pub magnitudes: Vec<f32>,
}

impl From<Spectrum> for FrameReport {
    fn from(spectrum: Spectrum) -> Self {
        let magnitudes = spectrum.magnitudes();
        Self {
            real: spectrum.real,
            imag: spectrum.imag,
            magnitudes,
        }
    }
}

/// Largest absolute elementwise difference between two frame sets.
#[must_use]
pub fn max_abs_error(expected: &[Vec<f32>], actual: &[Vec<f32>]) -> f32 {
    expected
        .iter()
        .zip(actual)
        .flat_map(|(a, b)| a.iter().zip(b).map(|(x, y)| (x - y).abs()))
        .fold(0.0, f32::max)
}

/// Human-readable table, one block per frame.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_table<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    writeln!(
        out,
        "rfk : N={} stratégie={} frames={}",
        report.size,
        report.strategy,
        report.frames.len()
    )?;
    for (index, frame) in report.frames.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "frame {index}")?;
        writeln!(
            out,
            "{:>5} {:>10} {:>14} {:>14} {:>14}",
            "bin", "freq", "re", "im", "|X|"
        )?;
        for (k, freq) in report.frequencies.iter().enumerate() {
            writeln!(
                out,
                "{k:>5} {freq:>10.5} {:>14.6} {:>14.6} {:>14.6}",
                frame.real[k], frame.imag[k], frame.magnitudes[k]
            )?;
        }
    }
    if let Some(err) = report.round_trip_error {
        writeln!(out)?;
        writeln!(out, "erreur aller-retour max : {err:.3e}")?;
    }
    Ok(())
}

/// Pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("Sérialisation JSON échouée")?;
    writeln!(out)?;
    Ok(())
}
