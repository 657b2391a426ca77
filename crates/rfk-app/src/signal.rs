use std::path::Path;

use anyhow::{Context, Result};
use rfk_core::error::try_zeroed;

use crate::cli::SignalKind;

/// Build `len` samples of a synthetic signal.
///
/// `sine` puts a unit tone on bin 1 of every `period` samples; `noise` is a
/// deterministic xorshift sequence in [-1, 1].
///
/// # Errors
/// Returns an error if the buffer cannot be allocated.
pub fn generate(kind: SignalKind, len: usize, period: usize) -> Result<Vec<f32>> {
    let period = period.max(1);
    let mut samples: Vec<f32> = try_zeroed(len, "signal")
        .with_context(|| format!("Signal de {len} échantillons trop grand"))?;
    match kind {
        SignalKind::Impulse => {
            for v in samples.iter_mut().step_by(period) {
                *v = 1.0;
            }
        }
        SignalKind::Constant => samples.fill(1.0),
        SignalKind::Sine => {
            for (i, v) in samples.iter_mut().enumerate() {
                *v = (std::f32::consts::TAU * (i % period) as f32 / period as f32).sin();
            }
        }
        SignalKind::Noise => {
            let mut state: u32 = 0x9E37_79B9;
            for v in &mut samples {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                *v = (state as f32 / u32::MAX as f32) * 2.0 - 1.0;
            }
        }
    }
    Ok(samples)
}

/// Read whitespace-separated samples from a text file.
///
/// # Errors
/// Returns an error if the file cannot be read or a token is not a number.
pub fn read_samples(path: &Path) -> Result<Vec<f32>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_samples(&content).with_context(|| format!("Échantillons invalides dans {}", path.display()))
}

/// Parse whitespace-separated samples.
///
/// # Errors
/// Returns an error on the first token that is not a float.
pub fn parse_samples(content: &str) -> Result<Vec<f32>> {
    content
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f32>()
                .with_context(|| format!("échantillon #{i} : '{token}'"))
        })
        .collect()
}
