use rayon::prelude::*;

use rfk_core::error::FftError;
use rfk_core::spectrum::{Direction, Spectrum};

use crate::context::{TransformContext, real_fft};

/// Forward-transform independent frames of `ctx.size()` samples.
///
/// At or above `parallel_threshold` frames the work is spread over the rayon
/// pool, all workers sharing `ctx`. Output order follows input order.
///
/// # Errors
/// The first error hit by any frame, e.g. `InsufficientInput` for a short
/// frame.
///
/// # Example
/// ```
/// use rfk_fft::batch::forward_frames;
/// use rfk_fft::TransformContext;
///
/// let ctx = TransformContext::init(4).unwrap();
/// let frames = vec![vec![1.0; 4], vec![2.0; 4]];
/// let spectra = forward_frames(&ctx, &frames, 4).unwrap();
/// assert_eq!(spectra[1].real[0], 8.0);
/// ```
pub fn forward_frames(
    ctx: &TransformContext,
    frames: &[Vec<f32>],
    parallel_threshold: usize,
) -> Result<Vec<Spectrum>, FftError> {
    let n = ctx.size();
    let run = |frame: &Vec<f32>| real_fft(ctx, Direction::Forward, n, frame, None);

    if frames.len() >= parallel_threshold.max(1) {
        log::debug!("Batch FFT parallèle : {} frames de {n}", frames.len());
        frames.par_iter().map(run).collect()
    } else {
        frames.iter().map(run).collect()
    }
}

/// Inverse-transform spectra back to time-domain frames.
///
/// # Errors
/// The first error hit by any spectrum.
pub fn inverse_frames(
    ctx: &TransformContext,
    spectra: &[Spectrum],
    parallel_threshold: usize,
) -> Result<Vec<Vec<f32>>, FftError> {
    let n = ctx.size();
    let run = |s: &Spectrum| {
        real_fft(ctx, Direction::Inverse, n, &s.real, Some(&s.imag)).map(|out| out.real)
    };

    if spectra.len() >= parallel_threshold.max(1) {
        spectra.par_iter().map(run).collect()
    } else {
        spectra.iter().map(run).collect()
    }
}

/// Cut `samples` into consecutive non-overlapping frames of `n`.
///
/// The last frame is zero-padded. An empty input gives no frames.
#[must_use]
pub fn split_frames(samples: &[f32], n: usize) -> Vec<Vec<f32>> {
    if n == 0 {
        return Vec::new();
    }
    samples
        .chunks(n)
        .map(|chunk| {
            let mut frame = chunk.to_vec();
            frame.resize(n, 0.0);
            frame
        })
        .collect()
}
