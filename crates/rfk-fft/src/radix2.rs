use std::f64::consts::TAU;
use std::sync::Arc;

use rfk_core::error::{FftError, SizeViolation};
use rfk_core::size::{is_power_of_two, number_of_bits_needed, require_len};
use rfk_core::traits::ComplexFft;

use crate::bitrev::BitReversalTable;

/// Iterative radix-2 Cooley-Tukey transform.
///
/// Out-of-place: a bit-reversed copy into the outputs, then `log2 n`
/// butterfly passes with twiddles from a two-term trigonometric recurrence.
///
/// # Example
/// ```
/// use rfk_core::traits::ComplexFft;
/// use rfk_fft::radix2::RadixTwoEngine;
///
/// let engine = RadixTwoEngine::shared().unwrap();
/// let (mut re, mut im) = (vec![0.0f32; 4], vec![0.0f32; 4]);
/// engine.transform(4, false, &[1.0, 1.0, 1.0, 1.0], None, &mut re, &mut im).unwrap();
/// assert!((re[0] - 4.0).abs() < 1e-6);
/// assert!(re[1..].iter().all(|v| v.abs() < 1e-6));
/// ```
#[derive(Clone, Debug)]
pub struct RadixTwoEngine {
    table: Arc<BitReversalTable>,
}

impl RadixTwoEngine {
    /// Engine reading permutations from `table`.
    #[must_use]
    pub fn new(table: Arc<BitReversalTable>) -> Self {
        Self { table }
    }

    /// Engine over the process-wide table.
    ///
    /// # Errors
    /// Returns [`FftError::Allocation`] if the table cannot be built.
    pub fn shared() -> Result<Self, FftError> {
        BitReversalTable::shared().map(Self::new)
    }

    /// Bit-reversal table in use.
    #[must_use]
    pub fn table(&self) -> &BitReversalTable {
        &self.table
    }
}

impl ComplexFft for RadixTwoEngine {
    fn transform(
        &self,
        n: usize,
        inverse: bool,
        real_in: &[f32],
        imag_in: Option<&[f32]>,
        real_out: &mut [f32],
        imag_out: &mut [f32],
    ) -> Result<(), FftError> {
        if n < 2 {
            return Err(FftError::InvalidSize {
                n,
                violation: SizeViolation::TooSmall,
            });
        }
        if !is_power_of_two(n) {
            return Err(FftError::InvalidSize {
                n,
                violation: SizeViolation::NotPowerOfTwo,
            });
        }
        require_len("real_in", real_in.len(), n)?;
        if let Some(im) = imag_in {
            require_len("imag_in", im.len(), n)?;
        }
        require_len("real_out", real_out.len(), n)?;
        require_len("imag_out", imag_out.len(), n)?;

        let real_out = &mut real_out[..n];
        let imag_out = &mut imag_out[..n];
        let num_bits = number_of_bits_needed(n);

        // Copie et permutation bit-reversal simultanées.
        for i in 0..n {
            let j = self.table.lookup(i, num_bits);
            real_out[j] = real_in[i];
            imag_out[j] = imag_in.map_or(0.0, |im| im[i]);
        }

        let angle_numerator = if inverse { -TAU } else { TAU };
        let mut block_end = 1;
        let mut block_size = 2;
        while block_size <= n {
            let delta = angle_numerator / block_size as f64;
            butterfly_pass(real_out, imag_out, block_size, block_end, delta);
            block_end = block_size;
            block_size <<= 1;
        }

        if inverse {
            let denom = n as f32;
            for (re, im) in real_out.iter_mut().zip(imag_out.iter_mut()) {
                *re /= denom;
                *im /= denom;
            }
        }

        log::trace!("radix-2 n={n} inverse={inverse}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "radix2"
    }
}

/// One pass over all blocks of `block_size`, pairing `j` with `j + block_end`.
#[inline(always)]
fn butterfly_pass(
    real: &mut [f32],
    imag: &mut [f32],
    block_size: usize,
    block_end: usize,
    delta: f64,
) {
    for start in (0..real.len()).step_by(block_size) {
        let mut twiddles = TwiddleRecurrence::new(delta);
        for j in start..start + block_end {
            let (ar, ai) = twiddles.next_twiddle();
            let k = j + block_end;

            let (rk, ik) = (f64::from(real[k]), f64::from(imag[k]));
            let tr = ar * rk - ai * ik;
            let ti = ar * ik + ai * rk;

            let (rj, ij) = (f64::from(real[j]), f64::from(imag[j]));
            real[k] = (rj - tr) as f32;
            imag[k] = (ij - ti) as f32;
            real[j] = (rj + tr) as f32;
            imag[j] = (ij + ti) as f32;
        }
    }
}

/// `e^{-i·n·delta}` for n = 0, 1, 2, ... without calling sin/cos per step.
///
/// Uses `x(n) = 2cos(delta)·x(n-1) − x(n-2)` on both the cosine and the sine
/// sequence, seeded with the values at n = −1 and n = −2.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TwiddleRecurrence {
    w: f64,
    ar1: f64,
    ar2: f64,
    ai1: f64,
    ai2: f64,
}

impl TwiddleRecurrence {
    pub(crate) fn new(delta: f64) -> Self {
        Self {
            w: 2.0 * (-delta).cos(),
            ar1: (-delta).cos(),
            ar2: (-2.0 * delta).cos(),
            ai1: -(-delta).sin(),
            ai2: -(-2.0 * delta).sin(),
        }
    }

    #[inline(always)]
    pub(crate) fn next_twiddle(&mut self) -> (f64, f64) {
        let ar0 = self.w * self.ar1 - self.ar2;
        self.ar2 = self.ar1;
        self.ar1 = ar0;

        let ai0 = self.w * self.ai1 - self.ai2;
        self.ai2 = self.ai1;
        self.ai1 = ai0;

        (ar0, ai0)
    }
}
