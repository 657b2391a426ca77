use std::fmt;
use std::sync::Arc;

use realfft::num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rfk_core::error::{FftError, try_zeroed};
use rfk_core::size::{require_len, validate_size};
use rfk_core::traits::RealTransform;

/// Real transform backed by `realfft` plans.
///
/// Same scaling as the portable strategies: `realfft` leaves both
/// directions unnormalized, so the inverse is divided by N here.
///
/// # Example
/// ```
/// use rfk_core::traits::RealTransform;
/// use rfk_fft::planned::PlannedRealFft;
///
/// let fft = PlannedRealFft::new(8).unwrap();
/// let (mut re, mut im) = (vec![0.0; 8], vec![0.0; 8]);
/// fft.forward(&[2.0; 8], &mut re, &mut im).unwrap();
/// assert!((re[0] - 16.0).abs() < 1e-5);
/// ```
pub struct PlannedRealFft {
    n: usize,
    forward: Arc<dyn RealToComplex<f32>>,
    inverse: Arc<dyn ComplexToReal<f32>>,
}

impl PlannedRealFft {
    /// Plan both directions for `n` real samples.
    ///
    /// # Errors
    /// `InvalidSize` if `n < 4` or not a power of two.
    pub fn new(n: usize) -> Result<Self, FftError> {
        validate_size(n)?;
        let mut planner = RealFftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        Ok(Self {
            n,
            forward,
            inverse,
        })
    }
}

impl fmt::Debug for PlannedRealFft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannedRealFft").field("n", &self.n).finish()
    }
}

impl RealTransform for PlannedRealFft {
    fn size(&self) -> usize {
        self.n
    }

    fn forward(
        &self,
        input: &[f32],
        real_out: &mut [f32],
        imag_out: &mut [f32],
    ) -> Result<(), FftError> {
        let n = self.n;
        let m = n / 2;
        require_len("real_in", input.len(), n)?;
        require_len("real_out", real_out.len(), n)?;
        require_len("imag_out", imag_out.len(), n)?;

        // realfft écrase l'entrée : on travaille sur une copie.
        let mut samples: Vec<f32> = try_zeroed(n, "planned input")?;
        samples.copy_from_slice(&input[..n]);
        let mut spectrum: Vec<Complex<f32>> = try_zeroed(m + 1, "planned spectrum")?;
        let mut scratch: Vec<Complex<f32>> =
            try_zeroed(self.forward.get_scratch_len(), "planned scratch")?;

        self.forward
            .process_with_scratch(&mut samples, &mut spectrum, &mut scratch)
            .map_err(|e| FftError::Backend(e.to_string()))?;

        for (k, bin) in spectrum.iter().enumerate() {
            real_out[k] = bin.re;
            imag_out[k] = bin.im;
        }
        imag_out[0] = 0.0;
        imag_out[m] = 0.0;
        for k in 1..m {
            real_out[n - k] = real_out[k];
            imag_out[n - k] = -imag_out[k];
        }
        Ok(())
    }

    fn inverse(
        &self,
        real_in: &[f32],
        imag_in: &[f32],
        real_out: &mut [f32],
    ) -> Result<(), FftError> {
        let n = self.n;
        let m = n / 2;
        require_len("real_in", real_in.len(), n)?;
        require_len("imag_in", imag_in.len(), n)?;
        require_len("real_out", real_out.len(), n)?;

        let mut spectrum: Vec<Complex<f32>> = try_zeroed(m + 1, "planned spectrum")?;
        for (k, bin) in spectrum.iter_mut().enumerate() {
            *bin = Complex::new(real_in[k], imag_in[k]);
        }
        // ComplexToReal refuse une partie imaginaire non nulle en DC/Nyquist.
        spectrum[0].im = 0.0;
        spectrum[m].im = 0.0;

        let mut samples: Vec<f32> = try_zeroed(n, "planned output")?;
        let mut scratch: Vec<Complex<f32>> =
            try_zeroed(self.inverse.get_scratch_len(), "planned scratch")?;

        self.inverse
            .process_with_scratch(&mut spectrum, &mut samples, &mut scratch)
            .map_err(|e| FftError::Backend(e.to_string()))?;

        let scale = 1.0 / n as f32;
        for (out, v) in real_out.iter_mut().zip(&samples) {
            *out = v * scale;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "planned"
    }
}
