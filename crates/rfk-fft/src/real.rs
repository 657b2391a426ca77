use std::fmt;
use std::sync::Arc;

use rfk_core::error::{FftError, try_zeroed};
use rfk_core::size::{require_len, validate_size};
use rfk_core::traits::{ComplexFft, RealTransform};

use crate::packing::{
    deinterleave_pairs, expand_half_spectrum, fold_full_spectrum, interleave_pairs,
    merge_spectrum, split_spectrum, split_twiddles,
};

/// Real transform through an N/2-point complex transform on sample pairs.
///
/// Pre-computes the split twiddles once; every call allocates its own
/// scratch, so one instance can serve several threads.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use rfk_core::traits::RealTransform;
/// use rfk_fft::radix2::RadixTwoEngine;
/// use rfk_fft::real::PackedRealFft;
///
/// let fft = PackedRealFft::new(8, Arc::new(RadixTwoEngine::shared().unwrap())).unwrap();
/// let (mut re, mut im) = (vec![0.0; 8], vec![0.0; 8]);
/// fft.forward(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], &mut re, &mut im).unwrap();
/// assert!(re.iter().all(|v| (v - 1.0).abs() < 1e-6));
/// assert!(im.iter().all(|v| v.abs() < 1e-6));
/// ```
pub struct PackedRealFft {
    n: usize,
    engine: Arc<dyn ComplexFft>,
    twiddles: Vec<(f64, f64)>,
}

impl PackedRealFft {
    /// Plan a packed transform of `n` real samples.
    ///
    /// # Errors
    /// `InvalidSize` if `n < 4` or not a power of two, `Allocation` for the
    /// twiddle table.
    pub fn new(n: usize, engine: Arc<dyn ComplexFft>) -> Result<Self, FftError> {
        validate_size(n)?;
        let twiddles = split_twiddles(n)?;
        Ok(Self {
            n,
            engine,
            twiddles,
        })
    }
}

impl fmt::Debug for PackedRealFft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedRealFft")
            .field("n", &self.n)
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl RealTransform for PackedRealFft {
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

        let mut packed_re: Vec<f32> = try_zeroed(m, "packed real")?;
        let mut packed_im: Vec<f32> = try_zeroed(m, "packed imag")?;
        let mut z_re: Vec<f32> = try_zeroed(m, "half transform real")?;
        let mut z_im: Vec<f32> = try_zeroed(m, "half transform imag")?;

        interleave_pairs(&input[..n], &mut packed_re, &mut packed_im);
        self.engine
            .transform(m, false, &packed_re, Some(&packed_im), &mut z_re, &mut z_im)?;

        // Les buffers packed servent ensuite de demi-spectre.
        split_spectrum(&z_re, &z_im, &self.twiddles, &mut packed_re, &mut packed_im);
        expand_half_spectrum(&packed_re, &packed_im, real_out, imag_out);
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

        let mut half_re: Vec<f32> = try_zeroed(m, "half spectrum real")?;
        let mut half_im: Vec<f32> = try_zeroed(m, "half spectrum imag")?;
        let mut z_re: Vec<f32> = try_zeroed(m, "packed spectrum real")?;
        let mut z_im: Vec<f32> = try_zeroed(m, "packed spectrum imag")?;

        fold_full_spectrum(real_in, imag_in, &mut half_re, &mut half_im);
        merge_spectrum(&half_re, &half_im, &self.twiddles, &mut z_re, &mut z_im);
        self.engine
            .transform(m, true, &z_re, Some(&z_im), &mut half_re, &mut half_im)?;
        deinterleave_pairs(&half_re, &half_im, &mut real_out[..n]);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "packed"
    }
}

/// Real transform as an N-point complex transform with a zero imaginary part.
///
/// About twice the arithmetic of [`PackedRealFft`], no reconstruction step.
pub struct FullLengthRealFft {
    n: usize,
    engine: Arc<dyn ComplexFft>,
}

impl FullLengthRealFft {
    /// Plan a full-length transform of `n` real samples.
    ///
    /// # Errors
    /// `InvalidSize` if `n < 4` or not a power of two.
    pub fn new(n: usize, engine: Arc<dyn ComplexFft>) -> Result<Self, FftError> {
        validate_size(n)?;
        Ok(Self { n, engine })
    }
}

impl fmt::Debug for FullLengthRealFft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullLengthRealFft")
            .field("n", &self.n)
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl RealTransform for FullLengthRealFft {
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
        self.engine
            .transform(n, false, input, None, real_out, imag_out)?;
        // DC et Nyquist sont réels pour une entrée réelle.
        imag_out[0] = 0.0;
        imag_out[n / 2] = 0.0;
        Ok(())
    }

    fn inverse(
        &self,
        real_in: &[f32],
        imag_in: &[f32],
        real_out: &mut [f32],
    ) -> Result<(), FftError> {
        let n = self.n;
        require_len("imag_in", imag_in.len(), n)?;
        let mut discarded: Vec<f32> = try_zeroed(n, "inverse imag scratch")?;
        self.engine
            .transform(n, true, real_in, Some(imag_in), real_out, &mut discarded)
    }

    fn name(&self) -> &'static str {
        "full"
    }
}
