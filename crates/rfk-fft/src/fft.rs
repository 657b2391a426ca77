use std::fmt;

use rfk_core::config::FftConfig;
use rfk_core::error::FftError;
use rfk_core::frequency;
use rfk_core::size::require_len;
use rfk_core::spectrum::{Direction, Spectrum, Transformed};

use crate::context::{TransformContext, real_fft};

/// High-level transform object for one fixed length.
///
/// Owns a [`TransformContext`] and the bin frequency table.
///
/// # Example
/// ```
/// use rfk_fft::Fft;
///
/// let fft = Fft::new(8).unwrap();
/// let out = fft.transform(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(out.frequencies[4], 0.5);
/// assert_eq!(fft.to_string(), "Fft{N=8}");
/// ```
#[derive(Debug)]
pub struct Fft {
    context: TransformContext,
    frequencies: Vec<f32>,
}

impl Fft {
    /// # Errors
    /// See [`TransformContext::init`].
    pub fn new(number_of_samples: usize) -> Result<Self, FftError> {
        Self::with_config(number_of_samples, &FftConfig::default())
    }

    /// # Errors
    /// See [`TransformContext::with_config`].
    pub fn with_config(number_of_samples: usize, config: &FftConfig) -> Result<Self, FftError> {
        let context = TransformContext::with_config(number_of_samples, config)?;
        let frequencies = frequency::bin_frequencies(number_of_samples);
        Ok(Self {
            context,
            frequencies,
        })
    }

    #[must_use]
    pub fn number_of_samples(&self) -> usize {
        self.context.size()
    }

    /// Forward real transform with frequencies attached.
    ///
    /// # Errors
    /// `InsufficientInput` if `real` is shorter than N.
    pub fn transform(&self, real: &[f32]) -> Result<Transformed, FftError> {
        let spectrum = real_fft(
            &self.context,
            Direction::Forward,
            self.number_of_samples(),
            real,
            None,
        )?;
        Ok(Transformed::new(spectrum, self.frequencies.clone()))
    }

    /// Forward transform of a complex signal at length N.
    ///
    /// The output is not conjugate-symmetric in general.
    ///
    /// # Errors
    /// `InsufficientInput` if `real` or `imag` is shorter than N.
    pub fn transform_complex(&self, real: &[f32], imag: &[f32]) -> Result<Transformed, FftError> {
        let n = self.number_of_samples();
        require_len("real_in", real.len(), n)?;
        require_len("imag_in", imag.len(), n)?;
        let mut out = Spectrum::zeroed(n)?;
        self.context
            .engine()
            .transform(n, false, real, Some(imag), &mut out.real, &mut out.imag)?;
        Ok(Transformed::new(out, self.frequencies.clone()))
    }

    /// Inverse transform of a full N-bin spectrum. `imag` of the result is zero.
    ///
    /// # Errors
    /// `InsufficientInput` if `real` or `imag` is shorter than N.
    pub fn inverse_transform(&self, real: &[f32], imag: &[f32]) -> Result<Spectrum, FftError> {
        real_fft(
            &self.context,
            Direction::Inverse,
            self.number_of_samples(),
            real,
            Some(imag),
        )
    }

    /// Owned copy of the bin frequencies.
    #[must_use]
    pub fn frequencies(&self) -> Vec<f32> {
        self.frequencies.clone()
    }

    /// # Errors
    /// `InvalidBin` if `bin >= N`.
    pub fn frequency_for_bin(&self, bin: usize) -> Result<f32, FftError> {
        frequency::frequency_for_bin(bin, self.number_of_samples())
    }

    #[must_use]
    pub fn context(&self) -> &TransformContext {
        &self.context
    }
}

impl fmt::Display for Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fft{{N={}}}", self.number_of_samples())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_for_eight_bins() {
        let fft = Fft::new(8).unwrap();
        assert_eq!(
            fft.frequencies(),
            vec![0.0, 0.125, 0.25, 0.375, 0.5, -0.375, -0.25, -0.125]
        );
        assert_eq!(fft.frequency_for_bin(3).unwrap(), 0.375);
        assert_eq!(
            fft.frequency_for_bin(8),
            Err(FftError::InvalidBin { bin: 8, n: 8 })
        );
    }

    #[test]
    fn display_names_the_size() {
        assert_eq!(Fft::new(1024).unwrap().to_string(), "Fft{N=1024}");
    }

    #[test]
    fn transform_then_inverse() {
        let fft = Fft::new(32).unwrap();
        let x: Vec<f32> = (0..32).map(|i| (i as f32 * 0.4).sin()).collect();
        let fwd = fft.transform(&x).unwrap();
        assert_eq!(fwd.frequencies.len(), 32);
        let back = fft.inverse_transform(&fwd.real, &fwd.imag).unwrap();
        for (a, b) in back.real.iter().zip(&x) {
            assert!((a - b).abs() < 1e-5);
        }
        assert!(back.imag.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn complex_tone_lands_in_one_bin() {
        // e^{2πi·3t/16} : tout dans le bin 3.
        let n = 16;
        let fft = Fft::new(n).unwrap();
        let (re, im): (Vec<f32>, Vec<f32>) = (0..n)
            .map(|t| {
                let a = std::f32::consts::TAU * 3.0 * t as f32 / n as f32;
                (a.cos(), a.sin())
            })
            .unzip();
        let out = fft.transform_complex(&re, &im).unwrap();
        for k in 0..n {
            let want = if k == 3 { n as f32 } else { 0.0 };
            assert!((out.real[k] - want).abs() < 1e-4, "re k={k}");
            assert!(out.imag[k].abs() < 1e-4, "im k={k}");
        }
    }

    #[test]
    fn complex_transform_checks_lengths() {
        let fft = Fft::new(8).unwrap();
        assert!(matches!(
            fft.transform_complex(&[0.0; 8], &[0.0; 4]),
            Err(FftError::InsufficientInput { what: "imag_in", .. })
        ));
    }

    #[test]
    fn rejects_invalid_size() {
        assert!(Fft::new(12).unwrap_err().is_invalid_size());
    }
}
