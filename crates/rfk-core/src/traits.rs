use crate::error::FftError;

/// Complex transform over power-of-two lengths.
///
/// Implemented by: `RadixTwoEngine`.
///
/// # Example
/// ```
/// use rfk_core::traits::ComplexFft;
/// use rfk_core::FftError;
///
/// struct Identity;
/// impl ComplexFft for Identity {
///     fn transform(&self, n: usize, _inverse: bool, real_in: &[f32], imag_in: Option<&[f32]>,
///                  real_out: &mut [f32], imag_out: &mut [f32]) -> Result<(), FftError> {
///         real_out[..n].copy_from_slice(&real_in[..n]);
///         match imag_in {
///             Some(im) => imag_out[..n].copy_from_slice(&im[..n]),
///             None => imag_out[..n].fill(0.0),
///         }
///         Ok(())
///     }
///     fn name(&self) -> &'static str { "identity" }
/// }
/// ```
pub trait ComplexFft: Send + Sync {
    /// Transform the first `n` values of `real_in`/`imag_in` into `real_out`/`imag_out`.
    ///
    /// `imag_in == None` means an all-zero imaginary part. The inverse is
    /// divided by `n`.
    ///
    /// CONTRAT : sur erreur, les sorties ne sont pas modifiées.
    ///
    /// # Errors
    /// `InvalidSize` if `n` is not a power of two ≥ 2, `InsufficientInput` if
    /// a slice is shorter than `n`.
    fn transform(
        &self,
        n: usize,
        inverse: bool,
        real_in: &[f32],
        imag_in: Option<&[f32]>,
        real_out: &mut [f32],
        imag_out: &mut [f32],
    ) -> Result<(), FftError>;

    /// Nom lisible pour le debug/logs.
    fn name(&self) -> &'static str;
}

/// Real-input transform for one fixed length N.
///
/// Implemented by: `PackedRealFft`, `FullLengthRealFft`, `PlannedRealFft`.
/// All implementations share the same scaling: forward unnormalized, inverse
/// divided by N.
pub trait RealTransform: Send + Sync {
    /// Length this strategy was planned for.
    fn size(&self) -> usize;

    /// Full N-bin spectrum of `input[..N]`.
    ///
    /// On success `imag_out[0]` and `imag_out[N/2]` are exactly zero and the
    /// output is conjugate-symmetric.
    ///
    /// # Errors
    /// `InsufficientInput` for short slices, `Allocation` for scratch buffers.
    fn forward(
        &self,
        input: &[f32],
        real_out: &mut [f32],
        imag_out: &mut [f32],
    ) -> Result<(), FftError>;

    /// Time signal of a conjugate-symmetric N-bin spectrum.
    ///
    /// # Errors
    /// `InsufficientInput` for short slices, `Allocation` for scratch buffers.
    fn inverse(
        &self,
        real_in: &[f32],
        imag_in: &[f32],
        real_out: &mut [f32],
    ) -> Result<(), FftError>;

    /// Nom lisible pour le debug/logs.
    fn name(&self) -> &'static str;
}
