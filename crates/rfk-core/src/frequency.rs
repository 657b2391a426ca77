use crate::error::FftError;

/// Normalized frequency of each bin of an `n`-point transform.
///
/// Bins up to `n/2` are positive, the rest negative. Multiply by the sample
/// rate to get Hz.
///
/// # Example
/// ```
/// use rfk_core::frequency::bin_frequencies;
/// let f = bin_frequencies(8);
/// assert_eq!(f, vec![0.0, 0.125, 0.25, 0.375, 0.5, -0.375, -0.25, -0.125]);
/// ```
#[must_use]
pub fn bin_frequencies(n: usize) -> Vec<f32> {
    (0..n).map(|i| frequency(i, n)).collect()
}

/// Frequency of a single bin, checked against `n`.
///
/// # Errors
/// Returns [`FftError::InvalidBin`] if `bin >= n`.
pub fn frequency_for_bin(bin: usize, n: usize) -> Result<f32, FftError> {
    if bin >= n {
        return Err(FftError::InvalidBin { bin, n });
    }
    Ok(frequency(bin, n))
}

#[inline]
fn frequency(i: usize, n: usize) -> f32 {
    if i <= n / 2 {
        i as f32 / n as f32
    } else {
        -((n - i) as f32 / n as f32)
    }
}
