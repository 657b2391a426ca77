use std::fmt;

use thiserror::Error;

/// Which size rule a transform length violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeViolation {
    /// Fewer than [`crate::size::MIN_SAMPLES`] samples.
    TooSmall,
    /// More than one bit set.
    NotPowerOfTwo,
}

impl fmt::Display for SizeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeViolation::TooSmall => f.write_str("inférieur à 4"),
            SizeViolation::NotPowerOfTwo => f.write_str("pas une puissance de 2"),
        }
    }
}

/// Errors originating from the transform kernel.
///
/// Exactly one variant is reported per failing call. Validation runs in the
/// order size, input length, context, allocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    /// Transform length below 4 or not a power of two.
    #[error("Nombre d'échantillons invalide ({n}) : {violation}")]
    InvalidSize {
        /// Requested length.
        n: usize,
        /// Rule that was broken.
        violation: SizeViolation,
    },

    /// A provided slice is shorter than the transform length.
    #[error("Entrée insuffisante pour {what} : {len} < {required}")]
    InsufficientInput {
        /// Name of the offending buffer.
        what: &'static str,
        /// Actual length.
        len: usize,
        /// Length the call needs.
        required: usize,
    },

    /// A setup object or working buffer could not be obtained.
    #[error("Échec d'allocation : {what}")]
    Allocation {
        /// Name of the buffer that failed.
        what: &'static str,
    },

    /// The context was planned for another length.
    #[error("Contexte prévu pour {context} échantillons, appel avec {requested}")]
    ContextMismatch {
        /// Length the context was built for.
        context: usize,
        /// Length of the call.
        requested: usize,
    },

    /// Frequency bin outside `0..n`.
    #[error("Bin de fréquence invalide : {bin} (max {max})", max = .n.saturating_sub(1))]
    InvalidBin {
        /// Requested bin.
        bin: usize,
        /// Transform length.
        n: usize,
    },

    /// The planned (`realfft`) strategy rejected the call.
    #[error("Erreur du backend FFT : {0}")]
    Backend(String),
}

impl FftError {
    /// `true` for both flavours of [`FftError::InvalidSize`].
    #[must_use]
    pub fn is_invalid_size(&self) -> bool {
        matches!(self, FftError::InvalidSize { .. })
    }
}

/// Allocate a zero-filled buffer, reporting allocation failure instead of aborting.
///
/// # Errors
/// Returns [`FftError::Allocation`] if the memory cannot be reserved.
///
/// # Example
/// ```
/// use rfk_core::error::try_zeroed;
/// let buf: Vec<f32> = try_zeroed(8, "scratch").unwrap();
/// assert_eq!(buf.len(), 8);
/// ```
pub fn try_zeroed<T: Clone + Default>(len: usize, what: &'static str) -> Result<Vec<T>, FftError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| FftError::Allocation { what })?;
    buf.resize(len, T::default());
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_size_messages_differ() {
        let small = FftError::InvalidSize {
            n: 2,
            violation: SizeViolation::TooSmall,
        };
        let odd = FftError::InvalidSize {
            n: 6,
            violation: SizeViolation::NotPowerOfTwo,
        };
        assert!(small.is_invalid_size());
        assert!(odd.is_invalid_size());
        assert_ne!(small.to_string(), odd.to_string());
    }

    #[test]
    fn invalid_bin_reports_last_valid_bin() {
        let err = FftError::InvalidBin { bin: 8, n: 8 };
        assert!(err.to_string().contains("max 7"));
    }

    #[test]
    fn try_zeroed_reports_impossible_reservation() {
        let err = try_zeroed::<f32>(usize::MAX, "huge").unwrap_err();
        assert_eq!(err, FftError::Allocation { what: "huge" });
    }
}
