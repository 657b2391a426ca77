use crate::error::{FftError, SizeViolation};

/// Smallest length the packed real transform accepts.
pub const MIN_SAMPLES: usize = 4;

/// `true` if `n` has exactly one bit set.
///
/// # Example
/// ```
/// use rfk_core::size::is_power_of_two;
/// assert!(is_power_of_two(1024));
/// assert!(!is_power_of_two(0));
/// assert!(!is_power_of_two(12));
/// ```
#[inline]
#[must_use]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// log2 of a power of two.
#[inline]
#[must_use]
pub fn number_of_bits_needed(power_of_two: usize) -> u32 {
    power_of_two.trailing_zeros()
}

/// Check a real-transform length: at least 4, then a power of two.
///
/// Returns the number of bits of `n` on success.
///
/// # Errors
/// Returns [`FftError::InvalidSize`] with the first rule `n` breaks.
///
/// # Example
/// ```
/// use rfk_core::size::validate_size;
/// assert_eq!(validate_size(8).unwrap(), 3);
/// assert!(validate_size(2).is_err());
/// assert!(validate_size(12).is_err());
/// ```
pub fn validate_size(n: usize) -> Result<u32, FftError> {
    if n < MIN_SAMPLES {
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
    Ok(number_of_bits_needed(n))
}

/// Check that `buf` holds at least `required` values.
///
/// # Errors
/// Returns [`FftError::InsufficientInput`] naming `what`.
#[inline]
pub fn require_len(what: &'static str, len: usize, required: usize) -> Result<(), FftError> {
    if len < required {
        return Err(FftError::InsufficientInput {
            what,
            len,
            required,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_wins_over_not_power_of_two() {
        // 3 breaks both rules; the minimum is checked first.
        for n in [0, 1, 2, 3] {
            let err = validate_size(n).unwrap_err();
            assert_eq!(
                err,
                FftError::InvalidSize {
                    n,
                    violation: SizeViolation::TooSmall
                }
            );
        }
    }

    #[test]
    fn rejects_multiple_set_bits() {
        for n in [5, 6, 12, 100, 1000, 65535] {
            assert!(matches!(
                validate_size(n),
                Err(FftError::InvalidSize {
                    violation: SizeViolation::NotPowerOfTwo,
                    ..
                })
            ));
        }
    }

    #[test]
    fn accepts_powers_of_two() {
        for bits in 2..20u32 {
            assert_eq!(validate_size(1 << bits).unwrap(), bits);
        }
    }

    #[test]
    fn require_len_reports_lengths() {
        assert!(require_len("real_in", 8, 8).is_ok());
        assert_eq!(
            require_len("imag_in", 3, 8),
            Err(FftError::InsufficientInput {
                what: "imag_in",
                len: 3,
                required: 8
            })
        );
    }
}
