use serde::{Deserialize, Serialize};

use crate::error::{FftError, try_zeroed};

/// Transform direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Direction {
    /// Time domain to frequency domain, unnormalized.
    #[default]
    Forward,
    /// Frequency domain to time domain, divided by N.
    Inverse,
}

impl Direction {
    /// `true` for [`Direction::Forward`].
    #[inline]
    #[must_use]
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Forward)
    }
}

impl From<bool> for Direction {
    /// `true` maps to forward.
    fn from(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Inverse
        }
    }
}

/// Two parallel length-N sequences: real and imaginary parts.
///
/// For a forward real transform this is the full N-bin spectrum; for an
/// inverse it is the time signal with an all-zero `imag`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Spectrum {
    /// Real parts.
    pub real: Vec<f32>,
    /// Imaginary parts.
    pub imag: Vec<f32>,
}

impl Spectrum {
    /// Allocate a zeroed spectrum of `n` bins.
    ///
    /// # Errors
    /// Returns [`FftError::Allocation`] if either half cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use rfk_core::spectrum::Spectrum;
    /// let s = Spectrum::zeroed(8).unwrap();
    /// assert_eq!(s.len(), 8);
    /// assert!(s.imag.iter().all(|&v| v == 0.0));
    /// ```
    pub fn zeroed(n: usize) -> Result<Self, FftError> {
        let real = try_zeroed(n, "real_out")?;
        let imag = try_zeroed(n, "imag_out")?;
        Ok(Self { real, imag })
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// `true` if there are no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Magnitude of each bin.
    #[must_use]
    pub fn magnitudes(&self) -> Vec<f32> {
        self.real
            .iter()
            .zip(&self.imag)
            .map(|(re, im)| re.hypot(*im))
            .collect()
    }
}

/// Forward transform result with the bin frequencies attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transformed {
    /// Real parts.
    pub real: Vec<f32>,
    /// Imaginary parts.
    pub imag: Vec<f32>,
    /// Normalized frequency per bin, see [`crate::frequency::bin_frequencies`].
    pub frequencies: Vec<f32>,
}

impl Transformed {
    /// Attach frequencies to a spectrum.
    #[must_use]
    pub fn new(spectrum: Spectrum, frequencies: Vec<f32>) -> Self {
        Self {
            real: spectrum.real,
            imag: spectrum.imag,
            frequencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_bool() {
        assert_eq!(Direction::from(true), Direction::Forward);
        assert_eq!(Direction::from(false), Direction::Inverse);
        assert!(!Direction::Inverse.is_forward());
    }

    #[test]
    fn magnitudes_of_unit_vectors() {
        let s = Spectrum {
            real: vec![3.0, 0.0],
            imag: vec![4.0, -2.0],
        };
        assert_eq!(s.magnitudes(), vec![5.0, 2.0]);
    }
}
