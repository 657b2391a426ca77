use std::sync::Arc;

use rfk_core::config::{FftConfig, MAX_FAST_BITS, Strategy};
use rfk_core::error::FftError;
use rfk_core::size::{require_len, validate_size};
use rfk_core::spectrum::{Direction, Spectrum};
use rfk_core::traits::{ComplexFft, RealTransform};

use crate::bitrev::BitReversalTable;
use crate::planned::PlannedRealFft;
use crate::radix2::RadixTwoEngine;
use crate::real::{FullLengthRealFft, PackedRealFft};

/// Everything precomputed for transforms of one length.
///
/// Holds the complex engine (and through it the bit-reversal table) and the
/// selected real-transform strategy. `Send + Sync`: one context may serve
/// concurrent calls, each with its own scratch. Released on drop.
///
/// # Example
/// ```
/// use rfk_fft::context::{real_fft, TransformContext};
/// use rfk_core::Direction;
///
/// let ctx = TransformContext::init(8).unwrap();
/// let spectrum = real_fft(&ctx, Direction::Forward, 8, &[1.0; 8], None).unwrap();
/// assert!((spectrum.real[0] - 8.0).abs() < 1e-6);
/// ```
pub struct TransformContext {
    n: usize,
    strategy: Strategy,
    engine: Arc<dyn ComplexFft>,
    real: Box<dyn RealTransform>,
}

impl TransformContext {
    /// Context with the default configuration.
    ///
    /// # Errors
    /// `InvalidSize` if `n < 4` or not a power of two, `Allocation` if setup
    /// cannot be allocated.
    pub fn init(n: usize) -> Result<Self, FftError> {
        Self::with_config(n, &FftConfig::default())
    }

    /// Context for `n` samples using `config`.
    ///
    /// # Errors
    /// `InvalidSize` if `n < 4` or not a power of two, `Allocation` if setup
    /// cannot be allocated.
    pub fn with_config(n: usize, config: &FftConfig) -> Result<Self, FftError> {
        validate_size(n)?;

        let table = if config.max_fast_bits == MAX_FAST_BITS {
            BitReversalTable::shared()?
        } else {
            Arc::new(BitReversalTable::try_build(config.max_fast_bits)?)
        };
        let engine: Arc<dyn ComplexFft> = Arc::new(RadixTwoEngine::new(table));

        let real: Box<dyn RealTransform> = match config.strategy {
            Strategy::Packed => Box::new(PackedRealFft::new(n, Arc::clone(&engine))?),
            Strategy::FullLength => Box::new(FullLengthRealFft::new(n, Arc::clone(&engine))?),
            Strategy::Planned => Box::new(PlannedRealFft::new(n)?),
        };

        log::debug!(
            "Contexte FFT initialisé : n={n}, stratégie={}, moteur={}",
            real.name(),
            engine.name()
        );

        Ok(Self {
            n,
            strategy: config.strategy,
            engine,
            real,
        })
    }

    /// Length this context was planned for.
    #[must_use]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Strategy in use.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Complex engine shared by the portable strategies.
    #[must_use]
    pub fn engine(&self) -> &dyn ComplexFft {
        self.engine.as_ref()
    }

    /// Release the context. Equivalent to dropping it.
    pub fn destroy(self) {
        log::debug!("Contexte FFT libéré : n={}", self.n);
    }
}

impl std::fmt::Debug for TransformContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformContext")
            .field("n", &self.n)
            .field("strategy", &self.real.name())
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// Compute a real FFT, forward or inverse, into freshly allocated buffers.
///
/// Checks run in order: `n >= 4`, `n` a power of two, `real_in` (and for the
/// inverse `imag_in`) at least `n` long, `n` equal to the context size.
/// `imag_in` is ignored going forward. Going backward the returned `imag`
/// is all zeros.
///
/// # Errors
/// The first failed check above, or `Allocation` for the output buffers.
pub fn real_fft(
    ctx: &TransformContext,
    direction: Direction,
    n: usize,
    real_in: &[f32],
    imag_in: Option<&[f32]>,
) -> Result<Spectrum, FftError> {
    validate_size(n)?;
    require_len("real_in", real_in.len(), n)?;
    let imag_in = imag_in.unwrap_or(&[]);
    if !direction.is_forward() {
        require_len("imag_in", imag_in.len(), n)?;
    }
    if n != ctx.n {
        return Err(FftError::ContextMismatch {
            context: ctx.n,
            requested: n,
        });
    }

    let mut out = Spectrum::zeroed(n)?;
    match direction {
        Direction::Forward => ctx.real.forward(&real_in[..n], &mut out.real, &mut out.imag)?,
        // `out.imag` reste à zéro : contrat, pas arrondi.
        Direction::Inverse => ctx.real.inverse(&real_in[..n], &imag_in[..n], &mut out.real)?,
    }

    log::trace!("real_fft n={n} {direction:?} via {}", ctx.real.name());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfk_core::SizeViolation;

    const STRATEGIES: [Strategy; 3] = [Strategy::Packed, Strategy::FullLength, Strategy::Planned];

    fn context(n: usize, strategy: Strategy) -> TransformContext {
        let config = FftConfig {
            strategy,
            ..FftConfig::default()
        };
        TransformContext::with_config(n, &config).unwrap()
    }

    fn signal(n: usize, seed: u32) -> Vec<f32> {
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state % 2001) as f32 / 1000.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn size_gate_in_both_directions() {
        let ctx = TransformContext::init(8).unwrap();
        let buf = vec![0.0; 64];
        for n in [0, 1, 2, 3, 5, 6, 7, 12, 24, 48] {
            for direction in [Direction::Forward, Direction::Inverse] {
                let err = real_fft(&ctx, direction, n, &buf, Some(&buf)).unwrap_err();
                assert!(err.is_invalid_size(), "n={n} {direction:?}");
            }
        }
        assert!(matches!(
            real_fft(&ctx, Direction::Forward, 3, &buf, None),
            Err(FftError::InvalidSize {
                violation: SizeViolation::TooSmall,
                ..
            })
        ));
    }

    #[test]
    fn init_rejects_invalid_sizes() {
        for n in [0, 2, 3, 6, 100] {
            assert!(TransformContext::init(n).unwrap_err().is_invalid_size());
        }
    }

    #[test]
    fn short_inputs_are_rejected() {
        let ctx = TransformContext::init(16).unwrap();
        let short = vec![0.0; 8];
        let full = vec![0.0; 16];

        assert!(matches!(
            real_fft(&ctx, Direction::Forward, 16, &short, None),
            Err(FftError::InsufficientInput { what: "real_in", .. })
        ));
        assert!(matches!(
            real_fft(&ctx, Direction::Inverse, 16, &full, Some(&short)),
            Err(FftError::InsufficientInput { what: "imag_in", .. })
        ));
        assert!(matches!(
            real_fft(&ctx, Direction::Inverse, 16, &full, None),
            Err(FftError::InsufficientInput { what: "imag_in", len: 0, .. })
        ));
        // Forward ignores imag_in entirely.
        assert!(real_fft(&ctx, Direction::Forward, 16, &full, Some(&short)).is_ok());
    }

    #[test]
    fn size_error_wins_over_length_error() {
        let ctx = TransformContext::init(8).unwrap();
        let err = real_fft(&ctx, Direction::Inverse, 6, &[0.0; 2], None).unwrap_err();
        assert!(err.is_invalid_size());
    }

    #[test]
    fn context_size_must_match() {
        let ctx = TransformContext::init(8).unwrap();
        let err = real_fft(&ctx, Direction::Forward, 16, &[0.0; 16], None).unwrap_err();
        assert_eq!(
            err,
            FftError::ContextMismatch {
                context: 8,
                requested: 16
            }
        );
    }

    #[test]
    fn round_trip_recovers_signal() {
        for strategy in STRATEGIES {
            for bits in 2..=12 {
                let n = 1usize << bits;
                let ctx = context(n, strategy);
                let x = signal(n, bits);
                let fwd = real_fft(&ctx, Direction::Forward, n, &x, None).unwrap();
                let back =
                    real_fft(&ctx, Direction::Inverse, n, &fwd.real, Some(&fwd.imag)).unwrap();
                for i in 0..n {
                    let err = (back.real[i] - x[i]).abs();
                    assert!(
                        err < 1e-4 * x[i].abs().max(1.0),
                        "{strategy:?} n={n} i={i} err={err}"
                    );
                }
            }
        }
    }

    #[test]
    fn forward_output_is_conjugate_symmetric() {
        for strategy in STRATEGIES {
            let n = 64;
            let ctx = context(n, strategy);
            let s = real_fft(&ctx, Direction::Forward, n, &signal(n, 9), None).unwrap();
            assert_eq!(s.imag[0], 0.0, "{strategy:?}");
            assert_eq!(s.imag[n / 2], 0.0, "{strategy:?}");
            for k in 1..n / 2 {
                assert!((s.real[n - k] - s.real[k]).abs() < 1e-4, "{strategy:?} k={k}");
                assert!((s.imag[n - k] + s.imag[k]).abs() < 1e-4, "{strategy:?} k={k}");
            }
        }
    }

    #[test]
    fn constant_input_lands_in_dc() {
        for strategy in STRATEGIES {
            let n = 32;
            let c = 0.75;
            let ctx = context(n, strategy);
            let s = real_fft(&ctx, Direction::Forward, n, &vec![c; n], None).unwrap();
            assert!((s.real[0] - c * n as f32).abs() < 1e-4, "{strategy:?}");
            for k in 1..n {
                assert!(s.real[k].abs() < 1e-4, "{strategy:?} re k={k}");
                assert!(s.imag[k].abs() < 1e-4, "{strategy:?} im k={k}");
            }
        }
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        for strategy in STRATEGIES {
            let ctx = context(8, strategy);
            let x = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
            let s = real_fft(&ctx, Direction::Forward, 8, &x, None).unwrap();
            for k in 0..8 {
                assert!((s.real[k] - 1.0).abs() < 1e-6, "{strategy:?} re k={k}");
                assert!(s.imag[k].abs() < 1e-6, "{strategy:?} im k={k}");
            }
        }
    }

    #[test]
    fn inverse_imaginary_is_exactly_zero() {
        for strategy in STRATEGIES {
            let n = 128;
            let ctx = context(n, strategy);
            let fwd = real_fft(&ctx, Direction::Forward, n, &signal(n, 4), None).unwrap();
            let back = real_fft(&ctx, Direction::Inverse, n, &fwd.real, Some(&fwd.imag)).unwrap();
            assert!(back.imag.iter().all(|&v| v == 0.0), "{strategy:?}");
        }
    }

    #[test]
    fn excess_input_is_ignored() {
        let ctx = TransformContext::init(8).unwrap();
        let mut x = signal(8, 2);
        let exact = real_fft(&ctx, Direction::Forward, 8, &x, None).unwrap();
        x.extend_from_slice(&[100.0; 8]);
        let padded = real_fft(&ctx, Direction::Forward, 8, &x, None).unwrap();
        assert_eq!(exact, padded);
        assert_eq!(padded.len(), 8);
    }

    #[test]
    fn known_pair_from_reference_signal() {
        // x = [0,0,0,1,0,0,0,1] : X[k] = e^{-iπk·3/4}(1 + e^{-iπk})
        let ctx = TransformContext::init(8).unwrap();
        let x = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let s = real_fft(&ctx, Direction::Forward, 8, &x, None).unwrap();
        let want_re = [2.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, 0.0];
        let want_im = [0.0, 0.0, 2.0, 0.0, 0.0, 0.0, -2.0, 0.0];
        for k in 0..8 {
            assert!((s.real[k] - want_re[k]).abs() < 1e-5, "re k={k}");
            assert!((s.imag[k] - want_im[k]).abs() < 1e-5, "im k={k}");
        }
    }

    #[test]
    fn private_table_matches_shared_table() {
        let small = FftConfig {
            max_fast_bits: 3,
            ..FftConfig::default()
        };
        let a = TransformContext::with_config(256, &small).unwrap();
        let b = TransformContext::init(256).unwrap();
        let x = signal(256, 11);
        assert_eq!(
            real_fft(&a, Direction::Forward, 256, &x, None).unwrap(),
            real_fft(&b, Direction::Forward, 256, &x, None).unwrap()
        );
    }

    #[test]
    fn context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransformContext>();

        let ctx = TransformContext::init(64).unwrap();
        let x = signal(64, 5);
        let reference = real_fft(&ctx, Direction::Forward, 64, &x, None).unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let s = real_fft(&ctx, Direction::Forward, 64, &x, None).unwrap();
                    assert_eq!(s, reference);
                });
            }
        });
    }
}
