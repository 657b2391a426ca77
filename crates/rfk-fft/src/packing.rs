//! Index arithmetic between a length-N real signal and its length-N/2
//! complex half-spectrum.
//!
//! Half-spectrum layout (`m = N/2` slots): slot 0 holds DC in the real part
//! and Nyquist in the imaginary part, slots `1..m` hold bins `1..m`.

use std::f64::consts::TAU;

use rfk_core::error::{FftError, try_zeroed};

/// `e^{-2πik/N}` for `k in 0..N/2`, as `(re, im)`.
///
/// # Errors
/// Returns [`FftError::Allocation`] if the table cannot be allocated.
pub fn split_twiddles(n: usize) -> Result<Vec<(f64, f64)>, FftError> {
    let m = n / 2;
    let mut table = try_zeroed(m, "split twiddles")?;
    for (k, slot) in table.iter_mut().enumerate() {
        let angle = TAU * k as f64 / n as f64;
        *slot = (angle.cos(), -angle.sin());
    }
    Ok(table)
}

/// `re[i] = input[2i]`, `im[i] = input[2i + 1]`.
///
/// # Example
/// ```
/// use rfk_fft::packing::interleave_pairs;
/// let (mut re, mut im) = ([0.0; 2], [0.0; 2]);
/// interleave_pairs(&[1.0, 2.0, 3.0, 4.0], &mut re, &mut im);
/// assert_eq!((re, im), ([1.0, 3.0], [2.0, 4.0]));
/// ```
pub fn interleave_pairs(input: &[f32], re: &mut [f32], im: &mut [f32]) {
    for ((pair, r), i) in input.chunks_exact(2).zip(re.iter_mut()).zip(im.iter_mut()) {
        *r = pair[0];
        *i = pair[1];
    }
}

/// Inverse of [`interleave_pairs`].
pub fn deinterleave_pairs(re: &[f32], im: &[f32], out: &mut [f32]) {
    for ((pair, &r), &i) in out.chunks_exact_mut(2).zip(re).zip(im) {
        pair[0] = r;
        pair[1] = i;
    }
}

/// Turn the N/2-point transform `z` of packed pairs into the half-spectrum.
///
/// With `Fe[k] = (Z[k] + conj Z[m-k]) / 2` and
/// `Fo[k] = (Z[k] - conj Z[m-k]) / 2i`, bin `k` is `Fe[k] + W^k·Fo[k]`.
/// Slot 0 gets DC = `Re Z0 + Im Z0` and Nyquist = `Re Z0 - Im Z0`.
pub fn split_spectrum(
    zr: &[f32],
    zi: &[f32],
    twiddles: &[(f64, f64)],
    hr: &mut [f32],
    hi: &mut [f32],
) {
    let m = zr.len();
    let (z0r, z0i) = (f64::from(zr[0]), f64::from(zi[0]));
    hr[0] = (z0r + z0i) as f32;
    hi[0] = (z0r - z0i) as f32;

    for k in 1..m {
        let (ar, ai) = (f64::from(zr[k]), f64::from(zi[k]));
        let (br, bi) = (f64::from(zr[m - k]), -f64::from(zi[m - k]));

        let (even_r, even_i) = (0.5 * (ar + br), 0.5 * (ai + bi));
        let (odd_r, odd_i) = (0.5 * (ai - bi), -0.5 * (ar - br));

        let (wr, wi) = twiddles[k];
        hr[k] = (even_r + wr * odd_r - wi * odd_i) as f32;
        hi[k] = (even_i + wr * odd_i + wi * odd_r) as f32;
    }
}

/// Inverse of [`split_spectrum`]: rebuild the packed-pair spectrum `z`.
pub fn merge_spectrum(
    hr: &[f32],
    hi: &[f32],
    twiddles: &[(f64, f64)],
    zr: &mut [f32],
    zi: &mut [f32],
) {
    let m = hr.len();
    let (dc, nyquist) = (f64::from(hr[0]), f64::from(hi[0]));
    zr[0] = (0.5 * (dc + nyquist)) as f32;
    zi[0] = (0.5 * (dc - nyquist)) as f32;

    for k in 1..m {
        let (ar, ai) = (f64::from(hr[k]), f64::from(hi[k]));
        let (br, bi) = (f64::from(hr[m - k]), -f64::from(hi[m - k]));

        let (even_r, even_i) = (0.5 * (ar + br), 0.5 * (ai + bi));
        let (dr, di) = (0.5 * (ar - br), 0.5 * (ai - bi));

        // odd = d · conj(W^k)
        let (wr, wi) = twiddles[k];
        let (odd_r, odd_i) = (dr * wr + di * wi, di * wr - dr * wi);

        // z = even + i·odd
        zr[k] = (even_r - odd_i) as f32;
        zi[k] = (even_i + odd_r) as f32;
    }
}

/// Mirror a half-spectrum into all N bins using conjugate symmetry.
///
/// `imag_out[0]` and `imag_out[N/2]` are set to exactly zero.
///
/// # Example
/// ```
/// use rfk_fft::packing::expand_half_spectrum;
/// let (mut re, mut im) = ([0.0; 4], [0.0; 4]);
/// expand_half_spectrum(&[10.0, 2.0], &[-2.0, -3.0], &mut re, &mut im);
/// assert_eq!(re, [10.0, 2.0, -2.0, 2.0]);
/// assert_eq!(im, [0.0, -3.0, 0.0, 3.0]);
/// ```
pub fn expand_half_spectrum(hr: &[f32], hi: &[f32], real_out: &mut [f32], imag_out: &mut [f32]) {
    let m = hr.len();
    let n = 2 * m;

    real_out[0] = hr[0];
    imag_out[0] = 0.0;
    real_out[m] = hi[0];
    imag_out[m] = 0.0;

    for k in 1..m {
        real_out[k] = hr[k];
        imag_out[k] = hi[k];
        real_out[n - k] = hr[k];
        imag_out[n - k] = -hi[k];
    }
}

/// Fold a full N-bin spectrum into the half-spectrum layout.
///
/// Bins above N/2 are ignored; the Nyquist real part moves into `hi[0]`.
pub fn fold_full_spectrum(real_in: &[f32], imag_in: &[f32], hr: &mut [f32], hi: &mut [f32]) {
    let m = hr.len();
    hr[0] = real_in[0];
    hi[0] = real_in[m];
    hr[1..m].copy_from_slice(&real_in[1..m]);
    hi[1..m].copy_from_slice(&imag_in[1..m]);
}
