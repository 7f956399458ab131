//! Spectrum resizing between the forward and inverse transforms
//!
//! Changing the length of a spectrum while keeping its bin spacing changes the
//! sample rate of the signal it describes:
//!
//! - **Upsampling** (`M > N`): zero bins are inserted above the highest input
//!   frequency (ideal band-limited interpolation, no new information).
//! - **Downsampling** (`M < N`): bins above the new Nyquist limit are dropped,
//!   which removes the content that would otherwise alias.
//!
//! # Gap insertion
//!
//! On the full length-N spectrum `X`, with `L = min(N, M)` and split point
//! `s = ceil(L / 2)`:
//!
//! ```text
//! upsample:   Y = X[0..s] ++ [0; M - N] ++ X[s..N]
//! downsample: Y = X[0..s] ++ X[N - (M - s)..N]      (N - M bins discarded)
//! ```
//!
//! `Y` is then reduced to the half spectrum of a real signal by Hermitian
//! projection, `H[k] = (Y[k] + conj(Y[M - k])) / 2`. When upsampling from an
//! even length this splits the input Nyquist bin evenly between its positive
//! and negative frequency; when downsampling to an even length the output
//! Nyquist bin keeps the real part of `X[M / 2]`.
//!
//! [`adjust_spectrum`] computes the projected half spectrum directly, without
//! materializing `Y`. [`resize_full_spectrum`] is the literal full-spectrum
//! form, used for inspection.

use crate::error::ResampleError;
use crate::numeric::try_filled;
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Number of non-redundant bins of a real signal of length `n`
#[inline]
pub fn half_len(n: usize) -> usize {
    n / 2 + 1
}

/// Spectrum resizing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumPolicy {
    /// Split the spectrum at the midpoint and insert / remove bins around the
    /// Nyquist bin, keeping both halves conjugate-symmetric
    GapInsertion,
    /// Copy the first `min(N/2+1, M/2+1)` half-spectrum bins and zero the rest
    ///
    /// The Nyquist bin is copied as-is, so upsampling from an even length
    /// doubles its contribution.
    LowHalfCopy,
}

impl SpectrumPolicy {
    /// Short name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            SpectrumPolicy::GapInsertion => "gap_insertion",
            SpectrumPolicy::LowHalfCopy => "low_half_copy",
        }
    }
}

/// Bin accounting of one spectrum adjustment, in full-spectrum bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumAdjustment {
    /// Full spectrum length before adjustment (= input size)
    pub input_bins: usize,
    /// Full spectrum length after adjustment (= output size)
    pub output_bins: usize,
    /// Input bins carried over to the output
    pub retained_bins: usize,
    /// Zero bins inserted (upsampling)
    pub inserted_bins: usize,
    /// Input bins dropped (downsampling)
    pub discarded_bins: usize,
}

impl SpectrumAdjustment {
    fn new(input_size: usize, output_size: usize) -> Self {
        let retained = input_size.min(output_size);
        Self {
            input_bins: input_size,
            output_bins: output_size,
            retained_bins: retained,
            inserted_bins: output_size - retained,
            discarded_bins: input_size - retained,
        }
    }
}

fn check_sizes(input_size: usize, output_size: usize) -> Result<(), ResampleError> {
    if input_size == 0 || output_size == 0 {
        return Err(ResampleError::InvalidInput(format!(
            "Spectrum sizes must be > 0 (input={}, output={})",
            input_size, output_size
        )));
    }
    Ok(())
}

/// Resize the half spectrum of a length-`input_size` signal to that of a
/// length-`output_size` signal
///
/// # Arguments
///
/// * `spectrum` - `input_size / 2 + 1` bins from a forward real FFT
/// * `input_size` - Length of the signal `spectrum` was computed from
/// * `output_size` - Desired signal length
/// * `policy` - Resizing strategy
///
/// # Returns
///
/// `output_size / 2 + 1` bins and the bin accounting
///
/// # Errors
///
/// `InvalidInput` for zero sizes or a spectrum of the wrong length,
/// `AllocationFailure` if the output spectrum cannot be allocated.
pub fn adjust_spectrum(
    spectrum: &[Complex<f32>],
    input_size: usize,
    output_size: usize,
    policy: SpectrumPolicy,
) -> Result<(Vec<Complex<f32>>, SpectrumAdjustment), ResampleError> {
    check_sizes(input_size, output_size)?;
    if spectrum.len() != half_len(input_size) {
        return Err(ResampleError::InvalidInput(format!(
            "Spectrum has {} bins, expected {} for size {}",
            spectrum.len(),
            half_len(input_size),
            input_size
        )));
    }

    let half_out = half_len(output_size);
    let mut adjusted = try_filled(half_out, Complex::new(0.0f32, 0.0), "output spectrum")?;

    match policy {
        SpectrumPolicy::GapInsertion => {
            let shortest = input_size.min(output_size);
            let split = (shortest + 1) / 2;
            adjusted[..split].copy_from_slice(&spectrum[..split]);

            // Even shortest length: the bin at `split` is a Nyquist bin on one side
            if shortest % 2 == 0 {
                let bin = spectrum[split];
                adjusted[split] = if output_size > input_size {
                    bin.conj() * 0.5
                } else if output_size < input_size {
                    Complex::new(bin.re, 0.0)
                } else {
                    bin
                };
            }
        }
        SpectrumPolicy::LowHalfCopy => {
            let copied = spectrum.len().min(half_out);
            adjusted[..copied].copy_from_slice(&spectrum[..copied]);
        }
    }

    Ok((adjusted, SpectrumAdjustment::new(input_size, output_size)))
}

/// Gap insertion on a full (length-N) spectrum, without projection
///
/// Returns the length-`output_size` spectrum `Y` described in the module docs.
pub fn resize_full_spectrum(
    spectrum: &[Complex<f32>],
    output_size: usize,
) -> Result<(Vec<Complex<f32>>, SpectrumAdjustment), ResampleError> {
    let input_size = spectrum.len();
    check_sizes(input_size, output_size)?;

    let shortest = input_size.min(output_size);
    let split = (shortest + 1) / 2;
    let tail = shortest - split;

    let mut resized = try_filled(output_size, Complex::new(0.0f32, 0.0), "full spectrum")?;
    resized[..split].copy_from_slice(&spectrum[..split]);
    resized[output_size - tail..].copy_from_slice(&spectrum[input_size - tail..]);

    Ok((resized, SpectrumAdjustment::new(input_size, output_size)))
}

/// Expand a half spectrum to the full conjugate-symmetric spectrum of length `size`
pub fn expand_hermitian(
    spectrum: &[Complex<f32>],
    size: usize,
) -> Result<Vec<Complex<f32>>, ResampleError> {
    if size == 0 || spectrum.len() != half_len(size) {
        return Err(ResampleError::InvalidInput(format!(
            "Cannot expand {} bins to size {}",
            spectrum.len(),
            size
        )));
    }
    let mut full = try_filled(size, Complex::new(0.0f32, 0.0), "full spectrum")?;
    let half = spectrum.len();
    full[..half].copy_from_slice(spectrum);
    for k in half..size {
        full[k] = spectrum[size - k].conj();
    }
    Ok(full)
}

/// Half spectrum of the real part of the inverse of `full`: `(Y[k] + conj(Y[M-k])) / 2`
pub fn hermitian_projection(full: &[Complex<f32>]) -> Result<Vec<Complex<f32>>, ResampleError> {
    let size = full.len();
    if size == 0 {
        return Err(ResampleError::InvalidInput(
            "Cannot project an empty spectrum".to_string(),
        ));
    }
    let mut half = try_filled(half_len(size), Complex::new(0.0f32, 0.0), "half spectrum")?;
    for (k, bin) in half.iter_mut().enumerate() {
        let mirror = full[(size - k) % size];
        *bin = (full[k] + mirror.conj()) * 0.5;
    }
    Ok(half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::provider::{FftProvider, RustFftProvider};

    /// Deterministic noise, so no spectrum bin is exactly zero
    fn noise(len: usize, seed: u32) -> Vec<f32> {
        let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 8) as f32 / (1u32 << 24) as f32 - 0.5
            })
            .collect()
    }

    fn full_spectrum(len: usize, seed: u32) -> Vec<Complex<f32>> {
        let mut provider = RustFftProvider::new();
        let half = provider.forward_real(&noise(len, seed)).unwrap();
        expand_hermitian(&half, len).unwrap()
    }

    fn count_zero_bins(bins: &[Complex<f32>]) -> usize {
        bins.iter().filter(|b| b.re == 0.0 && b.im == 0.0).count()
    }

    #[test]
    fn test_half_len() {
        assert_eq!(half_len(1), 1);
        assert_eq!(half_len(8), 5);
        assert_eq!(half_len(9), 5);
        assert_eq!(half_len(960), 481);
    }

    #[test]
    fn test_gap_insertion_inserts_exact_count() {
        for (n, m) in [(8usize, 12usize), (7, 10), (441, 480), (882, 960), (5, 6)] {
            let full = full_spectrum(n, 1);
            assert_eq!(count_zero_bins(&full), 0);

            let (resized, adjustment) = resize_full_spectrum(&full, m).unwrap();
            assert_eq!(resized.len(), m);
            assert_eq!(count_zero_bins(&resized), m - n, "n={} m={}", n, m);
            assert_eq!(adjustment.inserted_bins, m - n);
            assert_eq!(adjustment.discarded_bins, 0);
            assert_eq!(adjustment.retained_bins, n);
        }
    }

    #[test]
    fn test_gap_insertion_discards_exact_count() {
        for (n, m) in [(12usize, 8usize), (12, 7), (1920, 960), (960, 441)] {
            let full = full_spectrum(n, 2);
            let (resized, adjustment) = resize_full_spectrum(&full, m).unwrap();
            assert_eq!(resized.len(), m);
            assert_eq!(count_zero_bins(&resized), 0);

            // Every output bin is an input bin; the rest were discarded
            let kept = resized.iter().filter(|b| full.contains(b)).count();
            assert_eq!(kept, m);
            assert_eq!(n - kept, n - m);
            assert_eq!(adjustment.discarded_bins, n - m, "n={} m={}", n, m);
            assert_eq!(adjustment.inserted_bins, 0);
        }
    }

    #[test]
    fn test_direct_adjustment_matches_projection() {
        let mut provider = RustFftProvider::new();
        for (n, m) in [(8usize, 12usize), (7, 10), (12, 8), (12, 7), (9, 9), (10, 10), (6, 15), (15, 6)] {
            let half = provider.forward_real(&noise(n, 3)).unwrap();
            let (direct, _) = adjust_spectrum(&half, n, m, SpectrumPolicy::GapInsertion).unwrap();

            let full = expand_hermitian(&half, n).unwrap();
            let (resized, _) = resize_full_spectrum(&full, m).unwrap();
            let projected = hermitian_projection(&resized).unwrap();

            assert_eq!(direct.len(), projected.len());
            for (k, (a, b)) in direct.iter().zip(projected.iter()).enumerate() {
                assert!((a - b).norm() < 1e-4, "n={} m={} bin {}: {} vs {}", n, m, k, a, b);
            }
        }
    }

    #[test]
    fn test_low_half_copy() {
        let mut provider = RustFftProvider::new();
        let half = provider.forward_real(&noise(8, 4)).unwrap();

        let (up, _) = adjust_spectrum(&half, 8, 12, SpectrumPolicy::LowHalfCopy).unwrap();
        assert_eq!(up.len(), 7);
        assert_eq!(&up[..5], &half[..]);
        assert_eq!(count_zero_bins(&up[5..]), 2);

        let (down, _) = adjust_spectrum(&half, 8, 4, SpectrumPolicy::LowHalfCopy).unwrap();
        assert_eq!(down.len(), 3);
        assert_eq!(&down[..], &half[..3]);
    }

    #[test]
    fn test_identity_adjustment() {
        let mut provider = RustFftProvider::new();
        for policy in [SpectrumPolicy::GapInsertion, SpectrumPolicy::LowHalfCopy] {
            let half = provider.forward_real(&noise(10, 5)).unwrap();
            let (same, adjustment) = adjust_spectrum(&half, 10, 10, policy).unwrap();
            assert_eq!(same, half);
            assert_eq!(adjustment.inserted_bins, 0);
            assert_eq!(adjustment.discarded_bins, 0);
        }
    }

    #[test]
    fn test_invalid_adjustment() {
        let half = vec![Complex::new(1.0f32, 0.0); 5];
        assert!(adjust_spectrum(&half, 0, 4, SpectrumPolicy::GapInsertion).is_err());
        assert!(adjust_spectrum(&half, 8, 0, SpectrumPolicy::GapInsertion).is_err());
        assert!(adjust_spectrum(&half, 12, 4, SpectrumPolicy::GapInsertion).is_err());
        assert!(resize_full_spectrum(&[], 4).is_err());
    }
}
