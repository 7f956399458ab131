//! Real-valued FFT provider
//!
//! The resampler only needs two operations: a forward transform of a real
//! signal to its non-redundant half spectrum, and the inverse of that. Both
//! hand back newly owned buffers.
//!
//! # Conventions
//!
//! - `forward_real` of a length-N signal returns `N / 2 + 1` bins.
//! - `inverse_real` is **unnormalized**: `inverse_real(forward_real(x), N)`
//!   yields `N * x`. Callers divide by the forward length.

use crate::error::ResampleError;
use crate::fft::spectrum::half_len;
use crate::numeric::try_filled;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Forward / inverse real FFT
pub trait FftProvider {
    /// Transform `input` to its `input.len() / 2 + 1` non-redundant bins
    fn forward_real(&mut self, input: &[f32]) -> Result<Vec<Complex<f32>>, ResampleError>;

    /// Inverse transform of a half spectrum to `size` real samples (unnormalized)
    ///
    /// `spectrum` must hold exactly `size / 2 + 1` bins and is treated as the
    /// positive-frequency half of a conjugate-symmetric spectrum.
    fn inverse_real(
        &mut self,
        spectrum: &[Complex<f32>],
        size: usize,
    ) -> Result<Vec<f32>, ResampleError>;
}

/// [`FftProvider`] backed by `rustfft`
///
/// Plans are cached by the planner, so repeated transforms of the same length
/// (chunked mode) reuse them. Plans are released when the provider drops.
pub struct RustFftProvider {
    planner: FftPlanner<f32>,
}

impl RustFftProvider {
    /// Create a provider with an empty plan cache
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }
}

impl Default for RustFftProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RustFftProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustFftProvider").finish_non_exhaustive()
    }
}

impl FftProvider for RustFftProvider {
    fn forward_real(&mut self, input: &[f32]) -> Result<Vec<Complex<f32>>, ResampleError> {
        let n = input.len();
        if n == 0 {
            return Err(ResampleError::InvalidInput(
                "Cannot transform an empty signal".to_string(),
            ));
        }

        let mut buffer = try_filled(n, Complex::new(0.0f32, 0.0), "forward FFT")?;
        for (slot, &x) in buffer.iter_mut().zip(input.iter()) {
            slot.re = x;
        }

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        buffer.truncate(half_len(n));
        Ok(buffer)
    }

    fn inverse_real(
        &mut self,
        spectrum: &[Complex<f32>],
        size: usize,
    ) -> Result<Vec<f32>, ResampleError> {
        if size == 0 {
            return Err(ResampleError::InvalidInput(
                "Inverse FFT size must be > 0".to_string(),
            ));
        }
        let half = half_len(size);
        if spectrum.len() != half {
            return Err(ResampleError::InvalidInput(format!(
                "Spectrum has {} bins, expected {} for size {}",
                spectrum.len(),
                half,
                size
            )));
        }

        // Rebuild the full spectrum: X[N-k] = conj(X[k]).
        // DC and (for even sizes) Nyquist must be real for a real result.
        let mut buffer = try_filled(size, Complex::new(0.0f32, 0.0), "inverse FFT")?;
        buffer[..half].copy_from_slice(spectrum);
        buffer[0].im = 0.0;
        if size % 2 == 0 {
            buffer[size / 2].im = 0.0;
        }
        for k in half..size {
            buffer[k] = spectrum[size - k].conj();
        }

        let ifft = self.planner.plan_fft_inverse(size);
        ifft.process(&mut buffer);

        let mut output = try_filled(size, 0.0f32, "inverse FFT output")?;
        for (out, bin) in output.iter_mut().zip(buffer.iter()) {
            *out = bin.re;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_bin_count() {
        let mut provider = RustFftProvider::new();
        for n in [1usize, 2, 7, 8, 441, 960] {
            let input = vec![0.25f32; n];
            let spectrum = provider.forward_real(&input).unwrap();
            assert_eq!(spectrum.len(), n / 2 + 1, "n={}", n);
        }
    }

    #[test]
    fn test_forward_dc() {
        let mut provider = RustFftProvider::new();
        let spectrum = provider.forward_real(&[1.0f32; 8]).unwrap();
        assert!((spectrum[0].re - 8.0).abs() < 1e-5);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-5);
        }
    }

    #[test]
    fn test_inverse_is_unnormalized() {
        let mut provider = RustFftProvider::new();
        for n in [5usize, 8, 33] {
            let input: Vec<f32> = (0..n).map(|i| (i as f32 * 0.37).sin()).collect();
            let spectrum = provider.forward_real(&input).unwrap();
            let output = provider.inverse_real(&spectrum, n).unwrap();
            for (a, b) in input.iter().zip(output.iter()) {
                assert!((a * n as f32 - b).abs() < 1e-3, "n={}: {} vs {}", n, a, b);
            }
        }
    }

    #[test]
    fn test_invalid_sizes() {
        let mut provider = RustFftProvider::new();
        assert!(provider.forward_real(&[]).is_err());
        assert!(provider.inverse_real(&[], 0).is_err());

        let spectrum = vec![Complex::new(0.0f32, 0.0); 3];
        assert!(provider.inverse_real(&spectrum, 8).is_err());
    }
}
