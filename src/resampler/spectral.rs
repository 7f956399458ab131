//! Spectral (FFT-domain) resampling of one sample block
//!
//! # Algorithm
//!
//! 1. Forward real FFT of the `N` input samples (`N / 2 + 1` bins)
//! 2. Resize the spectrum to `M / 2 + 1` bins (see [`crate::fft::spectrum`])
//! 3. Inverse real FFT at length `M`
//! 4. Divide by `N` (the inverse transform is unnormalized)
//!
//! # Example
//!
//! ```no_run
//! use stratum_resample::resampler::spectral::SpectralResampler;
//! use stratum_resample::fft::SpectrumPolicy;
//!
//! // 20 ms at 44.1 kHz -> 20 ms at 48 kHz
//! let block = vec![0.0f32; 882];
//! let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
//! let out = resampler.resample(&block, 960)?;
//! assert_eq!(out.len(), 960);
//! # Ok::<(), stratum_resample::ResampleError>(())
//! ```

use crate::error::ResampleError;
use crate::fft::provider::{FftProvider, RustFftProvider};
use crate::fft::spectrum::{adjust_spectrum, SpectrumAdjustment, SpectrumPolicy};
use crate::numeric::normalize_by_size;

/// Resamples blocks by resizing their spectrum
///
/// Holds the FFT provider (and with it any cached plans) so consecutive
/// blocks of the same size reuse the same transforms.
#[derive(Debug)]
pub struct SpectralResampler<P: FftProvider = RustFftProvider> {
    provider: P,
    policy: SpectrumPolicy,
}

impl SpectralResampler<RustFftProvider> {
    /// Create a resampler backed by `rustfft`
    pub fn new(policy: SpectrumPolicy) -> Self {
        Self::with_provider(RustFftProvider::new(), policy)
    }
}

impl<P: FftProvider> SpectralResampler<P> {
    /// Create a resampler over a custom FFT provider
    pub fn with_provider(provider: P, policy: SpectrumPolicy) -> Self {
        Self { provider, policy }
    }

    /// Spectrum resizing policy in use
    pub fn policy(&self) -> SpectrumPolicy {
        self.policy
    }

    /// Resample `input` to exactly `output_size` samples
    ///
    /// # Arguments
    ///
    /// * `input` - Sample block; its length is the input size `N`
    /// * `output_size` - Output length `M`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `input` is empty or `output_size` is 0
    /// - `AllocationFailure` if a spectrum or sample buffer cannot be allocated
    pub fn resample(&mut self, input: &[f32], output_size: usize) -> Result<Vec<f32>, ResampleError> {
        self.process(input, output_size).map(|(samples, _)| samples)
    }

    /// Resample `input` into `output`, whose length is the output size
    ///
    /// `output` is written only after the whole block was computed; on error
    /// it is left exactly as it was.
    pub fn resample_into(
        &mut self,
        input: &[f32],
        output: &mut [f32],
    ) -> Result<SpectrumAdjustment, ResampleError> {
        let (samples, adjustment) = self.process(input, output.len())?;
        output.copy_from_slice(&samples);
        Ok(adjustment)
    }

    fn process(
        &mut self,
        input: &[f32],
        output_size: usize,
    ) -> Result<(Vec<f32>, SpectrumAdjustment), ResampleError> {
        let input_size = input.len();
        if input_size == 0 {
            return Err(ResampleError::InvalidInput(
                "Input block is empty".to_string(),
            ));
        }
        if output_size == 0 {
            return Err(ResampleError::InvalidInput(
                "Output size must be > 0".to_string(),
            ));
        }

        log::trace!(
            "Spectral resample: {} -> {} samples ({})",
            input_size,
            output_size,
            self.policy.name()
        );

        let spectrum = self.provider.forward_real(input)?;
        let (adjusted, adjustment) =
            adjust_spectrum(&spectrum, input_size, output_size, self.policy)?;
        drop(spectrum);

        let mut samples = self.provider.inverse_real(&adjusted, output_size)?;
        normalize_by_size(&mut samples, input_size);

        Ok((samples, adjustment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::rms;
    use rustfft::num_complex::Complex;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: f32, len: usize, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0f32, f32::max)
    }

    /// Forward transform works, inverse reports an allocation failure
    struct FailingInverse {
        inner: RustFftProvider,
        forward_calls: usize,
    }

    impl FftProvider for FailingInverse {
        fn forward_real(&mut self, input: &[f32]) -> Result<Vec<Complex<f32>>, ResampleError> {
            self.forward_calls += 1;
            self.inner.forward_real(input)
        }

        fn inverse_real(
            &mut self,
            _spectrum: &[Complex<f32>],
            size: usize,
        ) -> Result<Vec<f32>, ResampleError> {
            Err(ResampleError::AllocationFailure(format!(
                "simulated failure for {} samples",
                size
            )))
        }
    }

    #[test]
    fn test_output_length() {
        let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
        for &n in &[1usize, 2, 3, 8, 441, 882, 960] {
            for &m in &[1usize, 2, 5, 8, 441, 960, 1920] {
                let input = sine(440.0, 8000.0, n, 0.5);
                let out = resampler.resample(&input, m).unwrap();
                assert_eq!(out.len(), m, "n={} m={}", n, m);
            }
        }
    }

    #[test]
    fn test_identity() {
        for policy in [SpectrumPolicy::GapInsertion, SpectrumPolicy::LowHalfCopy] {
            let mut resampler = SpectralResampler::new(policy);
            for &n in &[1usize, 7, 64, 441, 1000] {
                let input: Vec<f32> = (0..n).map(|i| ((i * 37 % 101) as f32 / 50.0) - 1.0).collect();
                let out = resampler.resample(&input, n).unwrap();
                assert!(
                    max_abs_diff(&input, &out) < 1e-4,
                    "{:?} n={}: max diff {}",
                    policy,
                    n,
                    max_abs_diff(&input, &out)
                );
            }
        }
    }

    #[test]
    fn test_downsample_preserves_sinusoid() {
        // 20 ms at 96 kHz -> 48 kHz, 1 kHz tone (20 whole cycles)
        let input = sine(1000.0, 96_000.0, 1920, 0.8);
        let expected = sine(1000.0, 48_000.0, 960, 0.8);

        let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
        let out = resampler.resample(&input, 960).unwrap();
        assert!(max_abs_diff(&out, &expected) < 1e-3);
        assert!((rms(&out) - 0.8 / 2f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_upsample_preserves_sinusoid() {
        // 20 ms at 44.1 kHz -> 48 kHz
        let input = sine(1000.0, 44_100.0, 882, 0.5);
        let expected = sine(1000.0, 48_000.0, 960, 0.5);

        for policy in [SpectrumPolicy::GapInsertion, SpectrumPolicy::LowHalfCopy] {
            let mut resampler = SpectralResampler::new(policy);
            let out = resampler.resample(&input, 960).unwrap();
            assert!(
                max_abs_diff(&out, &expected) < 1e-3,
                "{:?}: max diff {}",
                policy,
                max_abs_diff(&out, &expected)
            );
        }
    }

    #[test]
    fn test_aliasing_suppression() {
        // 30 kHz is representable at 96 kHz but above the 24 kHz limit at 48 kHz
        let input = sine(30_000.0, 96_000.0, 1920, 0.8);
        assert!(rms(&input) > 0.5);

        let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
        let out = resampler.resample(&input, 960).unwrap();
        assert!(rms(&out) < 1e-3, "alias energy left: rms={}", rms(&out));
    }

    #[test]
    fn test_round_trip() {
        // Band-limited: two tones well below both Nyquist limits
        let n = 882;
        let input: Vec<f32> = sine(500.0, 44_100.0, n, 0.4)
            .iter()
            .zip(sine(3000.0, 44_100.0, n, 0.2).iter())
            .map(|(a, b)| a + b)
            .collect();

        let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
        let up = resampler.resample(&input, 960).unwrap();
        let back = resampler.resample(&up, n).unwrap();
        assert!(max_abs_diff(&input, &back) < 1e-3);
    }

    #[test]
    fn test_invalid_sizes() {
        let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
        assert!(matches!(
            resampler.resample(&[], 10),
            Err(ResampleError::InvalidInput(_))
        ));
        assert!(matches!(
            resampler.resample(&[0.5; 10], 0),
            Err(ResampleError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_allocation_failure_leaves_output_untouched() {
        let provider = FailingInverse {
            inner: RustFftProvider::new(),
            forward_calls: 0,
        };
        let mut resampler = SpectralResampler::with_provider(provider, SpectrumPolicy::GapInsertion);

        let input = sine(1000.0, 44_100.0, 882, 0.5);
        let mut output = vec![0.0f32; 960];
        let result = resampler.resample_into(&input, &mut output);

        assert!(matches!(result, Err(ResampleError::AllocationFailure(_))));
        assert_eq!(resampler.provider.forward_calls, 1);
        assert!(output.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_resample_into_reports_adjustment() {
        let mut resampler = SpectralResampler::new(SpectrumPolicy::GapInsertion);
        let input = sine(1000.0, 44_100.0, 882, 0.5);
        let mut output = vec![0.0f32; 960];
        let adjustment = resampler.resample_into(&input, &mut output).unwrap();
        assert_eq!(adjustment.inserted_bins, 960 - 882);
        assert!(rms(&output) > 0.3);
    }
}
