//! # Stratum Resample
//!
//! FFT-based sample-rate conversion for mono audio. Signals are converted by
//! resizing their spectrum: forward real FFT, insert or drop bins around the
//! Nyquist bin, inverse real FFT, normalize.
//!
//! ## Features
//!
//! - **Spectral resampling**: ideal band-limited interpolation when upsampling,
//!   brick-wall removal of content above the new Nyquist limit when downsampling
//! - **Whole-buffer or chunked** processing (20 ms windows by default)
//! - **File conversion**: any mono input Symphonia can decode, written as
//!   32-bit float WAV
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_resample::{resample_audio, ResampleConfig};
//!
//! // Mono f32 samples at 44.1 kHz
//! let samples: Vec<f32> = vec![0.0; 44100];
//!
//! let result = resample_audio(&samples, 44100, ResampleConfig::default())?;
//!
//! println!(
//!     "{} -> {} samples in {:.2} ms",
//!     result.metadata.input_samples,
//!     result.metadata.output_samples,
//!     result.metadata.processing_time_ms
//! );
//! # Ok::<(), stratum_resample::ResampleError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! decode -> ResamplingDriver -> SpectralResampler (once, or per chunk) -> write
//!                                   |
//!                       FftProvider + spectrum adjustment
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fft;
pub mod io;
pub mod numeric;
pub mod report;
pub mod resampler;

use std::path::Path;

// Re-export main types
pub use config::ResampleConfig;
pub use error::ResampleError;
pub use fft::SpectrumPolicy;
pub use report::{ResampleMetadata, ResampleReport, ResampleResult};
pub use resampler::{ProcessingMode, ResamplingDriver, SpectralResampler, Stopwatch};

/// Main conversion function
///
/// Converts mono samples from `sample_rate` to `config.target_rate`.
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate of `samples` in Hz
/// * `config` - Conversion configuration
///
/// # Returns
///
/// `ResampleResult` holding the converted samples and conversion metadata
///
/// # Errors
///
/// Returns `ResampleError` if the input is invalid or a buffer cannot be
/// allocated. No partial output is returned.
///
/// # Example
///
/// ```no_run
/// use stratum_resample::{resample_audio, ResampleConfig};
///
/// let samples = vec![0.0f32; 96000]; // 1 second at 96 kHz
/// let result = resample_audio(&samples, 96000, ResampleConfig::default())?;
/// assert_eq!(result.samples.len(), 48000);
/// # Ok::<(), stratum_resample::ResampleError>(())
/// ```
pub fn resample_audio(
    samples: &[f32],
    sample_rate: u32,
    config: ResampleConfig,
) -> Result<ResampleResult, ResampleError> {
    log::debug!(
        "Starting conversion: {} samples at {} Hz -> {} Hz",
        samples.len(),
        sample_rate,
        config.target_rate
    );

    let mut driver = ResamplingDriver::new(&config);
    let conversion = driver.convert(samples, sample_rate, Stopwatch::new())?;

    let metadata = ResampleMetadata {
        source_rate: sample_rate,
        target_rate: conversion.sample_rate,
        input_samples: samples.len(),
        output_samples: conversion.samples.len(),
        mode: conversion.mode,
        policy: config.policy,
        chunks: conversion.chunks,
        processing_time_ms: conversion.timer.elapsed_ms(),
        algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(ResampleResult {
        samples: conversion.samples,
        metadata,
    })
}

/// Convert an audio file and write the result as a mono float WAV
///
/// The output file is only created once the conversion has succeeded.
///
/// # Errors
///
/// Decoding, validation, allocation and write errors, as `ResampleError`.
/// A partially written output file is removed.
pub fn resample_file(
    input: &Path,
    output: &Path,
    config: ResampleConfig,
) -> Result<ResampleReport, ResampleError> {
    let decoded = io::decode_file(input)?;
    let sample_rate = decoded.sample_rate();
    let result = resample_audio(decoded.samples(), sample_rate, config)?;
    drop(decoded);

    let ResampleResult { samples, metadata } = result;
    let buffer = io::SampleBuffer::new(samples, metadata.target_rate)?;
    io::write_wav(output, &buffer)?;

    log::info!(
        "Wrote {} ({} samples at {} Hz)",
        output.display(),
        buffer.len(),
        buffer.sample_rate()
    );

    Ok(ResampleReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        metadata,
    })
}
