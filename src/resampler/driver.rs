//! Whole-signal conversion from a source rate to the target rate
//!
//! The driver sizes the output from the rate ratio,
//! `round(len * target_rate / source_rate)`, allocates it up front, and fills it
//! either with one spectral resample of the whole signal or with a sequence of
//! fixed-duration chunks.
//!
//! # Modes
//!
//! - [`ProcessingMode::Whole`]: one transform over the entire signal. Exact for
//!   band-limited input, no boundary artifacts; transform size and memory grow
//!   with the signal length.
//! - [`ProcessingMode::Chunked`]: independent transforms over short windows
//!   (20 ms by default), concatenated in order. Transform size and memory stay
//!   bounded, but chunks are neither overlapped nor windowed, so every chunk
//!   boundary can carry a discontinuity (audible as a click at the chunk rate
//!   for tonal material).
//!
//! Chunk output spans are derived from the cumulative input position, so they
//! tile the output exactly and the result has the same length in both modes.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::ResampleConfig;
use crate::error::ResampleError;
use crate::fft::provider::{FftProvider, RustFftProvider};
use crate::numeric::{output_len_for_rate, samples_per_window, try_filled};
use crate::resampler::spectral::SpectralResampler;
use crate::resampler::timer::Stopwatch;

/// How a signal is split into transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// One transform over the whole signal
    Whole,
    /// Independent transforms over fixed-duration windows
    Chunked {
        /// Window length in milliseconds
        chunk_ms: u32,
    },
}

impl ProcessingMode {
    /// Short name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            ProcessingMode::Whole => "whole",
            ProcessingMode::Chunked { .. } => "chunked",
        }
    }
}

/// Input and output sample ranges of one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Samples read from the input
    pub input: Range<usize>,
    /// Samples written to the output
    pub output: Range<usize>,
}

/// Result of one conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Resampled signal
    pub samples: Vec<f32>,
    /// Rate of `samples` in Hz
    pub sample_rate: u32,
    /// Mode used
    pub mode: ProcessingMode,
    /// Number of transforms performed
    pub chunks: usize,
    /// Chunks too short to produce any output sample
    pub skipped_chunks: usize,
    /// Timer handed to [`ResamplingDriver::convert`], stopped after resampling
    pub timer: Stopwatch,
}

/// Split `input_len` samples into chunks of `chunk_ms` and map each onto the output
///
/// The last chunk may be shorter than the window. Output spans are
/// `[round(start * ratio), round(end * ratio))`, the last one ending at
/// `output_len_for_rate(input_len, ..)`.
///
/// # Errors
///
/// `InvalidInput` if a rate or the window is zero, or the window holds less
/// than one source sample.
pub fn plan_chunks(
    input_len: usize,
    source_rate: u32,
    target_rate: u32,
    chunk_ms: u32,
) -> Result<Vec<ChunkSpan>, ResampleError> {
    if source_rate == 0 || target_rate == 0 {
        return Err(ResampleError::InvalidInput(format!(
            "Sample rates must be > 0 (source={}, target={})",
            source_rate, target_rate
        )));
    }
    let chunk_len = samples_per_window(chunk_ms, source_rate);
    if chunk_len == 0 {
        return Err(ResampleError::InvalidInput(format!(
            "Chunk of {} ms holds no samples at {} Hz",
            chunk_ms, source_rate
        )));
    }

    let output_total = output_len_for_rate(input_len, source_rate, target_rate);
    let mut spans = Vec::with_capacity(input_len.div_ceil(chunk_len));
    let mut start = 0;
    while start < input_len {
        let end = (start + chunk_len).min(input_len);
        let out_start = output_len_for_rate(start, source_rate, target_rate);
        let out_end = if end == input_len {
            output_total
        } else {
            output_len_for_rate(end, source_rate, target_rate)
        };
        spans.push(ChunkSpan {
            input: start..end,
            output: out_start..out_end,
        });
        start = end;
    }
    Ok(spans)
}

/// Converts complete signals to the configured target rate
#[derive(Debug)]
pub struct ResamplingDriver<P: FftProvider = RustFftProvider> {
    resampler: SpectralResampler<P>,
    target_rate: u32,
    mode: ProcessingMode,
}

impl ResamplingDriver<RustFftProvider> {
    /// Create a driver from a configuration
    pub fn new(config: &ResampleConfig) -> Self {
        Self::with_resampler(SpectralResampler::new(config.policy), config)
    }
}

impl<P: FftProvider> ResamplingDriver<P> {
    /// Create a driver around an existing resampler; its policy is kept
    pub fn with_resampler(resampler: SpectralResampler<P>, config: &ResampleConfig) -> Self {
        Self {
            resampler,
            target_rate: config.target_rate,
            mode: config.mode,
        }
    }

    /// Output rate in Hz
    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    /// Configured processing mode
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    /// Convert `input` from `source_rate` to the target rate
    ///
    /// # Arguments
    ///
    /// * `input` - Mono samples
    /// * `source_rate` - Rate of `input` in Hz
    /// * `timer` - Timer for the resampling phase; returned in the result
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty input, zero rates, an output of zero samples,
    ///   or a chunk window shorter than one sample
    /// - `AllocationFailure` if the output or a spectrum buffer cannot be
    ///   allocated; no partial output is returned
    pub fn convert(
        &mut self,
        input: &[f32],
        source_rate: u32,
        mut timer: Stopwatch,
    ) -> Result<Conversion, ResampleError> {
        if input.is_empty() {
            return Err(ResampleError::InvalidInput(
                "Empty audio samples".to_string(),
            ));
        }
        if source_rate == 0 {
            return Err(ResampleError::InvalidInput(
                "Invalid source sample rate".to_string(),
            ));
        }
        if self.target_rate == 0 {
            return Err(ResampleError::InvalidInput(
                "Invalid target sample rate".to_string(),
            ));
        }

        let output_total = output_len_for_rate(input.len(), source_rate, self.target_rate);
        if output_total == 0 {
            return Err(ResampleError::InvalidInput(format!(
                "{} samples at {} Hz produce no output at {} Hz",
                input.len(),
                source_rate,
                self.target_rate
            )));
        }

        log::debug!(
            "Converting {} samples {} Hz -> {} Hz ({} output samples, {} mode, {})",
            input.len(),
            source_rate,
            self.target_rate,
            output_total,
            self.mode.name(),
            self.resampler.policy().name()
        );

        let spans = match self.mode {
            ProcessingMode::Whole => vec![ChunkSpan {
                input: 0..input.len(),
                output: 0..output_total,
            }],
            ProcessingMode::Chunked { chunk_ms } => {
                let spans = plan_chunks(input.len(), source_rate, self.target_rate, chunk_ms)?;
                log::debug!(
                    "Chunked mode: {} chunks of {} ms, no overlap (boundaries may be discontinuous)",
                    spans.len(),
                    chunk_ms
                );
                spans
            }
        };

        let mut output = try_filled(output_total, 0.0f32, "output")?;

        timer.start();
        let mut chunks = 0;
        let mut skipped_chunks = 0;
        for span in spans {
            if span.output.is_empty() {
                skipped_chunks += 1;
                log::warn!(
                    "Skipping chunk {:?}: no output samples at {} Hz",
                    span.input,
                    self.target_rate
                );
                continue;
            }
            self.resampler
                .resample_into(&input[span.input], &mut output[span.output])?;
            chunks += 1;
        }
        let elapsed = timer.stop();

        log::info!(
            "Resampled {} -> {} samples in {:.2} ms ({} transforms)",
            input.len(),
            output_total,
            elapsed.as_secs_f64() * 1000.0,
            chunks
        );

        Ok(Conversion {
            samples: output,
            sample_rate: self.target_rate,
            mode: self.mode,
            chunks,
            skipped_chunks,
            timer,
        })
    }
}
