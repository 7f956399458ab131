//! Configuration parameters for sample-rate conversion

use serde::{Deserialize, Serialize};

use crate::fft::spectrum::SpectrumPolicy;
use crate::resampler::driver::ProcessingMode;

/// Default output sample rate in Hz
pub const DEFAULT_TARGET_RATE: u32 = 48_000;

/// Default chunk window for [`ProcessingMode::Chunked`], in milliseconds
pub const DEFAULT_CHUNK_MS: u32 = 20;

/// Resampling configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Output sample rate in Hz (default: 48000)
    pub target_rate: u32,

    /// Whole-buffer or chunked processing (default: Whole)
    ///
    /// Chunked mode bounds transform size and memory but leaves a
    /// discontinuity at every chunk boundary (no overlap, no windowing).
    pub mode: ProcessingMode,

    /// How the spectrum is resized between transforms (default: GapInsertion)
    pub policy: SpectrumPolicy,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            target_rate: DEFAULT_TARGET_RATE,
            mode: ProcessingMode::Whole,
            policy: SpectrumPolicy::GapInsertion,
        }
    }
}

impl ResampleConfig {
    /// Chunked processing with the default 20 ms window
    pub fn chunked() -> Self {
        Self {
            mode: ProcessingMode::Chunked {
                chunk_ms: DEFAULT_CHUNK_MS,
            },
            ..Self::default()
        }
    }

    /// Load a configuration from JSON; missing fields keep their defaults
    pub fn from_json(text: &str) -> Result<Self, crate::error::ResampleError> {
        serde_json::from_str(text).map_err(|e| {
            crate::error::ResampleError::InvalidInput(format!("Invalid configuration: {}", e))
        })
    }
}
