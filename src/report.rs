//! Conversion result types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fft::spectrum::SpectrumPolicy;
use crate::resampler::driver::ProcessingMode;

/// What a conversion did and how long it took
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleMetadata {
    /// Input sample rate in Hz
    pub source_rate: u32,

    /// Output sample rate in Hz
    pub target_rate: u32,

    /// Input length in samples
    pub input_samples: usize,

    /// Output length in samples
    pub output_samples: usize,

    /// Processing mode used
    pub mode: ProcessingMode,

    /// Spectrum resizing policy used
    pub policy: SpectrumPolicy,

    /// Transforms performed (1 in whole-buffer mode)
    pub chunks: usize,

    /// Resampling time in milliseconds (excludes decoding and writing)
    pub processing_time_ms: f32,

    /// Crate version that produced the result
    pub algorithm_version: String,
}

impl ResampleMetadata {
    /// Output duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.target_rate == 0 {
            return 0.0;
        }
        self.output_samples as f32 / self.target_rate as f32
    }
}

/// Resampled samples with their metadata
#[derive(Debug, Clone)]
pub struct ResampleResult {
    /// Samples at `metadata.target_rate`
    pub samples: Vec<f32>,

    /// Conversion metadata
    pub metadata: ResampleMetadata,
}

/// Outcome of a file-to-file conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampleReport {
    /// File that was read
    pub input: PathBuf,

    /// File that was written
    pub output: PathBuf,

    /// Conversion metadata
    pub metadata: ResampleMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ResampleMetadata {
        ResampleMetadata {
            source_rate: 44_100,
            target_rate: 48_000,
            input_samples: 44_100,
            output_samples: 48_000,
            mode: ProcessingMode::Chunked { chunk_ms: 20 },
            policy: SpectrumPolicy::GapInsertion,
            chunks: 50,
            processing_time_ms: 3.5,
            algorithm_version: "0.1.0".to_string(),
        }
    }

    #[test]
    fn test_metadata_json() {
        let json = serde_json::to_string(&metadata()).unwrap();
        assert!(json.contains("\"target_rate\":48000"));
        assert!(json.contains("\"chunked\":{\"chunk_ms\":20}"));
        assert!(json.contains("\"gap_insertion\""));

        let parsed: ResampleMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata());
    }

    #[test]
    fn test_duration() {
        assert!((metadata().duration_seconds() - 1.0).abs() < 1e-6);
    }
}
