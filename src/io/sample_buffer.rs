//! Mono sample buffer with its sample rate

use crate::error::ResampleError;

/// Owned mono samples at a fixed rate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    /// Samples, nominally in [-1.0, 1.0]
    samples: Vec<f32>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap decoded samples
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `sample_rate` is 0
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, ResampleError> {
        if sample_rate == 0 {
            return Err(ResampleError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Give up the samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
