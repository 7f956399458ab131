//! Error types for the resampling engine

use std::fmt;

/// Errors that can occur while resampling or moving audio in and out
#[derive(Debug, Clone, PartialEq)]
pub enum ResampleError {
    /// Invalid input parameters (empty buffers, zero rates or sizes, wrong channel count)
    InvalidInput(String),

    /// A sample or spectrum buffer could not be allocated
    AllocationFailure(String),

    /// The writer accepted fewer samples than requested
    PartialWrite {
        /// Samples the caller asked to write
        expected: usize,
        /// Samples actually written
        written: usize,
    },

    /// Audio decoding error
    DecodingError(String),

    /// File system or encoder error
    Io(String),
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ResampleError::AllocationFailure(msg) => write!(f, "Allocation failure: {}", msg),
            ResampleError::PartialWrite { expected, written } => write!(
                f,
                "Partial write: {} of {} samples written",
                written, expected
            ),
            ResampleError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            ResampleError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ResampleError {}

impl From<std::io::Error> for ResampleError {
    fn from(err: std::io::Error) -> Self {
        ResampleError::Io(err.to_string())
    }
}

impl From<hound::Error> for ResampleError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => ResampleError::Io(io.to_string()),
            other => ResampleError::Io(format!("WAV encoder: {}", other)),
        }
    }
}

impl From<symphonia::core::errors::Error> for ResampleError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        ResampleError::DecodingError(err.to_string())
    }
}
