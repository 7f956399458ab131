//! WAV output
//!
//! Resampled audio is written as mono 32-bit IEEE float WAV.

use std::io::{Seek, Write};
use std::path::Path;

use crate::error::ResampleError;
use crate::io::sample_buffer::SampleBuffer;

fn float_mono_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    }
}

/// Write `buffer` to `path` as a mono float WAV
///
/// # Errors
///
/// - `InvalidInput` if the buffer is empty
/// - `Io` if the file cannot be created or encoded
/// - `PartialWrite` if fewer samples than requested were written
pub fn write_wav(path: &Path, buffer: &SampleBuffer) -> Result<(), ResampleError> {
    if buffer.is_empty() {
        return Err(ResampleError::InvalidInput(
            "Refusing to write an empty buffer".to_string(),
        ));
    }
    log::debug!(
        "Writing {} samples at {} Hz to {}",
        buffer.len(),
        buffer.sample_rate(),
        path.display()
    );

    let writer = hound::WavWriter::create(path, float_mono_spec(buffer.sample_rate()))?;
    let result = write_samples(writer, buffer.samples());
    if result.is_err() {
        // A truncated file is not valid output
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("Could not remove partial output {}: {}", path.display(), e);
        }
    }
    result
}

/// Write `samples` through an open WAV writer and finalize it
///
/// Every sample is counted; the header is finalized only if all of them
/// were accepted.
pub fn write_samples<W: Write + Seek>(
    mut writer: hound::WavWriter<W>,
    samples: &[f32],
) -> Result<(), ResampleError> {
    if samples.is_empty() {
        return Err(ResampleError::InvalidInput(
            "Refusing to write an empty buffer".to_string(),
        ));
    }

    let mut written = 0usize;
    for &sample in samples {
        if let Err(e) = writer.write_sample(sample) {
            log::warn!("Writer stopped after {} of {} samples: {}", written, samples.len(), e);
            break;
        }
        written += 1;
    }

    if written != samples.len() {
        return Err(ResampleError::PartialWrite {
            expected: samples.len(),
            written,
        });
    }

    writer.finalize()?;
    Ok(())
}
