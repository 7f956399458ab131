//! Audio decoding using Symphonia
//!
//! Decodes any container/codec Symphonia supports to mono `f32` samples.
//! Only single-channel streams are accepted; channel mixing is left to the
//! caller.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer as InterleavedBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::ResampleError;
use crate::io::sample_buffer::SampleBuffer;

/// Decode a mono audio file
///
/// # Arguments
///
/// * `path` - Path to audio file (the extension is used as a format hint)
///
/// # Returns
///
/// The decoded samples and their sample rate
///
/// # Errors
///
/// - `Io` if the file cannot be opened
/// - `DecodingError` if no decodable track is found or the stream lacks a sample rate
/// - `InvalidInput` if the track is not mono or decodes to no samples
pub fn decode_file(path: &Path) -> Result<SampleBuffer, ResampleError> {
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ResampleError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
        ResampleError::DecodingError("Stream does not declare a sample rate".to_string())
    })?;
    if let Some(channels) = track.codec_params.channels {
        check_mono(channels.count())?;
    }

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                check_mono(spec.channels.count())?;

                let mut buffer = InterleavedBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                // Corrupted packet: skip it and keep going
                skipped_packets += 1;
                log::warn!("Skipping undecodable packet: {}", msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    if samples.is_empty() {
        return Err(ResampleError::InvalidInput(format!(
            "No samples decoded from {}",
            path.display()
        )));
    }

    log::debug!(
        "Decoded {} samples at {} Hz ({} packets skipped)",
        samples.len(),
        sample_rate,
        skipped_packets
    );

    SampleBuffer::new(samples, sample_rate)
}

fn check_mono(channels: usize) -> Result<(), ResampleError> {
    if channels != 1 {
        return Err(ResampleError::InvalidInput(format!(
            "Expected a mono stream, found {} channels",
            channels
        )));
    }
    Ok(())
}
