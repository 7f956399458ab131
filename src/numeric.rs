//! Numeric helpers shared by the resampler and the driver
//!
//! - Fallible buffer allocation
//! - Inverse-transform normalization
//! - Rate-ratio length arithmetic
//! - Energy / RMS measurements

use crate::error::ResampleError;

/// Allocate a buffer of `len` copies of `value`, reporting failure instead of aborting
///
/// `what` names the buffer in the error message.
pub fn try_filled<T: Clone>(len: usize, value: T, what: &str) -> Result<Vec<T>, ResampleError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|e| {
        ResampleError::AllocationFailure(format!("{} buffer of {} elements: {}", what, len, e))
    })?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Scale every sample by `1 / input_size`
///
/// The FFT provider's inverse transform is unnormalized, so a forward/inverse
/// pair multiplies the signal by the forward length.
pub fn normalize_by_size(samples: &mut [f32], input_size: usize) {
    if input_size == 0 {
        return;
    }
    let norm = 1.0 / input_size as f32;
    for sample in samples.iter_mut() {
        *sample *= norm;
    }
}

/// Number of output samples for `len` input samples converted from `source_rate` to `target_rate`
///
/// `round(len * target_rate / source_rate)`, computed in integers and rounding
/// halves up. Returns 0 when `source_rate` is 0.
pub fn output_len_for_rate(len: usize, source_rate: u32, target_rate: u32) -> usize {
    if source_rate == 0 {
        return 0;
    }
    let num = len as u128 * target_rate as u128;
    let den = source_rate as u128;
    ((num + den / 2) / den) as usize
}

/// Number of samples in `duration_ms` milliseconds at `sample_rate` (floored)
pub fn samples_per_window(duration_ms: u32, sample_rate: u32) -> usize {
    (duration_ms as u64 * sample_rate as u64 / 1000) as usize
}

/// Sum of squared samples
pub fn energy(samples: &[f32]) -> f64 {
    samples.iter().map(|&x| (x as f64) * (x as f64)).sum()
}

/// Root mean square level (0.0 for an empty slice)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (energy(samples) / samples.len() as f64).sqrt() as f32
}
