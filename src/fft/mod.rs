//! Frequency-domain building blocks
//!
//! - Real FFT provider (forward / inverse)
//! - Spectrum resizing and bin-count arithmetic

pub mod provider;
pub mod spectrum;

pub use provider::{FftProvider, RustFftProvider};
pub use spectrum::{adjust_spectrum, half_len, SpectrumAdjustment, SpectrumPolicy};
