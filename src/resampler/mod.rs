//! Sample-rate conversion
//!
//! - Spectral resampling of a single block
//! - Whole-signal driver (whole-buffer or chunked)
//! - Explicit timer for the resampling phase

pub mod driver;
pub mod spectral;
pub mod timer;

pub use driver::{Conversion, ProcessingMode, ResamplingDriver};
pub use spectral::SpectralResampler;
pub use timer::Stopwatch;
