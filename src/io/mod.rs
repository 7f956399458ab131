//! Audio I/O modules
//!
//! Decoding with Symphonia, WAV output with hound, and output naming.

pub mod decoder;
pub mod path;
pub mod sample_buffer;
pub mod writer;

pub use decoder::decode_file;
pub use path::derive_output_path;
pub use sample_buffer::SampleBuffer;
pub use writer::write_wav;
