//! Pixpress Core - adaptive image recompression
//!
//! This crate takes a JPEG or PNG, bounds it to 1920x1080, picks an output
//! format and quality, and re-encodes it, falling back to more aggressive
//! settings until the result is smaller than the input. If nothing shrinks
//! the file, the original bytes are returned unchanged.
//!
//! # Pipeline
//!
//! 1. [`source`] - validate the declared mime type and read dimensions
//! 2. [`decode`] - decode to RGBA, bound dimensions, resample
//! 3. [`plan`] - choose output mime and quality (uses [`alpha`] for PNG)
//! 4. [`adaptive`] - run the Initial / Aggressive / ForceJpeg / GiveUp ladder
//!
//! [`session`] wraps the pipeline with sequence-stamped requests so callers
//! can discard results that resolve out of order.

pub mod adaptive;
pub mod alpha;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod options;
pub mod plan;
pub mod session;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use adaptive::{encode_adaptive, CodecEncoder, EncodedResult, Stage, SurfaceEncoder};
pub use alpha::has_transparency;
pub use compress::{compress, compress_bytes, compress_with};
pub use decode::{calculate_target_dimensions, TargetDimensions};
pub use options::CompressOptions;
pub use plan::{plan_encoding, EncodingPlan};
pub use session::{CompressionRequest, CompressionSession, Stamped};
pub use source::{check_file, download_name, FileCheck, ImageMime, InputError, SourceImage};
