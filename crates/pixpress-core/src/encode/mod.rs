//! Image encoding for Pixpress.
//!
//! This module provides functionality for:
//! - Encoding RGBA surfaces to JPEG with a quality fraction
//! - Encoding RGBA surfaces to PNG (quality accepted, ignored)
//!
//! # Architecture
//!
//! Each encode is a single-shot call that returns the complete byte buffer.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::RenderedSurface;
//! use pixpress_core::encode::encode_surface;
//! use pixpress_core::ImageMime;
//!
//! let surface = RenderedSurface::new(100, 100, vec![128u8; 100 * 100 * 4]);
//! let jpeg_bytes = encode_surface(&surface, ImageMime::Jpeg, 0.8).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::{quality_to_percent, EncodeError};

use crate::decode::RenderedSurface;
use crate::source::ImageMime;

/// Encode a surface in the given format at the given quality fraction.
pub fn encode_surface(
    surface: &RenderedSurface,
    mime: ImageMime,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    match mime {
        ImageMime::Jpeg => encode_jpeg(surface, quality),
        ImageMime::Png => encode_png(surface, quality),
    }
}
