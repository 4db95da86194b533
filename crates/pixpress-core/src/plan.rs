//! Output format and quality selection.
//!
//! JPEG input stays JPEG with a quality ceiling that drops as the input gets
//! larger. PNG input becomes JPEG when the rendered pixels are opaque and
//! stays PNG (with a quality floor) when they carry transparency.

use serde::Serialize;

use crate::alpha::has_transparency;
use crate::decode::RenderedSurface;
use crate::options::normalize_quality;
use crate::source::{ImageMime, SourceImage};

/// Highest quality ever used for JPEG output.
pub const JPEG_QUALITY_CEILING: f32 = 0.9;

/// JPEG inputs above this size are capped at [`LARGE_JPEG_QUALITY`].
pub const LARGE_JPEG_BYTES: usize = 1024 * 1024;
pub const LARGE_JPEG_QUALITY: f32 = 0.8;

/// JPEG inputs above this size are capped at [`HUGE_JPEG_QUALITY`].
pub const HUGE_JPEG_BYTES: usize = 2 * 1024 * 1024;
pub const HUGE_JPEG_QUALITY: f32 = 0.7;

/// Lowest quality recorded for PNG output with transparency.
pub const PNG_QUALITY_FLOOR: f32 = 0.6;

/// Chosen output format and quality for the first encode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EncodingPlan {
    pub mime: ImageMime,
    pub quality: f32,
}

/// Plan the encoding of a loaded source.
///
/// `rendered` is the surface at target size; it is only scanned for
/// transparency when the source is PNG.
pub fn plan_encoding(
    source: &SourceImage,
    quality: f32,
    rendered: &RenderedSurface,
) -> EncodingPlan {
    plan_for(source.mime(), source.byte_length(), quality, || {
        has_transparency(&rendered.pixels)
    })
}

/// Plan an encoding from the input's mime type and byte length.
///
/// `transparency` is evaluated lazily and only for PNG input.
pub fn plan_for(
    mime: ImageMime,
    byte_length: usize,
    quality: f32,
    transparency: impl FnOnce() -> bool,
) -> EncodingPlan {
    let requested = normalize_quality(quality);

    match mime {
        ImageMime::Jpeg => {
            let mut quality = requested.min(JPEG_QUALITY_CEILING);
            if byte_length > LARGE_JPEG_BYTES {
                quality = quality.min(LARGE_JPEG_QUALITY);
            }
            if byte_length > HUGE_JPEG_BYTES {
                quality = quality.min(HUGE_JPEG_QUALITY);
            }
            EncodingPlan {
                mime: ImageMime::Jpeg,
                quality,
            }
        }
        ImageMime::Png if transparency() => EncodingPlan {
            mime: ImageMime::Png,
            quality: requested.max(PNG_QUALITY_FLOOR),
        },
        ImageMime::Png => EncodingPlan {
            mime: ImageMime::Jpeg,
            quality: requested.min(JPEG_QUALITY_CEILING),
        },
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
