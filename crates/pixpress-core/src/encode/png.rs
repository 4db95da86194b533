//! PNG encoding of rendered surfaces.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ExtendedColorType;
use image::ImageEncoder;

use super::types::{validate_surface, EncodeError};
use crate::decode::RenderedSurface;

/// Encode an RGBA surface to PNG bytes with best compression.
///
/// PNG is lossless; the quality fraction is accepted so callers can treat
/// both formats alike, but it does not influence the output.
pub fn encode_png(surface: &RenderedSurface, _quality: f32) -> Result<Vec<u8>, EncodeError> {
    validate_surface(surface)?;

    // Best compression usually lands well under the raw RGBA size
    let mut buffer = Vec::with_capacity(surface.pixels.len() / 3);
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);

    encoder
        .write_image(
            &surface.pixels,
            surface.width,
            surface.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer)
}
