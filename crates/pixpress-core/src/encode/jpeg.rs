//! JPEG encoding of rendered surfaces.
//!
//! Uses the `image` crate's baseline JPEG encoder. JPEG has no alpha, so
//! the surface is flattened over black first, which is how a canvas
//! exports transparent pixels.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::types::{quality_to_percent, validate_surface, EncodeError};
use crate::decode::RenderedSurface;

/// Encode an RGBA surface to JPEG bytes.
///
/// # Arguments
///
/// * `surface` - RGBA surface (4 bytes per pixel, row-major order)
/// * `quality` - Quality fraction (0.0-1.0), mapped to the encoder's 1-100 scale
///
/// # Errors
///
/// Returns an error if the surface has zero dimensions, a pixel buffer of the
/// wrong length, or the encoder fails.
pub fn encode_jpeg(surface: &RenderedSurface, quality: f32) -> Result<Vec<u8>, EncodeError> {
    validate_surface(surface)?;

    let rgb = flatten_over_black(&surface.pixels);
    let mut buffer = Vec::with_capacity(rgb.len() / 8);

    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality_to_percent(quality));
    encoder
        .write_image(&rgb, surface.width, surface.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer)
}

/// Drop the alpha channel, compositing each pixel over a black background.
fn flatten_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for pixel in rgba.chunks_exact(4) {
        let alpha = pixel[3] as u16;
        if alpha == 255 {
            rgb.extend_from_slice(&pixel[..3]);
        } else {
            for &channel in &pixel[..3] {
                rgb.push(((channel as u16 * alpha + 127) / 255) as u8);
            }
        }
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
