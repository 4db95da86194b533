//! Shared encoder types and input validation.

use thiserror::Error;

use crate::decode::RenderedSurface;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Convert a quality fraction (0.0-1.0) to the 1-100 scale JPEG encoders use.
///
/// Out-of-range and NaN inputs are clamped; NaN maps to the lowest quality.
pub fn quality_to_percent(quality: f32) -> u8 {
    if quality.is_nan() {
        return 1;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Check that a surface is encodable: non-zero size and a full RGBA buffer.
pub(crate) fn validate_surface(surface: &RenderedSurface) -> Result<(), EncodeError> {
    let (width, height) = (surface.width, surface.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if surface.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: surface.pixels.len(),
        });
    }

    Ok(())
}
