//! Target-size calculation and resampling.
//!
//! The calculator bounds a source size to a maximum box while preserving
//! aspect ratio. The resampler scales an RGBA surface to that size using
//! the `image` crate's filters.

use serde::{Deserialize, Serialize};

use super::{DecodeError, FilterType, RenderedSurface};

/// Maximum output width in pixels.
pub const MAX_WIDTH: u32 = 1920;

/// Maximum output height in pixels.
pub const MAX_HEIGHT: u32 = 1080;

/// Output size of the resampling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDimensions {
    pub width: u32,
    pub height: u32,
}

impl TargetDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Calculate the output size for an image, bounded by `max_width` x `max_height`.
///
/// Images that already fit are returned unchanged. Otherwise the width bound
/// is applied first, then the height bound is checked against the result,
/// so an image that is still too tall after the width pass is corrected too.
pub fn calculate_target_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> TargetDimensions {
    if width <= max_width && height <= max_height {
        return TargetDimensions::new(width, height);
    }
    if width == 0 || height == 0 {
        return TargetDimensions::new(width.min(max_width), height.min(max_height));
    }

    let ratio = width as f64 / height as f64;
    let (mut new_width, mut new_height) = (width, height);

    if new_width > max_width {
        new_width = max_width;
        new_height = ((new_width as f64 / ratio).round() as u32).max(1);
    }

    if new_height > max_height {
        new_height = max_height;
        new_width = ((new_height as f64 * ratio).round() as u32).max(1);
    }

    TargetDimensions::new(new_width, new_height)
}

/// Resample a surface to the target dimensions.
///
/// Pure scaling: no cropping and no rotation. When the target matches the
/// surface size the pixels are copied through untouched.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
pub fn resample(
    surface: &RenderedSurface,
    target: TargetDimensions,
    filter: FilterType,
) -> Result<RenderedSurface, DecodeError> {
    let TargetDimensions { width, height } = target;
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if surface.width == width && surface.height == height {
        return Ok(surface.clone());
    }

    let view = surface
        .as_rgba_view()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(RenderedSurface::from_rgba_image(resized))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
