//! Transparency detection on rendered RGBA pixels.

/// Alpha values at or above this count as opaque.
///
/// 254 rather than 255 so that rounding in the resampler does not flag an
/// opaque image as transparent.
pub const OPAQUE_ALPHA_THRESHOLD: u8 = 254;

/// Check whether an RGBA buffer has any meaningfully transparent pixel.
///
/// Scans the alpha channel of every pixel and returns true as soon as one
/// sample is below [`OPAQUE_ALPHA_THRESHOLD`]. A trailing partial pixel is
/// ignored. An empty buffer has no transparency.
pub fn has_transparency(rgba: &[u8]) -> bool {
    rgba.chunks_exact(4)
        .any(|pixel| pixel[3] < OPAQUE_ALPHA_THRESHOLD)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
