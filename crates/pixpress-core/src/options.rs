//! Caller-supplied compression settings.

use serde::{Deserialize, Serialize};

use crate::decode::{FilterType, MAX_HEIGHT, MAX_WIDTH};

/// Quality used when the caller gives none (or gives NaN).
pub const DEFAULT_QUALITY: f32 = 0.8;

/// Settings for one compression run.
///
/// Deserializes with defaults for missing fields, so a JavaScript caller can
/// pass `{ quality: 0.6 }` and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// Requested quality fraction (0.0 = smallest, 1.0 = best).
    pub quality: f32,
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    /// Resampling filter.
    pub filter: FilterType,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            filter: FilterType::default(),
        }
    }
}

impl CompressOptions {
    /// Default options at the given quality fraction.
    pub fn with_quality(quality: f32) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    /// Output bounds as `(max_width, max_height)`, each at least 1 pixel.
    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width.max(1), self.max_height.max(1))
    }

    /// The requested quality clamped into [0, 1]; NaN falls back to the default.
    pub fn normalized_quality(&self) -> f32 {
        normalize_quality(self.quality)
    }
}

/// Clamp a quality fraction into [0, 1]; NaN becomes [`DEFAULT_QUALITY`].
pub fn normalize_quality(quality: f32) -> f32 {
    if quality.is_nan() {
        DEFAULT_QUALITY
    } else {
        quality.clamp(0.0, 1.0)
    }
}
