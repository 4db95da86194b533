//! The fallback ladder that guarantees a result no larger than the input.
//!
//! ```text
//! Initial --(not smaller)--> Aggressive --(not smaller, PNG)--> ForceJpeg
//!    |                           |  \--(not smaller, JPEG)--\        |
//!  smaller                    smaller                        v        v
//!    v                           v                         GiveUp <---
//!  emit                        emit                  (original bytes)
//! ```
//!
//! At most three encode attempts are made. An encoder error counts as
//! "not smaller" and advances the ladder.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::decode::RenderedSurface;
use crate::encode::{encode_surface, EncodeError};
use crate::plan::EncodingPlan;
use crate::source::{ImageMime, SourceImage};

/// Upper bound on the quality of the aggressive retry.
pub const AGGRESSIVE_QUALITY_CAP: f32 = 0.5;

/// Fixed quality of the PNG-to-JPEG last resort.
pub const FORCE_JPEG_QUALITY: f32 = 0.7;

/// Which rung of the ladder produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// First attempt with the planned format and quality.
    Initial,
    /// Retry at half the planned quality (capped at 0.5).
    Aggressive,
    /// PNG input re-encoded as JPEG at 0.7.
    ForceJpeg,
    /// Every attempt failed to shrink the file; the input is returned as is.
    Original,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::Aggressive => "aggressive",
            Stage::ForceJpeg => "force_jpeg",
            Stage::Original => "original",
        }
    }
}

/// Quality used by the aggressive retry: `min(planned * 0.5, 0.5)`.
pub fn aggressive_quality(planned: f32) -> f32 {
    (planned * 0.5).min(AGGRESSIVE_QUALITY_CAP)
}

/// Encodes a rendered surface. The seam between the ladder and the codecs.
pub trait SurfaceEncoder {
    fn encode(
        &self,
        surface: &RenderedSurface,
        mime: ImageMime,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Encoder backed by the `image` crate codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecEncoder;

impl SurfaceEncoder for CodecEncoder {
    fn encode(
        &self,
        surface: &RenderedSurface,
        mime: ImageMime,
        quality: f32,
    ) -> Result<Vec<u8>, EncodeError> {
        encode_surface(surface, mime, quality)
    }
}

/// Output of a compression run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedResult {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub mime: ImageMime,
    /// Mime string for `bytes`. Canonical for encoded output; the caller's
    /// declared string when the original is returned.
    pub mime_type: String,
    pub stage: Stage,
    /// Quality of the winning attempt; `None` when the original is returned.
    pub quality: Option<f32>,
    pub width: u32,
    pub height: u32,
    /// Byte length of the input, for size comparisons.
    pub original_length: usize,
}

impl EncodedResult {
    /// The untouched source: same bytes, same declared mime, same size.
    pub fn original(source: &SourceImage) -> Self {
        Self {
            bytes: source.bytes().to_vec(),
            mime: source.mime(),
            mime_type: source.declared_mime().to_string(),
            stage: Stage::Original,
            quality: None,
            width: source.width(),
            height: source.height(),
            original_length: source.byte_length(),
        }
    }

    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// True when the result is strictly smaller than the input.
    pub fn is_reduced(&self) -> bool {
        self.byte_length() < self.original_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LadderState {
    Initial,
    Aggressive,
    ForceJpeg,
    GiveUp,
}

impl LadderState {
    fn after_failure(self, planned_mime: ImageMime) -> Self {
        match self {
            LadderState::Initial => LadderState::Aggressive,
            LadderState::Aggressive if planned_mime == ImageMime::Png => LadderState::ForceJpeg,
            LadderState::Aggressive | LadderState::ForceJpeg | LadderState::GiveUp => {
                LadderState::GiveUp
            }
        }
    }
}

/// Run the fallback ladder for a rendered surface.
///
/// Returns the first candidate strictly smaller than the source, or the
/// source itself once every attempt has failed.
pub fn encode_adaptive<E: SurfaceEncoder + ?Sized>(
    encoder: &E,
    source: &SourceImage,
    surface: &RenderedSurface,
    plan: EncodingPlan,
) -> EncodedResult {
    let limit = source.byte_length();
    let mut state = LadderState::Initial;

    loop {
        let (stage, mime, quality) = match state {
            LadderState::Initial => (Stage::Initial, plan.mime, plan.quality),
            LadderState::Aggressive => {
                (Stage::Aggressive, plan.mime, aggressive_quality(plan.quality))
            }
            LadderState::ForceJpeg => (Stage::ForceJpeg, ImageMime::Jpeg, FORCE_JPEG_QUALITY),
            LadderState::GiveUp => {
                info!(bytes = limit, "no attempt shrank the file, returning original");
                return EncodedResult::original(source);
            }
        };

        match encoder.encode(surface, mime, quality) {
            Ok(bytes) if bytes.len() < limit => {
                info!(
                    stage = stage.as_str(),
                    mime = mime.as_str(),
                    quality,
                    bytes = bytes.len(),
                    original = limit,
                    "compressed"
                );
                return EncodedResult {
                    bytes,
                    mime,
                    mime_type: mime.as_str().to_string(),
                    stage,
                    quality: Some(quality),
                    width: surface.width,
                    height: surface.height,
                    original_length: limit,
                };
            }
            Ok(bytes) => {
                debug!(
                    stage = stage.as_str(),
                    mime = mime.as_str(),
                    quality,
                    bytes = bytes.len(),
                    original = limit,
                    "attempt not smaller than original"
                );
            }
            Err(e) => {
                warn!(stage = stage.as_str(), mime = mime.as_str(), error = %e, "encode attempt failed");
            }
        }

        state = state.after_failure(plan.mime);
    }
}
