//! The end-to-end recompression pipeline.
//!
//! decode -> bound dimensions -> resample -> plan -> fallback ladder
//!
//! Each step runs to completion before the next starts. Nothing here is
//! fatal: if decoding or resampling fails the original bytes come back.

use tracing::{debug, warn};

use crate::adaptive::{encode_adaptive, CodecEncoder, EncodedResult, SurfaceEncoder};
use crate::decode::{calculate_target_dimensions, decode_surface, resample};
use crate::options::CompressOptions;
use crate::plan::plan_encoding;
use crate::source::{InputError, SourceImage};

/// Recompress a loaded source with the `image` crate codecs.
pub fn compress(source: &SourceImage, options: &CompressOptions) -> EncodedResult {
    compress_with(&CodecEncoder, source, options)
}

/// Validate, load and recompress raw bytes in one call.
///
/// # Errors
///
/// Returns an `InputError` if the mime type is unsupported, the buffer is
/// empty, or the header cannot be read. Once loaded, compression itself
/// always yields a result.
pub fn compress_bytes(
    bytes: impl Into<std::sync::Arc<[u8]>>,
    mime: &str,
    options: &CompressOptions,
) -> Result<EncodedResult, InputError> {
    let source = SourceImage::load(bytes, mime)?;
    Ok(compress(&source, options))
}

/// Recompress a loaded source through the given encoder.
pub fn compress_with<E: SurfaceEncoder + ?Sized>(
    encoder: &E,
    source: &SourceImage,
    options: &CompressOptions,
) -> EncodedResult {
    debug!(
        mime = source.mime().as_str(),
        bytes = source.byte_length(),
        width = source.width(),
        height = source.height(),
        "compressing"
    );

    let decoded = match decode_surface(source.bytes()) {
        Ok(surface) => surface,
        Err(e) => {
            warn!(error = %e, "decode failed, returning original");
            return EncodedResult::original(source);
        }
    };

    let (max_width, max_height) = options.bounds();
    let target = calculate_target_dimensions(decoded.width, decoded.height, max_width, max_height);
    debug!(width = target.width, height = target.height, "target dimensions");

    let rendered = match resample(&decoded, target, options.filter) {
        Ok(surface) => surface,
        Err(e) => {
            warn!(error = %e, "resample failed, returning original");
            return EncodedResult::original(source);
        }
    };
    drop(decoded);

    let plan = plan_encoding(source, options.quality, &rendered);
    debug!(mime = plan.mime.as_str(), quality = plan.quality, "encoding plan");

    encode_adaptive(encoder, source, &rendered, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::Stage;
    use crate::source::ImageMime;
    use crate::test_support::{encode_noise_jpeg, encode_test_png, noise_rgba, smooth_rgba, MINIMAL_JPEG};

    #[test]
    fn test_compress_large_noise_jpeg_shrinks() {
        let jpeg = encode_noise_jpeg(400, 300, 100);
        let source = SourceImage::load(jpeg, "image/jpeg").unwrap();

        let result = compress(&source, &CompressOptions::with_quality(0.5));

        assert_eq!(result.stage, Stage::Initial);
        assert_eq!(result.mime, ImageMime::Jpeg);
        assert_eq!((result.width, result.height), (400, 300));
        assert!(result.is_reduced());
    }

    #[test]
    fn test_compress_resizes_to_bounds() {
        let jpeg = encode_noise_jpeg(300, 100, 95);
        let source = SourceImage::load(jpeg, "image/jpeg").unwrap();

        let options = CompressOptions {
            max_width: 150,
            max_height: 100,
            ..CompressOptions::with_quality(0.9)
        };
        let result = compress(&source, &options);

        assert_eq!((result.width, result.height), (150, 50));
        assert!(result.is_reduced());
    }

    #[test]
    fn test_zero_bounds_still_compress() {
        let jpeg = encode_noise_jpeg(60, 40, 100);
        let source = SourceImage::load(jpeg, "image/jpeg").unwrap();

        let options = CompressOptions {
            max_width: 0,
            max_height: 0,
            ..CompressOptions::default()
        };
        let result = compress(&source, &options);

        assert_eq!(result.stage, Stage::Initial);
        assert_eq!((result.width, result.height), (1, 1));
        assert!(result.is_reduced());
    }

    #[test]
    fn test_opaque_png_becomes_jpeg() {
        let png = encode_test_png(&smooth_rgba(128, 128), 128, 128);
        let source = SourceImage::load(png, "image/png").unwrap();

        let result = compress(&source, &CompressOptions::with_quality(0.95));

        assert_eq!(result.mime, ImageMime::Jpeg);
        assert_eq!(result.stage, Stage::Initial);
        assert_eq!(result.quality, Some(0.9));
    }

    #[test]
    fn test_unshrinkable_jpeg_returns_original() {
        // A 1x1 grayscale JPEG is smaller than any three-component re-encode
        let source = SourceImage::load(MINIMAL_JPEG.to_vec(), "image/jpeg").unwrap();

        let result = compress(&source, &CompressOptions::with_quality(1.0));

        assert_eq!(result.stage, Stage::Original);
        assert_eq!(result.mime, ImageMime::Jpeg);
        assert_eq!(result.bytes, MINIMAL_JPEG);
    }

    #[test]
    fn test_unshrinkable_jpeg_keeps_nonstandard_mime() {
        let result = compress_bytes(
            MINIMAL_JPEG.to_vec(),
            "image/jpg",
            &CompressOptions::with_quality(1.0),
        )
        .unwrap();

        assert_eq!(result.stage, Stage::Original);
        assert_eq!(result.mime_type, "image/jpg");
        assert_eq!(result.bytes, MINIMAL_JPEG);
    }

    #[test]
    fn test_undecodable_body_returns_original() {
        // Header intact, image data cut short
        let png = encode_test_png(&noise_rgba(32, 32, 7), 32, 32);
        let truncated = png[..png.len() / 2].to_vec();
        let source = SourceImage::load(truncated.clone(), "image/png").unwrap();

        let result = compress(&source, &CompressOptions::default());

        assert_eq!(result.stage, Stage::Original);
        assert_eq!(result.bytes, truncated);
    }

    #[test]
    fn test_compress_bytes_rejects_unsupported() {
        let result = compress_bytes(vec![1u8, 2, 3], "image/gif", &CompressOptions::default());
        assert!(matches!(result, Err(InputError::UnsupportedMime(_))));
    }
}
