//! One-shot compression bindings.
//!
//! These functions run the whole pipeline on a single buffer and hand back
//! the result. Use [`crate::JsCompressor`] instead when the user can change
//! the quality slider while an earlier request is still running.
//!
//! # Example
//!
//! ```typescript
//! import { check_file, compress_image } from '@pixpress/wasm';
//!
//! const check = check_file(file.type, file.size);
//! if (check.notice) showNotice(check.notice);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.type, 0.8);
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! ```

use crate::console_log;
use crate::types::{JsCompressedImage, JsFileCheck};
use pixpress_core::{source, CompressOptions, InputError};
use wasm_bindgen::prelude::*;

/// Validate a file before reading it.
///
/// # Arguments
///
/// * `mime` - Declared mime type (`image/jpeg`, `image/jpg` or `image/png`)
/// * `byte_length` - Size of the file in bytes
///
/// # Errors
///
/// Returns an error if the mime type is unsupported or the file is empty.
#[wasm_bindgen]
pub fn check_file(mime: &str, byte_length: usize) -> Result<JsFileCheck, JsValue> {
    source::check_file(mime, byte_length)
        .map(JsFileCheck::from)
        .map_err(to_js_error)
}

/// Recompress an image at the given quality.
///
/// # Arguments
///
/// * `bytes` - The encoded JPEG or PNG file as a `Uint8Array`
/// * `mime` - Declared mime type of `bytes`
/// * `quality` - Quality fraction in [0, 1]; out-of-range values are clamped
///
/// # Returns
///
/// A `JsCompressedImage`. When nothing beats the input, its `stage` is
/// `"original"` and `bytes()` returns the input unchanged.
///
/// # Errors
///
/// Returns an error if the mime type is unsupported, the buffer is empty, or
/// the image header cannot be read.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], mime: &str, quality: f32) -> Result<JsCompressedImage, JsValue> {
    run(bytes, mime, &CompressOptions::with_quality(quality)).map_err(to_js_error)
}

/// Recompress an image with explicit options.
///
/// # Arguments
///
/// * `bytes` - The encoded JPEG or PNG file as a `Uint8Array`
/// * `mime` - Declared mime type of `bytes`
/// * `options` - Object with any of `quality`, `max_width`, `max_height`,
///   `filter` (`"nearest"`, `"bilinear"`, `"catmullrom"`, `"lanczos3"`);
///   missing fields take their defaults
///
/// # Errors
///
/// Returns an error if `options` cannot be deserialized, or for the same
/// input errors as [`compress_image`].
///
/// # Example
///
/// ```typescript
/// const result = compress_image_with_options(bytes, 'image/png', {
///   quality: 0.6,
///   max_width: 1280,
///   max_height: 720,
/// });
/// ```
#[wasm_bindgen]
pub fn compress_image_with_options(
    bytes: &[u8],
    mime: &str,
    options: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let options: CompressOptions = if options.is_undefined() || options.is_null() {
        CompressOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid compress options: {}", e)))?
    };

    run(bytes, mime, &options).map_err(to_js_error)
}

fn run(bytes: &[u8], mime: &str, options: &CompressOptions) -> Result<JsCompressedImage, InputError> {
    let result = pixpress_core::compress_bytes(bytes, mime, options)?;

    console_log!(
        "[pixpress] {} -> {} bytes ({}, {})",
        result.original_length,
        result.byte_length(),
        result.mime_type,
        result.stage.as_str()
    );

    Ok(JsCompressedImage::from_result(result, 0, None))
}

pub(crate) fn to_js_error(error: InputError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixpress_core::ImageMime;

    fn noise_jpeg(width: u32, height: u32) -> Vec<u8> {
        use image::codecs::jpeg::JpegEncoder;
        use image::{ExtendedColorType, ImageEncoder};

        let mut state = 7u32;
        let rgb: Vec<u8> = (0..width * height * 3)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, 100)
            .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    #[test]
    fn test_check_file_accepts_jpeg() {
        let check = check_file("image/jpg", 10 * 1024).unwrap();
        assert_eq!(check.mime_type(), "image/jpeg");
        assert!(check.small_file());
        assert!(check.notice().is_some());
    }

    #[test]
    fn test_check_file_large_png() {
        let check = check_file("image/png", 200 * 1024).unwrap();
        assert_eq!(check.mime_type(), "image/png");
        assert!(!check.small_file());
    }

    #[test]
    fn test_run_shrinks_noise_jpeg() {
        let input = noise_jpeg(64, 64);
        let result = run(&input, "image/jpeg", &CompressOptions::with_quality(0.5)).unwrap();

        assert_eq!(result.mime_type(), ImageMime::Jpeg.as_str());
        assert_eq!(result.stage(), "initial");
        assert_eq!(result.original_length(), input.len());
        assert!(result.is_reduced());
        assert_eq!(result.sequence(), 0.0);
    }

    #[test]
    fn test_run_respects_bounds() {
        let input = noise_jpeg(80, 40);
        let options = CompressOptions {
            max_width: 40,
            max_height: 40,
            ..CompressOptions::default()
        };

        let result = run(&input, "image/jpeg", &options).unwrap();
        assert_eq!((result.width(), result.height()), (40, 20));
    }

    #[test]
    fn test_run_rejects_unsupported_mime() {
        let result = run(&[1, 2, 3], "image/gif", &CompressOptions::default());
        assert!(matches!(result, Err(InputError::UnsupportedMime(_))));
    }

    #[test]
    fn test_run_rejects_empty() {
        let result = run(&[], "image/png", &CompressOptions::default());
        assert!(matches!(result, Err(InputError::Empty)));
    }

    #[test]
    fn test_compress_image_success_path() {
        let input = noise_jpeg(32, 32);
        let result = compress_image(&input, "image/jpeg", 0.4).unwrap();
        assert!(result.byte_length() <= input.len());
    }
}
