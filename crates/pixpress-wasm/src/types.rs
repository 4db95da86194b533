//! WASM-compatible wrapper types for compression results.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixpress
//! types, handling the conversion between Rust and JavaScript representations.

use pixpress_core::{EncodedResult, FileCheck};
use wasm_bindgen::prelude::*;

/// Advisory shown for files that are already small.
pub(crate) const SMALL_FILE_NOTICE: &str =
    "This image is already small; compression may not make a noticeable difference.";

/// A compressed image ready for preview and download.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// `Uint8Array`, which can be wrapped in a `Blob` for preview or download.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsCompressedImage {
    bytes: Vec<u8>,
    mime_type: String,
    original_length: usize,
    width: u32,
    height: u32,
    stage: String,
    quality: Option<f32>,
    sequence: f64,
    download_name: Option<String>,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// Encoded bytes as a Uint8Array (copied out of WASM memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Mime type of `bytes()`. When `stage` is `original` this is the type
    /// the caller declared, passed through unchanged.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Byte length of the input file.
    #[wasm_bindgen(getter)]
    pub fn original_length(&self) -> usize {
        self.original_length
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Which attempt produced the bytes: `initial`, `aggressive`,
    /// `force_jpeg`, or `original` when the input came back unchanged.
    #[wasm_bindgen(getter)]
    pub fn stage(&self) -> String {
        self.stage.clone()
    }

    /// Quality fraction of the winning attempt; undefined for `original`.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f32> {
        self.quality
    }

    /// Sequence stamp of the request; 0 for one-shot calls.
    #[wasm_bindgen(getter)]
    pub fn sequence(&self) -> f64 {
        self.sequence
    }

    /// `compressed_<original-name>`, when the file name is known.
    #[wasm_bindgen(getter)]
    pub fn download_name(&self) -> Option<String> {
        self.download_name.clone()
    }

    /// True when the output is strictly smaller than the input.
    #[wasm_bindgen(getter)]
    pub fn is_reduced(&self) -> bool {
        self.bytes.len() < self.original_length
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCompressedImage {
    pub(crate) fn from_result(
        result: EncodedResult,
        sequence: u64,
        download_name: Option<String>,
    ) -> Self {
        Self {
            mime_type: result.mime_type,
            original_length: result.original_length,
            width: result.width,
            height: result.height,
            stage: result.stage.as_str().to_string(),
            quality: result.quality,
            sequence: sequence as f64,
            download_name,
            bytes: result.bytes,
        }
    }
}

/// Outcome of a pre-flight file check.
#[wasm_bindgen]
pub struct JsFileCheck {
    mime_type: String,
    small_file: bool,
}

#[wasm_bindgen]
impl JsFileCheck {
    /// Canonical mime type of the accepted file.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// True when the file is under 50 KiB. Advisory only.
    #[wasm_bindgen(getter)]
    pub fn small_file(&self) -> bool {
        self.small_file
    }

    /// User-facing advisory text, if any.
    #[wasm_bindgen(getter)]
    pub fn notice(&self) -> Option<String> {
        self.small_file.then(|| SMALL_FILE_NOTICE.to_string())
    }
}

impl From<FileCheck> for JsFileCheck {
    fn from(check: FileCheck) -> Self {
        Self {
            mime_type: check.mime.as_str().to_string(),
            small_file: check.small_file,
        }
    }
}
