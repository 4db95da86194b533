//! Stateful compressor binding.
//!
//! `JsCompressor` keeps the selected file in WASM memory so the page only
//! copies it across the boundary once. Every `compress` call is stamped with
//! a sequence number; when results are delivered asynchronously (for
//! example from a Web Worker), check `is_current(result.sequence)` before
//! showing one, and drop it otherwise.
//!
//! # Example
//!
//! ```typescript
//! const compressor = new JsCompressor();
//! const check = compressor.select_file(bytes, file.type, file.name);
//!
//! slider.oninput = () => {
//!   const result = compressor.compress(slider.value / 100);
//!   if (result && compressor.is_current(result.sequence)) render(result);
//! };
//! ```

use crate::compress::to_js_error;
use crate::console_log;
use crate::types::{JsCompressedImage, JsFileCheck};
use pixpress_core::{CompressOptions, CompressionSession, FileCheck, InputError};
use wasm_bindgen::prelude::*;

/// Holds the current file and stamps compression requests.
#[wasm_bindgen]
pub struct JsCompressor {
    inner: CompressionSession,
}

#[wasm_bindgen]
impl JsCompressor {
    /// Create a compressor with default options.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCompressor {
        JsCompressor {
            inner: CompressionSession::default(),
        }
    }

    /// Create a compressor with custom bounds or filter.
    ///
    /// The `quality` field of `options` is ignored; each `compress` call
    /// supplies its own.
    ///
    /// # Errors
    /// Returns error if options cannot be deserialized
    pub fn with_options(options: JsValue) -> Result<JsCompressor, JsValue> {
        let options: CompressOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid compress options: {}", e)))?;

        Ok(JsCompressor {
            inner: CompressionSession::new(options),
        })
    }

    /// Select a new file, replacing the previous one.
    ///
    /// Any result from an earlier `compress` call stops being current.
    ///
    /// # Errors
    /// Returns error if the mime type is unsupported, the buffer is empty,
    /// or the image header cannot be read. The previous file stays selected.
    pub fn select_file(&mut self, bytes: Vec<u8>, mime: &str, name: &str) -> Result<JsFileCheck, JsValue> {
        self.select(bytes, mime, name)
            .map(JsFileCheck::from)
            .map_err(to_js_error)
    }

    /// Compress the selected file at the given quality.
    ///
    /// Returns `undefined` when no file has been selected.
    pub fn compress(&mut self, quality: f32) -> Option<JsCompressedImage> {
        let stamped = self.inner.compress(quality)?;
        let download_name = self.inner.current().and_then(|s| s.download_name());

        console_log!(
            "[pixpress] #{} {} -> {} bytes ({})",
            stamped.sequence,
            stamped.value.original_length,
            stamped.value.byte_length(),
            stamped.value.stage.as_str()
        );

        Some(JsCompressedImage::from_result(
            stamped.value,
            stamped.sequence,
            download_name,
        ))
    }

    /// True if `sequence` belongs to the most recent request.
    pub fn is_current(&self, sequence: f64) -> bool {
        sequence >= 0.0 && sequence.fract() == 0.0 && self.inner.is_current(sequence as u64)
    }

    #[wasm_bindgen(getter)]
    pub fn has_file(&self) -> bool {
        self.inner.has_file()
    }

    /// Sequence number of the most recent request or selection.
    #[wasm_bindgen(getter)]
    pub fn latest_sequence(&self) -> f64 {
        self.inner.latest_sequence() as f64
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCompressor {
    fn select(&mut self, bytes: Vec<u8>, mime: &str, name: &str) -> Result<FileCheck, InputError> {
        let check = self.inner.select_file(bytes, mime, name)?;
        console_log!("[pixpress] selected {} ({})", name, check.mime);
        Ok(check)
    }
}

impl Default for JsCompressor {
    fn default() -> Self {
        Self::new()
    }
}
