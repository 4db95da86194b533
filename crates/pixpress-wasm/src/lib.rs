//! Pixpress WASM - WebAssembly bindings for Pixpress
//!
//! This crate exposes the pixpress-core recompression pipeline to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `compress` - One-shot bindings (`check_file`, `compress_image`)
//! - `session` - `JsCompressor`, a stateful compressor with stale-result detection
//! - `types` - WASM-compatible wrapper types for results
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@pixpress/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.type, 0.8);
//! console.log(`${result.original_length} -> ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

/// Log to the browser console. Does nothing off wasm32.
macro_rules! console_log {
    ($($arg:tt)*) => {
        if cfg!(target_arch = "wasm32") {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
    };
}
pub(crate) use console_log;

mod compress;
mod session;
mod types;

// Re-export public types
pub use compress::{check_file, compress_image, compress_image_with_options};
pub use session::JsCompressor;
pub use types::{JsCompressedImage, JsFileCheck};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    install_tracing();
    console_log!("[pixpress] wasm {} ready", version());
}

/// Route the core's `tracing` events (dimensions, plan, each attempt,
/// decode and encode failures) to the browser console.
fn install_tracing() {
    if cfg!(target_arch = "wasm32") && tracing_wasm::try_set_as_global_default().is_err() {
        console_log!("[pixpress] tracing subscriber already installed");
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
