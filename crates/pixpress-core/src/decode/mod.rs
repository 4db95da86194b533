//! Decoding and resampling for Pixpress.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG bytes into an RGBA surface (EXIF orientation applied)
//! - Reading displayed dimensions without a full decode
//! - Bounding output size to the 1920x1080 box
//! - Resampling a surface with high-quality interpolation
//!
//! # Architecture
//!
//! The pipeline is designed to be called from the browser via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::{calculate_target_dimensions, decode_surface, resample, FilterType};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let surface = decode_surface(&bytes).unwrap();
//! let target = calculate_target_dimensions(surface.width, surface.height, 1920, 1080);
//! let rendered = resample(&surface, target, FilterType::Lanczos3).unwrap();
//! ```

mod decoder;
mod resize;
mod types;

pub use decoder::{decode_surface, read_dimensions};
pub use resize::{calculate_target_dimensions, resample, TargetDimensions, MAX_HEIGHT, MAX_WIDTH};
pub use types::{DecodeError, FilterType, Orientation, RenderedSurface};
