//! Input validation and the immutable source image.
//!
//! Everything that reaches the recompressor passes through here first:
//! the declared mime type is checked against the supported set, empty
//! buffers are refused, and the displayed dimensions are read once.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{read_dimensions, DecodeError};

/// Files below this size get a "probably won't shrink much" advisory.
pub const SMALL_FILE_THRESHOLD: usize = 50 * 1024;

/// Prefix prepended to the original file name for downloads.
pub const DOWNLOAD_PREFIX: &str = "compressed_";

/// Errors raised before an input reaches the recompressor.
#[derive(Debug, Error)]
pub enum InputError {
    /// The declared mime type is not a supported image type.
    #[error("Unsupported file type '{0}': please choose a JPEG or PNG image")]
    UnsupportedMime(String),

    /// The file has no bytes.
    #[error("The file is empty")]
    Empty,

    /// The bytes could not be read as an image.
    #[error("Could not read image: {0}")]
    Unreadable(#[from] DecodeError),
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    /// Canonical mime string.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMime {
    type Err = InputError;

    /// Accepts `image/jpeg`, the non-standard `image/jpg`, and `image/png`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(ImageMime::Jpeg),
            "image/png" => Ok(ImageMime::Png),
            _ => Err(InputError::UnsupportedMime(s.to_string())),
        }
    }
}

/// Result of a pre-flight check on a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCheck {
    /// Parsed mime type.
    pub mime: ImageMime,
    /// True when the file is under [`SMALL_FILE_THRESHOLD`]. Advisory only.
    pub small_file: bool,
}

/// Validate a declared mime type and size before loading a file.
///
/// Rejections are user-facing; the small-file flag is a non-blocking advisory
/// and proceeding is the caller's choice.
pub fn check_file(mime: &str, byte_length: usize) -> Result<FileCheck, InputError> {
    let mime = mime.parse::<ImageMime>()?;
    if byte_length == 0 {
        return Err(InputError::Empty);
    }
    Ok(FileCheck {
        mime,
        small_file: byte_length < SMALL_FILE_THRESHOLD,
    })
}

/// Download name for a compressed file: `compressed_<original-name>`.
pub fn download_name(original_name: &str) -> String {
    format!("{DOWNLOAD_PREFIX}{original_name}")
}

/// The image as the user supplied it. Immutable once loaded.
///
/// Bytes are reference counted so a session can hand the same source to
/// several pipeline runs without copying.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Arc<[u8]>,
    mime: ImageMime,
    declared_mime: String,
    width: u32,
    height: u32,
    name: Option<String>,
}

impl SourceImage {
    /// Validate and load an image from its bytes and declared mime type.
    ///
    /// Reads the displayed dimensions from the header without decoding pixels.
    ///
    /// # Errors
    ///
    /// * `InputError::UnsupportedMime` for anything but JPEG/PNG
    /// * `InputError::Empty` for a zero-length buffer
    /// * `InputError::Unreadable` if the header cannot be parsed
    pub fn load(bytes: impl Into<Arc<[u8]>>, mime: &str) -> Result<Self, InputError> {
        let bytes = bytes.into();
        let check = check_file(mime, bytes.len())?;
        let (width, height) = read_dimensions(&bytes)?;

        Ok(Self {
            bytes,
            mime: check.mime,
            declared_mime: mime.to_string(),
            width,
            height,
            name: None,
        })
    }

    /// Attach the original file name, used for the download name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    /// The mime string exactly as the caller declared it (`image/jpg` stays `image/jpg`).
    pub fn declared_mime(&self) -> &str {
        &self.declared_mime
    }

    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Displayed width in pixels (EXIF orientation applied).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Displayed height in pixels (EXIF orientation applied).
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Download name derived from the original name, if one was given.
    pub fn download_name(&self) -> Option<String> {
        self.name.as_deref().map(download_name)
    }

    pub fn is_small(&self) -> bool {
        self.byte_length() < SMALL_FILE_THRESHOLD
    }
}
