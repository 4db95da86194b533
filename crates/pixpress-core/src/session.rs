//! Sequence-stamped compression sessions.
//!
//! A session remembers the most recently selected file (last write wins)
//! and stamps every request with a monotonically increasing sequence
//! number. When a caller runs requests asynchronously, results can resolve
//! out of order; [`CompressionSession::accept`] drops any result whose
//! stamp is no longer the latest.

use tracing::debug;

use crate::adaptive::EncodedResult;
use crate::compress::compress;
use crate::options::CompressOptions;
use crate::source::{FileCheck, InputError, SourceImage};

/// A value tagged with the sequence number of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<T> {
    pub sequence: u64,
    pub value: T,
}

/// One pipeline invocation: a snapshot of the source and settings.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    sequence: u64,
    source: SourceImage,
    options: CompressOptions,
}

impl CompressionRequest {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    /// Run the full pipeline for this request.
    pub fn run(&self) -> Stamped<EncodedResult> {
        Stamped {
            sequence: self.sequence,
            value: compress(&self.source, &self.options),
        }
    }
}

/// Holds the current file and hands out stamped requests.
#[derive(Debug, Clone, Default)]
pub struct CompressionSession {
    current: Option<SourceImage>,
    latest_sequence: u64,
    options: CompressOptions,
}

impl CompressionSession {
    pub fn new(options: CompressOptions) -> Self {
        Self {
            current: None,
            latest_sequence: 0,
            options,
        }
    }

    /// Replace the current file. Invalidates every outstanding request.
    pub fn select(&mut self, source: SourceImage) {
        debug!(
            name = source.name().unwrap_or("<unnamed>"),
            bytes = source.byte_length(),
            "file selected"
        );
        self.current = Some(source);
        self.bump();
    }

    /// Validate, load and select a file in one step.
    ///
    /// The returned check carries the small-file advisory. On error the
    /// previous selection is kept.
    pub fn select_file(
        &mut self,
        bytes: Vec<u8>,
        mime: &str,
        name: &str,
    ) -> Result<FileCheck, InputError> {
        let source = SourceImage::load(bytes, mime)?.with_name(name);
        let check = FileCheck {
            mime: source.mime(),
            small_file: source.is_small(),
        };
        self.select(source);
        Ok(check)
    }

    pub fn current(&self) -> Option<&SourceImage> {
        self.current.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.current.is_some()
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    /// Start a request for the current file at the given quality.
    ///
    /// Returns `None` when no file is selected.
    pub fn begin(&mut self, quality: f32) -> Option<CompressionRequest> {
        let source = self.current.clone()?;
        let options = CompressOptions {
            quality,
            ..self.options
        };
        let sequence = self.bump();

        Some(CompressionRequest {
            sequence,
            source,
            options,
        })
    }

    /// Begin and run a request synchronously.
    pub fn compress(&mut self, quality: f32) -> Option<Stamped<EncodedResult>> {
        self.begin(quality).map(|request| request.run())
    }

    /// Sequence number of the most recent request or selection.
    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    pub fn is_current(&self, sequence: u64) -> bool {
        sequence == self.latest_sequence
    }

    /// Unwrap a result if it belongs to the latest request, else discard it.
    pub fn accept<T>(&self, stamped: Stamped<T>) -> Option<T> {
        if self.is_current(stamped.sequence) {
            Some(stamped.value)
        } else {
            debug!(
                sequence = stamped.sequence,
                latest = self.latest_sequence,
                "discarding stale result"
            );
            None
        }
    }

    fn bump(&mut self) -> u64 {
        self.latest_sequence += 1;
        self.latest_sequence
    }
}
