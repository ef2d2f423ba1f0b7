use std::path::PathBuf;

use thiserror::Error;

/// Errors from the audio decoding boundary.
///
/// These never escape the analyzer's public entry points; `analyze_path`
/// converts a decode failure into the documented fallback report. They are
/// exposed for callers that decode audio themselves via [`crate::audio`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to read samples: {0}")]
    Read(#[from] hound::Error),

    #[error("unsupported sample format: {bits}-bit {format}")]
    UnsupportedFormat { bits: u16, format: &'static str },
}
