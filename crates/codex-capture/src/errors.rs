//! Error handling for codex-capture
//!
//! Wraps codex-core ExError with adapter-specific helpers

use codex_core::errors::{CodexError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an event decoding error for record `record` (1-based line of the log)
pub fn event_parse_error(record: u32, reason: impl Into<String>) -> CodexError {
    CodexError::InvalidEvent {
        record,
        reason: reason.into(),
    }
}

/// Create a source lookup error
pub fn source_error(file: &str, err: std::io::Error) -> CodexError {
    CodexError::SourceUnavailable {
        file: file.to_string(),
        reason: err.to_string(),
    }
}
