use codex_core_types::SessionId;
use thiserror::Error;

/// Result type alias using CodexError
pub type Result<T> = std::result::Result<T, CodexError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input contract
    InvalidInput,
    InvalidEvent,
    MissingField,

    // Source text lookup
    SourceUnavailable,
    LineOutOfRange,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidEvent => "ERR_INVALID_EVENT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::SourceUnavailable => "ERR_SOURCE_UNAVAILABLE",
            ExErrorKind::LineOutOfRange => "ERR_LINE_OUT_OF_RANGE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// file/line context of the event that triggered it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    file: Option<String>,
    line: Option<u32>,
    session_id: Option<SessionId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            file: None,
            line: None,
            session_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add source file context
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Add line context (a source line, or a line of the event log)
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Add recording session context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the file context, if any
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Get the line context, if any
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Get the session context, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(file) = &self.file {
            write!(f, " (file: {})", file)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for recording and rendering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodexError {
    /// A return event arrived without its returned value
    #[error("Return event at line {line} carries no returned value")]
    MissingPayload { line: u32 },

    /// The event points past the end of the source file
    #[error("Line {line} is out of range for {file} ({available} lines)")]
    LineOutOfRange {
        file: String,
        line: u32,
        available: usize,
    },

    /// The traced source file could not be read
    #[error("Source file {file} is unavailable: {reason}")]
    SourceUnavailable { file: String, reason: String },

    /// A raw event could not be decoded
    #[error("Invalid event at record {record}: {reason}")]
    InvalidEvent { record: u32, reason: String },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<CodexError> for ExError {
    fn from(err: CodexError) -> Self {
        match err {
            CodexError::MissingPayload { line } => ExError::new(ExErrorKind::MissingField)
                .with_line(line)
                .with_op("record_step")
                .with_message("Return event carries no returned value"),

            CodexError::LineOutOfRange {
                file,
                line,
                available,
            } => ExError::new(ExErrorKind::LineOutOfRange)
                .with_file(file)
                .with_line(line)
                .with_op("source_line")
                .with_message(format!("Source has only {} lines", available)),

            CodexError::SourceUnavailable { file, reason } => {
                ExError::new(ExErrorKind::SourceUnavailable)
                    .with_file(file)
                    .with_op("source_line")
                    .with_message(reason)
            }

            CodexError::InvalidEvent { record, reason } => {
                ExError::new(ExErrorKind::InvalidEvent)
                    .with_line(record)
                    .with_op("next_event")
                    .with_message(reason)
            }

            CodexError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(reason),

            CodexError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for CodexError {
    fn from(err: serde_json::Error) -> Self {
        CodexError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidEvent,
            ExErrorKind::MissingField,
            ExErrorKind::SourceUnavailable,
            ExErrorKind::LineOutOfRange,
            ExErrorKind::InvalidConfig,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::LineOutOfRange)
            .with_op("source_line")
            .with_file("script.py")
            .with_line(12)
            .with_message("Source has only 3 lines");

        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "[ERR_LINE_OUT_OF_RANGE] in operation 'source_line': Source has only 3 lines (file: script.py) (line: 12)"
        );
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CodexError = json_err.into();
        assert!(matches!(err, CodexError::Serialization { .. }));
    }
}
