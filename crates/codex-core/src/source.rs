//! Ports between the recorder and the outside world.
//!
//! An [`EventSource`] delivers raw frame events from whatever runtime hook
//! observed the traced program. A [`SourceProvider`] resolves a line number
//! to the text of that line. Both are injected into the recorder; the
//! in-memory implementations here back tests and embedding callers.

use crate::errors::{CodexError, Result};
use crate::model::StepKind;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};

/// One event as observed in the traced program.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvent {
    pub kind: StepKind,
    /// Path of the file the frame is executing
    pub file: String,
    /// 1-based
    pub line_number: u32,
    /// All local bindings of the frame, in definition order
    pub locals: IndexMap<String, Value>,
    /// Call arguments or returned value
    pub arg: Option<Value>,
}

impl FrameEvent {
    pub fn new(kind: StepKind, file: impl Into<String>, line_number: u32) -> Self {
        Self {
            kind,
            file: file.into(),
            line_number,
            locals: IndexMap::new(),
            arg: None,
        }
    }

    pub fn with_local(mut self, name: impl Into<String>, value: Value) -> Self {
        self.locals.insert(name.into(), value);
        self
    }

    pub fn with_arg(mut self, arg: Value) -> Self {
        self.arg = Some(arg);
        self
    }
}

/// Supplies frame events in execution order.
pub trait EventSource {
    /// Next event, or `None` once the traced program has finished.
    ///
    /// # Errors
    ///
    /// Implementations return `InvalidEvent` for a record they cannot
    /// interpret.
    fn next_event(&mut self) -> Result<Option<FrameEvent>>;
}

/// Resolves source text for a line of a traced file.
pub trait SourceProvider {
    /// Text of line `line_number` (1-based) of `file`, without its newline.
    ///
    /// # Errors
    ///
    /// * `SourceUnavailable` - the file cannot be read
    /// * `LineOutOfRange` - the file has fewer lines
    fn source_line(&mut self, file: &str, line_number: u32) -> Result<String>;
}

/// Look up a 1-based line in an already split file.
///
/// # Errors
///
/// Returns `LineOutOfRange` for line 0 or a line past the end.
pub fn line_at(file: &str, lines: &[String], line_number: u32) -> Result<String> {
    let index = (line_number as usize).checked_sub(1);
    index
        .and_then(|i| lines.get(i))
        .cloned()
        .ok_or_else(|| CodexError::LineOutOfRange {
            file: file.to_string(),
            line: line_number,
            available: lines.len(),
        })
}

/// Event source over a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct VecEventSource {
    events: VecDeque<FrameEvent>,
}

impl VecEventSource {
    pub fn new(events: impl IntoIterator<Item = FrameEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventSource for VecEventSource {
    fn next_event(&mut self) -> Result<Option<FrameEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Source provider over files held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    files: HashMap<String, Vec<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, text: &str) -> Self {
        self.files
            .insert(name.into(), text.lines().map(str::to_string).collect());
        self
    }
}

impl SourceProvider for InMemorySource {
    fn source_line(&mut self, file: &str, line_number: u32) -> Result<String> {
        let lines = self
            .files
            .get(file)
            .ok_or_else(|| CodexError::SourceUnavailable {
                file: file.to_string(),
                reason: "file not loaded".to_string(),
            })?;
        line_at(file, lines, line_number)
    }
}
