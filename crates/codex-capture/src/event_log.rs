//! JSON Lines event log reader
//!
//! A runtime hook writes one JSON object per frame event:
//!
//! ```text
//! {"event": "line", "file": "/work/script.py", "line": 3, "locals": {"x": "1"}}
//! {"event": "return", "file": "/work/script.py", "line": 4, "locals": {}, "arg": "6"}
//! ```
//!
//! Blank lines are ignored. `exception` records are skipped. A final record
//! cut off mid-object with no line terminator is a log truncated while the
//! traced program ran; reading stops there and the events before it stand.

use crate::errors::{event_parse_error, io_error, Result};
use codex_core::errors::Result as CoreResult;
use codex_core::model::StepKind;
use codex_core::source::{EventSource, FrameEvent};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Event kinds a hook may write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireEventKind {
    Call,
    Line,
    Return,
    Exception,
}

/// One record of the event log
#[derive(Debug, Clone, Deserialize)]
pub struct WireRecord {
    pub event: WireEventKind,
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub locals: IndexMap<String, Value>,
    #[serde(default)]
    pub arg: Option<Value>,
}

impl WireRecord {
    /// Convert to a frame event; `None` for record kinds that are not traced.
    fn into_frame_event(self, record: u32) -> CoreResult<Option<FrameEvent>> {
        let kind = match self.event {
            WireEventKind::Call => StepKind::Call,
            WireEventKind::Line => StepKind::Line,
            WireEventKind::Return => StepKind::Return,
            WireEventKind::Exception => return Ok(None),
        };
        if kind == StepKind::Return && self.arg.is_none() {
            return Err(event_parse_error(record, "return record has no `arg`"));
        }
        Ok(Some(FrameEvent {
            kind,
            file: self.file,
            line_number: self.line,
            locals: self.locals,
            arg: self.arg,
        }))
    }
}

/// Event source over a JSON Lines log
pub struct JsonLinesEventSource<R> {
    reader: R,
    record: u32,
    buf: String,
}

impl<R: BufRead> JsonLinesEventSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            record: 0,
            buf: String::new(),
        }
    }
}

impl JsonLinesEventSource<BufReader<File>> {
    /// Open an event log file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            io_error("open_event_log", e).with_file(path.display().to_string())
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EventSource for JsonLinesEventSource<R> {
    fn next_event(&mut self) -> CoreResult<Option<FrameEvent>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|e| event_parse_error(self.record + 1, e.to_string()))?;
            if read == 0 {
                return Ok(None);
            }
            self.record += 1;

            let terminated = self.buf.ends_with('\n');
            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let wire: WireRecord = match serde_json::from_str(text) {
                Ok(wire) => wire,
                Err(e) if e.is_eof() && !terminated => {
                    tracing::warn!(record = self.record, "event log ends in a truncated record");
                    return Ok(None);
                }
                Err(e) => return Err(event_parse_error(self.record, e.to_string())),
            };
            match wire.into_frame_event(self.record)? {
                Some(event) => return Ok(Some(event)),
                None => {
                    tracing::debug!(record = self.record, "skipping exception record");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codex_core::errors::CodexError;
    use serde_json::json;
    use std::io::Cursor;

    fn source(text: &str) -> JsonLinesEventSource<Cursor<Vec<u8>>> {
        JsonLinesEventSource::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_reads_records_in_order() {
        let mut events = source(concat!(
            r#"{"event":"call","file":"s.py","line":1}"#,
            "\n",
            r#"{"event":"line","file":"s.py","line":1,"locals":{"x":"1","n":2}}"#,
            "\n",
        ));

        let call = events.next_event().unwrap().unwrap();
        assert_eq!(call.kind, StepKind::Call);
        assert!(call.locals.is_empty());

        let line = events.next_event().unwrap().unwrap();
        assert_eq!(line.kind, StepKind::Line);
        assert_eq!(line.locals["x"], json!("1"));
        assert_eq!(line.locals["n"], json!(2));

        assert!(events.next_event().unwrap().is_none());
    }

    #[test]
    fn test_locals_keep_their_order() {
        let mut events = source(r#"{"event":"line","file":"s.py","line":1,"locals":{"z":1,"a":2,"m":3}}"#);
        let event = events.next_event().unwrap().unwrap();
        let names: Vec<&str> = event.locals.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_blank_lines_and_exceptions_are_skipped() {
        let mut events = source(concat!(
            "\n",
            r#"{"event":"exception","file":"s.py","line":2,"arg":"ZeroDivisionError"}"#,
            "\n   \n",
            r#"{"event":"return","file":"s.py","line":2,"arg":"None"}"#,
            "\n",
        ));

        let event = events.next_event().unwrap().unwrap();
        assert_eq!(event.kind, StepKind::Return);
        assert_eq!(event.arg, Some(json!("None")));
    }

    #[test]
    fn test_malformed_record_reports_its_line() {
        let mut events = source(concat!(
            r#"{"event":"line","file":"s.py","line":1}"#,
            "\n",
            "{not json\n",
        ));
        events.next_event().unwrap();

        let err = events.next_event().unwrap_err();
        assert!(matches!(err, CodexError::InvalidEvent { record: 2, .. }));
    }

    #[test]
    fn test_truncated_final_record_ends_the_log() {
        let mut events = source(concat!(
            r#"{"event":"line","file":"s.py","line":1}"#,
            "\n",
            r#"{"event":"line","file":"s.py","li"#,
        ));

        assert_eq!(events.next_event().unwrap().unwrap().line_number, 1);
        assert!(events.next_event().unwrap().is_none());
    }

    #[test]
    fn test_cut_record_followed_by_newline_is_rejected() {
        let mut events = source(concat!(r#"{"event":"line","file":"s.py","li"#, "\n"));
        assert!(matches!(
            events.next_event().unwrap_err(),
            CodexError::InvalidEvent { record: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_event_kind_is_rejected() {
        let mut events = source(r#"{"event":"jump","file":"s.py","line":1}"#);
        assert!(matches!(
            events.next_event().unwrap_err(),
            CodexError::InvalidEvent { record: 1, .. }
        ));
    }

    #[test]
    fn test_return_without_arg_is_rejected() {
        let mut events = source(r#"{"event":"return","file":"s.py","line":4,"arg":null}"#);
        let err = events.next_event().unwrap_err();
        assert_eq!(
            err,
            CodexError::InvalidEvent {
                record: 1,
                reason: "return record has no `arg`".to_string()
            }
        );
    }
}
