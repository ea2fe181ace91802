use crate::errors::{CodexError, Result};
use crate::model::snapshot::{Diff, Snapshot};
use serde::{Deserialize, Serialize};

/// Kind of execution event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// A function frame was entered
    Call,
    /// A source line is about to execute
    Line,
    /// A function frame is about to return
    Return,
}

impl StepKind {
    /// Label used in rendered traces
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Call => "call",
            StepKind::Line => "line",
            StepKind::Return => "return",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One raw event as delivered by the event source, with its full snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStep {
    pub kind: StepKind,
    pub line_number: u32,
    pub source_text: String,
    pub snapshot: Snapshot,
    /// Call arguments for `Call`, returned value for `Return`
    pub payload: Option<String>,
}

impl RawStep {
    /// Create a raw step, rejecting a `Return` that carries no value.
    ///
    /// # Errors
    ///
    /// * `MissingPayload` - `kind` is `Return` and `payload` is `None`
    pub fn new(
        kind: StepKind,
        line_number: u32,
        source_text: impl Into<String>,
        snapshot: Snapshot,
        payload: Option<String>,
    ) -> Result<Self> {
        if kind == StepKind::Return && payload.is_none() {
            return Err(CodexError::MissingPayload { line: line_number });
        }
        Ok(Self {
            kind,
            line_number,
            source_text: source_text.into(),
            snapshot,
            payload,
        })
    }
}

/// The unit of compacted output.
///
/// Only the diff changes after creation, and only inside the compactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactedStep {
    kind: StepKind,
    line_number: u32,
    source_text: String,
    diff: Diff,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
}

impl CompactedStep {
    pub fn new(
        kind: StepKind,
        line_number: u32,
        source_text: impl Into<String>,
        diff: Diff,
        payload: Option<String>,
    ) -> Self {
        Self {
            kind,
            line_number,
            source_text: source_text.into(),
            diff,
            payload,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn diff(&self) -> &Diff {
        &self.diff
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub(crate) fn diff_mut(&mut self) -> &mut Diff {
        &mut self.diff
    }

    pub(crate) fn into_diff(self) -> Diff {
        self.diff
    }
}

/// Ordered sequence of compacted steps.
///
/// Grows only at the tail; pruning removes the tail element, so survivors
/// keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<CompactedStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[CompactedStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompactedStep> {
        self.steps.iter()
    }

    pub fn last(&self) -> Option<&CompactedStep> {
        self.steps.last()
    }

    pub fn into_steps(self) -> Vec<CompactedStep> {
        self.steps
    }

    pub(crate) fn push(&mut self, step: CompactedStep) {
        self.steps.push(step);
    }

    pub(crate) fn pop(&mut self) -> Option<CompactedStep> {
        self.steps.pop()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut CompactedStep> {
        self.steps.last_mut()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a CompactedStep;
    type IntoIter = std::slice::Iter<'a, CompactedStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_without_payload_is_rejected() {
        let err = RawStep::new(StepKind::Return, 7, "return x", Snapshot::new(), None)
            .unwrap_err();
        assert_eq!(err, CodexError::MissingPayload { line: 7 });
    }

    #[test]
    fn test_line_without_payload_is_accepted() {
        let step = RawStep::new(StepKind::Line, 2, "y = x", Snapshot::new(), None).unwrap();
        assert_eq!(step.kind, StepKind::Line);
        assert!(step.payload.is_none());
    }

    #[test]
    fn test_step_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StepKind::Return).unwrap(),
            r#""return""#
        );
        assert_eq!(StepKind::Call.to_string(), "call");
    }

    #[test]
    fn test_compacted_step_json_omits_absent_payload() {
        let step = CompactedStep::new(StepKind::Line, 1, "x = 1", Diff::new(), None);
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["line_number"], 1);
        assert!(json.get("payload").is_none());
    }
}
