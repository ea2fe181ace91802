use crate::model::{CompactedStep, StepKind, Trace, RETURN_KEY};

/// How an incoming step was merged into the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The session's opening call at line 1; never shown
    Elided,
    /// Replaced a same-text line that carried no extra information
    Pruned,
    /// Moved its diff onto the preceding line
    Shifted,
    /// Entered or left a frame; the preceding line's diff was cleared
    Boundary,
    /// Appended unchanged
    Appended,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Elided => "elided",
            Placement::Pruned => "pruned",
            Placement::Shifted => "shifted",
            Placement::Boundary => "boundary",
            Placement::Appended => "appended",
        }
    }
}

/// Owns the trace of one recording session.
#[derive(Debug, Default)]
pub struct EventCompactor {
    trace: Trace,
    started: bool,
}

impl EventCompactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or merge `step` into the trace.
    ///
    /// Relative to the current last step:
    ///
    /// 1. If `step` is the first step of the session and is a `Call` at
    ///    line 1, it is the script's entry frame and is dropped. Later calls
    ///    into a function defined on line 1 are kept.
    /// 2. If the last step is a `Line` with the same source text and either
    ///    diff is empty, the last step is removed and `step` takes over its
    ///    diff entries (`step`'s values win).
    /// 3. Otherwise, for two `Line`s, the last step's diff is replaced by
    ///    `step`'s diff and `step` starts empty: a change is shown on the
    ///    line that caused it. If the two lines share their text, the now
    ///    empty `step` is pruned against the last step as in rule 2.
    /// 4. Otherwise, for a `Call` or `Return` after a `Line` with different
    ///    text, the last step's diff is cleared.
    /// 5. A `Return` then gains a `"return"` entry holding its value.
    ///
    /// # Panics
    ///
    /// Panics if `step` has line number 0, or is a `Return` without a
    /// payload. Both are upstream contract violations.
    pub fn record(&mut self, mut step: CompactedStep) -> Placement {
        assert!(
            step.line_number() >= 1,
            "step line numbers are 1-based, got 0 for {} step",
            step.kind()
        );
        assert!(
            step.kind() != StepKind::Return || step.payload().is_some(),
            "return step at line {} has no payload",
            step.line_number()
        );

        let first = !std::mem::replace(&mut self.started, true);
        if first && step.kind() == StepKind::Call && step.line_number() == 1 {
            tracing::trace!(placement = Placement::Elided.as_str(), line = 1);
            return Placement::Elided;
        }

        let placement = self.place(&mut step);

        if step.kind() == StepKind::Return {
            if let Some(value) = step.payload().map(str::to_owned) {
                step.diff_mut().insert(RETURN_KEY, value);
            }
        }

        tracing::trace!(
            placement = placement.as_str(),
            step_kind = step.kind().label(),
            line = step.line_number(),
            changes = step.diff().len(),
        );
        self.trace.push(step);
        placement
    }

    fn place(&mut self, step: &mut CompactedStep) -> Placement {
        let Some(last) = self.trace.last_mut() else {
            return Placement::Appended;
        };
        if last.kind() != StepKind::Line {
            return Placement::Appended;
        }

        let same_text = last.source_text() == step.source_text();
        if same_text && (last.diff().is_empty() || step.diff().is_empty()) {
            if let Some(dropped) = self.trace.pop() {
                step.diff_mut().absorb_earlier(dropped.into_diff());
            }
            return Placement::Pruned;
        }

        match step.kind() {
            StepKind::Line => {
                *last.diff_mut() = std::mem::take(step.diff_mut());
                if !same_text {
                    return Placement::Shifted;
                }
                // `step` is now an empty repeat of `last`
                if let Some(dropped) = self.trace.pop() {
                    step.diff_mut().absorb_earlier(dropped.into_diff());
                }
                Placement::Pruned
            }
            StepKind::Call | StepKind::Return if !same_text => {
                last.diff_mut().clear();
                Placement::Boundary
            }
            _ => Placement::Appended,
        }
    }

    /// The trace as compacted so far.
    pub fn result(&self) -> &Trace {
        &self.trace
    }

    pub fn into_trace(self) -> Trace {
        self.trace
    }
}
