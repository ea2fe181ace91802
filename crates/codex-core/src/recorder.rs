//! Recording sessions.
//!
//! A [`Recorder`] is the stateful object a runtime hook hands every frame
//! event to. It keeps only events from the traced file, looks up their
//! source text, diffs their locals against the previous step and feeds the
//! result to the compactor. [`record_session`] drives a recorder over a
//! whole [`EventSource`].

use crate::canonical;
use crate::compact::{EventCompactor, Placement};
use crate::config::TraceConfig;
use crate::diff::SnapshotDiffer;
use crate::errors::{ExError, Result};
use crate::model::{CompactedStep, RawStep, Snapshot, Trace};
use crate::source::{EventSource, FrameEvent, SourceProvider};
use crate::{log_op_end, log_op_error, log_op_start};
use codex_core_types::SessionId;

/// One recording session over one traced file.
#[derive(Debug)]
pub struct Recorder {
    session_id: SessionId,
    config: TraceConfig,
    differ: SnapshotDiffer,
    compactor: EventCompactor,
    events_seen: usize,
}

impl Recorder {
    pub fn new(config: TraceConfig) -> Self {
        Self {
            session_id: SessionId::new(),
            differ: SnapshotDiffer::new(config.reserved_prefix.clone()),
            compactor: EventCompactor::new(),
            events_seen: 0,
            config,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Number of events accepted so far
    pub fn events_seen(&self) -> usize {
        self.events_seen
    }

    /// Whether events from `file` belong to the traced script.
    pub fn accepts(&self, file: &str) -> bool {
        self.config.target_file.is_empty() || file.contains(&self.config.target_file)
    }

    /// Handle the next frame event.
    ///
    /// Returns `None` for an event from another file, otherwise the placement
    /// the compactor applied.
    ///
    /// # Errors
    ///
    /// * `SourceUnavailable` / `LineOutOfRange` - the event's line cannot be
    ///   resolved to source text
    /// * `MissingPayload` - a return event carries no value
    pub fn handle(
        &mut self,
        event: FrameEvent,
        source: &mut dyn SourceProvider,
    ) -> Result<Option<Placement>> {
        if !self.accepts(&event.file) {
            tracing::trace!(file = %event.file, line = event.line_number, "skipping event from other file");
            return Ok(None);
        }
        self.events_seen += 1;

        let source_text = source.source_line(&event.file, event.line_number)?;
        let snapshot = Snapshot::from_locals(&event.locals, &self.config.reserved_prefix);
        let payload = event.arg.as_ref().map(canonical::stringify);
        let raw = RawStep::new(
            event.kind,
            event.line_number,
            source_text,
            snapshot,
            payload,
        )?;

        Ok(Some(self.record_raw(raw)))
    }

    /// Diff a raw step against the previous one and compact it.
    ///
    /// # Panics
    ///
    /// Panics if `raw` breaks the compactor's input contract (see
    /// [`EventCompactor::record`]).
    pub fn record_raw(&mut self, raw: RawStep) -> Placement {
        let diff = self.differ.diff(raw.snapshot);
        let step = CompactedStep::new(
            raw.kind,
            raw.line_number,
            raw.source_text,
            diff,
            raw.payload,
        );
        self.compactor.record(step)
    }

    /// The trace as compacted so far.
    pub fn trace(&self) -> &Trace {
        self.compactor.result()
    }

    pub fn finish(self) -> Trace {
        self.compactor.into_trace()
    }
}

/// Record every event of `events` and return the compacted trace.
///
/// # Errors
///
/// Stops at the first event that cannot be read or recorded and returns its
/// error tagged with the session id. The steps recorded before it are
/// discarded; their count is logged with the `end_error` event.
pub fn record_session(
    config: TraceConfig,
    events: &mut dyn EventSource,
    source: &mut dyn SourceProvider,
) -> std::result::Result<Trace, ExError> {
    let mut recorder = Recorder::new(config);
    let session_id = recorder.session_id().clone();

    log_op_start!(
        "record_session",
        session_id = session_id.as_str(),
        target_file = recorder.config.target_file.as_str()
    );
    let start = std::time::Instant::now();

    if let Err(e) = drain(&mut recorder, events, source) {
        let err = ExError::from(e).with_session_id(session_id.clone());
        log_op_error!(
            "record_session",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            session_id = session_id.as_str(),
            events_seen = recorder.events_seen() as u64,
            steps_lost = recorder.trace().len() as u64
        );
        return Err(err);
    }

    let events_seen = recorder.events_seen();
    let trace = recorder.finish();

    log_op_end!(
        "record_session",
        duration_ms = start.elapsed().as_millis() as u64,
        session_id = session_id.as_str(),
        events_seen = events_seen as u64,
        trace_len = trace.len() as u64
    );

    Ok(trace)
}

fn drain(
    recorder: &mut Recorder,
    events: &mut dyn EventSource,
    source: &mut dyn SourceProvider,
) -> Result<()> {
    while let Some(event) = events.next_event()? {
        recorder.handle(event, source)?;
    }
    Ok(())
}
