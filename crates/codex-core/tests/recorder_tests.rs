#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use codex_core::config::TraceConfig;
use codex_core::errors::{CodexError, ExErrorKind};
use codex_core::model::StepKind;
use codex_core::recorder::{record_session, Recorder};
use codex_core::source::{FrameEvent, InMemorySource, VecEventSource};
use common::{entries, pairs, INCREMENT_SCRIPT};
use serde_json::json;

const SCRIPT: &str = "/work/my_data_analysis.py";

fn increment_events() -> Vec<FrameEvent> {
    vec![
        FrameEvent::new(StepKind::Call, SCRIPT, 1),
        FrameEvent::new(StepKind::Line, SCRIPT, 1).with_local("x", json!(1)),
        FrameEvent::new(StepKind::Line, SCRIPT, 2).with_local("x", json!(1)),
        FrameEvent::new(StepKind::Line, SCRIPT, 2).with_local("x", json!(2)),
        FrameEvent::new(StepKind::Return, SCRIPT, 2)
            .with_local("x", json!(2))
            .with_arg(json!(2)),
    ]
}

fn script_source() -> InMemorySource {
    InMemorySource::new().with_file(SCRIPT, INCREMENT_SCRIPT)
}

#[test]
fn test_record_session_compacts_event_stream() {
    let mut events = VecEventSource::new(increment_events());
    let mut source = script_source();

    let trace = record_session(TraceConfig::default(), &mut events, &mut source).unwrap();

    assert_eq!(trace.len(), 2);
    assert_eq!(trace.steps()[0].source_text(), "x = 1");
    assert!(trace.steps()[0].diff().is_empty());
    assert_eq!(trace.steps()[1].kind(), StepKind::Return);
    assert_eq!(
        entries(trace.steps()[1].diff()),
        pairs(&[("x", "2"), ("return", "2")])
    );
}

#[test]
fn test_events_from_library_files_are_filtered_out() {
    let mut all = increment_events();
    all.insert(
        2,
        FrameEvent::new(StepKind::Call, "/usr/lib/python3.12/json/__init__.py", 299)
            .with_local("obj", json!("{}")),
    );
    let mut events = VecEventSource::new(all);
    let mut source = script_source();
    let config = TraceConfig {
        target_file: "my_data_analysis.py".to_string(),
        ..TraceConfig::default()
    };

    let trace = record_session(config, &mut events, &mut source).unwrap();

    assert_eq!(trace.len(), 2);
    assert!(trace.iter().all(|s| s.line_number() <= 2));
}

#[test]
fn test_reserved_locals_are_not_traced() {
    let mut recorder = Recorder::new(TraceConfig::default());
    let mut source = script_source();

    recorder
        .handle(
            FrameEvent::new(StepKind::Line, SCRIPT, 1)
                .with_local("__name__", json!("__main__"))
                .with_local("x", json!(1)),
            &mut source,
        )
        .unwrap();

    let step = &recorder.trace().steps()[0];
    assert!(!step.diff().contains("__name__"));
    assert_eq!(step.diff().get("x"), Some("1"));
}

#[test]
fn test_custom_reserved_prefix_is_honoured() {
    let config = TraceConfig {
        reserved_prefix: "_".to_string(),
        ..TraceConfig::default()
    };
    let mut recorder = Recorder::new(config);
    let mut source = script_source();

    recorder
        .handle(
            FrameEvent::new(StepKind::Line, SCRIPT, 1)
                .with_local("_cache", json!([]))
                .with_local("x", json!(1)),
            &mut source,
        )
        .unwrap();

    assert_eq!(
        entries(recorder.trace().steps()[0].diff()),
        pairs(&[("x", "1")])
    );
}

#[test]
fn test_return_without_value_is_rejected() {
    let mut events = VecEventSource::new(vec![FrameEvent::new(StepKind::Return, SCRIPT, 2)]);
    let mut source = script_source();

    let err = record_session(TraceConfig::default(), &mut events, &mut source).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MissingField);
    assert_eq!(err.line(), Some(2));
    assert!(err.session_id().is_some());
}

#[test]
fn test_line_past_end_of_file_is_rejected() {
    let mut events = VecEventSource::new(vec![FrameEvent::new(StepKind::Line, SCRIPT, 9)]);
    let mut source = script_source();

    let err = record_session(TraceConfig::default(), &mut events, &mut source).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::LineOutOfRange);
    assert_eq!(err.file(), Some(SCRIPT));
    assert_eq!(err.line(), Some(9));
    assert_eq!(err.message(), "Source has only 2 lines");
}

#[test]
fn test_line_zero_is_rejected_before_compaction() {
    let mut recorder = Recorder::new(TraceConfig::default());
    let mut source = script_source();

    let err = recorder
        .handle(FrameEvent::new(StepKind::Line, SCRIPT, 0), &mut source)
        .unwrap_err();

    assert!(matches!(err, CodexError::LineOutOfRange { line: 0, .. }));
    assert!(recorder.trace().is_empty());
}

#[test]
fn test_object_addresses_do_not_count_as_changes() {
    let mut recorder = Recorder::new(TraceConfig::default());
    let mut source = script_source();

    recorder
        .handle(
            FrameEvent::new(StepKind::Line, SCRIPT, 1)
                .with_local("p", json!("<Point object at 0x7f0000000001>")),
            &mut source,
        )
        .unwrap();
    recorder
        .handle(
            FrameEvent::new(StepKind::Line, SCRIPT, 2)
                .with_local("p", json!("<Point object at 0x7f0000000002>")),
            &mut source,
        )
        .unwrap();

    let steps = recorder.trace().steps();
    assert_eq!(steps.len(), 2);
    assert!(steps[0].diff().is_empty());
    assert!(steps[1].diff().is_empty());
}
