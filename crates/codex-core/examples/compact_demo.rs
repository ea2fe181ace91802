//! Compaction Demonstration
//!
//! Replays a hand-written event stream for a small script and prints the
//! compacted trace.
//!
//! Key concepts illustrated:
//! 1. Injecting an event source and a source provider
//! 2. Watching placement decisions as events arrive
//! 3. Rendering the finished trace

use codex_core::config::{RenderConfig, TraceConfig};
use codex_core::render::render_text;
use codex_core::source::{EventSource, FrameEvent, InMemorySource, VecEventSource};
use codex_core::{Recorder, StepKind};
use serde_json::json;

const SCRIPT: &str = "\
def total(values):
    acc = 0
    for v in values:
        acc += v
    return acc

result = total([1, 2])
print(result)
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Codex Compaction Demo ===\n");

    let file = "demo.py";
    let mut source = InMemorySource::new().with_file(file, SCRIPT);
    let mut events = VecEventSource::new(vec![
        FrameEvent::new(StepKind::Call, file, 1),
        FrameEvent::new(StepKind::Line, file, 1),
        FrameEvent::new(StepKind::Line, file, 7)
            .with_local("total", json!("<function total at 0x7f1c2a3b4c5d>")),
        FrameEvent::new(StepKind::Call, file, 1).with_local("values", json!([1, 2])),
        FrameEvent::new(StepKind::Line, file, 2).with_local("values", json!([1, 2])),
        FrameEvent::new(StepKind::Line, file, 3)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(0)),
        FrameEvent::new(StepKind::Line, file, 4)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(0))
            .with_local("v", json!(1)),
        FrameEvent::new(StepKind::Line, file, 3)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(1))
            .with_local("v", json!(1)),
        FrameEvent::new(StepKind::Line, file, 4)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(1))
            .with_local("v", json!(2)),
        FrameEvent::new(StepKind::Line, file, 3)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(3))
            .with_local("v", json!(2)),
        FrameEvent::new(StepKind::Line, file, 5)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(3))
            .with_local("v", json!(2)),
        FrameEvent::new(StepKind::Return, file, 5)
            .with_local("values", json!([1, 2]))
            .with_local("acc", json!(3))
            .with_local("v", json!(2))
            .with_arg(json!(3)),
        FrameEvent::new(StepKind::Line, file, 8)
            .with_local("total", json!("<function total at 0x7f1c2a3b4c5d>"))
            .with_local("result", json!(3)),
    ]);

    // ===== Part 1: Placement decisions =====
    println!("## Part 1: Placement decisions\n");

    let mut recorder = Recorder::new(TraceConfig::default());
    while let Some(event) = events.next_event()? {
        let line = event.line_number;
        let kind = event.kind;
        if let Some(placement) = recorder.handle(event, &mut source)? {
            println!("{:>6} {:<3} -> {}", kind.label(), line, placement.as_str());
        }
    }

    // ===== Part 2: Rendered trace =====
    println!("\n## Part 2: Rendered trace\n");

    let trace = recorder.finish();
    println!("{}", render_text(&trace, &RenderConfig::default()));

    println!("\n=== Demo Complete ===");
    Ok(())
}
