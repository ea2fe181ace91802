use crate::config::RenderConfig;
use crate::model::{CompactedStep, Trace};

/// Render a trace as fixed-width plain text, one line per step.
///
/// Columns: event label (right-aligned), line number, source text, then the
/// step's diff as `name: value` pairs. Source text is padded to the
/// configured width but never cut. Each line has its trailing whitespace
/// removed, and lines are separated by `\n` with no final newline.
///
/// # Example
///
/// ```
/// use codex_core::config::RenderConfig;
/// use codex_core::model::{CompactedStep, Diff, StepKind, Trace};
/// use codex_core::compact::EventCompactor;
/// use codex_core::render::render_text;
///
/// let mut compactor = EventCompactor::new();
/// let diff: Diff = [("x", "1")].into_iter().collect();
/// compactor.record(CompactedStep::new(StepKind::Line, 1, "x = 1", diff, None));
///
/// let text = render_text(compactor.result(), &RenderConfig::default());
/// assert!(text.starts_with("  line 1    x = 1"));
/// assert!(text.ends_with("x: 1"));
/// ```
pub fn render_text(trace: &Trace, config: &RenderConfig) -> String {
    trace
        .iter()
        .map(|step| render_step(step, config))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_step(step: &CompactedStep, config: &RenderConfig) -> String {
    let changes = step
        .diff()
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(", ");

    let line = format!(
        "{:>kind_width$} {:<line_width$} {:<source_width$} {}",
        step.kind().label(),
        step.line_number(),
        step.source_text().trim_end(),
        changes,
        kind_width = config.kind_width,
        line_width = config.line_width,
        source_width = config.source_width,
    );
    line.trim_end().to_string()
}
