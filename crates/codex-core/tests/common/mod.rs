use codex_core::model::{CompactedStep, Diff, RawStep, Snapshot, StepKind};

/// Two-line script used by the end-to-end scenarios
#[allow(dead_code)]
pub const INCREMENT_SCRIPT: &str = "x = 1\nx = x + 1\n";

/// Build a snapshot from `(name, display)` pairs
#[allow(dead_code)]
pub fn snap(pairs: &[(&str, &str)]) -> Snapshot {
    pairs.iter().copied().collect()
}

/// Build a diff from `(name, value)` pairs
#[allow(dead_code)]
pub fn diff(pairs: &[(&str, &str)]) -> Diff {
    pairs.iter().copied().collect()
}

/// Raw step whose source text is looked up in `script`
#[allow(dead_code)]
pub fn raw(
    script: &str,
    kind: StepKind,
    line_number: u32,
    locals: &[(&str, &str)],
    payload: Option<&str>,
) -> RawStep {
    let text = script
        .lines()
        .nth(line_number as usize - 1)
        .unwrap_or_default();
    RawStep::new(
        kind,
        line_number,
        text,
        snap(locals),
        payload.map(str::to_string),
    )
    .unwrap()
}

/// `Line` step with a ready-made diff
#[allow(dead_code)]
pub fn line(line_number: u32, text: &str, changes: &[(&str, &str)]) -> CompactedStep {
    CompactedStep::new(StepKind::Line, line_number, text, diff(changes), None)
}

/// Collect a diff into owned pairs for comparison
#[allow(dead_code)]
pub fn entries(diff: &Diff) -> Vec<(String, String)> {
    diff.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Owned pairs from literals
#[allow(dead_code)]
pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
