//! Snapshot diff computation.

use crate::model::{is_reserved, Diff, Snapshot, DEFAULT_RESERVED_PREFIX};

/// Compute the bindings of `current` that are new or changed since `previous`.
///
/// Comparison is by canonical display string. Output order follows
/// `current`.
pub fn compute_diff(previous: &Snapshot, current: &Snapshot, reserved_prefix: &str) -> Diff {
    current
        .iter()
        .filter(|(name, _)| !is_reserved(name, reserved_prefix))
        .filter(|(name, value)| previous.get(name) != Some(*value))
        .collect()
}

/// Differ for one recording session.
///
/// Holds the snapshot of the previous step so that callers only supply the
/// current one.
#[derive(Debug, Clone)]
pub struct SnapshotDiffer {
    last: Snapshot,
    reserved_prefix: String,
}

impl SnapshotDiffer {
    pub fn new(reserved_prefix: impl Into<String>) -> Self {
        Self {
            last: Snapshot::new(),
            reserved_prefix: reserved_prefix.into(),
        }
    }

    /// Diff `current` against the held snapshot, then hold `current`.
    pub fn diff(&mut self, current: Snapshot) -> Diff {
        let diff = compute_diff(&self.last, &current, &self.reserved_prefix);
        self.last = current;
        diff
    }

    /// Snapshot of the most recent step
    pub fn last_snapshot(&self) -> &Snapshot {
        &self.last
    }
}

impl Default for SnapshotDiffer {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_PREFIX)
    }
}
