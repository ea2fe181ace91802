//! Snapshot differ.
//!
//! Compares the locals of two consecutive steps and reports the bindings
//! that are new or changed.
//!
//! ## Entry points
//!
//! ```
//! use codex_core::diff::{compute_diff, SnapshotDiffer};
//! use codex_core::model::Snapshot;
//!
//! let before: Snapshot = [("x", "1")].into_iter().collect();
//! let after: Snapshot = [("x", "2"), ("y", "0")].into_iter().collect();
//! let diff = compute_diff(&before, &after, "__");
//! assert_eq!(diff.get("x"), Some("2"));
//!
//! let mut differ = SnapshotDiffer::default();
//! assert_eq!(differ.diff(after).len(), 2);
//! ```
//!
//! ## Guarantees
//!
//! - **No information loss**: every binding whose canonical string differs
//!   from the previous snapshot appears with its newer value.
//! - **Only new or changed**: names that went out of scope are not reported.
//! - **Reserved names**: names under the reserved prefix never appear.
//! - **Adjacent only**: comparison is against the immediately preceding
//!   snapshot, never an older one.

pub mod engine;

pub use engine::{compute_diff, SnapshotDiffer};
