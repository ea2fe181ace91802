//! Codex Core - execution trace compaction
//!
//! This crate turns a stream of per-step execution events from a traced
//! script into a short, readable trace, including:
//! - Snapshot and diff models with display-safe value strings
//! - The snapshot differ (new or changed locals per step)
//! - The event compactor (diff placement, redundant-line pruning, return values)
//! - Recording sessions wired through injectable event and source ports
//! - Plain-text and HTML rendering
//!
//! Reading event logs from disk and the command-line front end live in
//! `codex-capture` and `codex-cli`.

pub mod canonical;
pub mod compact;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod recorder;
pub mod render;
pub mod source;

// The logging macros reach schema constants through this path.
pub use codex_core_types;

// Re-export commonly used types
pub use compact::{EventCompactor, Placement};
pub use config::{CodexConfig, RenderConfig, TraceConfig};
pub use diff::{compute_diff, SnapshotDiffer};
pub use errors::{CodexError, ExError, ExErrorKind, Result};
pub use model::{CompactedStep, Diff, RawStep, Snapshot, StepKind, Trace};
pub use recorder::{record_session, Recorder};
pub use render::{render, RenderFormat};
pub use source::{EventSource, FrameEvent, SourceProvider};
