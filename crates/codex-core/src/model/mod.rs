//! Domain types for recorded execution steps.

pub mod snapshot;
pub mod step;

pub use snapshot::{is_reserved, Diff, Snapshot, DEFAULT_RESERVED_PREFIX, RETURN_KEY};
pub use step::{CompactedStep, RawStep, StepKind, Trace};
