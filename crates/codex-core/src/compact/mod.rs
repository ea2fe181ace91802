//! Event compaction.
//!
//! Turns the per-step stream of diffs into a short trace in a single
//! forward pass. See [`EventCompactor::record`] for the placement rules.

pub mod compactor;

pub use compactor::{EventCompactor, Placement};
