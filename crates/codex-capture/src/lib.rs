//! Codex Capture - file-backed adapters for recording sessions
//!
//! Provides:
//! - A JSON Lines event log reader implementing `EventSource`
//! - A caching filesystem `SourceProvider`
//! - Writing rendered output and opening it in a browser

pub mod errors;
pub mod event_log;
pub mod output;
pub mod source_cache;

// Re-export key types
pub use errors::Result;
pub use event_log::JsonLinesEventSource;
pub use source_cache::FsSourceCache;
