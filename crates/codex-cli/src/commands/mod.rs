//! Subcommands and the plumbing they share

pub mod compact;
pub mod render;

use clap::Args;
use codex_capture::{FsSourceCache, JsonLinesEventSource};
use codex_core::config::CodexConfig;
use codex_core::errors::ExError;
use codex_core::model::Trace;
use codex_core::recorder::record_session;
use std::path::{Path, PathBuf};

/// Where the events come from and which of them to keep
#[derive(Debug, Args)]
pub struct TraceArgs {
    /// Event log (JSON Lines) written by a runtime hook
    pub events: PathBuf,

    /// Read source text from this file instead of the paths in the log
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Keep only events whose file path contains this name
    #[arg(long)]
    pub target: Option<String>,
}

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<CodexConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CodexConfig::load(path).map_err(ExError::from)?),
        None => Ok(CodexConfig::default()),
    }
}

/// Replay the event log through a recording session
pub fn record_trace(
    args: &TraceArgs,
    config: &CodexConfig,
) -> Result<Trace, Box<dyn std::error::Error>> {
    let mut trace_config = config.trace.clone();
    if let Some(target) = &args.target {
        trace_config.target_file = target.clone();
    }

    tracing::debug!(
        events = %args.events.display(),
        target_file = %trace_config.target_file,
        "replaying event log"
    );
    let mut events = JsonLinesEventSource::open(&args.events)?;
    let mut source = match &args.script {
        Some(script) => FsSourceCache::new().with_script_override(script),
        None => FsSourceCache::new(),
    };

    let trace = record_session(trace_config, &mut events, &mut source)?;
    Ok(trace)
}
