//! Compact command
//!
//! Usage: codex compact <EVENTS> [--output <FILE>]

use crate::commands::{record_trace, TraceArgs};
use clap::Args;
use codex_capture::output::write_output;
use codex_core::config::CodexConfig;
use codex_core::errors::{CodexError, ExError};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompactArgs {
    #[command(flatten)]
    pub trace: TraceArgs,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute compact command
pub fn execute(args: CompactArgs, config: &CodexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let trace = record_trace(&args.trace, config)?;
    let json = serde_json::to_string_pretty(&trace)
        .map_err(|e| ExError::from(CodexError::from(e)))?;

    if let Some(output_path) = args.output {
        write_output(&output_path, &json)?;
        println!("✓ Compacted to {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
