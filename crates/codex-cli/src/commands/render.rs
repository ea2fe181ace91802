//! Render command
//!
//! Usage: codex render <EVENTS> [--format text|html] [--output <FILE>] [--open]

use crate::commands::{record_trace, TraceArgs};
use clap::Args;
use codex_capture::output::{open_in_browser, write_output};
use codex_core::config::CodexConfig;
use codex_core::errors::{ExError, ExErrorKind};
use codex_core::render::{render, RenderFormat};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub trace: TraceArgs,

    /// Output format: text or html (default: from config)
    #[arg(short, long)]
    pub format: Option<RenderFormat>,

    /// Output file path (text default: stdout; html default: from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open the written HTML page in a browser (html format only)
    #[arg(long)]
    pub open: bool,
}

/// Execute render command
pub fn execute(args: RenderArgs, config: &CodexConfig) -> Result<(), Box<dyn std::error::Error>> {
    let format = args.format.unwrap_or(config.render.format);
    if args.open && format != RenderFormat::Html {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("render")
            .with_message("--open requires --format html")
            .into());
    }
    let trace = record_trace(&args.trace, config)?;
    let rendered = render(&trace, format, &config.render);

    match format {
        RenderFormat::Text => match args.output {
            Some(output_path) => {
                write_output(&output_path, &rendered)?;
                println!("✓ Rendered to {}", output_path.display());
            }
            None => println!("{}", rendered),
        },
        RenderFormat::Html => {
            let output_path = args
                .output
                .unwrap_or_else(|| PathBuf::from(&config.render.html_output));
            write_output(&output_path, &rendered)?;
            println!("✓ Rendered to {}", output_path.display());

            if args.open || config.render.open_browser {
                open_in_browser(&output_path)?;
            }
        }
    }

    Ok(())
}
