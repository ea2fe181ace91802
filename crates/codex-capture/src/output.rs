//! Writing rendered traces and opening them for viewing

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Write `contents` to `path`, replacing any existing file
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| io_error("write_output", e).with_file(path.display().to_string()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

/// Open `path` with the platform's default handler (a browser for HTML).
///
/// Does not wait for the viewer to exit.
pub fn open_in_browser(path: &Path) -> Result<()> {
    let target = path.display().to_string();
    launch(&target)
        .map_err(|e| io_error("open_in_browser", e).with_file(target.clone()))?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn launch(target: &str) -> std::io::Result<()> {
    Command::new("open").arg(target).spawn().map(|_| ())
}

#[cfg(target_os = "windows")]
fn launch(target: &str) -> std::io::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", "", target])
        .spawn()
        .map(|_| ())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launch(target: &str) -> std::io::Result<()> {
    Command::new("xdg-open").arg(target).spawn().map(|_| ())
}
