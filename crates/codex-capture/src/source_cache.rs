//! Filesystem source provider
//!
//! Each file is read once, on first lookup, and kept split into lines for
//! the rest of the session.

use crate::errors::source_error;
use codex_core::errors::Result;
use codex_core::source::{line_at, SourceProvider};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Caching reader of traced source files
#[derive(Debug, Default)]
pub struct FsSourceCache {
    files: HashMap<String, Vec<String>>,
    script_override: Option<PathBuf>,
}

impl FsSourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every lookup from `path` instead of the file named by the event.
    ///
    /// For logs recorded on another machine, where the recorded path does
    /// not exist locally.
    pub fn with_script_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_override = Some(path.into());
        self
    }

    /// Number of files read so far
    pub fn cached_files(&self) -> usize {
        self.files.len()
    }
}

impl SourceProvider for FsSourceCache {
    fn source_line(&mut self, file: &str, line_number: u32) -> Result<String> {
        let path = match &self.script_override {
            Some(path) => path.clone(),
            None => PathBuf::from(file),
        };
        let key = path.display().to_string();

        let lines = match self.files.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let text = fs::read_to_string(&path).map_err(|e| source_error(entry.key(), e))?;
                tracing::debug!(file = %entry.key(), "loaded source file");
                entry.insert(text.lines().map(str::to_string).collect())
            }
        };
        line_at(file, lines, line_number)
    }
}
