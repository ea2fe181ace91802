//! Recording and rendering settings, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration.

use crate::errors::{CodexError, Result};
use crate::model::DEFAULT_RESERVED_PREFIX;
use crate::render::RenderFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodexConfig {
    pub trace: TraceConfig,
    pub render: RenderConfig,
}

/// Which events are recorded, and how locals are filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Events are kept only if their file path contains this string.
    /// Empty keeps every event.
    pub target_file: String,
    /// Locals whose name starts with this prefix are never traced.
    pub reserved_prefix: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            target_file: String::new(),
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
        }
    }
}

/// Column widths and output choices for the trace renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub kind_width: usize,
    pub line_width: usize,
    pub source_width: usize,
    pub format: RenderFormat,
    pub html_output: String,
    /// Open the page after an html render; no effect on text output
    pub open_browser: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            kind_width: 6,
            line_width: 4,
            source_width: 40,
            format: RenderFormat::Text,
            html_output: "index.html".to_string(),
            open_browser: false,
        }
    }
}

impl CodexConfig {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for malformed TOML, unknown keys or values of
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CodexError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CodexError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }
}
