//! Trace rendering.

pub mod html_render;
pub mod text_render;

pub use html_render::{escape_html, render_html};
pub use text_render::render_text;

use crate::config::RenderConfig;
use crate::model::Trace;
use serde::{Deserialize, Serialize};

/// Output format of a rendered trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Text,
    Html,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(RenderFormat::Text),
            "html" => Ok(RenderFormat::Html),
            other => Err(format!("unknown render format '{}'", other)),
        }
    }
}

/// Render `trace` in the requested format.
pub fn render(trace: &Trace, format: RenderFormat, config: &RenderConfig) -> String {
    match format {
        RenderFormat::Text => render_text(trace, config),
        RenderFormat::Html => render_html(trace, config),
    }
}
