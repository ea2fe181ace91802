use crate::config::RenderConfig;
use crate::model::Trace;
use crate::render::text_render::render_text;

const PAGE_TITLE: &str = "Codex &ndash; Code Execution GUI";

/// Render a trace as a standalone HTML page.
///
/// The page holds the text rendering, escaped, inside a `<pre>` block.
pub fn render_html(trace: &Trace, config: &RenderConfig) -> String {
    let body = escape_html(&render_text(trace, config));
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>{}</title>\n</head>\n<body>\n    <pre>{}</pre>\n</body>\n</html>\n",
        PAGE_TITLE, body
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
