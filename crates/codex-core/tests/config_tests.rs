#![allow(clippy::unwrap_used, clippy::expect_used)]

use codex_core::config::CodexConfig;
use codex_core::errors::CodexError;
use codex_core::render::RenderFormat;
use std::io::Write;

#[test]
fn test_load_full_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[trace]
target_file = "my_data_analysis.py"
reserved_prefix = "_"

[render]
kind_width = 8
line_width = 5
source_width = 30
format = "html"
html_output = "trace.html"
open_browser = true
"#
    )
    .unwrap();

    let config = CodexConfig::load(file.path()).unwrap();

    assert_eq!(config.trace.target_file, "my_data_analysis.py");
    assert_eq!(config.trace.reserved_prefix, "_");
    assert_eq!(config.render.kind_width, 8);
    assert_eq!(config.render.line_width, 5);
    assert_eq!(config.render.source_width, 30);
    assert_eq!(config.render.format, RenderFormat::Html);
    assert_eq!(config.render.html_output, "trace.html");
    assert!(config.render.open_browser);
}

#[test]
fn test_load_missing_file_is_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = CodexConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CodexError::InvalidConfig { .. }));
}

#[test]
fn test_wrong_value_type_is_rejected() {
    let err = CodexConfig::from_toml_str("[render]\nkind_width = \"wide\"\n").unwrap_err();
    assert!(matches!(err, CodexError::InvalidConfig { .. }));
}

#[test]
fn test_unknown_format_is_rejected() {
    let err = CodexConfig::from_toml_str("[render]\nformat = \"pdf\"\n").unwrap_err();
    assert!(matches!(err, CodexError::InvalidConfig { .. }));
}
