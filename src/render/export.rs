//! Standalone HTML export
//!
//! Wraps a rendered fragment in a complete HTML document and writes it to
//! disk. The platform profile already carries its styles inline, so the
//! document shell stays minimal; the generic profile gets a small base
//! stylesheet for readable standalone viewing.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

use super::profiles::{render, FormatMode};
use super::styles::StyleSheet;

/// Base CSS for generic-profile exports.
const BASE_CSS: &str = r#"body {
    max-width: 760px;
    margin: 40px auto;
    padding: 0 16px;
    font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif;
    line-height: 1.6;
    color: #24292e;
}
pre {
    background: #f6f8fa;
    padding: 12px;
    border-radius: 6px;
    overflow-x: auto;
}
code { font-family: SFMono-Regular, Consolas, Menlo, monospace; }
img { max-width: 100%; }
blockquote { color: #6a737d; border-left: 4px solid #dfe2e5; margin-left: 0; padding-left: 16px; }
table { border-collapse: collapse; }
th, td { border: 1px solid #dfe2e5; padding: 6px 12px; }"#;

/// Build a complete HTML document for the given markdown and profile.
pub fn generate_document(
    markdown: &str,
    title: Option<&str>,
    mode: FormatMode,
    sheet: &StyleSheet,
) -> String {
    let body = render(markdown, mode, sheet);
    let css = match mode {
        FormatMode::Platform => "",
        FormatMode::Generic => BASE_CSS,
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Pressmark">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title.unwrap_or("Exported Document")),
        css = css,
        body = body,
    )
}

/// Render the markdown under the given profile and write a standalone
/// document to `path`.
pub fn export_to_file(
    markdown: &str,
    title: Option<&str>,
    mode: FormatMode,
    sheet: &StyleSheet,
    path: &Path,
) -> Result<()> {
    let document = generate_document(markdown, title, mode, sheet);
    fs::write(path, document).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("exported {} HTML to {}", mode.label(), path.display());
    Ok(())
}

/// Escape text for inclusion in HTML.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
