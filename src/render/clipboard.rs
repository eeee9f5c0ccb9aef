//! Clipboard hand-off to the publishing platform
//!
//! The platform's article composer accepts rich paste, so "copy for
//! platform" places the inline-styled fragment on the clipboard as HTML with
//! the raw markdown as the plain-text fallback.

use arboard::Clipboard;
use log::info;

use crate::error::Result;

use super::profiles::{render, FormatMode};
use super::styles::StyleSheet;

/// Render the markdown under the given profile and place it on the system
/// clipboard as HTML, with the markdown source as plain-text fallback.
pub fn copy_rendered(markdown: &str, mode: FormatMode, sheet: &StyleSheet) -> Result<()> {
    let html = render(markdown, mode, sheet);
    let mut clipboard = Clipboard::new()?;
    clipboard.set_html(html.as_str(), Some(markdown))?;
    info!("copied {} HTML to clipboard ({} bytes)", mode.label(), html.len());
    Ok(())
}

// Clipboard round-trips need a display server, so behavior is covered by the
// render tests; only construction failures surface here and they map to
// Error::Clipboard via From<arboard::Error>.
