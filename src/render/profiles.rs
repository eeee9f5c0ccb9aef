//! Render profiles
//!
//! `render` maps markdown source to an HTML fragment. Two profiles exist:
//! Generic emits plain GFM HTML, Platform runs the same comrak pass and then
//! rewrites the fragment for platforms that strip classes and stylesheets
//! (inline styles per tag, syntect-highlighted code blocks, a `<section>`
//! wrapper). Both are pure: same text and sheet in, same HTML out.

// Allow dead code - the numeric mode mapping is part of the FormatMode
// contract even though the UI selects the enum directly
#![allow(dead_code)]

use std::sync::OnceLock;

use comrak::{markdown_to_html, Options};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::styles::StyleSheet;

/// Syntect theme used for platform code blocks; its output is light-colored
/// inline HTML, which matches the platform defaults.
const CODE_THEME: &str = "InspiredGitHub";

// ─────────────────────────────────────────────────────────────────────────────
// Format Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Which output the renderer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Inline-styled HTML for the publishing platform
    #[default]
    Platform,
    /// Plain GFM HTML
    Generic,
}

impl FormatMode {
    /// Map a numeric mode index: 0 selects the platform profile, anything
    /// else the generic one.
    pub fn from_index(index: u8) -> Self {
        if index == 0 {
            FormatMode::Platform
        } else {
            FormatMode::Generic
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            FormatMode::Platform => 0,
            FormatMode::Generic => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormatMode::Platform => "Platform",
            FormatMode::Generic => "Generic",
        }
    }

    pub fn all() -> &'static [FormatMode] {
        &[FormatMode::Platform, FormatMode::Generic]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Markdown Options
// ─────────────────────────────────────────────────────────────────────────────

/// Shared comrak options: GFM extensions on, raw HTML off.
fn markdown_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.render.unsafe_ = false;
    options
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown to an HTML fragment under the given profile.
///
/// The sheet only affects the platform profile; the stored source text is
/// never touched.
pub fn render(text: &str, mode: FormatMode, sheet: &StyleSheet) -> String {
    let html = markdown_to_html(text, &markdown_options());
    match mode {
        FormatMode::Generic => html,
        FormatMode::Platform => {
            let highlighted = highlight_code_blocks(&html);
            sheet.apply(&highlighted)
        }
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SET: OnceLock<SyntaxSet> = OnceLock::new();
    SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static SET: OnceLock<ThemeSet> = OnceLock::new();
    SET.get_or_init(ThemeSet::load_defaults)
}

/// Replace comrak's `<pre><code class="language-…">` blocks with
/// syntect-generated inline-styled HTML.
///
/// Blocks in unknown languages (or without a language tag) pass through and
/// pick up the sheet's plain `pre`/`code` styles instead.
fn highlight_code_blocks(html: &str) -> String {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    let re = BLOCK_RE.get_or_init(|| {
        Regex::new(r#"(?s)<pre><code class="language-([^"]+)">(.*?)</code></pre>"#)
            .expect("static regex")
    });

    re.replace_all(html, |caps: &regex::Captures| {
        let lang = &caps[1];
        let code = unescape_html(&caps[2]);

        let ss = syntax_set();
        let syntax = ss
            .find_syntax_by_token(lang)
            .or_else(|| ss.find_syntax_by_extension(lang));
        let Some(syntax) = syntax else {
            debug!("no syntax for code block language {}", lang);
            return caps[0].to_string();
        };

        let theme = &theme_set().themes[CODE_THEME];
        match highlighted_html_for_string(&code, ss, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                debug!("highlighting failed for {} block: {}", lang, e);
                caps[0].to_string()
            }
        }
    })
    .into_owned()
}

/// Undo comrak's entity escaping inside a code block so syntect sees the
/// original source.
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
