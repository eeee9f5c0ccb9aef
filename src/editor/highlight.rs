//! Markdown source highlighting for the editor pane
//!
//! Runs syntect's Markdown grammar over the raw source and converts the
//! styled spans into an egui `LayoutJob`. The sets are expensive to load, so
//! one highlighter instance lives for the whole session; the last laid-out
//! buffer is cached and reused while the text is unchanged.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};
use log::warn;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Syntect theme for light chrome
const LIGHT_THEME: &str = "InspiredGitHub";

/// Syntect theme for dark chrome
const DARK_THEME: &str = "base16-ocean.dark";

// ─────────────────────────────────────────────────────────────────────────────
// Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Session-lived markdown highlighter with a one-entry layout cache.
pub struct MarkdownHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    cache: Option<(u64, LayoutJob)>,
}

impl std::fmt::Debug for MarkdownHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownHighlighter")
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl Default for MarkdownHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            cache: None,
        }
    }

    fn theme(&self, dark: bool) -> &Theme {
        let name = if dark { DARK_THEME } else { LIGHT_THEME };
        self.theme_set
            .themes
            .get(name)
            .unwrap_or_else(|| &self.theme_set.themes[DARK_THEME])
    }

    /// Lay out `text` as highlighted markdown. Falls back to a plain layout
    /// when the grammar is unavailable.
    pub fn layout(
        &mut self,
        text: &str,
        font_size: f32,
        wrap_width: f32,
        fallback_color: Color32,
        dark: bool,
    ) -> LayoutJob {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        wrap_width.to_bits().hash(&mut hasher);
        font_size.to_bits().hash(&mut hasher);
        dark.hash(&mut hasher);
        let key = hasher.finish();

        if let Some((cached_key, job)) = &self.cache {
            if *cached_key == key {
                return job.clone();
            }
        }

        let job = self.layout_uncached(text, font_size, wrap_width, fallback_color, dark);
        self.cache = Some((key, job.clone()));
        job
    }

    fn layout_uncached(
        &self,
        text: &str,
        font_size: f32,
        wrap_width: f32,
        fallback_color: Color32,
        dark: bool,
    ) -> LayoutJob {
        let font_id = FontId::monospace(font_size);

        let Some(syntax) = self.syntax_set.find_syntax_by_name("Markdown") else {
            warn!("Markdown grammar missing from syntax set; highlighting disabled");
            return LayoutJob::simple(text.to_owned(), font_id, fallback_color, wrap_width);
        };

        let mut job = LayoutJob {
            wrap: egui::text::TextWrapping {
                max_width: wrap_width,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut lines = HighlightLines::new(syntax, self.theme(dark));
        for line in LinesWithEndings::from(text) {
            match lines.highlight_line(line, &self.syntax_set) {
                Ok(spans) => {
                    for (style, span) in spans {
                        let color = Color32::from_rgb(
                            style.foreground.r,
                            style.foreground.g,
                            style.foreground.b,
                        );
                        job.append(
                            span,
                            0.0,
                            TextFormat {
                                font_id: font_id.clone(),
                                color,
                                ..Default::default()
                            },
                        );
                    }
                }
                Err(e) => {
                    warn!("highlighting failed mid-buffer: {}", e);
                    job.append(
                        line,
                        0.0,
                        TextFormat {
                            font_id: font_id.clone(),
                            color: fallback_color,
                            ..Default::default()
                        },
                    );
                }
            }
        }
        job
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
