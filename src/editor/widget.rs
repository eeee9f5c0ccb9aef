//! Source pane widget
//!
//! Wraps `egui::TextEdit` in a scroll area and reports everything the event
//! bridge needs: fresh scroll metrics, user-initiated scrolls, focus
//! transitions, pointer hover, edits, and the caret position. Programmatic
//! scroll targets are applied here and are *not* reported back as user
//! scrolls, which is half of the echo suppression (the bridge's active-pane
//! guard is the other half).

use egui::{FontId, ScrollArea, TextEdit, Ui};
use log::debug;

use crate::sync::ScrollMetrics;

use super::highlight::MarkdownHighlighter;

/// Vertical padding the source pane adds around its content, exposed so the
/// synchronizer can correct for the inset mismatch against the preview.
pub const SOURCE_PANE_PADDING: f32 = 8.0;

// ─────────────────────────────────────────────────────────────────────────────
// Pane State
// ─────────────────────────────────────────────────────────────────────────────

/// Session-lived state for the source pane.
///
/// The pane edits its own buffer; committed text reaches the content store
/// through the bridge's focus-gated `CommitContent` effect. When the store
/// changes programmatically (file open, image insertion) its version counter
/// moves and the buffer is re-read here.
#[derive(Debug, Default)]
pub struct SourcePaneState {
    /// The text the widget is editing
    pub buffer: String,
    /// Store version the buffer was last read from
    last_version: u64,
    /// Scroll offset observed on the previous frame
    last_offset: f32,
    highlighter: MarkdownHighlighter,
}

impl SourcePaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read the buffer when the store's programmatic version moved.
    pub fn refresh_from_store(&mut self, content: &str, version: u64) {
        if version != self.last_version {
            debug!("source buffer re-read at store version {}", version);
            self.buffer = content.to_owned();
            self.last_version = version;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

/// What happened in the source pane this frame.
#[derive(Debug, Clone)]
pub struct SourceOutput {
    /// Scroll geometry measured this frame
    pub metrics: ScrollMetrics,
    /// Pointer is over the pane region
    pub hovered: bool,
    /// The scroll offset moved and we didn't move it ourselves
    pub user_scrolled: bool,
    pub focus_gained: bool,
    pub focus_lost: bool,
    /// Full buffer text after a user edit this frame
    pub edited: Option<String>,
    /// Caret position as a char index, when the widget reports one
    pub cursor: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Builder-style source pane widget.
///
/// # Example
///
/// ```ignore
/// let output = SourcePane::new(&mut state)
///     .font_size(settings.font_size)
///     .scroll_to(pending_target)
///     .show(ui);
/// ```
pub struct SourcePane<'a> {
    state: &'a mut SourcePaneState,
    font_size: f32,
    dark: bool,
    /// Programmatic scroll target from the synchronizer
    scroll_to: Option<f32>,
    id: egui::Id,
}

impl<'a> SourcePane<'a> {
    pub fn new(state: &'a mut SourcePaneState) -> Self {
        Self {
            state,
            font_size: 14.0,
            dark: false,
            scroll_to: None,
            id: egui::Id::new("source_pane"),
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn dark_theme(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Apply a programmatic scroll this frame (not reported as user input).
    #[must_use]
    pub fn scroll_to(mut self, target: Option<f32>) -> Self {
        self.scroll_to = target;
        self
    }

    /// Show the pane and return what happened.
    pub fn show(self, ui: &mut Ui) -> SourceOutput {
        let font_size = self.font_size;
        let dark = self.dark;
        let fallback_color = ui.visuals().text_color();

        let SourcePaneState {
            buffer,
            last_version,
            last_offset,
            highlighter,
        } = self.state;
        let text_edit_id = self.id.with(*last_version);

        let mut layouter = |ui: &Ui, text: &str, wrap_width: f32| {
            let job = highlighter.layout(text, font_size, wrap_width, fallback_color, dark);
            ui.fonts(|f| f.layout_job(job))
        };

        let mut scroll_area = ScrollArea::vertical()
            .id_source(self.id.with("scroll"))
            .auto_shrink([false, false]);
        if let Some(target) = self.scroll_to {
            scroll_area = scroll_area.vertical_scroll_offset(target.max(0.0));
        }

        let mut focus_gained = false;
        let mut focus_lost = false;
        let mut edited = None;
        let mut cursor = None;

        let scroll_output = scroll_area.show(ui, |ui| {
            let text_output = TextEdit::multiline(buffer)
                .id(text_edit_id)
                .frame(false)
                .font(FontId::monospace(font_size))
                .desired_width(f32::INFINITY)
                .margin(egui::Margin::symmetric(SOURCE_PANE_PADDING, SOURCE_PANE_PADDING))
                .layouter(&mut layouter)
                .show(ui);

            focus_gained = text_output.response.gained_focus();
            focus_lost = text_output.response.lost_focus();
            if text_output.response.changed() {
                edited = Some(buffer.clone());
            }
            cursor = text_output
                .cursor_range
                .map(|range| range.primary.ccursor.index);
        });

        let offset = scroll_output.state.offset.y;
        let metrics = ScrollMetrics::new(
            offset,
            scroll_output.inner_rect.height(),
            scroll_output.content_size.y,
        );

        // A programmatic move this frame is ours; anything else that shifted
        // the offset came from the user.
        let user_scrolled =
            self.scroll_to.is_none() && (offset - *last_offset).abs() > f32::EPSILON;
        *last_offset = offset;

        let hovered = ui.rect_contains_pointer(scroll_output.inner_rect);

        SourceOutput {
            metrics,
            hovered,
            user_scrolled,
            focus_gained,
            focus_lost,
            edited,
            cursor,
        }
    }
}
