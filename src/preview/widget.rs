//! Preview pane widget
//!
//! Read-only rendered view of the store's markdown, displayed with
//! egui_commonmark inside a scroll area. Reports the same scroll/hover
//! contract as the source pane so the bridge can treat both sides
//! uniformly.

use egui::{ScrollArea, Ui};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use crate::sync::ScrollMetrics;

/// Vertical padding around the rendered content; part of the inset mismatch
/// the synchronizer corrects for.
pub const PREVIEW_PANE_PADDING: f32 = 16.0;

// ─────────────────────────────────────────────────────────────────────────────
// Pane State
// ─────────────────────────────────────────────────────────────────────────────

/// Session-lived state for the preview pane.
#[derive(Default)]
pub struct PreviewPaneState {
    cache: CommonMarkCache,
    last_offset: f32,
}

impl PreviewPaneState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for PreviewPaneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewPaneState")
            .field("last_offset", &self.last_offset)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

/// What happened in the preview pane this frame.
#[derive(Debug, Clone)]
pub struct PreviewOutput {
    /// Scroll geometry measured this frame
    pub metrics: ScrollMetrics,
    /// Pointer is over the pane region
    pub hovered: bool,
    /// The scroll offset moved and we didn't move it ourselves
    pub user_scrolled: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Builder-style preview pane widget.
pub struct PreviewPane<'a> {
    state: &'a mut PreviewPaneState,
    /// Programmatic scroll target from the synchronizer
    scroll_to: Option<f32>,
    id: egui::Id,
}

impl<'a> PreviewPane<'a> {
    pub fn new(state: &'a mut PreviewPaneState) -> Self {
        Self {
            state,
            scroll_to: None,
            id: egui::Id::new("preview_pane"),
        }
    }

    /// Apply a programmatic scroll this frame (not reported as user input).
    #[must_use]
    pub fn scroll_to(mut self, target: Option<f32>) -> Self {
        self.scroll_to = target;
        self
    }

    /// Show the rendered markdown and return what happened.
    pub fn show(self, ui: &mut Ui, markdown: &str) -> PreviewOutput {
        let mut scroll_area = ScrollArea::vertical()
            .id_source(self.id.with("scroll"))
            .auto_shrink([false, false]);
        if let Some(target) = self.scroll_to {
            scroll_area = scroll_area.vertical_scroll_offset(target.max(0.0));
        }

        let cache = &mut self.state.cache;
        let scroll_output = scroll_area.show(ui, |ui| {
            egui::Frame::none()
                .inner_margin(egui::Margin::symmetric(
                    PREVIEW_PANE_PADDING,
                    PREVIEW_PANE_PADDING,
                ))
                .show(ui, |ui| {
                    CommonMarkViewer::new(self.id.with("commonmark"))
                        .max_image_width(Some(720))
                        .show(ui, cache, markdown);
                });
        });

        let offset = scroll_output.state.offset.y;
        let metrics = ScrollMetrics::new(
            offset,
            scroll_output.inner_rect.height(),
            scroll_output.content_size.y,
        );

        let user_scrolled =
            self.scroll_to.is_none() && (offset - self.state.last_offset).abs() > f32::EPSILON;
        self.state.last_offset = offset;

        let hovered = ui.rect_contains_pointer(scroll_output.inner_rect);

        PreviewOutput {
            metrics,
            hovered,
            user_scrolled,
        }
    }
}
