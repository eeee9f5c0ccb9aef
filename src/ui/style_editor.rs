//! Style-override editor pane
//!
//! A plain text editor for the platform profile's override sheet. The sheet
//! lives in `Settings`; every edit is re-parsed by the app so the platform
//! preview and exports pick the overrides up immediately, and malformed
//! rules come back as warning toasts rather than hard errors.

use egui::{FontId, ScrollArea, TextEdit, Ui};

/// Placeholder shown while the sheet is empty.
const SHEET_HINT: &str = "h2 { border-bottom: 2px solid #ff6827; }\n\
                          blockquote { background: #fff7f2; }";

/// Builder-style pane editing the override sheet in place.
pub struct StyleEditorPane<'a> {
    sheet_source: &'a mut String,
    font_size: f32,
}

impl<'a> StyleEditorPane<'a> {
    pub fn new(sheet_source: &'a mut String) -> Self {
        Self {
            sheet_source,
            font_size: 13.0,
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Show the pane; returns true when the sheet changed this frame.
    pub fn show(self, ui: &mut Ui) -> bool {
        let mut changed = false;
        ui.vertical(|ui| {
            ui.label("Platform style overrides");
            ScrollArea::vertical()
                .id_source("style_editor_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let response = ui.add_sized(
                        ui.available_size(),
                        TextEdit::multiline(self.sheet_source)
                            .font(FontId::monospace(self.font_size))
                            .hint_text(SHEET_HINT)
                            .desired_width(f32::INFINITY),
                    );
                    changed = response.changed();
                });
        });
        changed
    }
}
