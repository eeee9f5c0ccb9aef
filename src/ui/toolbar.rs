//! Top toolbar
//!
//! Document actions, render profile selection, and pane toggles. The toolbar
//! never mutates state itself; it returns at most one action per frame for
//! the app to execute.

use egui::Ui;

use crate::config::Theme;
use crate::render::FormatMode;
use crate::store::{ContentStore, NavbarState};

/// One user action requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    OpenDocument,
    SaveDocument,
    SaveDocumentAs,
    /// Copy the rendered output to the clipboard under the current profile
    CopyRendered,
    /// Export a standalone HTML document
    ExportHtml,
    FormatModeChanged(FormatMode),
    ToggleSyncScroll,
    ToggleStyleEditor,
    ThemeChanged(Theme),
}

/// Render the toolbar; returns the action the user triggered, if any.
pub fn toolbar(
    ui: &mut Ui,
    store: &ContentStore,
    navbar: &NavbarState,
    theme: Theme,
) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui.button("Open").clicked() {
            action = Some(ToolbarAction::OpenDocument);
        }
        let save_label = if store.is_modified() { "Save*" } else { "Save" };
        if ui.button(save_label).clicked() {
            action = Some(ToolbarAction::SaveDocument);
        }
        if ui.button("Save As…").clicked() {
            action = Some(ToolbarAction::SaveDocumentAs);
        }

        ui.separator();

        if ui.button("Copy HTML").clicked() {
            action = Some(ToolbarAction::CopyRendered);
        }
        if ui.button("Export…").clicked() {
            action = Some(ToolbarAction::ExportHtml);
        }

        ui.separator();

        let mut mode = store.format_mode();
        egui::ComboBox::from_id_source("format_mode")
            .selected_text(mode.label())
            .show_ui(ui, |ui| {
                for candidate in FormatMode::all() {
                    ui.selectable_value(&mut mode, *candidate, candidate.label());
                }
            });
        if mode != store.format_mode() {
            action = Some(ToolbarAction::FormatModeChanged(mode));
        }

        ui.separator();

        let mut sync = navbar.sync_scroll;
        if ui.checkbox(&mut sync, "Sync scroll").changed() {
            action = Some(ToolbarAction::ToggleSyncScroll);
        }
        let mut style_open = navbar.style_editor_open;
        if ui.checkbox(&mut style_open, "Styles").changed() {
            action = Some(ToolbarAction::ToggleStyleEditor);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut selected = theme;
            egui::ComboBox::from_id_source("theme")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for candidate in Theme::all() {
                        ui.selectable_value(&mut selected, *candidate, candidate.label());
                    }
                });
            if selected != theme {
                action = Some(ToolbarAction::ThemeChanged(selected));
            }
        });
    });

    action
}
