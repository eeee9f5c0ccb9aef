//! Application assembly for Pressmark
//!
//! `PressmarkApp` owns every piece of state (settings, the content and
//! navbar stores, the event bridge, the pane widgets, the image host) and
//! wires them together each frame: pane outputs become bridge events, bridge
//! effects are executed in order, upload completions are drained, and the
//! chrome (toolbar, style editor, toasts) is rendered around the two panes.

use std::sync::Arc;

use eframe::egui;
use log::{debug, info, warn};

use crate::config::{load_config, save_config_silent, Settings, Theme};
use crate::editor::{SourceOutput, SourcePane, SourcePaneState, SOURCE_PANE_PADDING};
use crate::files;
use crate::preview::{PreviewOutput, PreviewPane, PreviewPaneState, PREVIEW_PANE_PADDING};
use crate::render::{self, StyleSheet};
use crate::store::{ContentStore, NavbarState};
use crate::sync::{Effect, EditorBridge, Pane, PaneEvent, ScrollCommand, ScrollMetrics};
use crate::ui::{toolbar, StyleEditorPane, Toasts, ToolbarAction};
use crate::upload::{ImageHost, IngestedFile, LocalImageHost, Notice, UploadOutcome};

// Keyboard shortcuts, kept together so collisions are easy to spot.
const SHORTCUT_OPEN: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
const SHORTCUT_SAVE: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
const SHORTCUT_SAVE_AS: egui::KeyboardShortcut = egui::KeyboardShortcut::new(
    egui::Modifiers::COMMAND.plus(egui::Modifiers::SHIFT),
    egui::Key::S,
);
const SHORTCUT_COPY_HTML: egui::KeyboardShortcut = egui::KeyboardShortcut::new(
    egui::Modifiers::COMMAND.plus(egui::Modifiers::SHIFT),
    egui::Key::C,
);
const SHORTCUT_PASTE_IMAGE: egui::KeyboardShortcut = egui::KeyboardShortcut::new(
    egui::Modifiers::COMMAND.plus(egui::Modifiers::SHIFT),
    egui::Key::V,
);

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

pub struct PressmarkApp {
    settings: Settings,
    content: ContentStore,
    navbar: NavbarState,
    bridge: EditorBridge,
    source_pane: SourcePaneState,
    preview_pane: PreviewPaneState,
    host: LocalImageHost,
    toasts: Toasts,
    /// Active platform style sheet (defaults + parsed overrides)
    sheet: StyleSheet,
    /// Programmatic scroll targets to apply on the next frame
    pending_source_scroll: Option<f32>,
    pending_preview_scroll: Option<f32>,
    /// Metrics measured on the previous frame, for events dispatched before
    /// the panes have been shown this frame
    last_source_metrics: ScrollMetrics,
    last_preview_metrics: ScrollMetrics,
}

impl PressmarkApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_config();

        let (sheet, warnings) = StyleSheet::with_overrides(&settings.style_overrides);
        for warning in &warnings {
            warn!("style override sheet: {}", warning);
        }

        let mut navbar = NavbarState::new();
        navbar.sync_scroll = settings.sync_scroll;

        let mut content = ContentStore::new();
        content.set_format_mode(settings.format_mode);

        let mut bridge = EditorBridge::new();
        bridge.sync_mut().set_enabled(navbar.sync_scroll);
        bridge
            .sync_mut()
            .set_padding_correction(2.0 * (PREVIEW_PANE_PADDING - SOURCE_PANE_PADDING));

        let app = Self {
            settings,
            content,
            navbar,
            bridge,
            source_pane: SourcePaneState::new(),
            preview_pane: PreviewPaneState::new(),
            host: LocalImageHost::new(),
            toasts: Toasts::new(),
            sheet,
            pending_source_scroll: None,
            pending_preview_scroll: None,
            last_source_metrics: ScrollMetrics::new(0.0, 1.0, 1.0),
            last_preview_metrics: ScrollMetrics::new(0.0, 1.0, 1.0),
        };
        app.apply_theme(&cc.egui_ctx);
        app
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        match self.settings.theme {
            Theme::Light => ctx.set_visuals(egui::Visuals::light()),
            Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
            // Leave eframe's system-theme following in charge.
            Theme::System => {}
        }
    }

    fn dark_mode(&self, ctx: &egui::Context) -> bool {
        match self.settings.theme {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => ctx.style().visuals.dark_mode,
        }
    }

    fn window_title(&self) -> String {
        format!("{} - Pressmark", self.content.title())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Route one event through the bridge and execute the resulting effects.
    fn dispatch(&mut self, ctx: &egui::Context, event: PaneEvent) {
        let effects = self
            .bridge
            .handle(event, self.last_source_metrics, self.last_preview_metrics);
        self.execute(ctx, effects);
    }

    fn execute(&mut self, ctx: &egui::Context, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Scroll(ScrollCommand::ScrollPreviewTo(offset)) => {
                    self.pending_preview_scroll = Some(offset);
                }
                Effect::Scroll(ScrollCommand::ScrollSourceTo(offset)) => {
                    self.pending_source_scroll = Some(offset);
                }
                Effect::CommitContent(text) => {
                    self.content.set_content(text);
                }
                Effect::RequestRelayout => {
                    ctx.request_repaint();
                }
                Effect::BeginUpload(file) => {
                    debug!("uploading {} ({} bytes)", file.name, file.len);
                    self.host.store(file);
                }
                Effect::Notify(notice) => {
                    self.toasts.push(notice);
                }
            }
        }
    }

    /// Feed a source pane frame output through the bridge.
    ///
    /// Hover is dispatched before the scroll so a fresh pointer-enter
    /// activates the pane ahead of its own scroll event.
    fn dispatch_source_output(&mut self, ctx: &egui::Context, output: &SourceOutput) {
        self.last_source_metrics = output.metrics;
        if output.hovered {
            self.dispatch(ctx, PaneEvent::PointerEntered(Pane::Source));
        }
        if output.focus_gained {
            self.dispatch(ctx, PaneEvent::FocusGained);
        }
        if let Some(cursor) = output.cursor {
            self.content.set_cursor(cursor);
        }
        if let Some(text) = &output.edited {
            self.dispatch(ctx, PaneEvent::SourceEdited(text.clone()));
        }
        if output.user_scrolled {
            self.dispatch(ctx, PaneEvent::SourceScrolled);
        }
        // Focus loss is dispatched last so an edit and a blur arriving in
        // the same frame still commit.
        if output.focus_lost {
            self.dispatch(ctx, PaneEvent::FocusLost);
        }
    }

    fn dispatch_preview_output(&mut self, ctx: &egui::Context, output: &PreviewOutput) {
        self.last_preview_metrics = output.metrics;
        if output.hovered {
            self.dispatch(ctx, PaneEvent::PointerEntered(Pane::Preview));
        }
        if output.user_scrolled {
            self.dispatch(ctx, PaneEvent::PreviewScrolled);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Uploads
    // ─────────────────────────────────────────────────────────────────────────

    fn drain_upload_outcomes(&mut self) {
        for outcome in self.host.poll_outcomes() {
            match outcome {
                UploadOutcome::Stored { name, reference } => {
                    info!("stored image {} as {}", name, reference);
                    self.content.insert_image_reference(&reference);
                    self.toasts.push(Notice::info(format!("Inserted {}", name)));
                }
                UploadOutcome::Failed { name, error } => {
                    self.toasts
                        .push(Notice::error(format!("Failed to store {}: {}", name, error)));
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<IngestedFile> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .map(IngestedFile::from_dropped)
                .collect()
        });
        if dropped.is_empty() {
            return;
        }
        debug!("{} file(s) dropped", dropped.len());
        self.dispatch(ctx, PaneEvent::FilesDropped(dropped));
    }

    fn handle_paste_image(&mut self, ctx: &egui::Context) {
        match clipboard_image() {
            Some(file) => self.dispatch(ctx, PaneEvent::FilesPasted(vec![file])),
            None => self
                .toasts
                .push(Notice::warning("Clipboard has no image to paste")),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_open_document(&mut self) {
        let initial = self.content.path().and_then(|p| p.parent().map(|d| d.to_path_buf()));
        let Some(path) = files::open_document_dialog(initial.as_deref()) else {
            return;
        };
        match files::read_document(&path) {
            Ok(text) => {
                self.host.set_document_path(&path);
                self.content.load(text, Some(path));
            }
            Err(e) => {
                warn!("open failed: {}", e);
                self.toasts.push(Notice::error(e.to_string()));
            }
        }
    }

    fn handle_save_document(&mut self, save_as: bool) {
        let target = if save_as { None } else { self.content.path().map(|p| p.to_path_buf()) };
        let target = target.or_else(|| {
            files::save_document_dialog(
                self.content.path().and_then(|p| p.parent()),
                Some("article.md"),
            )
        });
        let Some(path) = target else {
            return;
        };
        match files::write_document(&path, self.content.content()) {
            Ok(()) => {
                self.host.set_document_path(&path);
                self.content.mark_saved(Some(path));
                self.toasts.push(Notice::info("Saved"));
            }
            Err(e) => {
                warn!("save failed: {}", e);
                self.toasts.push(Notice::error(e.to_string()));
            }
        }
    }

    fn handle_copy_rendered(&mut self) {
        let result = render::copy_rendered(
            self.content.content(),
            self.content.format_mode(),
            &self.sheet,
        );
        match result {
            Ok(()) => self.toasts.push(Notice::info(format!(
                "Copied {} HTML to clipboard",
                self.content.format_mode().label()
            ))),
            Err(e) => self.toasts.push(Notice::error(e.to_string())),
        }
    }

    fn handle_export_html(&mut self) {
        let default_name = self
            .content
            .path()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(|s| format!("{}.html", s))
            .unwrap_or_else(|| "article.html".to_string());
        let Some(path) = files::export_html_dialog(
            self.content.path().and_then(|p| p.parent()),
            &default_name,
        ) else {
            return;
        };
        let title = self
            .content
            .path()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(str::to_owned);
        let result = render::export_to_file(
            self.content.content(),
            title.as_deref(),
            self.content.format_mode(),
            &self.sheet,
            &path,
        );
        match result {
            Ok(()) => self
                .toasts
                .push(Notice::info(format!("Exported to {}", path.display()))),
            Err(e) => self.toasts.push(Notice::error(e.to_string())),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Style Sheet
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-parse the override sheet after an edit in the style editor pane.
    fn refresh_style_sheet(&mut self) {
        let (sheet, warnings) = StyleSheet::with_overrides(&self.settings.style_overrides);
        self.sheet = sheet;
        for warning in warnings {
            self.toasts.push(Notice::warning(warning));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toolbar and Shortcuts
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_toolbar_action(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        match action {
            ToolbarAction::OpenDocument => self.handle_open_document(),
            ToolbarAction::SaveDocument => self.handle_save_document(false),
            ToolbarAction::SaveDocumentAs => self.handle_save_document(true),
            ToolbarAction::CopyRendered => self.handle_copy_rendered(),
            ToolbarAction::ExportHtml => self.handle_export_html(),
            ToolbarAction::FormatModeChanged(mode) => {
                self.content.set_format_mode(mode);
                self.settings.format_mode = mode;
            }
            ToolbarAction::ToggleSyncScroll => {
                self.navbar.toggle_sync_scroll();
                self.settings.sync_scroll = self.navbar.sync_scroll;
                self.bridge.sync_mut().set_enabled(self.navbar.sync_scroll);
            }
            ToolbarAction::ToggleStyleEditor => {
                self.navbar.toggle_style_editor();
            }
            ToolbarAction::ThemeChanged(theme) => {
                self.settings.theme = theme;
                self.apply_theme(ctx);
            }
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let mut action = None;
        ctx.input_mut(|i| {
            if i.consume_shortcut(&SHORTCUT_SAVE_AS) {
                action = Some(ToolbarAction::SaveDocumentAs);
            } else if i.consume_shortcut(&SHORTCUT_SAVE) {
                action = Some(ToolbarAction::SaveDocument);
            } else if i.consume_shortcut(&SHORTCUT_OPEN) {
                action = Some(ToolbarAction::OpenDocument);
            } else if i.consume_shortcut(&SHORTCUT_COPY_HTML) {
                action = Some(ToolbarAction::CopyRendered);
            }
        });
        if let Some(action) = action {
            self.handle_toolbar_action(ctx, action);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SHORTCUT_PASTE_IMAGE)) {
            self.handle_paste_image(ctx);
        }
    }

    /// Persist the current window geometry into settings.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if let Some(rect) = i.viewport().inner_rect {
                self.settings.window_size.width = rect.width();
                self.settings.window_size.height = rect.height();
            }
            if let Some(pos) = i.viewport().outer_rect.map(|r| r.min) {
                self.settings.window_size.x = Some(pos.x);
                self.settings.window_size.y = Some(pos.y);
            }
            if let Some(maximized) = i.viewport().maximized {
                self.settings.window_size.maximized = maximized;
            }
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe Integration
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for PressmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Off-thread work first: completed uploads mutate the store before
        // this frame's render pass reads it.
        self.drain_upload_outcomes();
        self.handle_dropped_files(ctx);
        self.handle_keyboard_shortcuts(ctx);
        self.update_window_state(ctx);

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            if let Some(action) = toolbar(ui, &self.content, &self.navbar, self.settings.theme) {
                self.handle_toolbar_action(ctx, action);
            }
        });

        if self.navbar.style_editor_open {
            let mut changed = false;
            egui::SidePanel::right("style_editor")
                .default_width(280.0)
                .show(ctx, |ui| {
                    changed = StyleEditorPane::new(&mut self.settings.style_overrides)
                        .font_size(self.settings.font_size - 1.0)
                        .show(ui);
                });
            if changed {
                self.refresh_style_sheet();
            }
        }

        // Take this frame's programmatic scroll targets before showing the
        // panes; new ones may be queued by this frame's events.
        let source_target = self.pending_source_scroll.take();
        let preview_target = self.pending_preview_scroll.take();
        let dark = self.dark_mode(ctx);

        self.source_pane
            .refresh_from_store(self.content.content(), self.content.version());

        let mut source_output = None;
        let mut preview_output = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                source_output = Some(
                    SourcePane::new(&mut self.source_pane)
                        .font_size(self.settings.font_size)
                        .dark_theme(dark)
                        .scroll_to(source_target)
                        .show(&mut columns[0]),
                );
                preview_output = Some(
                    PreviewPane::new(&mut self.preview_pane)
                        .scroll_to(preview_target)
                        .show(&mut columns[1], self.content.content()),
                );
            });
        });

        if let Some(output) = source_output {
            self.dispatch_source_output(ctx, &output);
        }
        if let Some(output) = preview_output {
            self.dispatch_preview_output(ctx, &output);
        }

        // A queued sync target needs one more frame to be applied.
        if self.pending_source_scroll.is_some() || self.pending_preview_scroll.is_some() {
            ctx.request_repaint();
        }

        self.toasts.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("saving configuration on exit");
        save_config_silent(&self.settings);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read an image off the system clipboard and re-encode it as a PNG payload
/// for the ingestion pipeline.
fn clipboard_image() -> Option<IngestedFile> {
    let mut clipboard = arboard::Clipboard::new().ok()?;
    let img = clipboard.get_image().ok()?;

    let mut png = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png);
    use image::ImageEncoder;
    encoder
        .write_image(
            &img.bytes,
            img.width as u32,
            img.height as u32,
            image::ExtendedColorType::Rgba8,
        )
        .ok()?;

    let len = png.len() as u64;
    Some(IngestedFile {
        name: "clipboard.png".to_string(),
        mime: "image/png".to_string(),
        bytes: Some(Arc::from(png.into_boxed_slice())),
        path: None,
        len,
    })
}
