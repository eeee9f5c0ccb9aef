//! Event dispatch between the panes and the rest of the application
//!
//! Pane widgets report what happened; the bridge turns each event into an
//! ordered list of effects for the app to execute. Handlers are plain
//! functions of (event, current state), so the focus gate, the echo guard,
//! and the drop policy are all testable without a running UI.
//!
//! The bridge owns exactly two pieces of state: the focus flag for the
//! source pane and the scroll synchronizer.

use crate::upload::{screen_files, IngestedFile, Notice};

use super::scroll::{Pane, ScrollCommand, ScrollMetrics, ScrollSync};

// ─────────────────────────────────────────────────────────────────────────────
// Events and Effects
// ─────────────────────────────────────────────────────────────────────────────

/// Something that happened in one of the panes this frame.
#[derive(Debug, Clone)]
pub enum PaneEvent {
    /// The pointer entered a pane region
    PointerEntered(Pane),
    /// The user scrolled the source pane
    SourceScrolled,
    /// The user scrolled the preview pane
    PreviewScrolled,
    /// The source editor gained keyboard focus
    FocusGained,
    /// The source editor lost keyboard focus
    FocusLost,
    /// The source text changed; carries the full new text
    SourceEdited(String),
    /// Files were dropped onto the source pane
    FilesDropped(Vec<IngestedFile>),
    /// Files were pasted into the source pane
    FilesPasted(Vec<IngestedFile>),
}

/// An action the app must carry out, in order, after dispatch.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Apply a programmatic scroll to the named pane
    Scroll(ScrollCommand),
    /// Commit new source text to the content store
    CommitContent(String),
    /// Content changed; external layout (preview repaint) must re-run
    RequestRelayout,
    /// Hand a screened file to the image host
    BeginUpload(IngestedFile),
    /// Surface an advisory to the user
    Notify(Notice),
}

// ─────────────────────────────────────────────────────────────────────────────
// Bridge
// ─────────────────────────────────────────────────────────────────────────────

/// Dispatches pane events into effects.
#[derive(Debug, Default)]
pub struct EditorBridge {
    /// True while the source editor holds keyboard focus. Edits reported
    /// while unfocused are programmatic (formatting commands, undo applied
    /// from outside) and must not be committed as user input.
    focused: bool,
    sync: ScrollSync,
}

impl EditorBridge {
    pub fn new() -> Self {
        Self {
            focused: false,
            sync: ScrollSync::new(),
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn sync(&self) -> &ScrollSync {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut ScrollSync {
        &mut self.sync
    }

    /// Dispatch one event. `source` and `preview` are the panes' metrics as
    /// measured this frame; scroll handling reads both.
    pub fn handle(
        &mut self,
        event: PaneEvent,
        source: ScrollMetrics,
        preview: ScrollMetrics,
    ) -> Vec<Effect> {
        match event {
            PaneEvent::PointerEntered(pane) => {
                self.sync.set_active_pane(pane);
                Vec::new()
            }
            PaneEvent::SourceScrolled => self
                .sync
                .on_scroll(Pane::Source, source, preview)
                .map(Effect::Scroll)
                .into_iter()
                .collect(),
            PaneEvent::PreviewScrolled => self
                .sync
                .on_scroll(Pane::Preview, source, preview)
                .map(Effect::Scroll)
                .into_iter()
                .collect(),
            PaneEvent::FocusGained => {
                self.focused = true;
                Vec::new()
            }
            PaneEvent::FocusLost => {
                self.focused = false;
                Vec::new()
            }
            PaneEvent::SourceEdited(text) => {
                if self.focused {
                    vec![Effect::CommitContent(text), Effect::RequestRelayout]
                } else {
                    Vec::new()
                }
            }
            PaneEvent::FilesDropped(files) | PaneEvent::FilesPasted(files) => {
                let report = screen_files(files);
                let mut effects: Vec<Effect> =
                    report.notices.into_iter().map(Effect::Notify).collect();
                effects.extend(report.forwarded.into_iter().map(Effect::BeginUpload));
                effects
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::NoticeLevel;

    fn metrics(offset: f32) -> (ScrollMetrics, ScrollMetrics) {
        (
            ScrollMetrics::new(offset, 500.0, 1500.0),
            ScrollMetrics::new(0.0, 600.0, 2600.0),
        )
    }

    fn file(name: &str, mime: &str, len: u64) -> IngestedFile {
        IngestedFile {
            name: name.to_string(),
            mime: mime.to_string(),
            bytes: None,
            path: None,
            len,
        }
    }

    #[test]
    fn test_edit_is_committed_only_while_focused() {
        let mut bridge = EditorBridge::new();
        let (source, preview) = metrics(0.0);

        // Unfocused: programmatic edit, no commit.
        let effects = bridge.handle(
            PaneEvent::SourceEdited("# hi".to_string()),
            source,
            preview,
        );
        assert!(effects.is_empty());

        bridge.handle(PaneEvent::FocusGained, source, preview);
        let effects = bridge.handle(
            PaneEvent::SourceEdited("# hi".to_string()),
            source,
            preview,
        );
        assert!(matches!(&effects[0], Effect::CommitContent(t) if t == "# hi"));
        assert!(matches!(effects[1], Effect::RequestRelayout));

        bridge.handle(PaneEvent::FocusLost, source, preview);
        let effects = bridge.handle(
            PaneEvent::SourceEdited("# bye".to_string()),
            source,
            preview,
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_scroll_follows_the_active_pane() {
        let mut bridge = EditorBridge::new();
        let (source, preview) = metrics(150.0);

        bridge.handle(PaneEvent::PointerEntered(Pane::Source), source, preview);
        let effects = bridge.handle(PaneEvent::SourceScrolled, source, preview);
        match &effects[..] {
            [Effect::Scroll(cmd)] => {
                assert_eq!(cmd.target(), Pane::Preview);
                assert!((cmd.offset() - 300.0).abs() < 0.01);
            }
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[test]
    fn test_programmatic_scroll_does_not_echo() {
        let mut bridge = EditorBridge::new();
        let (source, preview) = metrics(150.0);

        bridge.handle(PaneEvent::PointerEntered(Pane::Source), source, preview);
        // The preview reports the scroll we just applied to it; source is
        // still the active pane, so nothing bounces back.
        let effects = bridge.handle(PaneEvent::PreviewScrolled, source, preview);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_no_scroll_effects_before_pointer_interaction() {
        let mut bridge = EditorBridge::new();
        let (source, preview) = metrics(150.0);
        assert!(bridge
            .handle(PaneEvent::SourceScrolled, source, preview)
            .is_empty());
    }

    #[test]
    fn test_dropped_files_are_screened() {
        let mut bridge = EditorBridge::new();
        let (source, preview) = metrics(0.0);

        let effects = bridge.handle(
            PaneEvent::FilesDropped(vec![
                file("a.png", "image/png", 1024 * 1024),
                file("b.png", "image/png", 6 * 1024 * 1024),
                file("c.txt", "text/plain", 3 * 1024 * 1024),
            ]),
            source,
            preview,
        );

        let uploads: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::BeginUpload(f) => Some(f.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(uploads, vec!["a.png", "c.txt"]);

        let notices: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notify(n) => Some(n.level),
                _ => None,
            })
            .collect();
        assert_eq!(notices, vec![NoticeLevel::Error, NoticeLevel::Warning]);
    }

    #[test]
    fn test_pasted_files_use_the_same_policy() {
        let mut bridge = EditorBridge::new();
        let (source, preview) = metrics(0.0);

        let effects = bridge.handle(
            PaneEvent::FilesPasted(vec![file("big.png", "image/png", 6 * 1024 * 1024)]),
            source,
            preview,
        );
        assert!(effects
            .iter()
            .all(|e| !matches!(e, Effect::BeginUpload(_))));
    }
}
