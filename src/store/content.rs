//! Canonical document content
//!
//! `ContentStore` holds the single source of truth for the markdown text,
//! the selected render profile, and the caret position used for image
//! insertion. The source pane commits user edits into it; the renderer and
//! preview only read from it.

// Allow dead code - the store exposes a complete command/query API
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use log::debug;

use crate::render::FormatMode;

/// The canonical source text and its document-level metadata.
///
/// Mutation happens only through the command methods below; write ordering
/// within a frame is: commit edits first, render afterwards.
#[derive(Debug, Default)]
pub struct ContentStore {
    /// Current markdown source
    content: String,
    /// Content as of the last successful save, for dirty tracking
    saved_content: String,
    /// Caret position as a char index into `content`
    cursor: usize,
    /// Which render profile the output targets
    format_mode: FormatMode,
    /// Backing file, `None` for unsaved documents
    path: Option<PathBuf>,
    /// Bumped on programmatic content changes (load, image insertion) so the
    /// source pane knows to re-read its buffer
    version: u64,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn format_mode(&self) -> FormatMode {
        self.format_mode
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Counter identifying the last programmatic content change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Commit a user edit. The caller is responsible for the focus gate;
    /// this method always writes.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor = self.cursor.min(self.content.chars().count());
    }

    /// Replace the document wholesale (open, revert). Resets dirty tracking
    /// and the caret.
    pub fn load(&mut self, content: String, path: Option<PathBuf>) {
        debug!(
            "loading document ({} bytes, path {:?})",
            content.len(),
            path
        );
        self.saved_content = content.clone();
        self.content = content;
        self.cursor = 0;
        self.path = path;
        self.version = self.version.wrapping_add(1);
    }

    /// Record the caret position reported by the source pane.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.content.chars().count());
    }

    /// Select the render profile. Never touches the source text.
    pub fn set_format_mode(&mut self, mode: FormatMode) {
        self.format_mode = mode;
    }

    /// Insert a markdown image reference at the caret, on its own line.
    ///
    /// Used by the app when an upload completes; the caret moves past the
    /// inserted text so consecutive completions stack in arrival order.
    pub fn insert_image_reference(&mut self, reference: &str) {
        let image = format!("![]({})\n", reference);
        let byte_index = self
            .content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len());
        self.content.insert_str(byte_index, &image);
        self.cursor += image.chars().count();
        self.version = self.version.wrapping_add(1);
    }

    /// Whether the content differs from the last saved text.
    pub fn is_modified(&self) -> bool {
        self.content != self.saved_content
    }

    /// Mark the current content as saved, optionally adopting a new path
    /// (save-as).
    pub fn mark_saved(&mut self, path: Option<PathBuf>) {
        self.saved_content = self.content.clone();
        if path.is_some() {
            self.path = path;
        }
    }

    /// Display title: file name or "Untitled", with a dirty marker.
    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");
        if self.is_modified() {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_content_marks_modified() {
        let mut store = ContentStore::new();
        store.load("hello".to_string(), None);
        assert!(!store.is_modified());

        store.set_content("hello world".to_string());
        assert!(store.is_modified());

        store.mark_saved(None);
        assert!(!store.is_modified());
    }

    #[test]
    fn test_format_mode_switch_keeps_text() {
        let mut store = ContentStore::new();
        store.load("# title".to_string(), None);
        store.set_format_mode(FormatMode::Generic);
        assert_eq!(store.content(), "# title");
        store.set_format_mode(FormatMode::Platform);
        assert_eq!(store.content(), "# title");
    }

    #[test]
    fn test_insert_image_reference_at_cursor() {
        let mut store = ContentStore::new();
        store.load("before\nafter".to_string(), None);
        store.set_cursor(7); // start of "after"
        store.insert_image_reference("assets/pic.png");
        assert_eq!(store.content(), "before\n![](assets/pic.png)\nafter");
    }

    #[test]
    fn test_insert_image_reference_clamps_to_end() {
        let mut store = ContentStore::new();
        store.load("ab".to_string(), None);
        store.set_cursor(999);
        store.insert_image_reference("x.png");
        assert_eq!(store.content(), "ab![](x.png)\n");
    }

    #[test]
    fn test_consecutive_insertions_stack_in_order() {
        let mut store = ContentStore::new();
        store.load(String::new(), None);
        store.insert_image_reference("a.png");
        store.insert_image_reference("b.png");
        assert_eq!(store.content(), "![](a.png)\n![](b.png)\n");
    }

    #[test]
    fn test_insert_respects_multibyte_chars() {
        let mut store = ContentStore::new();
        store.load("héllo".to_string(), None);
        store.set_cursor(2);
        store.insert_image_reference("x.png");
        assert_eq!(store.content(), "hé![](x.png)\nllo");
    }

    #[test]
    fn test_title_shows_dirty_marker() {
        let mut store = ContentStore::new();
        store.load("text".to_string(), Some(PathBuf::from("/tmp/post.md")));
        assert_eq!(store.title(), "post.md");
        store.set_content("text!".to_string());
        assert_eq!(store.title(), "post.md*");
    }

    #[test]
    fn test_untitled_document() {
        let store = ContentStore::new();
        assert_eq!(store.title(), "Untitled");
    }
}
