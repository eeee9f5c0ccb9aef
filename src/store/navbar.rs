//! Toolbar and chrome toggle flags
//!
//! UI-only state: nothing here feeds the renderer or the document. Owned by
//! the app assembly next to the content store.

/// Toggle flags for the toolbar and auxiliary panes.
#[derive(Debug, Clone)]
pub struct NavbarState {
    /// Whether the style-override editor pane is visible
    pub style_editor_open: bool,
    /// Whether scroll synchronization is on (mirrored into the bridge)
    pub sync_scroll: bool,
}

impl Default for NavbarState {
    fn default() -> Self {
        Self {
            style_editor_open: false,
            sync_scroll: true,
        }
    }
}

impl NavbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_style_editor(&mut self) {
        self.style_editor_open = !self.style_editor_open;
    }

    pub fn toggle_sync_scroll(&mut self) {
        self.sync_scroll = !self.sync_scroll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let navbar = NavbarState::new();
        assert!(!navbar.style_editor_open);
        assert!(navbar.sync_scroll);
    }

    #[test]
    fn test_toggles() {
        let mut navbar = NavbarState::new();
        navbar.toggle_style_editor();
        assert!(navbar.style_editor_open);
        navbar.toggle_sync_scroll();
        assert!(!navbar.sync_scroll);
    }
}
