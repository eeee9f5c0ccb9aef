//! UI chrome for Pressmark
//!
//! Toolbar, style-override editor pane, and the toast overlay.

mod style_editor;
mod toasts;
mod toolbar;

pub use style_editor::StyleEditorPane;
pub use toasts::Toasts;
pub use toolbar::{toolbar, ToolbarAction};
