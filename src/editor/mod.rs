//! Source pane for Pressmark
//!
//! The editable raw-markdown widget and its syntect-based source
//! highlighting.

mod highlight;
mod widget;

pub use widget::{SourceOutput, SourcePane, SourcePaneState, SOURCE_PANE_PADDING};
