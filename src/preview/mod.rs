//! Preview pane for Pressmark
//!
//! The read-only rendered view that mirrors the source pane's document and
//! participates in scroll synchronization.

mod widget;

pub use widget::{PreviewOutput, PreviewPane, PreviewPaneState, PREVIEW_PANE_PADDING};
