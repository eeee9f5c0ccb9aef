//! Pane synchronization for Pressmark
//!
//! This module keeps the source editor and the rendered preview aligned:
//! `scroll` maps a scroll offset in one pane to the corresponding offset in
//! the other, and `bridge` dispatches pane events into side-effect lists so
//! the echo-avoidance and focus-gating logic stays testable without a UI.

mod bridge;
mod scroll;

pub use bridge::{EditorBridge, Effect, PaneEvent};
pub use scroll::{Pane, ScrollCommand, ScrollMetrics, ScrollSync};
