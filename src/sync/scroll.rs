//! Bidirectional scroll synchronization between the source and preview panes
//!
//! The two panes render the same document at different heights, so keeping
//! them aligned is a proportional remapping: the scale factor between the
//! panes' scrollable ranges is recomputed from fresh metrics on every event
//! (content height changes as the user types, so caching it would cause the
//! preview to drift).
//!
//! # Echo suppression
//!
//! Synchronizing pane A writes pane B's scroll offset, which the UI layer may
//! report back as a scroll event on B. The synchronizer only acts when the
//! originating pane is the *active* pane (the one the pointer most recently
//! entered), so the reflected event is dropped instead of bouncing the
//! offset back and forth.

// Allow dead code - the synchronizer exposes a complete accessor API; the
// app drives it through the bridge and doesn't touch every method
#![allow(dead_code)]

use log::trace;

// ─────────────────────────────────────────────────────────────────────────────
// Pane Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies which pane an event or command refers to.
///
/// `Pane::None` is the idle state before the pointer has entered either pane;
/// no synchronization happens while it is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// The editable raw-markdown pane
    Source,
    /// The read-only rendered pane
    Preview,
    /// Neither pane has been interacted with yet
    #[default]
    None,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Metrics
// ─────────────────────────────────────────────────────────────────────────────

/// A snapshot of one pane's scroll geometry.
///
/// Recomputed from the live widget on every frame; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset in points (≥ 0)
    pub offset: f32,
    /// Height of the visible viewport in points (> 0)
    pub viewport_height: f32,
    /// Total height of the laid-out content in points
    pub content_height: f32,
}

impl ScrollMetrics {
    pub fn new(offset: f32, viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset,
            viewport_height,
            content_height,
        }
    }

    /// Distance the pane can scroll: content height minus viewport height.
    ///
    /// Zero or negative when the content fits inside the viewport.
    pub fn scrollable_range(&self) -> f32 {
        self.content_height - self.viewport_height
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Command
// ─────────────────────────────────────────────────────────────────────────────

/// A programmatic scroll the UI layer must apply to the non-originating pane.
///
/// Applying a command must not be reported back as a user scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCommand {
    /// Set the preview pane's scroll offset
    ScrollPreviewTo(f32),
    /// Set the source pane's scroll offset
    ScrollSourceTo(f32),
}

impl ScrollCommand {
    /// The pane this command targets.
    pub fn target(&self) -> Pane {
        match self {
            ScrollCommand::ScrollPreviewTo(_) => Pane::Preview,
            ScrollCommand::ScrollSourceTo(_) => Pane::Source,
        }
    }

    /// The offset this command carries.
    pub fn offset(&self) -> f32 {
        match self {
            ScrollCommand::ScrollPreviewTo(o) | ScrollCommand::ScrollSourceTo(o) => *o,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Synchronizer
// ─────────────────────────────────────────────────────────────────────────────

/// Maps a scroll offset in the active pane to the matching offset in the
/// other pane.
///
/// The synchronizer owns two pieces of state: whether syncing is enabled and
/// which pane is active. Everything else (metrics, scale, padding) is
/// supplied fresh per call.
#[derive(Debug, Clone)]
pub struct ScrollSync {
    /// Whether synchronization is enabled (toolbar toggle)
    enabled: bool,
    /// Pane the pointer most recently entered; last writer wins
    active: Pane,
    /// Correction added to the preview's scrollable range, derived from the
    /// difference between the two panes' frame insets
    padding_correction: f32,
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSync {
    pub fn new() -> Self {
        Self {
            enabled: true,
            active: Pane::None,
            padding_correction: 0.0,
        }
    }

    /// Enable or disable synchronization.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the pane the pointer entered. Pure assignment, no validation.
    pub fn set_active_pane(&mut self, pane: Pane) {
        self.active = pane;
    }

    pub fn active_pane(&self) -> Pane {
        self.active
    }

    /// Update the preview-range correction from the panes' measured frame
    /// insets. The two widgets pad their content differently, so the raw
    /// content heights are not directly comparable.
    pub fn set_padding_correction(&mut self, correction: f32) {
        self.padding_correction = correction;
    }

    /// Handle a user scroll on `origin` and compute the matching offset for
    /// the other pane.
    ///
    /// Returns `None` (both panes untouched) when:
    /// - synchronization is disabled,
    /// - `origin` is not the active pane (residual echo from a programmatic
    ///   scroll, or a scroll before any pointer interaction),
    /// - either pane's scrollable range is ≤ 0 (content fits the viewport;
    ///   the scale would divide by zero).
    pub fn on_scroll(
        &self,
        origin: Pane,
        source: ScrollMetrics,
        preview: ScrollMetrics,
    ) -> Option<ScrollCommand> {
        if !self.enabled || origin == Pane::None {
            return None;
        }
        if self.active != origin {
            trace!(
                "dropping scroll from {:?} while {:?} is active",
                origin,
                self.active
            );
            return None;
        }

        let source_range = source.scrollable_range();
        let preview_range = preview.scrollable_range() + self.padding_correction;
        if source_range <= 0.0 || preview_range <= 0.0 {
            return None;
        }

        let scale = preview_range / source_range;
        let command = match origin {
            Pane::Source => ScrollCommand::ScrollPreviewTo(source.offset * scale),
            Pane::Preview => ScrollCommand::ScrollSourceTo(preview.offset / scale),
            Pane::None => unreachable!("guarded above"),
        };
        trace!("sync {:?}: scale {:.3} -> {:?}", origin, scale, command);
        Some(command)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sync_with_active(pane: Pane) -> ScrollSync {
        let mut sync = ScrollSync::new();
        sync.set_active_pane(pane);
        sync
    }

    #[test]
    fn test_source_scroll_scales_to_preview() {
        let sync = sync_with_active(Pane::Source);
        // source range 1000, preview range 2000 -> scale 2.0
        let source = ScrollMetrics::new(150.0, 500.0, 1500.0);
        let preview = ScrollMetrics::new(0.0, 600.0, 2600.0);

        let cmd = sync.on_scroll(Pane::Source, source, preview).unwrap();
        assert_eq!(cmd.target(), Pane::Preview);
        assert!((cmd.offset() - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_preview_scroll_divides_back_to_source() {
        let sync = sync_with_active(Pane::Preview);
        let source = ScrollMetrics::new(0.0, 500.0, 1500.0);
        let preview = ScrollMetrics::new(300.0, 600.0, 2600.0);

        let cmd = sync.on_scroll(Pane::Preview, source, preview).unwrap();
        assert_eq!(cmd.target(), Pane::Source);
        assert!((cmd.offset() - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_round_trip_is_consistent() {
        // Mapping source -> preview and feeding the result back as a preview
        // scroll must land on the original source offset.
        let mut sync = ScrollSync::new();
        let source = ScrollMetrics::new(420.0, 500.0, 1500.0);
        let preview = ScrollMetrics::new(0.0, 600.0, 3100.0);

        sync.set_active_pane(Pane::Source);
        let forward = sync.on_scroll(Pane::Source, source, preview).unwrap();

        sync.set_active_pane(Pane::Preview);
        let preview_after = ScrollMetrics::new(forward.offset(), 600.0, 3100.0);
        let back = sync.on_scroll(Pane::Preview, source, preview_after).unwrap();
        assert!((back.offset() - 420.0).abs() < 0.01);
    }

    #[test]
    fn test_idempotent_for_identical_metrics() {
        let sync = sync_with_active(Pane::Source);
        let source = ScrollMetrics::new(100.0, 400.0, 900.0);
        let preview = ScrollMetrics::new(0.0, 400.0, 1400.0);

        let first = sync.on_scroll(Pane::Source, source, preview);
        let second = sync.on_scroll(Pane::Source, source, preview);
        assert_eq!(first, second);
    }

    #[test]
    fn test_echo_from_inactive_pane_is_dropped() {
        // Source is active; a scroll event reported by the preview is the
        // reflection of our own programmatic move and must not sync back.
        let sync = sync_with_active(Pane::Source);
        let source = ScrollMetrics::new(100.0, 400.0, 900.0);
        let preview = ScrollMetrics::new(250.0, 400.0, 1400.0);

        assert_eq!(sync.on_scroll(Pane::Preview, source, preview), None);
    }

    #[test]
    fn test_no_sync_before_any_pointer_interaction() {
        let sync = ScrollSync::new();
        let source = ScrollMetrics::new(100.0, 400.0, 900.0);
        let preview = ScrollMetrics::new(0.0, 400.0, 1400.0);

        assert_eq!(sync.on_scroll(Pane::Source, source, preview), None);
        assert_eq!(sync.on_scroll(Pane::None, source, preview), None);
    }

    #[test]
    fn test_zero_source_range_is_a_noop() {
        let sync = sync_with_active(Pane::Source);
        // Content shorter than the viewport: range is negative.
        let source = ScrollMetrics::new(0.0, 500.0, 300.0);
        let preview = ScrollMetrics::new(0.0, 400.0, 1400.0);

        assert_eq!(sync.on_scroll(Pane::Source, source, preview), None);
    }

    #[test]
    fn test_zero_preview_range_is_a_noop() {
        let sync = sync_with_active(Pane::Preview);
        let source = ScrollMetrics::new(0.0, 500.0, 1500.0);
        let preview = ScrollMetrics::new(0.0, 400.0, 400.0);

        assert_eq!(sync.on_scroll(Pane::Preview, source, preview), None);
    }

    #[test]
    fn test_disabled_sync_is_a_noop() {
        let mut sync = sync_with_active(Pane::Source);
        sync.set_enabled(false);
        let source = ScrollMetrics::new(100.0, 400.0, 900.0);
        let preview = ScrollMetrics::new(0.0, 400.0, 1400.0);

        assert_eq!(sync.on_scroll(Pane::Source, source, preview), None);
    }

    #[test]
    fn test_padding_correction_shifts_scale() {
        let mut sync = sync_with_active(Pane::Source);
        sync.set_padding_correction(100.0);
        // preview range 900 + 100 correction = 1000; source range 500
        let source = ScrollMetrics::new(50.0, 500.0, 1000.0);
        let preview = ScrollMetrics::new(0.0, 600.0, 1500.0);

        let cmd = sync.on_scroll(Pane::Source, source, preview).unwrap();
        assert!((cmd.offset() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_active_pane_last_writer_wins() {
        let mut sync = ScrollSync::new();
        sync.set_active_pane(Pane::Source);
        sync.set_active_pane(Pane::Preview);
        assert_eq!(sync.active_pane(), Pane::Preview);
    }
}
