//! Toast overlay
//!
//! Transient advisories stacked in the bottom-right corner. Errors linger a
//! little longer than informational notices; everything expires on its own.

use egui::{Align2, Color32, Context};

use crate::upload::{Notice, NoticeLevel};

/// Seconds an info/warning toast stays visible.
const NOTICE_SECS: f64 = 3.0;

/// Seconds an error toast stays visible.
const ERROR_SECS: f64 = 5.0;

/// Active toast queue; push notices, show every frame.
#[derive(Debug, Default)]
pub struct Toasts {
    entries: Vec<(Notice, Option<f64>)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice. Expiry is stamped on first show, so notices pushed
    /// before the first frame don't expire early.
    pub fn push(&mut self, notice: Notice) {
        self.entries.push((notice, None));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the overlay and drop expired entries.
    pub fn show(&mut self, ctx: &Context) {
        if self.entries.is_empty() {
            return;
        }
        let now = ctx.input(|i| i.time);

        for (notice, expires_at) in &mut self.entries {
            if expires_at.is_none() {
                let lifetime = match notice.level {
                    NoticeLevel::Error => ERROR_SECS,
                    NoticeLevel::Info | NoticeLevel::Warning => NOTICE_SECS,
                };
                *expires_at = Some(now + lifetime);
            }
        }
        self.entries
            .retain(|(_, expires_at)| expires_at.map(|t| t > now).unwrap_or(true));
        if self.entries.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toast_overlay"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .interactable(false)
            .show(ctx, |ui| {
                for (notice, _) in &self.entries {
                    let (icon, color) = match notice.level {
                        NoticeLevel::Info => ("ℹ", Color32::from_rgb(0x4a, 0x90, 0xd9)),
                        NoticeLevel::Warning => ("⚠", Color32::from_rgb(0xd9, 0xa4, 0x2a)),
                        NoticeLevel::Error => ("✗", Color32::from_rgb(0xd9, 0x4a, 0x4a)),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(color, icon);
                            ui.label(&notice.message);
                        });
                    });
                }
            });

        // Keep repainting while toasts are on screen so expiry happens
        // without further input.
        ctx.request_repaint();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_queues_entries() {
        let mut toasts = Toasts::new();
        assert!(toasts.is_empty());
        toasts.push(Notice::info("saved"));
        toasts.push(Notice::error("failed"));
        assert!(!toasts.is_empty());
        assert_eq!(toasts.entries.len(), 2);
    }

    #[test]
    fn test_expiry_is_unstamped_until_first_show() {
        let mut toasts = Toasts::new();
        toasts.push(Notice::warning("careful"));
        assert!(toasts.entries[0].1.is_none());
    }
}
