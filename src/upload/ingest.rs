//! Screening policy for dropped and pasted files
//!
//! Drops and pastes arrive as a finite, already-materialized list. Each file
//! is screened independently: oversized files are rejected with an error
//! notice, files that don't look like images are forwarded anyway with a
//! warning, and everything else is forwarded as-is. One bad file never
//! blocks its siblings.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

/// Size ceiling for a single uploaded image.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Notices
// ─────────────────────────────────────────────────────────────────────────────

/// Severity of a user-visible advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient, user-visible advisory (rendered as a toast).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ingested Files
// ─────────────────────────────────────────────────────────────────────────────

/// A dropped or pasted file, normalized from egui's `DroppedFile`.
///
/// Web-style drops carry their bytes inline; native drops usually carry only
/// a path. Either source is enough for screening and storage.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    /// Display name (file name component for path drops)
    pub name: String,
    /// Declared MIME type, empty when the platform did not report one
    pub mime: String,
    /// Payload bytes, when the drop carried them inline
    pub bytes: Option<Arc<[u8]>>,
    /// Source path, for native drops
    pub path: Option<PathBuf>,
    /// Payload size in bytes
    pub len: u64,
}

impl IngestedFile {
    /// Build from an egui dropped file, resolving the payload size from the
    /// inline bytes or the file system.
    pub fn from_dropped(file: &egui::DroppedFile) -> Self {
        let name = if !file.name.is_empty() {
            file.name.clone()
        } else {
            file.path
                .as_ref()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or("pasted-image")
                .to_string()
        };
        let len = file
            .bytes
            .as_ref()
            .map(|b| b.len() as u64)
            .or_else(|| {
                file.path
                    .as_ref()
                    .and_then(|p| std::fs::metadata(p).ok())
                    .map(|m| m.len())
            })
            .unwrap_or(0);
        Self {
            name,
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
            path: file.path.clone(),
            len,
        }
    }

    /// Whether the declared type (MIME, extension, or sniffed magic bytes)
    /// indicates an image.
    pub fn looks_like_image(&self) -> bool {
        if !self.mime.is_empty() {
            return self.mime.starts_with("image/");
        }
        if let Some(bytes) = &self.bytes {
            return image::guess_format(bytes).is_ok();
        }
        self.path
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|ext| {
                matches!(
                    ext.to_lowercase().as_str(),
                    "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg"
                )
            })
            .unwrap_or(false)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Screening
// ─────────────────────────────────────────────────────────────────────────────

/// Result of screening a batch of dropped or pasted files.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Files to hand to the image host, in drop order
    pub forwarded: Vec<IngestedFile>,
    /// Advisories to surface to the user
    pub notices: Vec<Notice>,
}

/// Apply the upload policy to a batch of files.
///
/// - over [`MAX_UPLOAD_BYTES`]: rejected, error notice, siblings proceed
/// - declared type not an image: warning notice, still forwarded
/// - everything else: forwarded without comment
pub fn screen_files(files: Vec<IngestedFile>) -> IngestReport {
    let mut report = IngestReport::default();
    for file in files {
        if file.len > MAX_UPLOAD_BYTES {
            debug!("rejecting {} ({} bytes)", file.name, file.len);
            report.notices.push(Notice::error(format!(
                "{} is larger than 5 MiB and was skipped",
                file.name
            )));
            continue;
        }
        if !file.looks_like_image() {
            report.notices.push(Notice::warning(format!(
                "{} does not look like an image",
                file.name
            )));
        }
        report.forwarded.push(file);
    }
    report
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_mixed_batch_policy() {
        // 1 MiB png, 6 MiB png, 3 MiB text file
        let report = screen_files(vec![
            file("a.png", "image/png", 1024 * 1024),
            file("b.png", "image/png", 6 * 1024 * 1024),
            file("c.txt", "text/plain", 3 * 1024 * 1024),
        ]);

        assert_eq!(report.forwarded.len(), 2);
        assert_eq!(report.forwarded[0].name, "a.png");
        assert_eq!(report.forwarded[1].name, "c.txt");

        assert_eq!(report.notices.len(), 2);
        assert_eq!(report.notices[0].level, NoticeLevel::Error);
        assert!(report.notices[0].message.contains("b.png"));
        assert_eq!(report.notices[1].level, NoticeLevel::Warning);
        assert!(report.notices[1].message.contains("c.txt"));
    }

    #[test]
    fn test_oversized_rejection_does_not_block_siblings() {
        let report = screen_files(vec![
            file("big.png", "image/png", MAX_UPLOAD_BYTES + 1),
            file("small.png", "image/png", 10),
        ]);
        assert_eq!(report.forwarded.len(), 1);
        assert_eq!(report.forwarded[0].name, "small.png");
    }

    #[test]
    fn test_exactly_at_ceiling_is_forwarded() {
        let report = screen_files(vec![file("edge.png", "image/png", MAX_UPLOAD_BYTES)]);
        assert_eq!(report.forwarded.len(), 1);
        assert!(report.notices.is_empty());
    }

    #[test]
    fn test_non_image_is_warned_but_forwarded() {
        let report = screen_files(vec![file("notes.txt", "text/plain", 128)]);
        assert_eq!(report.forwarded.len(), 1);
        assert_eq!(report.notices.len(), 1);
        assert_eq!(report.notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_empty_batch_is_silent() {
        let report = screen_files(Vec::new());
        assert!(report.forwarded.is_empty());
        assert!(report.notices.is_empty());
    }

    #[test]
    fn test_image_detection_by_extension() {
        let f = IngestedFile {
            name: "shot.PNG".to_string(),
            mime: String::new(),
            bytes: None,
            path: Some(PathBuf::from("/tmp/shot.PNG")),
            len: 10,
        };
        assert!(f.looks_like_image());
    }

    #[test]
    fn test_image_detection_by_magic_bytes() {
        // PNG signature
        let png: Arc<[u8]> = Arc::from(&b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"[..]);
        let f = IngestedFile {
            name: "clipboard".to_string(),
            mime: String::new(),
            bytes: Some(png),
            path: None,
            len: 16,
        };
        assert!(f.looks_like_image());
    }
}
