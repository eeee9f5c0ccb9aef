//! Local image host
//!
//! The default upload collaborator: screened files are copied into an
//! `assets/` directory next to the current document, one detached worker per
//! file. Completions arrive over a channel and are drained once per frame;
//! there is no ordering guarantee between sibling uploads and no aggregate
//! completion signal.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use log::{debug, warn};

use super::ingest::IngestedFile;

/// Directory name created beside the document for stored images.
const ASSETS_DIR_NAME: &str = "assets";

// ─────────────────────────────────────────────────────────────────────────────
// Outcomes
// ─────────────────────────────────────────────────────────────────────────────

/// Completion report for a single upload job.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// The payload was written; `reference` is the markdown-relative path to
    /// insert into the document.
    Stored { name: String, reference: String },
    /// The payload could not be written; siblings are unaffected.
    Failed { name: String, error: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Trait
// ─────────────────────────────────────────────────────────────────────────────

/// An image storage collaborator. `store` is fire-and-forget: each file is an
/// independent unit of work and failure reporting happens out of band.
pub trait ImageHost {
    fn store(&self, file: IngestedFile);
}

// ─────────────────────────────────────────────────────────────────────────────
// Local Host
// ─────────────────────────────────────────────────────────────────────────────

/// Stores images in an `assets/` directory beside the current document.
///
/// For unsaved documents the platform data directory is used instead and the
/// inserted reference is absolute.
#[derive(Debug)]
pub struct LocalImageHost {
    /// Directory payloads are written into
    assets_dir: PathBuf,
    /// Whether inserted references can be document-relative
    relative_refs: bool,
    sender: Sender<UploadOutcome>,
    receiver: Receiver<UploadOutcome>,
}

impl LocalImageHost {
    /// Create a host rooted at the platform data directory (unsaved
    /// document).
    pub fn new() -> Self {
        let fallback = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("pressmark")
            .join(ASSETS_DIR_NAME);
        let (sender, receiver) = channel();
        Self {
            assets_dir: fallback,
            relative_refs: false,
            sender,
            receiver,
        }
    }

    /// Re-root the host beside a saved document. Subsequent references are
    /// relative to the document's directory.
    pub fn set_document_path(&mut self, document: &Path) {
        if let Some(parent) = document.parent() {
            self.assets_dir = parent.join(ASSETS_DIR_NAME);
            self.relative_refs = true;
            debug!("image host rooted at {}", self.assets_dir.display());
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Drain completions reported since the last poll. Non-blocking.
    pub fn poll_outcomes(&self) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.receiver.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Pick a destination file name that does not collide with an existing
    /// asset.
    fn unique_destination(dir: &Path, name: &str) -> PathBuf {
        let sanitized: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            })
            .collect();
        let candidate = dir.join(&sanitized);
        if !candidate.exists() {
            return candidate;
        }
        let stem = Path::new(&sanitized)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let ext = Path::new(&sanitized)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png");
        let mut counter = 1;
        loop {
            let next = dir.join(format!("{}-{}.{}", stem, counter, ext));
            if !next.exists() {
                return next;
            }
            counter += 1;
        }
    }

    /// Blocking body of one upload job; runs on the worker thread.
    fn run_job(
        assets_dir: PathBuf,
        relative_refs: bool,
        file: IngestedFile,
        tx: &Sender<UploadOutcome>,
    ) {
        let result = (|| -> std::io::Result<PathBuf> {
            fs::create_dir_all(&assets_dir)?;
            let dest = Self::unique_destination(&assets_dir, &file.name);
            match (&file.bytes, &file.path) {
                (Some(bytes), _) => fs::write(&dest, bytes)?,
                (None, Some(src)) => {
                    fs::copy(src, &dest)?;
                }
                (None, None) => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "dropped file carried neither bytes nor a path",
                    ));
                }
            }
            Ok(dest)
        })();

        let outcome = match result {
            Ok(dest) => {
                let reference = if relative_refs {
                    let file_name = dest
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or(&file.name);
                    format!("{}/{}", ASSETS_DIR_NAME, file_name)
                } else {
                    dest.display().to_string()
                };
                UploadOutcome::Stored {
                    name: file.name,
                    reference,
                }
            }
            Err(e) => {
                warn!("failed to store dropped image: {}", e);
                UploadOutcome::Failed {
                    name: file.name,
                    error: e.to_string(),
                }
            }
        };
        let _ = tx.send(outcome);
    }
}

impl Default for LocalImageHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageHost for LocalImageHost {
    fn store(&self, file: IngestedFile) {
        let assets_dir = self.assets_dir.clone();
        let relative_refs = self.relative_refs;
        let tx = self.sender.clone();
        thread::spawn(move || {
            Self::run_job(assets_dir, relative_refs, file, &tx);
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn inline_file(name: &str, payload: &[u8]) -> IngestedFile {
        IngestedFile {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: Some(Arc::from(payload)),
            path: None,
            len: payload.len() as u64,
        }
    }

    fn wait_for_outcome(host: &LocalImageHost) -> UploadOutcome {
        for _ in 0..100 {
            if let Some(outcome) = host.poll_outcomes().into_iter().next() {
                return outcome;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("upload did not complete");
    }

    #[test]
    fn test_stores_inline_bytes_and_reports_relative_reference() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("article.md");
        std::fs::write(&doc, "draft").unwrap();

        let mut host = LocalImageHost::new();
        host.set_document_path(&doc);
        host.store(inline_file("logo.png", b"not-really-a-png"));

        match wait_for_outcome(&host) {
            UploadOutcome::Stored { reference, .. } => {
                assert_eq!(reference, "assets/logo.png");
                let written = dir.path().join("assets").join("logo.png");
                assert_eq!(std::fs::read(written).unwrap(), b"not-really-a-png");
            }
            UploadOutcome::Failed { error, .. } => panic!("upload failed: {}", error),
        }
    }

    #[test]
    fn test_copies_from_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.jpg");
        std::fs::write(&src, b"jpeg-bytes").unwrap();
        let doc = dir.path().join("post.md");
        std::fs::write(&doc, "").unwrap();

        let mut host = LocalImageHost::new();
        host.set_document_path(&doc);
        host.store(IngestedFile {
            name: "photo.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: None,
            path: Some(src),
            len: 10,
        });

        match wait_for_outcome(&host) {
            UploadOutcome::Stored { reference, .. } => assert_eq!(reference, "assets/photo.jpg"),
            UploadOutcome::Failed { error, .. } => panic!("upload failed: {}", error),
        }
    }

    #[test]
    fn test_name_collisions_get_a_counter_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("post.md");
        std::fs::write(&doc, "").unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/logo.png"), b"old").unwrap();

        let dest =
            LocalImageHost::unique_destination(&dir.path().join("assets"), "logo.png");
        assert_eq!(dest.file_name().unwrap(), "logo-1.png");
    }

    #[test]
    fn test_payload_without_bytes_or_path_fails() {
        let host = LocalImageHost::new();
        host.store(IngestedFile {
            name: "ghost".to_string(),
            mime: String::new(),
            bytes: None,
            path: None,
            len: 0,
        });
        assert!(matches!(
            wait_for_outcome(&host),
            UploadOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_sibling_uploads_complete_independently() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("post.md");
        std::fs::write(&doc, "").unwrap();

        let mut host = LocalImageHost::new();
        host.set_document_path(&doc);
        host.store(inline_file("a.png", b"aaa"));
        host.store(IngestedFile {
            name: "missing.png".to_string(),
            mime: String::new(),
            bytes: None,
            path: None,
            len: 0,
        });
        host.store(inline_file("b.png", b"bbb"));

        let mut stored = 0;
        let mut failed = 0;
        let mut seen = 0;
        for _ in 0..100 {
            for outcome in host.poll_outcomes() {
                match outcome {
                    UploadOutcome::Stored { .. } => stored += 1,
                    UploadOutcome::Failed { .. } => failed += 1,
                }
                seen += 1;
            }
            if seen >= 3 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(stored, 2);
        assert_eq!(failed, 1);
    }
}
