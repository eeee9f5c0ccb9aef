//! Document file handling
//!
//! Native open/save dialogs (rfd) and UTF-8 read/write for the markdown
//! document and HTML exports.

use std::fs;
use std::path::{Path, PathBuf};

use rfd::FileDialog;

use crate::error::{Error, Result};

/// File extension filters for supported file types.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

// ─────────────────────────────────────────────────────────────────────────────
// Dialogs
// ─────────────────────────────────────────────────────────────────────────────

/// Native open dialog for a markdown document.
///
/// Returns `None` if cancelled.
pub fn open_document_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Document")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("All Files", &["*"]);
    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// Native save dialog for the markdown document.
pub fn save_document_dialog(
    initial_dir: Option<&Path>,
    default_name: Option<&str>,
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Document")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("All Files", &["*"]);
    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }
    if let Some(name) = default_name {
        dialog = dialog.set_file_name(name);
    }
    dialog.save_file()
}

/// Native save dialog for an HTML export.
pub fn export_html_dialog(initial_dir: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Export HTML")
        .add_filter("HTML Files", HTML_EXTENSIONS)
        .set_file_name(default_name);
    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

// ─────────────────────────────────────────────────────────────────────────────
// Read / Write
// ─────────────────────────────────────────────────────────────────────────────

/// Read a document as UTF-8.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document as UTF-8.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        write_document(&path, "# hello\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# hello\n");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let err = read_document(Path::new("/no/such/post.md")).unwrap_err();
        match err {
            Error::FileRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/no/such/post.md"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let err = write_document(Path::new("/no/such/dir/post.md"), "x").unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }
}
