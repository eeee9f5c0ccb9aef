//! Image ingestion for Pressmark
//!
//! Files dropped or pasted onto the source pane pass through a screening
//! policy (`ingest`) and are then handed to an image host (`host`) that
//! stores each one independently and reports completions asynchronously.

mod host;
mod ingest;

pub use host::{ImageHost, LocalImageHost, UploadOutcome};
pub use ingest::{screen_files, IngestReport, IngestedFile, Notice, NoticeLevel, MAX_UPLOAD_BYTES};
