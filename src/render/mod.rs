//! Markdown rendering for Pressmark
//!
//! A pure text → HTML mapping with two profiles: `Platform` emits the
//! inline-styled fragment the publishing platform requires, `Generic` emits
//! plain GFM HTML. Clipboard and file export wrap the same `render` call.

mod clipboard;
mod export;
mod profiles;
mod styles;

pub use clipboard::copy_rendered;
pub use export::{export_to_file, generate_document};
pub use profiles::{render, FormatMode};
pub use styles::StyleSheet;
