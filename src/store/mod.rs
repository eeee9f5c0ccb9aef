//! Application state stores for Pressmark
//!
//! The original design held content and navbar state in ambient injected
//! stores; here they are explicit context objects owned by the app assembly
//! and passed down by reference, mutated only through command methods.

mod content;
mod navbar;

pub use content::ContentStore;
pub use navbar::NavbarState;
