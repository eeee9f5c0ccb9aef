//! Configuration module for Pressmark
//!
//! User preferences (render profile default, sync scrolling, style
//! overrides, window geometry) serialized to JSON in the platform config
//! directory.

mod persistence;
mod settings;

pub use persistence::{load_config, save_config, save_config_silent};
pub use settings::{Settings, Theme, WindowSize};
