//! Configuration file persistence for Pressmark
//!
//! Loading and saving the settings file in the platform config directory,
//! with graceful fallback to defaults when the file is missing or corrupt.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "pressmark";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Scratch file name used during atomic writes
const CONFIG_SCRATCH_NAME: &str = "config.json.tmp";

// ─────────────────────────────────────────────────────────────────────────────
// Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Platform-specific configuration directory for the application.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.clone(),
            source: Box::new(e),
        })?;
    }
    Ok(config_dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration, falling back to defaults when the file is missing,
/// empty, or corrupt.
pub fn load_config() -> Settings {
    load_config_internal()
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

fn load_config_internal() -> Result<Settings> {
    let config_path = get_config_file_path()?;

    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!("Configuration loaded from {}", config_path.display());
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration atomically: write to a scratch file, then rename over
/// the real one.
pub fn save_config(settings: &Settings) -> Result<()> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let scratch_path = config_dir.join(CONFIG_SCRATCH_NAME);

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    fs::write(&scratch_path, &json).map_err(|e| Error::ConfigSave {
        path: scratch_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&scratch_path, &config_path).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    debug!("Configuration saved to {}", config_path.display());
    Ok(())
}

/// Best-effort save for exit paths; failures are logged, not surfaced.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::render::FormatMode;

    #[test]
    fn test_get_config_dir_names_the_app() {
        let path = get_config_dir().unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_get_config_file_path() {
        let path = get_config_file_path().unwrap();
        assert!(path.to_string_lossy().ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_settings_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE_NAME);

        let mut settings = Settings::default();
        settings.theme = Theme::Dark;
        settings.format_mode = FormatMode::Generic;
        settings.style_overrides = "p { margin: 0; }".to_string();

        let json = serde_json::to_string_pretty(&settings).unwrap();
        fs::write(&file, &json).unwrap();

        let contents = fs::read_to_string(&file).unwrap();
        let loaded = Settings::from_json_sanitized(&contents).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_corrupt_settings_fail_to_parse() {
        let result = Settings::from_json_sanitized("{ not json }");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_never_panics() {
        // Whatever is (or isn't) on disk, the public API returns settings.
        let settings = load_config();
        assert!(settings.font_size >= Settings::MIN_FONT_SIZE);
    }
}
