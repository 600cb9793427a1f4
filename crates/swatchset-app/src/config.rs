//! Shell configuration.
//!
//! Read from `<config_dir>/swatchset/config.json` (or an explicit path). A
//! missing file means defaults; a malformed one is an error.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swatchset_render::ExportOptions;

/// Smallest width/height accepted from the user.
pub const MIN_EXPORT_DIMENSION: u32 = 100;
/// Largest width/height accepted from the user.
pub const MAX_EXPORT_DIMENSION: u32 = 3000;

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Where palette state is stored. `None` uses the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Where exported images are written.
    pub output_dir: PathBuf,
    /// Font used for text. `None` searches common system fonts.
    pub font_path: Option<PathBuf>,
    /// Bold face for titles. `None` synthesizes bold from `font_path`.
    pub bold_font_path: Option<PathBuf>,
    /// Defaults for the export command.
    pub export: ExportOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            output_dir: PathBuf::from("."),
            font_path: None,
            bold_font_path: None,
            export: ExportOptions::default(),
        }
    }
}

impl AppConfig {
    /// Platform config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swatchset").join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or from [`AppConfig::default_path`] when `None`.
    ///
    /// An explicit path must exist; the default path may be absent.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| AppError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config = serde_json::from_str(&content)
            .map_err(|source| AppError::ConfigParse { path: path.clone(), source })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Clamp a user-supplied export dimension into the accepted range.
pub fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_EXPORT_DIMENSION, MAX_EXPORT_DIMENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatchset_render::Orientation;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.export.width, 800);
        assert_eq!(config.export.height, 600);
        assert!(config.export.show_titles);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"outputDir": "/tmp/out", "export": {"width": 1200, "height": 300, "orientation": "vertical", "showTitles": false}}"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.export.width, 1200);
        assert_eq!(config.export.orientation, Orientation::Vertical);
        assert!(config.font_path.is_none());
        assert!(config.bold_font_path.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(AppConfig::load(Some(&path)), Err(AppError::ConfigParse { .. })));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(AppConfig::load(Some(&path)), Err(AppError::ConfigRead { .. })));
    }

    #[test]
    fn test_clamp_dimension() {
        assert_eq!(clamp_dimension(5), 100);
        assert_eq!(clamp_dimension(800), 800);
        assert_eq!(clamp_dimension(10_000), 3000);
    }
}
