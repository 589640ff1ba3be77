//! Shell and deck configuration.

use inkdeck_core::DeckConfig;
use peniko::Color;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a JSON file with deck settings.
pub const CONFIG_ENV: &str = "INKDECK_CONFIG";

/// Window configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "InkDeck".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::from_rgba8(244, 244, 245, 255),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deck config in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read deck settings from a JSON file.
pub fn read_deck_config(path: &Path) -> Result<DeckConfig, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    DeckConfig::from_json(&json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Deck settings from the file named by [`CONFIG_ENV`], or the defaults when
/// the variable is unset.
pub fn load_deck_config() -> Result<DeckConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            log::info!("Loading deck config from {}", path.display());
            read_deck_config(&path)
        }
        None => Ok(DeckConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_deck_config_partial() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, r#"{ "fit_inset": 24.0, "animate_fit": true }"#).unwrap();

        let config = read_deck_config(&path).unwrap();
        assert!((config.fit_inset - 24.0).abs() < 1e-10);
        assert!(config.animate_fit);
        assert_eq!(config.slide_size(), DeckConfig::default().slide_size());
    }

    #[test]
    fn test_read_deck_config_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_deck_config(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = read_deck_config(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
