//! Configuration management for Lingo

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Directory with one subdirectory per study language
    pub languages_dir: PathBuf,

    /// Directory tree of documents to study
    pub texts_dir: PathBuf,

    /// File naming the interface language (e.g. `en`)
    pub interface_language_file: PathBuf,

    /// Scratch directory for pronunciation clips
    pub audio_dir: PathBuf,

    /// Command used to play a clip; the clip path is appended
    pub audio_player: Vec<String>,

    /// Terminal columns reserved per token in the reader grid
    pub cell_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            languages_dir: PathBuf::from("languages"),
            texts_dir: PathBuf::from("texts"),
            interface_language_file: PathBuf::from("setup/interfaceLanguage.txt"),
            audio_dir: PathBuf::from("audio"),
            audio_player: vec!["mpv".to_string(), "--really-quiet".to_string()],
            cell_width: 10,
        }
    }
}

impl Config {
    /// Load configuration from disk, writing the defaults if none exists.
    ///
    /// A config file that cannot be read or parsed is reported and replaced
    /// by the defaults for this run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            if let Err(e) = config.save() {
                tracing::warn!("Could not write default config: {:#}", e);
            }
            return Ok(config);
        }

        let parsed = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))
            .and_then(|contents| {
                serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
            });

        Ok(parsed.unwrap_or_else(|e| {
            tracing::warn!("{:#}; using defaults", e);
            Self::default()
        }))
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "lingo").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "lingo").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("lingo.log"))
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using Tokyo Night", self.theme);
            Theme::tokyo_night()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_working_directory_layout() {
        let config = Config::default();
        assert_eq!(config.languages_dir, PathBuf::from("languages"));
        assert_eq!(config.texts_dir, PathBuf::from("texts"));
        assert_eq!(config.interface_language_file, PathBuf::from("setup/interfaceLanguage.txt"));
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("Tokyo Night"));
        assert!(json.contains("languages_dir"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let json = r#"{"texts_dir":"/srv/texts","audio_player":["ffplay","-nodisp","-autoexit"]}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.texts_dir, PathBuf::from("/srv/texts"));
        assert_eq!(config.audio_player[0], "ffplay");
        assert_eq!(config.languages_dir, PathBuf::from("languages"));
        assert_eq!(config.cell_width, 10);
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config { theme: "Nope".into(), ..Default::default() };
        assert_eq!(config.active_theme().name, "Tokyo Night");
    }
}
