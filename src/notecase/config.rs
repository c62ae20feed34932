use crate::error::{NotecaseError, Result};
use crate::model::{ImportMode, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_STORAGE_KEY: &str = "secureNotes";

/// Keys accepted by [`NotecaseConfig::get`] and [`NotecaseConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "storage-key",
    "default-language",
    "import-mode",
    "compress-exports",
];

/// Configuration for notecase, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotecaseConfig {
    /// Key the note collection is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Language label for code notes added without one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Import mode used when stdin is not a terminal and none was given
    #[serde(default)]
    pub default_import_mode: ImportMode,

    /// Gzip exports that are written to a generated file name
    #[serde(default)]
    pub compress_exports: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for NotecaseConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_language: default_language(),
            default_import_mode: ImportMode::default(),
            compress_exports: false,
        }
    }
}

impl NotecaseConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotecaseError::Io)?;
        let config: NotecaseConfig =
            serde_json::from_str(&content).map_err(NotecaseError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotecaseError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotecaseError::Serialization)?;
        fs::write(config_path, content).map_err(NotecaseError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "default-language" => Some(self.default_language.clone()),
            "import-mode" => Some(self.default_import_mode.to_string()),
            "compress-exports" => Some(self.compress_exports.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "storage-key" => {
                if value.is_empty() {
                    return Err("storage-key cannot be empty".to_string());
                }
                self.storage_key = value.to_string();
            }
            "default-language" => {
                if value.is_empty() {
                    return Err("default-language cannot be empty".to_string());
                }
                self.default_language = value.to_string();
            }
            "import-mode" => self.default_import_mode = value.parse()?,
            "compress-exports" => {
                self.compress_exports = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Expected true or false, got {}", other)),
                }
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}
