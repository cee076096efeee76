//! keg configuration management.
//!
//! Handles the configuration file at:
//! - Linux: ~/.config/keg/config.toml
//! - macOS: ~/Library/Application Support/keg/config.toml
//! - Windows: %APPDATA%\keg\config.toml
//!
//! `KEG_CONFIG` overrides the location.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KegError, Result};
use crate::fs_utils::StagedWrites;

/// Valid values of `logging.level`
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// keg configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KegConfig {
    /// Name of the keg used when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,

    /// Editor command used to open node documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Named kegs
    #[serde(default)]
    pub kegs: BTreeMap<String, PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Location of the configuration file
pub fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("KEG_CONFIG") {
        return PathBuf::from(p);
    }
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("keg")
        .join("config.toml")
}

impl KegConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| KegError::Config {
            message: format!("Failed to parse config {}: {}", path.display(), e),
        })
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| KegError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        let mut staged = StagedWrites::new();
        staged.stage(path, &content)?;
        staged.commit()?;
        Ok(())
    }

    /// Path of a named keg
    pub fn keg(&self, name: &str) -> Option<&PathBuf> {
        self.kegs.get(name)
    }

    /// Get a configuration value by key path (e.g., "logging.level")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.splitn(2, '.').collect();
        match parts.as_slice() {
            ["current"] => self.current.clone(),
            ["editor"] => self.editor.clone(),
            ["logging", "level"] => Some(self.logging.level.clone()),
            ["kegs", name] => self.kegs.get(*name).map(|p| p.display().to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key path. An empty value clears
    /// optional keys and removes named kegs.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.splitn(2, '.').collect();
        match parts.as_slice() {
            ["current"] => {
                if value.is_empty() {
                    self.current = None;
                } else if !self.kegs.contains_key(value) {
                    return Err(KegError::Config {
                        message: format!("Unknown keg: {}. Add it with kegs.{} first", value, value),
                    });
                } else {
                    self.current = Some(value.to_string());
                }
            }
            ["editor"] => {
                self.editor = (!value.is_empty()).then(|| value.to_string());
            }
            ["logging", "level"] => {
                if !LOG_LEVELS.contains(&value) {
                    return Err(KegError::Config {
                        message: format!(
                            "Invalid log level: {}. Must be one of: {}",
                            value,
                            LOG_LEVELS.join(", ")
                        ),
                    });
                }
                self.logging.level = value.to_string();
            }
            ["kegs", name] if !name.is_empty() => {
                if value.is_empty() {
                    self.kegs.remove(*name);
                    if self.current.as_deref() == Some(*name) {
                        self.current = None;
                    }
                } else {
                    self.kegs.insert(name.to_string(), PathBuf::from(value));
                }
            }
            _ => {
                return Err(KegError::Config {
                    message: format!("Unknown configuration key: {}", key),
                });
            }
        }
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Display configuration as formatted text
    pub fn display(&self) -> String {
        let mut output = String::new();

        match &self.current {
            Some(c) => output.push_str(&format!("current = \"{}\"\n", c)),
            None => output.push_str("# current = \"<name>\" (unset)\n"),
        }
        match &self.editor {
            Some(e) => output.push_str(&format!("editor = \"{}\"\n", e)),
            None => output.push_str("# editor = \"$VISUAL, $EDITOR or vi\" (default)\n"),
        }

        output.push_str("\n[logging]\n");
        output.push_str(&format!("level = \"{}\"\n", self.logging.level));

        output.push_str("\n[kegs]\n");
        for (name, path) in &self.kegs {
            output.push_str(&format!("{} = \"{}\"\n", name, path.display()));
        }

        output
    }

    /// Editor command: `$VISUAL`, `$EDITOR`, the configured editor, then `vi`.
    pub fn editor_command(&self) -> String {
        ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|v| std::env::var(v).ok())
            .find(|v| !v.trim().is_empty())
            .or_else(|| self.editor.clone())
            .unwrap_or_else(|| "vi".to_string())
    }
}
