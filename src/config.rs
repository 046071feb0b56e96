//! Configuration management for ifacectl

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use regex::Regex;
use crate::error::{IfacesError, IfacesResult};
use crate::interfaces_file::{
    LoadOptions, DEFAULT_BACKUP_SUFFIX, DEFAULT_HEADER, SOURCE_DIRECTORY_PATTERN,
};

/// Main ifacectl configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IfacesConfig {
    /// File locations
    #[serde(default)]
    pub paths: ConfigPaths,
    /// Loader and writer settings
    #[serde(default)]
    pub defaults: DefaultSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigPaths {
    /// Top-level interfaces file
    #[serde(default = "default_interfaces")]
    pub interfaces: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Comment block written at the top of saved files
    #[serde(default = "default_header")]
    pub header: String,
    /// Backup suffix; empty disables backups
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
    /// Pattern for files picked up by `source-directory`
    #[serde(default = "default_directory_pattern")]
    pub directory_pattern: String,
}

fn default_interfaces() -> PathBuf {
    PathBuf::from("/etc/network/interfaces")
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

fn default_backup_suffix() -> String {
    DEFAULT_BACKUP_SUFFIX.to_string()
}

fn default_directory_pattern() -> String {
    SOURCE_DIRECTORY_PATTERN.to_string()
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            interfaces: default_interfaces(),
        }
    }
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            header: default_header(),
            backup_suffix: default_backup_suffix(),
            directory_pattern: default_directory_pattern(),
        }
    }
}

impl IfacesConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> IfacesResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| IfacesError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| IfacesError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> IfacesResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| IfacesError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| IfacesError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Parser settings derived from the defaults section
    pub fn load_options(&self) -> IfacesResult<LoadOptions> {
        let directory_pattern = Regex::new(&self.defaults.directory_pattern).map_err(|e| {
            IfacesError::Config(format!(
                "Invalid directory pattern '{}': {}",
                self.defaults.directory_pattern, e
            ))
        })?;
        let backup_suffix = Some(self.defaults.backup_suffix.clone()).filter(|s| !s.is_empty());

        Ok(LoadOptions {
            header: self.defaults.header.clone(),
            backup_suffix,
            directory_pattern,
        })
    }
}
