//! Optional user configuration.
//!
//! The switcher works without any configuration. When
//! `<config-dir>/codebase-switcher/config.json` exists, its fields override the
//! built-in git identity used for auto-commits and the archive name prefix.

use crate::core::dirs::get_config_directory;
use crate::core::error::SwitcherError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GIT_USER: &str = "Codebase Switcher";
pub const DEFAULT_GIT_EMAIL: &str = "switcher@codebase.local";
pub const DEFAULT_ARCHIVE_PREFIX: &str = "model_comparison";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SwitcherConfig {
    pub git_user: String,
    pub git_email: String,
    pub archive_prefix: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            git_user: DEFAULT_GIT_USER.to_string(),
            git_email: DEFAULT_GIT_EMAIL.to_string(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
        }
    }
}

impl SwitcherConfig {
    /// Load the user config, falling back to defaults when it is absent or unreadable
    pub fn load() -> Self {
        let loaded = get_config_directory()
            .and_then(|dir| Self::load_from(&dir.join("config.json")));

        match loaded {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default configuration: {e}");
                crate::core::print_warning(&format!("{e}. Using default configuration"));
                Self::default()
            }
        }
    }

    pub fn load_from(config_file: &Path) -> Result<Self, SwitcherError> {
        if !config_file.exists() {
            log::debug!("No config file at {}", config_file.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_file)?;
        serde_json::from_str(&content).map_err(|source| SwitcherError::ConfigParseFailed {
            path: config_file.to_path_buf(),
            source,
        })
    }
}
