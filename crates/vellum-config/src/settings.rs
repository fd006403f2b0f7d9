//! Settings types and loading.
//!
//! The main entry point is [`SystemSettings`], the contents of a
//! `vellum.yaml` file. Settings are loaded with [`load_settings`], saved
//! with [`save_settings`], and discovered with [`find_settings_file`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The settings file name.
const SETTINGS_FILE_NAME: &str = "vellum.yaml";

/// Environment variable overriding settings file discovery.
const SETTINGS_ENV: &str = "VELLUM_CONFIG";

/// Errors that can occur during settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file contained invalid YAML.
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A specialized `Result` type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

fn default_default_value() -> String {
    "0".to_string()
}

fn default_true() -> bool {
    true
}

/// Table-wide system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Substituted wherever a formula cannot produce a value.
    #[serde(default = "default_default_value")]
    pub default_value: String,

    /// Formula computed per entity for initiative order, e.g.
    /// `"${1d20 + attributes.dex.mod}$"`.
    #[serde(default)]
    pub initiative_formula: Option<String>,

    /// Whether roll outputs include the explanation trace.
    #[serde(default = "default_true")]
    pub explain_rolls: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            default_value: default_default_value(),
            initiative_formula: None,
            explain_rolls: true,
        }
    }
}

/// Load settings from a YAML file.
pub fn load_settings(path: &Path) -> Result<SystemSettings> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Save settings to a YAML file.
pub fn save_settings(path: &Path, settings: &SystemSettings) -> Result<()> {
    let content = serde_yaml::to_string(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Find the settings file by walking up from `start`.
///
/// The `VELLUM_CONFIG` environment variable is checked first (highest
/// priority). Returns `None` when the filesystem root is reached without a
/// `vellum.yaml`.
pub fn find_settings_file(start: &Path) -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(SETTINGS_ENV) {
        let env_path = PathBuf::from(env_path);
        if env_path.is_file() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    let mut current = start.as_path();
    loop {
        let candidate = current.join(SETTINGS_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => return None,
        }
    }
}
