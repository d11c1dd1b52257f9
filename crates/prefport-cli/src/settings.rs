//! Settings file and store location resolution.
//!
//! Settings live in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/net.devemperor.prefport/
//! - Windows: %APPDATA%/devemperor/prefport/config/
//! - Linux: ~/.config/prefport/
//!
//! Stores default to the matching data folder.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "net";
const APP_ORG: &str = "devemperor";
const APP_NAME: &str = "prefport";
const CONFIG_FILENAME: &str = "settings.toml";
const PREFERENCES_FILENAME: &str = "preferences.json";
const PROMPTS_FILENAME: &str = "prompts.json";

/// User settings read from `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preference store file.
    pub preferences_path: Option<PathBuf>,
    /// Prompt store file.
    pub prompts_path: Option<PathBuf>,
    /// Whether `export` includes credentials when no flag is given.
    pub include_secrets_by_default: bool,
}

/// Resolved store locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub preferences: PathBuf,
    pub prompts: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the platform default when `None`.
///
/// Returns default settings if the file does not exist, cannot be read or
/// cannot be parsed.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse settings file, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings file, using defaults");
            Settings::default()
        }
    }
}

impl Settings {
    /// Pick store locations: explicit flags, then settings, then the platform
    /// data folder.
    pub fn resolve_store_paths(
        &self,
        preferences: Option<PathBuf>,
        prompts: Option<PathBuf>,
    ) -> Result<StorePaths> {
        let data_dir = project_dirs().map(|dirs| dirs.data_dir().to_path_buf());
        let pick = |flag: Option<PathBuf>, configured: &Option<PathBuf>, filename: &str| {
            flag.or_else(|| configured.clone())
                .or_else(|| data_dir.as_ref().map(|dir| dir.join(filename)))
                .ok_or_else(|| {
                    anyhow!("could not determine a location for {filename}; pass it explicitly")
                })
        };

        Ok(StorePaths {
            preferences: pick(preferences, &self.preferences_path, PREFERENCES_FILENAME)?,
            prompts: pick(prompts, &self.prompts_path, PROMPTS_FILENAME)?,
        })
    }
}
