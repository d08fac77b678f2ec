//! # Configuration
//!
//! Two pieces of configuration are injected at construction time rather than
//! read from fixed global locations:
//!
//! - [`StorePaths`]: where the dictionary store, the legacy rule file, and the
//!   settings file live. Tests point this at a temp dir.
//! - [`Settings`]: small persisted preferences (`settings.json`).
//!
//! ## Locations
//!
//! | File | `DICTSWAP_HOME` set | Default |
//! |------|---------------------|---------|
//! | store | `$DICTSWAP_HOME/dictionaries.json` | platform data dir (via `directories`) |
//! | settings | `$DICTSWAP_HOME/settings.json` | platform data dir |
//! | legacy | `$DICTSWAP_HOME/.text_replace_rules.json` | `~/.text_replace_rules.json` |
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `active_dictionaries` | `["default"]` | Dictionaries applied when none are named |
//! | `autosave_delay_ms` | `800` | Debounce delay before an edit is committed |
//!
//! `autosave_delay_ms` is for long-running front ends that keep an
//! [`EditSession`](crate::session::EditSession) open and poll it. One-shot CLI
//! commands commit every edit immediately and ignore it.

use crate::error::{DictError, Result};
use crate::model::DEFAULT_DICTIONARY;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const HOME_ENV: &str = "DICTSWAP_HOME";

const STORE_FILENAME: &str = "dictionaries.json";
const SETTINGS_FILENAME: &str = "settings.json";
const LEGACY_FILENAME: &str = ".text_replace_rules.json";
const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub store: PathBuf,
    pub legacy: PathBuf,
    pub settings: PathBuf,
}

impl StorePaths {
    /// All three files inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            store: dir.join(STORE_FILENAME),
            legacy: dir.join(LEGACY_FILENAME),
            settings: dir.join(SETTINGS_FILENAME),
        }
    }

    /// `$DICTSWAP_HOME` when set, platform locations otherwise.
    pub fn discover() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(Self::in_dir(PathBuf::from(home)));
        }

        let proj_dirs = ProjectDirs::from("com", "dictswap", "dictswap").ok_or_else(|| {
            DictError::Store("Could not determine the data directory".to_string())
        })?;
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| DictError::Store("Could not determine the home directory".to_string()))?;

        let data_dir = proj_dirs.data_dir();
        Ok(Self {
            store: data_dir.join(STORE_FILENAME),
            legacy: base_dirs.home_dir().join(LEGACY_FILENAME),
            settings: data_dir.join(SETTINGS_FILENAME),
        })
    }
}

fn default_active() -> Vec<String> {
    vec![DEFAULT_DICTIONARY.to_string()]
}

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Dictionaries applied when the caller does not name any.
    #[serde(default = "default_active")]
    pub active_dictionaries: Vec<String>,

    /// Delay between the last edit and its automatic commit, for front ends
    /// that keep a session open. The CLI commits immediately.
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active_dictionaries: default_active(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults if the file is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}
