//! # Initialization
//!
//! Builds a ready-to-use [`DictApi`] over the filesystem.
//!
//! ## Location Resolution
//!
//! 1. `data_override` given: every file lives in that directory.
//! 2. Otherwise [`StorePaths::discover`]: `$DICTSWAP_HOME` when set, platform
//!    data directory (and `~/.text_replace_rules.json` as legacy source)
//!    otherwise.
//!
//! Loading the store never fails; what happened during load (migration,
//! recovery from a corrupt file, a failed first save) comes back in the
//! [`LoadReport`] so the caller can tell the user. An unreadable settings file
//! falls back to defaults the same way; [`DictContext::notices`] covers both.

use crate::api::DictApi;
use crate::config::{Settings, StorePaths};
use crate::error::{DictError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::{LoadReport, RuleStore};
use std::path::PathBuf;

pub struct DictContext {
    pub api: DictApi<FsBackend>,
    pub paths: StorePaths,
    pub load_report: LoadReport,
    /// Set when `settings.json` could not be read and defaults are in use.
    pub settings_error: Option<DictError>,
}

impl DictContext {
    /// Everything notable about startup, for the user.
    pub fn notices(&self) -> Vec<String> {
        let mut notices = self.load_report.notices();
        if let Some(err) = &self.settings_error {
            notices.push(format!("Settings could not be read ({}); using defaults", err));
        }
        notices
    }
}

pub fn resolve_paths(data_override: Option<PathBuf>) -> Result<StorePaths> {
    match data_override {
        Some(dir) => Ok(StorePaths::in_dir(dir)),
        None => StorePaths::discover(),
    }
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<DictContext> {
    let paths = resolve_paths(data_override)?;
    log::debug!("dictionary store: {}", paths.store.display());

    let (settings, settings_error) = match Settings::load(&paths.settings) {
        Ok(settings) => (settings, None),
        Err(e) => {
            log::warn!(
                "settings at {} are unreadable, using defaults: {}",
                paths.settings.display(),
                e
            );
            (Settings::default(), Some(e))
        }
    };
    let (store, load_report) = RuleStore::load(FsBackend::new(paths.clone()));
    log::info!("store loaded ({:?})", load_report.origin);

    let api = DictApi::new(store, settings, Some(paths.settings.clone()));
    Ok(DictContext {
        api,
        paths,
        load_report,
        settings_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LoadOrigin;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn initialize_creates_store_in_override_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();

        assert_eq!(ctx.load_report.origin, LoadOrigin::Created);
        assert!(temp.path().join("dictionaries.json").exists());
        assert_eq!(ctx.api.store().names(), vec!["default"]);
    }

    #[test]
    fn initialize_migrates_legacy_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".text_replace_rules.json"),
            r#"[{"enabled":true,"src":"a","dst":"b"}]"#,
        )
        .unwrap();

        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(ctx.load_report.origin, LoadOrigin::Migrated);
        assert_eq!(ctx.api.store().rules("default").len(), 1);
    }

    #[test]
    fn initialize_reads_settings() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            autosave_delay_ms: 42,
            ..Settings::default()
        };
        settings.save(temp.path().join("settings.json")).unwrap();

        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(ctx.api.settings().autosave_delay_ms, 42);
    }

    #[test]
    fn initialize_falls_back_on_corrupt_settings() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("settings.json"), "{ not json").unwrap();

        let ctx = initialize(Some(temp.path().to_path_buf())).unwrap();
        assert!(ctx.settings_error.is_some());
        assert_eq!(ctx.api.settings(), &Settings::default());
        assert_eq!(ctx.notices().len(), 1);
        assert!(ctx.notices()[0].starts_with("Settings could not be read"));
    }
}
