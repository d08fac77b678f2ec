//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every dictswap operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Resolves defaults**: an empty dictionary selection means the active
//!   dictionaries from [`Settings`]
//! - **Owns session state**: the store, the settings, and the [`Workbench`]
//!   holding the last good output
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and no business logic beyond that.
//!
//! ## Generic Over StorageBackend
//!
//! `DictApi<B: StorageBackend>` runs against:
//! - Production: `DictApi<FsBackend>`
//! - Testing: `DictApi<MemBackend>`

use crate::commands::{self, rules::RuleUpdate, CmdResult};
use crate::config::Settings;
use crate::error::Result;
use crate::model::{Rule, DEFAULT_DICTIONARY};
use crate::session::MoveDirection;
use crate::store::{RuleStore, StorageBackend};
use crate::workbench::Workbench;
use std::path::PathBuf;

pub struct DictApi<B: StorageBackend> {
    store: RuleStore<B>,
    settings: Settings,
    settings_path: Option<PathBuf>,
    workbench: Workbench,
}

impl<B: StorageBackend> DictApi<B> {
    /// `settings_path` is where selection changes are persisted; `None`
    /// keeps them in memory.
    pub fn new(store: RuleStore<B>, settings: Settings, settings_path: Option<PathBuf>) -> Self {
        Self {
            store,
            settings,
            settings_path,
            workbench: Workbench::new(),
        }
    }

    pub fn store(&self) -> &RuleStore<B> {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_output(&self) -> &str {
        self.workbench.output()
    }

    pub fn list_dictionaries(&self) -> Result<CmdResult> {
        commands::dicts::list(&self.store, &self.active_dictionaries())
    }

    pub fn create_dictionary(&mut self, name: &str) -> Result<CmdResult> {
        commands::dicts::create(&mut self.store, name)
    }

    pub fn delete_dictionary(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::dicts::delete(&mut self.store, name)?;
        if self.settings.active_dictionaries.iter().any(|n| n == name) {
            let remaining = self.active_dictionaries();
            self.settings.active_dictionaries = remaining;
            self.persist_settings()?;
        }
        Ok(result)
    }

    pub fn use_dictionaries(&mut self, names: &[String]) -> Result<CmdResult> {
        let (ordered, result) = commands::dicts::activate(&self.store, names)?;
        self.settings.active_dictionaries = ordered;
        self.persist_settings()?;
        Ok(result)
    }

    pub fn list_rules(&self, name: &str) -> Result<CmdResult> {
        commands::rules::list(&self.store, name)
    }

    pub fn add_rule(&mut self, name: &str, rule: Rule) -> Result<CmdResult> {
        commands::rules::add(&mut self.store, name, rule)
    }

    pub fn update_rule(
        &mut self,
        name: &str,
        position: usize,
        update: RuleUpdate,
    ) -> Result<CmdResult> {
        commands::rules::update(&mut self.store, name, position, update)
    }

    pub fn remove_rule(&mut self, name: &str, position: usize) -> Result<CmdResult> {
        commands::rules::remove(&mut self.store, name, position)
    }

    pub fn move_rule(
        &mut self,
        name: &str,
        position: usize,
        direction: MoveDirection,
    ) -> Result<CmdResult> {
        commands::rules::move_rule(&mut self.store, name, position, direction)
    }

    pub fn enable_rule(&mut self, name: &str, position: usize) -> Result<CmdResult> {
        commands::rules::set_enabled(&mut self.store, name, position, true)
    }

    pub fn disable_rule(&mut self, name: &str, position: usize) -> Result<CmdResult> {
        commands::rules::set_enabled(&mut self.store, name, position, false)
    }

    pub fn apply(&mut self, names: &[String], input: &str) -> Result<CmdResult> {
        let names = self.resolve(names);
        commands::apply::run(&self.store, &mut self.workbench, &names, input)
    }

    pub fn highlight(&self, names: &[String], input: &str) -> Result<CmdResult> {
        let names = self.resolve(names);
        commands::highlight::run(&self.store, &names, input)
    }

    /// Explicit names win; otherwise the active selection.
    fn resolve(&self, names: &[String]) -> Vec<String> {
        if names.is_empty() {
            self.active_dictionaries()
        } else {
            names.to_vec()
        }
    }

    /// Persisted selection minus dictionaries that no longer exist, falling
    /// back to `"default"` when nothing is left.
    fn active_dictionaries(&self) -> Vec<String> {
        let existing: Vec<String> = self
            .settings
            .active_dictionaries
            .iter()
            .filter(|name| self.store.contains(name))
            .cloned()
            .collect();
        if existing.is_empty() {
            vec![DEFAULT_DICTIONARY.to_string()]
        } else {
            existing
        }
    }

    fn persist_settings(&self) -> Result<()> {
        if let Some(path) = &self.settings_path {
            self.settings.save(path)?;
            log::debug!("saved settings to {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DictError;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::TempDir;

    fn api() -> DictApi<MemBackend> {
        let store = StoreFixture::new()
            .with_rules("default", &[("cat", "dog")])
            .with_rules("names", &[("dog", "wolf")])
            .store;
        DictApi::new(store, Settings::default(), None)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn apply_defaults_to_active_dictionaries() {
        let mut api = api();
        let result = api.apply(&[], "cat").unwrap();
        assert_eq!(result.replaced.unwrap().output, "dog");
        assert_eq!(api.last_output(), "dog");
    }

    #[test]
    fn explicit_names_override_selection() {
        let mut api = api();
        let result = api.apply(&names(&["default", "names"]), "cat").unwrap();
        assert_eq!(result.replaced.unwrap().output, "wolf");
    }

    #[test]
    fn use_dictionaries_changes_the_default_selection() {
        let mut api = api();
        api.use_dictionaries(&names(&["names", "default"])).unwrap();
        assert_eq!(api.settings().active_dictionaries, vec!["default", "names"]);

        let result = api.highlight(&[], "cat dog").unwrap();
        assert_eq!(result.highlighted.unwrap().patterns, vec!["cat", "dog"]);
    }

    #[test]
    fn use_dictionaries_persists_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let store = StoreFixture::new().with_dictionary("names").store;
        let mut api = DictApi::new(store, Settings::default(), Some(path.clone()));

        api.use_dictionaries(&names(&["names"])).unwrap();
        let saved = Settings::load(&path).unwrap();
        assert_eq!(saved.active_dictionaries, vec!["names"]);
    }

    #[test]
    fn deleting_an_active_dictionary_drops_it_from_selection() {
        let mut api = api();
        api.use_dictionaries(&names(&["names"])).unwrap();
        api.delete_dictionary("names").unwrap();
        assert_eq!(api.settings().active_dictionaries, vec!["default"]);
    }

    #[test]
    fn stale_selection_falls_back_to_default() {
        let settings = Settings {
            active_dictionaries: names(&["gone"]),
            ..Settings::default()
        };
        let store = StoreFixture::new().with_rules("default", &[("a", "b")]).store;
        let mut api = DictApi::new(store, settings, None);

        let listing = api.list_dictionaries().unwrap();
        assert!(listing.dictionaries[0].selected);
        assert_eq!(api.apply(&[], "a").unwrap().replaced.unwrap().output, "b");
    }

    #[test]
    fn rule_operations_dispatch() {
        let mut api = api();
        api.add_rule("default", Rule::new("bird", "fish")).unwrap();
        api.move_rule("default", 2, MoveDirection::Up).unwrap();
        api.disable_rule("default", 2).unwrap();
        api.update_rule(
            "default",
            1,
            RuleUpdate {
                src: Some("birds".to_string()),
                dst: None,
            },
        )
        .unwrap();

        let rules = api.list_rules("default").unwrap().rules;
        assert_eq!(rules[0].rule, Rule::new("birds", "fish"));
        assert_eq!(rules[1].rule, Rule::disabled("cat", "dog"));

        api.enable_rule("default", 2).unwrap();
        api.remove_rule("default", 1).unwrap();
        assert_eq!(api.store().rules("default"), &[Rule::new("cat", "dog")]);
    }

    #[test]
    fn create_and_delete_dictionaries() {
        let mut api = api();
        api.create_dictionary("extra").unwrap();
        assert!(api.store().contains("extra"));
        assert!(matches!(
            api.delete_dictionary("default"),
            Err(DictError::ProtectedDictionary(_))
        ));
        api.delete_dictionary("extra").unwrap();
        assert!(!api.store().contains("extra"));
    }
}
