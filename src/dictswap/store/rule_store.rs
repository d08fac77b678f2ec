use super::backend::StorageBackend;
use super::format;
use crate::error::{DictError, Result};
use crate::model::{Dictionary, Rule, RuleStats, DEFAULT_DICTIONARY};
use std::collections::BTreeMap;

/// Where the in-memory state came from during [`RuleStore::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from an existing current-format store.
    Current,
    /// Converted from the legacy flat rule list and persisted.
    Migrated,
    /// Nothing on disk; a fresh store with an empty default was persisted.
    Created,
    /// The store could not be read; recovered to an empty default dictionary.
    Recovered { reason: String },
}

#[derive(Debug)]
pub struct LoadReport {
    pub origin: LoadOrigin,
    /// Set when persisting a migrated or freshly created store failed.
    /// The in-memory store is still usable.
    pub save_error: Option<DictError>,
}

impl LoadReport {
    fn new(origin: LoadOrigin) -> Self {
        Self {
            origin,
            save_error: None,
        }
    }

    /// Text to surface to the user, if anything notable happened.
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();
        match &self.origin {
            LoadOrigin::Migrated => {
                notices.push("Migrated legacy rules into dictionary 'default'".to_string())
            }
            LoadOrigin::Recovered { reason } => notices.push(format!(
                "Dictionary store could not be read ({}); starting with an empty 'default' dictionary",
                reason
            )),
            LoadOrigin::Current | LoadOrigin::Created => {}
        }
        if let Some(err) = &self.save_error {
            notices.push(format!("Could not save dictionaries: {}", err));
        }
        notices
    }
}

/// Named dictionaries of ordered rules, persisted through a [`StorageBackend`].
///
/// Invariant: a dictionary named `"default"` is always present.
pub struct RuleStore<B: StorageBackend> {
    backend: B,
    dicts: BTreeMap<String, Vec<Rule>>,
}

impl<B: StorageBackend> RuleStore<B> {
    /// An empty store (just `"default"`) without touching the backend.
    pub fn with_backend(backend: B) -> Self {
        Self::from_parts(backend, BTreeMap::new())
    }

    fn from_parts(backend: B, mut dicts: BTreeMap<String, Vec<Rule>>) -> Self {
        dicts.entry(DEFAULT_DICTIONARY.to_string()).or_default();
        Self { backend, dicts }
    }

    /// Load the store. Never fails: unreadable stores recover to an empty
    /// default dictionary, and the report says what happened.
    ///
    /// 1. Current-format store present: parse it.
    /// 2. Otherwise a legacy rule list present: migrate it into `"default"`
    ///    and persist immediately. The legacy file is not modified.
    /// 3. Otherwise create and persist `{"default": []}`.
    pub fn load(backend: B) -> (Self, LoadReport) {
        let content = match backend.read_store() {
            Ok(content) => content,
            Err(e) => return Self::recover(backend, e),
        };

        match content {
            Some(content) => match format::parse_store(&content) {
                Ok(dicts) => {
                    log::debug!(
                        "loaded {} dictionaries from {}",
                        dicts.len(),
                        backend.location()
                    );
                    (
                        Self::from_parts(backend, dicts),
                        LoadReport::new(LoadOrigin::Current),
                    )
                }
                Err(e) => Self::recover(backend, e),
            },
            None => Self::migrate_or_create(backend),
        }
    }

    fn recover(backend: B, err: DictError) -> (Self, LoadReport) {
        log::warn!(
            "dictionary store at {} is unreadable, recovering: {}",
            backend.location(),
            err
        );
        let store = Self::with_backend(backend);
        let origin = LoadOrigin::Recovered {
            reason: err.to_string(),
        };
        (store, LoadReport::new(origin))
    }

    fn migrate_or_create(backend: B) -> (Self, LoadReport) {
        let (origin, rules) = match backend.read_legacy() {
            Ok(Some(content)) => match format::parse_legacy(&content) {
                Ok(rules) => {
                    log::info!("migrating {} legacy rules into 'default'", rules.len());
                    (LoadOrigin::Migrated, rules)
                }
                Err(e) => {
                    log::warn!("legacy rules are unreadable, starting empty: {}", e);
                    let reason = e.to_string();
                    (LoadOrigin::Recovered { reason }, Vec::new())
                }
            },
            Ok(None) => (LoadOrigin::Created, Vec::new()),
            Err(e) => {
                // Nothing is persisted, so the next load tries the legacy file again.
                log::warn!("could not read legacy rules: {}", e);
                let origin = LoadOrigin::Recovered {
                    reason: format!("legacy rules could not be read: {}", e),
                };
                return (Self::with_backend(backend), LoadReport::new(origin));
            }
        };

        let mut dicts = BTreeMap::new();
        dicts.insert(DEFAULT_DICTIONARY.to_string(), rules);
        let store = Self::from_parts(backend, dicts);

        let save_error = store.save().err();
        if let Some(err) = &save_error {
            log::warn!("could not persist new dictionary store: {}", err);
        }
        (store, LoadReport { origin, save_error })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persist the full mapping. Errors must be surfaced; the in-memory state
    /// stays authoritative either way.
    pub fn save(&self) -> Result<()> {
        let content = format::to_json(&self.dicts)?;
        self.backend.write_store(&content)?;
        log::debug!(
            "saved {} dictionaries to {}",
            self.dicts.len(),
            self.backend.location()
        );
        Ok(())
    }

    /// Create an empty dictionary named `name.trim()`. Returns false, without
    /// changes, when the trimmed name is empty or already taken. Does not save.
    pub fn create(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.dicts.contains_key(name) {
            return false;
        }
        self.dicts.insert(name.to_string(), Vec::new());
        true
    }

    /// Remove a dictionary. `"default"` and unknown names are refused.
    pub fn delete(&mut self, name: &str) -> bool {
        if name == DEFAULT_DICTIONARY {
            return false;
        }
        self.dicts.remove(name).is_some()
    }

    /// `"default"` first, then the rest case-insensitively ascending.
    pub fn names(&self) -> Vec<String> {
        let mut rest: Vec<&String> = self
            .dicts
            .keys()
            .filter(|name| name.as_str() != DEFAULT_DICTIONARY)
            .collect();
        rest.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });

        std::iter::once(DEFAULT_DICTIONARY.to_string())
            .chain(rest.into_iter().cloned())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dicts.contains_key(name)
    }

    /// Rules of `name`; empty for unknown names.
    pub fn rules(&self, name: &str) -> &[Rule] {
        self.dicts.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable rules of `name`, creating an empty dictionary if it is unknown.
    pub fn rules_of(&mut self, name: &str) -> &mut Vec<Rule> {
        self.dicts.entry(name.to_string()).or_default()
    }

    pub fn dictionary(&self, name: &str) -> Option<Dictionary> {
        self.dicts
            .get(name)
            .map(|rules| Dictionary::new(name, rules.clone()))
    }

    /// The named dictionaries in listing order, regardless of the order they
    /// were named in. Duplicates are ignored.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Dictionary>> {
        let wanted: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
        if let Some(missing) = wanted.iter().find(|n| !self.contains(n)) {
            return Err(DictError::DictionaryNotFound(missing.to_string()));
        }

        Ok(self
            .names()
            .into_iter()
            .filter(|name| wanted.contains(&name.as_str()))
            .filter_map(|name| self.dictionary(&name))
            .collect())
    }

    pub fn stats(&self, name: &str) -> RuleStats {
        RuleStats::of(self.rules(name))
    }
}
