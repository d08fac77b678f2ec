use super::{DictionaryListing, RuleListing};
use crate::error::{DictError, Result};
use crate::model::Rule;
use crate::store::{RuleStore, StorageBackend};

/// Convert a user-facing 1-based position into a buffer index.
pub fn position_to_index(dictionary: &str, position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| DictError::RuleNotFound {
            dictionary: dictionary.to_string(),
            index: position,
        })
}

/// Fail with `DictionaryNotFound` unless `name` exists.
pub fn require_dictionary<B: StorageBackend>(store: &RuleStore<B>, name: &str) -> Result<()> {
    if store.contains(name) {
        Ok(())
    } else {
        Err(DictError::DictionaryNotFound(name.to_string()))
    }
}

pub fn rule_listings(rules: &[Rule]) -> Vec<RuleListing> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| RuleListing {
            position: i + 1,
            rule: rule.clone(),
        })
        .collect()
}

pub fn dictionary_listings<B: StorageBackend>(
    store: &RuleStore<B>,
    selected: &[String],
) -> Vec<DictionaryListing> {
    store
        .names()
        .into_iter()
        .map(|name| {
            let stats = store.stats(&name);
            DictionaryListing {
                selected: selected.contains(&name),
                active: stats.active,
                total: stats.total,
                name,
            }
        })
        .collect()
}
