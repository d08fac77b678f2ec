use super::helpers::dictionary_listings;
use super::{CmdMessage, CmdResult};
use crate::error::{DictError, Result};
use crate::model::DEFAULT_DICTIONARY;
use crate::store::{RuleStore, StorageBackend};

pub fn list<B: StorageBackend>(store: &RuleStore<B>, selected: &[String]) -> Result<CmdResult> {
    Ok(CmdResult::default().with_dictionaries(dictionary_listings(store, selected)))
}

pub fn create<B: StorageBackend>(store: &mut RuleStore<B>, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if !store.create(name) {
        return Err(DictError::InvalidDictionaryName(name.to_string()));
    }
    store.save()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Dictionary created: {}",
        name
    )));
    Ok(result)
}

pub fn delete<B: StorageBackend>(store: &mut RuleStore<B>, name: &str) -> Result<CmdResult> {
    if name == DEFAULT_DICTIONARY {
        return Err(DictError::ProtectedDictionary(name.to_string()));
    }
    if !store.delete(name) {
        return Err(DictError::DictionaryNotFound(name.to_string()));
    }
    store.save()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Dictionary deleted: {}",
        name
    )));
    Ok(result)
}

/// Validate a new active selection. The returned listing marks the chosen
/// dictionaries; their names, in application order, are also returned so
/// the caller can persist them.
pub fn activate<B: StorageBackend>(
    store: &RuleStore<B>,
    names: &[String],
) -> Result<(Vec<String>, CmdResult)> {
    if names.is_empty() {
        return Err(DictError::InvalidDictionaryName(String::new()));
    }
    let ordered: Vec<String> = store
        .select(names)?
        .into_iter()
        .map(|dict| dict.name)
        .collect();

    let mut result = CmdResult::default().with_dictionaries(dictionary_listings(store, &ordered));
    result.add_message(CmdMessage::success(format!(
        "Active dictionaries: {}",
        ordered.join(", ")
    )));
    Ok((ordered, result))
}
