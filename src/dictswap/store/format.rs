//! On-disk formats.
//!
//! Current:
//!
//! ```json
//! { "version": 1, "dicts": { "default": [ {"enabled": true, "src": "a", "dst": "b"} ] } }
//! ```
//!
//! Legacy (read-only migration source): a bare array of rules.
//!
//! Rules are read leniently. Missing `enabled` means enabled; other non-bool
//! values follow truthiness (`null`, `0`, `""`, `[]`, `{}` are false). Missing
//! or `null` text fields are empty; numbers and bools are stringified.
//! Entries that are not objects are dropped.

use crate::error::{DictError, Result};
use crate::model::Rule;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const CURRENT_VERSION: u64 = 1;

#[derive(Serialize)]
struct StoreFile<'a> {
    version: u64,
    dicts: &'a BTreeMap<String, Vec<Rule>>,
}

pub fn to_json(dicts: &BTreeMap<String, Vec<Rule>>) -> Result<String> {
    let file = StoreFile {
        version: CURRENT_VERSION,
        dicts,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parse a current-format store. A bare array is accepted as the rules of the
/// default dictionary.
pub fn parse_store(content: &str) -> Result<BTreeMap<String, Vec<Rule>>> {
    let root: Value = serde_json::from_str(content)?;
    match root {
        Value::Object(mut obj) => {
            if let Some(version) = obj.get("version").and_then(Value::as_u64) {
                if version > CURRENT_VERSION {
                    log::warn!(
                        "store version {} is newer than supported version {}",
                        version,
                        CURRENT_VERSION
                    );
                }
            }
            let dicts = match obj.remove("dicts") {
                Some(Value::Object(dicts)) => dicts,
                Some(_) => return Err(corrupt("\"dicts\" is not an object")),
                None => return Err(corrupt("missing \"dicts\"")),
            };

            let mut parsed = BTreeMap::new();
            for (name, rules) in dicts {
                match rules {
                    Value::Array(items) => {
                        parsed.insert(name, coerce_rules(items));
                    }
                    _ => log::warn!("skipping dictionary '{}': rules are not a list", name),
                }
            }
            Ok(parsed)
        }
        Value::Array(items) => {
            let mut parsed = BTreeMap::new();
            parsed.insert(
                crate::model::DEFAULT_DICTIONARY.to_string(),
                coerce_rules(items),
            );
            Ok(parsed)
        }
        _ => Err(corrupt("top level is neither an object nor a list")),
    }
}

pub fn parse_legacy(content: &str) -> Result<Vec<Rule>> {
    let root: Value = serde_json::from_str(content)?;
    match root {
        Value::Array(items) => Ok(coerce_rules(items)),
        _ => Err(corrupt("legacy rules are not a list")),
    }
}

fn corrupt(reason: &str) -> DictError {
    DictError::Store(format!("Unrecognized store format: {}", reason))
}

fn coerce_rules(items: Vec<Value>) -> Vec<Rule> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(Rule {
                enabled: obj.get("enabled").map(truthy).unwrap_or(true),
                src: obj.get("src").map(text).unwrap_or_default(),
                dst: obj.get("dst").map(text).unwrap_or_default(),
            }),
            other => {
                log::warn!("skipping malformed rule entry: {}", other);
                None
            }
        })
        .collect()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
