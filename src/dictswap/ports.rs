//! Narrow interfaces between the core and whatever drives it.
//!
//! A front end (the CLI, a GUI, tests) depends on these traits instead of on
//! concrete functions, so each piece can be swapped or faked on its own.
//! [`LiteralEngine`] wires them to the literal-substring implementations.

use crate::attribution;
use crate::engine::{self, Replacement};
use crate::error::Result;
use crate::highlight;
use crate::model::{ChangedSpan, Dictionary, HighlightSpan, RuleStats};
use crate::store::{RuleStore, StorageBackend};

/// Read access to named dictionaries.
pub trait RuleSource {
    /// Names in listing order.
    fn dictionary_names(&self) -> Vec<String>;

    /// The named dictionaries in the fixed application order.
    fn select_dictionaries(&self, names: &[String]) -> Result<Vec<Dictionary>>;

    fn rule_stats(&self, name: &str) -> RuleStats;
}

pub trait Replacer {
    fn apply(&self, text: &str, dictionaries: &[Dictionary]) -> Result<Replacement>;
}

pub trait ChangeAttributor {
    fn compute_changes(&self, original: &str, modified: &str) -> Vec<ChangedSpan>;
}

pub trait OccurrenceHighlighter {
    /// Source patterns of the active rules, deduplicated in discovery order.
    fn patterns(&self, dictionaries: &[Dictionary]) -> Vec<String> {
        highlight::active_patterns(dictionaries)
    }

    fn compute_highlights(&self, source: &str, patterns: &[String]) -> Vec<HighlightSpan>;
}

impl<B: StorageBackend> RuleSource for RuleStore<B> {
    fn dictionary_names(&self) -> Vec<String> {
        self.names()
    }

    fn select_dictionaries(&self, names: &[String]) -> Result<Vec<Dictionary>> {
        self.select(names)
    }

    fn rule_stats(&self, name: &str) -> RuleStats {
        self.stats(name)
    }
}

/// Literal, case-sensitive matching with character-level attribution.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralEngine;

impl Replacer for LiteralEngine {
    fn apply(&self, text: &str, dictionaries: &[Dictionary]) -> Result<Replacement> {
        engine::apply(text, dictionaries)
    }
}

impl ChangeAttributor for LiteralEngine {
    fn compute_changes(&self, original: &str, modified: &str) -> Vec<ChangedSpan> {
        attribution::compute_changes(original, modified)
    }
}

impl OccurrenceHighlighter for LiteralEngine {
    fn compute_highlights(&self, source: &str, patterns: &[String]) -> Vec<HighlightSpan> {
        highlight::compute_highlights(source, patterns)
    }
}
