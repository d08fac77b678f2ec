//! # Command Layer
//!
//! Each command lives in its own submodule as plain functions over a
//! [`RuleStore`](crate::store::RuleStore). Commands are UI-agnostic:
//!
//! - No stdout/stderr, no terminal concerns, no argument parsing.
//! - They return a structured [`CmdResult`]; the caller decides how to render.
//! - Failures are `Err(DictError)`; the caller decides the exit code.
//!
//! Rule edits always go through an [`EditSession`](crate::session::EditSession)
//! and are committed before the command returns.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryRuleStore` and check `CmdResult` contents,
//! persisted state (via `MemBackend`), and error conditions.
//!
//! ## Command Modules
//!
//! - [`dicts`]: List, create, delete, and activate dictionaries
//! - [`rules`]: List and edit the rules of one dictionary
//! - [`apply`]: Replace and attribute changes
//! - [`highlight`]: Find occurrences of active patterns
//! - [`helpers`]: Shared utilities (position parsing, listings)

use crate::model::{ChangedSpan, HighlightSpan, Rule};
use serde::Serialize;

pub mod apply;
pub mod dicts;
pub mod helpers;
pub mod highlight;
pub mod rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One line of the dictionary listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryListing {
    pub name: String,
    pub active: usize,
    pub total: usize,
    /// Applied when no dictionary is named explicitly.
    pub selected: bool,
}

/// A rule with its 1-based position in its dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub position: usize,
    #[serde(flatten)]
    pub rule: Rule,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplaceView {
    pub output: String,
    pub changes: Vec<ChangedSpan>,
    pub applied_rules: usize,
    pub replacements: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighlightView {
    pub text: String,
    pub patterns: Vec<String>,
    /// One span per occurrence per pattern; may overlap.
    pub spans: Vec<HighlightSpan>,
    /// Union coverage of `spans`, for rendering.
    pub merged: Vec<HighlightSpan>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub dictionaries: Vec<DictionaryListing>,
    pub rules: Vec<RuleListing>,
    pub replaced: Option<ReplaceView>,
    pub highlighted: Option<HighlightView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_dictionaries(mut self, dictionaries: Vec<DictionaryListing>) -> Self {
        self.dictionaries = dictionaries;
        self
    }

    pub fn with_rules(mut self, rules: Vec<RuleListing>) -> Self {
        self.rules = rules;
        self
    }
}
