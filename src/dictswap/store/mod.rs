//! # Storage Layer
//!
//! Dictionaries are kept in memory by [`rule_store::RuleStore`] and persisted
//! as a whole through a [`backend::StorageBackend`].
//!
//! ## Layering
//!
//! - The backend knows *where* bytes live (filesystem or memory).
//! - [`format`] knows *what* the bytes look like (current and legacy JSON).
//! - The store owns the invariants: `"default"` always exists, names are
//!   unique, and load never fails.
//!
//! ## Load Sequence
//!
//! 1. A current-format store exists: parse it. If parsing fails, recover to an
//!    empty `"default"` and leave the file alone until the next commit.
//! 2. Otherwise a legacy rule list exists: migrate it into `"default"` and
//!    persist immediately. The legacy file is never written or re-read.
//! 3. Otherwise persist a fresh `{"default": []}`.
//!
//! ## Implementations
//!
//! - [`memory::FileRuleStore`]: Production store on top of [`fs_backend::FsBackend`].
//! - [`memory::InMemoryRuleStore`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! $DICTSWAP_HOME/
//! ├── dictionaries.json   # {"version": 1, "dicts": {name: [rule, ...]}}
//! └── settings.json       # Active dictionaries, autosave delay
//! ~/.text_replace_rules.json   # Legacy flat rule list (read once)
//! ```

pub mod backend;
pub mod format;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod rule_store;

pub use backend::StorageBackend;
pub use memory::{FileRuleStore, InMemoryRuleStore};
pub use rule_store::{LoadOrigin, LoadReport, RuleStore};
