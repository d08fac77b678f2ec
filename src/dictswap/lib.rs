//! # dictswap Architecture
//!
//! dictswap keeps named dictionaries of ordered, literal find/replace rules,
//! applies a chosen combination of them to text, and reports which output
//! spans changed together with the original text each one replaced. It also
//! highlights, in the *source* text, every place an active rule would match.
//!
//! It is a UI-agnostic library with a thin CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, resolves the active dictionary selection    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Edits through EditSession, runs through Workbench        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - engine: cascading literal replacement                    │
//! │  - diff + attribution: changed output spans                 │
//! │  - highlight: occurrences of active patterns                │
//! │  - store: RuleStore over fs / memory backends               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Offsets
//!
//! Every span (changed or highlighted) is a half-open range of character
//! (Unicode scalar) offsets, never byte offsets.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust values and returns
//! `Result<T>`. It never prints and never exits. Only [`store::fs_backend`],
//! [`config`], and [`textio`] touch the filesystem, and their paths are always
//! injected.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Command logic returning `CmdResult`
//! - [`engine`]: ReplacementEngine
//! - [`diff`]: Longest-matching-block sequence alignment
//! - [`attribution`]: ChangeAttributor
//! - [`highlight`]: OccurrenceHighlighter
//! - [`ports`]: Traits a front end depends on, plus `LiteralEngine`
//! - [`session`]: Edit buffer with explicit commit and debounced autosave
//! - [`workbench`]: Single in-flight replace-and-attribute runs
//! - [`store`]: RuleStore, on-disk format, backends
//! - [`textio`]: Text import (UTF-8, Shift_JIS fallback) and export
//! - [`config`], [`init`]: Locations, settings, bootstrapping
//! - [`model`], [`error`]: Core types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod attribution;
pub mod commands;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod init;
pub mod model;
pub mod ports;
pub mod session;
pub mod store;
pub mod textio;
pub mod workbench;
