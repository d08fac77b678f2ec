//! # CLI Layer
//!
//! One possible UI client for dictswap. This is the only place that knows
//! about terminal I/O, process exit codes, and argument parsing.
//!
//! - [`setup`]: clap definitions
//! - [`commands`]: context setup and per-command handlers
//! - [`render`]: turns `CmdResult` data into coloured terminal text

mod commands;
mod render;
mod setup;

pub use commands::run;
