//! # dictswap CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! CLI (cli/)          parse args, init logging, render CmdResult
//!   │
//! API (api.rs)        resolve defaults, own store + settings + workbench
//!   │
//! Commands            pure logic over RuleStore, EditSession, Workbench
//!   │
//! Store (store/)      JSON format, legacy migration, fs/memory backends
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
