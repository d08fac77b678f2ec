use clap::{Parser, Subcommand, ValueEnum};
use dictswap::session::MoveDirection;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "dictswap",
    bin_name = "dictswap",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(
    about = "Ordered find/replace dictionaries with change attribution",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding dictionaries.json and settings.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List dictionaries with active/total rule counts
    #[command(alias = "ls", display_order = 1)]
    Dicts,

    /// Create an empty dictionary
    #[command(display_order = 2)]
    Create { name: String },

    /// Delete a dictionary ("default" is protected)
    #[command(display_order = 3)]
    Delete { name: String },

    /// Choose the dictionaries applied when none are named
    #[command(name = "use", display_order = 4)]
    Use {
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// List the rules of a dictionary
    #[command(display_order = 10)]
    Rules {
        #[arg(default_value = "default")]
        name: String,
    },

    /// Append a rule
    #[command(display_order = 11)]
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        src: String,
        #[arg(allow_hyphen_values = true)]
        dst: String,

        /// Add the rule disabled
        #[arg(long)]
        disabled: bool,
    },

    /// Change the source and/or destination of a rule
    #[command(display_order = 12)]
    Edit {
        name: String,
        /// 1-based rule position
        position: usize,

        #[arg(long, allow_hyphen_values = true)]
        src: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        dst: Option<String>,
    },

    /// Remove a rule
    #[command(alias = "rm", display_order = 13)]
    Remove { name: String, position: usize },

    /// Move a rule one step up or down
    #[command(name = "move", alias = "mv", display_order = 14)]
    Move {
        name: String,
        position: usize,
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Enable a rule
    #[command(display_order = 15)]
    Enable { name: String, position: usize },

    /// Disable a rule
    #[command(display_order = 16)]
    Disable { name: String, position: usize },

    /// Replace text and show which spans changed
    #[command(display_order = 20)]
    Apply {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Dictionary to apply (repeatable; defaults to the active ones)
        #[arg(short = 'd', long = "dict", value_name = "NAME")]
        dicts: Vec<String>,

        /// Write the output here as UTF-8 instead of printing it
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show where active rules would match, without replacing
    #[command(display_order = 21)]
    Highlight {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        #[arg(short = 'd', long = "dict", value_name = "NAME")]
        dicts: Vec<String>,

        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dictswap").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_apply_with_repeated_dicts() {
        let cli = parse(&["apply", "in.txt", "-d", "names", "--dict", "default", "--json"]);
        match cli.command {
            Commands::Apply {
                file, dicts, json, ..
            } => {
                assert_eq!(file, Some(PathBuf::from("in.txt")));
                assert_eq!(dicts, vec!["names", "default"]);
                assert!(json);
            }
            other => panic!("Expected Apply, got {:?}", other),
        }
    }

    #[test]
    fn rules_defaults_to_default_dictionary() {
        match parse(&["rules"]).command {
            Commands::Rules { name } => assert_eq!(name, "default"),
            other => panic!("Expected Rules, got {:?}", other),
        }
    }

    #[test]
    fn add_accepts_hyphenated_text() {
        match parse(&["add", "default", "--", "-x", "y"]).command {
            Commands::Add { src, dst, .. } => {
                assert_eq!(src, "-x");
                assert_eq!(dst, "y");
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn move_takes_direction() {
        match parse(&["mv", "default", "2", "up"]).command {
            Commands::Move {
                position,
                direction,
                ..
            } => {
                assert_eq!(position, 2);
                assert_eq!(MoveDirection::from(direction), MoveDirection::Up);
            }
            other => panic!("Expected Move, got {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["dicts", "-v", "--data-dir", "/tmp/x"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn use_requires_a_name() {
        assert!(Cli::try_parse_from(["dictswap", "use"]).is_err());
    }
}
