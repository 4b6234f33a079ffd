//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gesture Interpreter - Replay and inspect pointer sample traces
#[derive(Parser, Debug)]
#[command(name = "gesture-interp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a sample trace and print the dispatched actions
    Replay {
        /// Input trace file
        #[arg(short, long)]
        input: PathBuf,

        /// JSON file of hit-testable targets to register
        #[arg(short, long)]
        targets: Option<PathBuf>,

        /// Print recognized gestures as well as actions
        #[arg(long)]
        gestures: bool,
    },

    /// Validate a trace file (format, timestamp monotonicity)
    Validate {
        /// Path to the trace file
        trace: PathBuf,
    },

    /// Generate a synthetic demonstration trace
    Synth {
        /// Output file name (without extension)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List traces in the traces directory
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "classify.tap_max_span_ms")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "debounce.cooldown_ms")
        key: String,

        /// Value to set
        value: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the traces directory
    pub fn traces_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture-interpreter").join("traces"))
            .unwrap_or_else(|| PathBuf::from("traces"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_replay() {
        let cli = Cli::try_parse_from(["gesture-interp", "replay", "--input", "t.json"]).unwrap();
        match cli.command {
            Commands::Replay { input, targets, gestures } => {
                assert_eq!(input, PathBuf::from("t.json"));
                assert!(targets.is_none());
                assert!(!gestures);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_config_set() {
        let cli = Cli::try_parse_from([
            "gesture-interp",
            "config",
            "set",
            "debounce.cooldown_ms",
            "200",
        ])
        .unwrap();
        match cli.command {
            Commands::Config {
                action: ConfigAction::Set { key, value },
            } => {
                assert_eq!(key, "debounce.cooldown_ms");
                assert_eq!(value, "200");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli =
            Cli::try_parse_from(["gesture-interp", "--verbose", "list", "--detailed"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::List { detailed } => assert!(detailed),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_traces_dir() {
        let dir = Cli::traces_dir();
        assert!(dir.to_string_lossy().contains("traces"));
    }
}
