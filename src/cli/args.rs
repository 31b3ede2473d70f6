//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Snailfish number arithmetic: add, reduce and weigh nested pairs
#[derive(Parser, Debug)]
#[command(name = "snailfish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ./.snailfish.toml if present)
    #[arg(short, long, global = true, env = "SNAILFISH_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Magnitude of the total sum and the largest pair magnitude
    Solve {
        /// Homework file, one number per line (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Add all numbers in order and show the result
    Sum {
        /// Homework file, one number per line (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Largest magnitude of any sum of two different numbers
    Largest {
        /// Homework file, one number per line (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Reduce a single number
    Reduce {
        /// Number literal, e.g. "[[[[[9,8],1],2],3],4]"
        literal: String,
    },

    /// Add numbers given on the command line, left to right
    Add {
        /// Number literals
        #[arg(num_args = 2..)]
        literals: Vec<String>,
    },

    /// Magnitude of a number (no reduction)
    Magnitude {
        /// Number literal
        literal: String,
    },

    /// Show a number as a tree of pairs
    Tree {
        /// Number literal
        literal: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
