//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Ordered N-ary trees: build, render, compare and serialize
#[derive(Parser, Debug)]
#[command(name = "ntree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output to stderr (repeat for more: -d -d -d)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Fill character for diagrams (overrides config)
    #[arg(long, global = true)]
    pub fill: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree from values and parent indices, print its diagram
    Build {
        /// Node values, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<String>,

        /// Parent index per value, -1 marks the root
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        parents: Vec<i64>,

        /// Also serialize the tree to this file
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print the diagram of a serialized tree
    Render {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print a serialized tree as an indented outline
    Outline {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Compare two serialized trees (exit code 1 if they differ)
    Compare {
        #[arg(value_hint = ValueHint::FilePath)]
        left: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        right: PathBuf,
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

    /// Create global config from template
    Init,

    /// Show config path
    Path,
}
