//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Upper bound for `focus --frames`.
pub const MAX_FRAMES: u64 = 1000;

/// Radial hierarchy layout: build, lay out and zoom sunburst charts from indentation documents
#[derive(Parser, Debug)]
#[command(name = "sunburst")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Local config file, layered over the global one
    #[arg(short, long, global = true, env = "SUNBURST_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the hierarchy as a tree
    Tree {
        /// Indentation document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print render records for every node
    Layout {
        /// Indentation document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Focus this node first, e.g. `root/branch/leaf`
        #[arg(short, long)]
        focus: Option<String>,
    },

    /// Print the zoom transition towards a node
    Focus {
        /// Indentation document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node path from the root, e.g. `root/branch`
        path: String,
        /// Number of interpolation steps to sample
        #[arg(
            long,
            default_value_t = 4,
            value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_FRAMES)
        )]
        frames: usize,
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
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}

/// Split a `a/b/c` node path into names. Empty segments are ignored.
pub fn split_node_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
