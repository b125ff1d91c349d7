//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::format::OutputFormat;

/// Render data leaves of a donation and help guide tree
#[derive(Parser, Debug)]
#[command(name = "aidtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .aidtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a data node document
    Render {
        /// Tree-node JSON file, or `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Line width for centering text output
        #[arg(short, long)]
        width: Option<usize>,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// List recognized data types and their views
    Tags {
        /// Only show these tags (fails on an unknown tag)
        tags: Vec<String>,
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

    /// Create config template
    Init {
        /// Create local config in the config directory instead of the global one
        #[arg(short, long)]
        local: bool,
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// True when the render target is stdin.
    pub fn is_stdin(file: &std::path::Path) -> bool {
        file.as_os_str() == "-"
    }
}
