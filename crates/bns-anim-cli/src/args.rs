use std::path::PathBuf;

use bns_anim_core::Selection;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bns-anim")]
#[command(about = "Remove and restore Blade & Soul skill animations")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: platform config dir, or $BNS_ANIM_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Client directory, overrides game.root
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Backup directory, overrides game.backup_dir
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Leave animations shared by every class in place
    #[arg(long, global = true)]
    pub no_common: bool,

    /// Replace configured selections (repeatable), e.g. --select warden:all
    #[arg(long, global = true, value_name = "CLASSES:STAGES")]
    pub select: Vec<Selection>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move selected animation files into the backup directory
    Remove,

    /// Move every backed up file back into the client
    Restore,

    /// Print the files selected by the current configuration
    Queue,

    /// Show where each selected file currently is
    Status,

    /// Print the built-in animation table
    Table,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., game.root)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., queue.select)
        key: String,

        /// Value to set (e.g., "warden:all; assassin:before-awakening")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
