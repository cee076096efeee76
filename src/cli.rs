//! CLI argument definitions using clap with subcommand architecture
//!
//! This module defines the command-line interface for keg using a
//! subcommand-based structure.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Knowledge exchange graph: numbered nodes with a derived index
#[derive(Parser, Debug)]
#[command(name = "keg")]
#[command(about = "Maintain a keg of numbered nodes and its index")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Keg to operate on: a configured keg name or a path
    #[arg(short, long, value_name = "KEG", global = true)]
    pub keg: Option<String>,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================
// Main Commands Enum
// ============================================

/// Available subcommands for keg
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild or show the index
    #[command(visible_alias = "d")]
    Dex(DexArgs),

    /// Show the most recently updated node
    Last,

    /// Show when the keg was last updated
    Updated,

    /// Create a new node
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Edit a node document, then update the index
    #[command(visible_alias = "e")]
    Edit(EditArgs),

    /// Move a directory into the keg as a new node
    Import(ImportArgs),

    /// Commit and push the keg's git repository
    Publish,

    /// Manage keg configuration
    Config(ConfigArgs),
}

// ============================================
// Dex Subcommand
// ============================================

/// Arguments for the dex command
#[derive(Args, Debug)]
pub struct DexArgs {
    /// Index operation: update, show
    #[command(subcommand)]
    pub operation: DexOperation,
}

/// Dex subcommand operations
#[derive(Subcommand, Debug)]
pub enum DexOperation {
    /// Rebuild the index from the node directories
    Update,

    /// Print the persisted index
    Show {
        /// Entry order
        #[arg(long, value_enum, default_value = "latest")]
        by: DexOrder,

        /// Print tab separated lines instead of markdown
        #[arg(long)]
        tsv: bool,
    },
}

/// Order of entries when showing the index
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum DexOrder {
    /// Most recently updated first
    #[default]
    Latest,
    /// Ascending node id
    Id,
}

// ============================================
// Node Subcommands
// ============================================

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Fill the new node with the sample document
    #[arg(long)]
    pub sample: bool,

    /// Do not open the editor
    #[arg(long)]
    pub no_edit: bool,
}

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Node id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Directory to move into the keg
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Node id to use (defaults to one past the highest)
    #[arg(long, value_name = "ID")]
    pub id: Option<u64>,
}

// ============================================
// Config Subcommand
// ============================================

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config operation: show, set, reset
    #[command(subcommand)]
    pub operation: ConfigOperation,
}

/// Config subcommand operations
#[derive(Subcommand, Debug)]
pub enum ConfigOperation {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., current, editor, logging.level, kegs.<name>)
        key: String,
        /// Value to set (empty to clear)
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default for terminal)
    #[default]
    #[value(alias = "pretty")]
    Text,
    /// JSON - standard JSON output for machine parsing
    Json,
}
