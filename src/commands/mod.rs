//! Command modules for the keg CLI
//!
//! Each command module implements one group of subcommands:
//! - `dex` - rebuild and show the index, last entry, last update time
//! - `node` - create, edit, and import nodes
//! - `publish` - git publishing
//! - `config` - configuration file management
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and a shared `CommandContext`, and return the text to print.

pub mod config;
pub mod dex;
pub mod node;
pub mod publish;

pub use config::run_config;
pub use dex::{run_dex, run_last, run_updated};
pub use node::{run_create, run_edit, run_import};
pub use publish::run_publish;

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::KegConfig;
use crate::error::Result;
use crate::paths::resolve_keg;

/// Shared context passed to all command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    /// Show verbose output
    pub verbose: bool,
    /// `--keg` argument, if given
    pub keg: Option<String>,
    /// Loaded configuration
    pub config: KegConfig,
}

impl CommandContext {
    pub fn new(format: OutputFormat, verbose: bool, keg: Option<String>, config: KegConfig) -> Self {
        Self {
            format,
            verbose,
            keg,
            config,
        }
    }

    /// Path of the keg this command works on
    pub fn keg_path(&self) -> Result<PathBuf> {
        resolve_keg(self.keg.as_deref(), &self.config)
    }

    /// Render `value` as pretty JSON, or fall back to `text`.
    pub fn render(&self, value: serde_json::Value, text: impl FnOnce() -> String) -> String {
        match self.format {
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(&value).unwrap_or_default();
                out.push('\n');
                out
            }
            OutputFormat::Text => text(),
        }
    }
}
