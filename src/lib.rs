//! keg: a knowledge exchange graph kept in plain directories
//!
//! A keg is a directory of numbered node directories, each holding a
//! `README.md`, plus a derived index ("dex") summarizing every node:
//!
//! - `dex/latest.md`: markdown list, most recently updated first
//! - `dex/nodes.tsv`: tab separated table, ascending node id
//!
//! The index can be rebuilt from a full directory scan ([`make_dex`]) or
//! updated one node at a time ([`dex_update`]).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let kegpath = Path::new("/home/me/notes");
//! keg::make_dex(kegpath)?;
//! if let Some(entry) = keg::last(kegpath) {
//!     println!("latest: {} {}", entry.id, entry.title);
//! }
//! # Ok::<(), keg::KegError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dex;
pub mod error;
pub mod fs_utils;
pub mod git;
pub mod keg;
pub mod kegfile;
pub mod markup;
pub mod paths;
pub mod scan;

// Re-export commonly used types
pub use cli::{Cli, Commands, OutputFormat};
pub use config::KegConfig;
pub use dex::{parse_dex, Dex, DexEntry, ISO_DATE_FMT};
pub use error::{KegError, Result};
pub use crate::keg::{
    dex_update, have_dex, last, make_dex, make_node, read_dex, scan_dex, update_updated, updated,
    updated_string, write_dex, write_sample, SAMPLE_NODE_README,
};
pub use scan::{NodeDir, NodeDirs};
