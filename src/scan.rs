//! Node directory discovery
//!
//! A node is a subdirectory of the keg root whose name is a canonical
//! non-negative integer (`0`, `7`, `42`, but not `007` or `+7`). Everything
//! else in the root is ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, SubsecRound, Utc};
use ignore::WalkBuilder;

use crate::error::Result;

/// A node directory found under a keg root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDir {
    pub id: u64,
    pub path: PathBuf,
}

/// Result of scanning a keg root for node directories.
#[derive(Debug, Clone, Default)]
pub struct NodeDirs {
    /// Node directories in directory read order
    pub dirs: Vec<NodeDir>,
    /// Lowest node id seen, `None` when there are no nodes
    pub low: Option<u64>,
    /// Highest node id seen, `None` when there are no nodes
    pub high: Option<u64>,
}

impl NodeDirs {
    /// Id for a new node: one past the highest, or 1 for an empty keg.
    pub fn next_id(&self) -> u64 {
        self.high.map_or(1, |h| h + 1)
    }
}

/// Parse a directory name as a node id.
///
/// Only canonical decimal names are accepted so that the id renders back to
/// the same directory name.
pub fn parse_node_id(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.len() > 1 && name.starts_with('0') {
        return None;
    }
    name.parse().ok()
}

/// List the node directories of the keg at `kegpath`.
///
/// A missing root yields an empty result. Other read errors are returned.
pub fn node_dirs(kegpath: &Path) -> Result<NodeDirs> {
    let read = match fs::read_dir(kegpath) {
        Ok(read) => read,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(NodeDirs::default()),
        Err(e) => return Err(e.into()),
    };

    let mut found = NodeDirs::default();
    for entry in read {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(id) = name.to_str().and_then(parse_node_id) else {
            tracing::debug!("skipping non-node entry {:?}", entry.path());
            continue;
        };
        found.low = Some(found.low.map_or(id, |l| l.min(id)));
        found.high = Some(found.high.map_or(id, |h| h.max(id)));
        found.dirs.push(NodeDir {
            id,
            path: entry.path(),
        });
    }
    Ok(found)
}

/// Most recent modification time of `path` or anything beneath it, in UTC
/// truncated to whole seconds.
pub fn latest_change(path: &Path) -> Result<DateTime<Utc>> {
    let mut latest = fs::metadata(path)?.modified()?;

    let walker = WalkBuilder::new(path)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("walk error under {}: {}", path.display(), e);
                continue;
            }
        };
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if modified > latest {
            latest = modified;
        }
    }

    Ok(DateTime::<Utc>::from(latest).trunc_subsecs(0))
}
