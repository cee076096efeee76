//! Building, updating, and reading a keg's index
//!
//! Layout of a keg:
//!
//! ```text
//! <keg>/keg             metadata, carries an `updated:` line
//! <keg>/dex/latest.md   entries, most recently updated first
//! <keg>/dex/nodes.tsv   entries, ascending id
//! <keg>/<id>/README.md  one directory per node
//! ```
//!
//! Every write of the index goes through [`write_index`]: it holds the keg
//! lock, stages `latest.md`, `nodes.tsv` and the rewritten metadata file, and
//! moves them into place only after all three were staged. A failure before
//! that point leaves all three untouched.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dex::{self, parse_dex, Dex, DexEntry, ISO_DATE_EXP};
use crate::error::{KegError, Result};
use crate::fs_utils::{KegLock, StagedWrites};
use crate::git;
use crate::kegfile;
use crate::markup::{self, NODE_DOC};
use crate::scan::{self, NodeDirs};

/// Document copied into new nodes on request.
pub const SAMPLE_NODE_README: &str = include_str!("sample/README.md");

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ISO_DATE_EXP).expect("timestamp pattern is valid"));

pub fn dex_dir(kegpath: &Path) -> PathBuf {
    kegpath.join("dex")
}

pub fn latest_path(kegpath: &Path) -> PathBuf {
    dex_dir(kegpath).join("latest.md")
}

pub fn nodes_path(kegpath: &Path) -> PathBuf {
    dex_dir(kegpath).join("nodes.tsv")
}

/// Lock file, relative to the keg root. Never published.
const LOCK_FILE: &str = "dex/.lock";

fn lock_path(kegpath: &Path) -> PathBuf {
    kegpath.join(LOCK_FILE)
}

/// Node directories of the keg, with the lowest and highest ids seen.
pub fn node_paths(kegpath: &Path) -> Result<NodeDirs> {
    scan::node_dirs(kegpath)
}

/// Build a fresh [`Dex`] from the node directories, most recently changed
/// first. Equal change times fall back to ascending id.
///
/// A node whose title cannot be read gets an empty title.
pub fn scan_dex(kegpath: &Path) -> Result<Dex> {
    let nodes = node_paths(kegpath)?;

    let mut candidates = Vec::with_capacity(nodes.dirs.len());
    for node in nodes.dirs {
        let changed = scan::latest_change(&node.path)?;
        candidates.push((node, changed));
    }
    candidates.sort_by(|(a, at), (b, bt)| bt.cmp(at).then(a.id.cmp(&b.id)));

    let dex = candidates
        .into_iter()
        .map(|(node, changed)| {
            let title = markup::read_title(&node.path).unwrap_or_else(|e| {
                tracing::debug!("no title for node {}: {}", node.id, e);
                String::new()
            });
            DexEntry::new(node.id, title, changed)
        })
        .collect();
    Ok(dex)
}

/// Rebuild the whole index from a directory scan, replacing whatever index
/// was there before.
pub fn make_dex(kegpath: &Path) -> Result<Dex> {
    let dex = scan_dex(kegpath)?;
    tracing::info!("rebuilt index of {} with {} nodes", kegpath.display(), dex.len());
    write_index(kegpath, &dex.md(), &dex.by_id().tsv())?;
    Ok(dex)
}

/// Whether the keg has a `dex/latest.md`.
pub fn have_dex(kegpath: &Path) -> bool {
    latest_path(kegpath).is_file()
}

/// Read the persisted `dex/latest.md`.
pub fn read_dex(kegpath: &Path) -> Result<Dex> {
    let buf = fs::read_to_string(latest_path(kegpath))?;
    parse_dex(&buf)
}

/// Persist `dex` as both `latest.md` (newest first) and `nodes.tsv` (by id),
/// and stamp the metadata `updated:` field.
pub fn write_dex(kegpath: &Path, dex: &Dex) -> Result<()> {
    write_index(kegpath, &dex.by_latest().md(), &dex.by_id().tsv())
}

/// Merge one changed node into the persisted index.
///
/// Builds the index first if there is none. The entry is stamped with the
/// current time; an existing entry with the same id gets the new title and
/// time, otherwise the entry is appended.
pub fn dex_update(kegpath: &Path, entry: &mut DexEntry) -> Result<()> {
    if !have_dex(kegpath) {
        make_dex(kegpath)?;
    }
    entry.update();
    let mut dex = read_dex(kegpath)?;
    match dex.lookup_mut(entry.id) {
        Some(found) => {
            found.title = entry.title.clone();
            found.updated = entry.updated;
        }
        None => dex.add(entry.clone()),
    }
    tracing::debug!("updated index entry {}", entry.id);
    write_dex(kegpath, &dex)
}

/// Rewrite the `updated:` line of the metadata file to the current time.
///
/// A metadata file without that line is left alone.
pub fn update_updated(kegpath: &Path) -> Result<()> {
    let _lock = KegLock::acquire(&lock_path(kegpath))?;
    let mut staged = StagedWrites::new();
    stage_updated(kegpath, &mut staged, &dex::now())?;
    staged.commit()?;
    Ok(())
}

fn stage_updated(kegpath: &Path, staged: &mut StagedWrites, when: &DateTime<Utc>) -> Result<()> {
    let path = kegfile::kegfile_path(kegpath);
    let contents = fs::read_to_string(&path)?;
    match kegfile::replace_updated(&contents, when) {
        Some(rewritten) => staged.stage(&path, &rewritten)?,
        None => tracing::warn!("no updated field in {}, leaving it alone", path.display()),
    }
    Ok(())
}

fn write_index(kegpath: &Path, md: &str, tsv: &str) -> Result<()> {
    fs::create_dir_all(dex_dir(kegpath))?;
    let _lock = KegLock::acquire(&lock_path(kegpath))?;

    let mut staged = StagedWrites::new();
    staged.stage(&latest_path(kegpath), md)?;
    staged.stage(&nodes_path(kegpath), tsv)?;
    stage_updated(kegpath, &mut staged, &dex::now())?;
    staged.commit()?;
    Ok(())
}

/// Time stamp of the first entry line in `dex/latest.md`.
pub fn updated(kegpath: &Path) -> Result<DateTime<Utc>> {
    let path = latest_path(kegpath);
    let buf = fs::read_to_string(&path)?;
    let found = ISO_DATE
        .find(&buf)
        .ok_or(KegError::NoTimestamp { path })?;
    dex::parse_timestamp(found.as_str())
}

/// [`updated`] formatted, or an empty string when it cannot be determined.
pub fn updated_string(kegpath: &Path) -> String {
    match updated(kegpath) {
        Ok(t) => dex::format_timestamp(&t),
        Err(e) => {
            tracing::warn!("{}", e);
            String::new()
        }
    }
}

/// Most recently updated entry, from the first line of `dex/latest.md` only.
pub fn last(kegpath: &Path) -> Option<DexEntry> {
    let file = fs::File::open(latest_path(kegpath)).ok()?;
    let line = BufReader::new(file).lines().next()?.ok()?;
    parse_dex(&line).ok()?.into_entries().into_iter().next()
}

/// Create the directory for a new node, numbered one past the highest.
pub fn make_node(kegpath: &Path) -> Result<DexEntry> {
    let id = node_paths(kegpath)?.next_id();
    let entry = DexEntry::new(id, "", dex::now());
    fs::create_dir_all(node_path(kegpath, &entry))?;
    tracing::info!("created node {}", id);
    Ok(entry)
}

pub fn node_path(kegpath: &Path, entry: &DexEntry) -> PathBuf {
    kegpath.join(entry.id_string())
}

/// Write the sample document into the node for `entry`.
pub fn write_sample(kegpath: &Path, entry: &DexEntry) -> Result<()> {
    let dir = node_path(kegpath, entry);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(NODE_DOC), SAMPLE_NODE_README)?;
    Ok(())
}

/// Move the directory `from` into the keg as node `id`.
pub fn import_node(kegpath: &Path, from: &Path, id: u64) -> Result<DexEntry> {
    let to = kegpath.join(id.to_string());
    if to.exists() {
        return Err(KegError::NodeExists { path: to });
    }
    fs::rename(from, &to)?;
    let title = markup::read_title(&to).unwrap_or_default();
    Ok(DexEntry::new(id, title, dex::now()))
}

/// Refresh an entry's title from its node document.
pub fn read_entry(kegpath: &Path, id: u64) -> Result<DexEntry> {
    let dir = kegpath.join(id.to_string());
    if !dir.is_dir() {
        return Err(KegError::NodeNotFound { id });
    }
    let title = markup::read_title(&dir).unwrap_or_default();
    Ok(DexEntry::new(id, title, dex::now()))
}

/// Open the node document in `editor` and wait for it to exit.
pub fn edit(kegpath: &Path, id: u64, editor: &str) -> Result<()> {
    let dir = kegpath.join(id.to_string());
    if !dir.is_dir() {
        return Err(KegError::NodeNotFound { id });
    }
    let readme = dir.join(NODE_DOC);

    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or_else(|| KegError::Editor {
        message: "no editor configured".to_string(),
    })?;
    let status = Command::new(program)
        .args(parts)
        .arg(&readme)
        .status()
        .map_err(|e| KegError::Editor {
            message: format!("failed to run {}: {}", program, e),
        })?;
    if !status.success() {
        return Err(KegError::Editor {
            message: format!("{} exited with {}", program, status),
        });
    }
    Ok(())
}

/// Pull, commit everything, and push the git repository holding the keg.
///
/// The commit message is the title of the most recently updated node.
pub fn publish(kegpath: &Path) -> Result<()> {
    if !git::is_git_repo(Some(kegpath)) {
        return Err(KegError::Git {
            message: format!("{} is not inside a git repository", kegpath.display()),
        });
    }
    let root = git::repo_root(Some(kegpath))?;
    tracing::info!("publishing {} from {}", kegpath.display(), root.display());
    git::git_command(&["pull"], Some(kegpath))?;
    stage_all(kegpath)?;
    let msg = last(kegpath)
        .map(|e| e.title)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Publish changes".to_string());
    git::git_command(&["commit", "-m", &msg], Some(kegpath))?;
    git::git_command(&["push"], Some(kegpath))?;
    Ok(())
}

/// `git add` every change under the keg except the lock file.
fn stage_all(kegpath: &Path) -> Result<()> {
    let exclude = format!(":(exclude){}", LOCK_FILE);
    git::git_command(&["add", "-A", "--", ".", &exclude], Some(kegpath))?;
    Ok(())
}
