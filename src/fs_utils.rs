//! Filesystem helpers for writing keg artifacts
//!
//! - `StagedWrites`: write several files to temporaries next to their
//!   destinations, then move them all into place only once every one of them
//!   was written
//! - `KegLock`: best-effort advisory lock held while the artifacts change

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

/// A set of pending file replacements.
///
/// Each staged file lives in the same directory as its destination so the
/// final rename never crosses a filesystem. Dropping without
/// [`StagedWrites::commit`] discards every temporary and leaves the
/// destinations as they were.
#[derive(Default)]
pub struct StagedWrites {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl StagedWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `contents` to a temporary file destined for `dest`.
    pub fn stage(&mut self, dest: &Path, contents: &str) -> io::Result<()> {
        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = match fs::metadata(dest) {
            Ok(meta) => {
                let tmp = NamedTempFile::new_in(dir)?;
                tmp.as_file().set_permissions(meta.permissions())?;
                tmp
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_in(dir)?,
            Err(e) => return Err(e),
        };
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        self.staged.push((tmp, dest.to_path_buf()));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Move every staged file onto its destination, in staging order.
    pub fn commit(self) -> io::Result<()> {
        for (tmp, dest) in self.staged {
            tmp.persist(&dest).map_err(|e| e.error)?;
        }
        Ok(())
    }
}

/// Temporary file for a destination that does not exist yet: 0644 less the
/// umask, like a plain `File::create`.
#[cfg(unix)]
fn new_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o644))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Exclusive advisory lock on a lock file, released on drop.
///
/// Other keg processes honouring the same lock file wait for it; anything
/// else can still write the artifacts underneath.
pub struct KegLock {
    file: File,
    path: PathBuf,
}

impl KegLock {
    /// Block until the lock at `path` is held, creating the file if needed.
    pub fn acquire(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.lock_exclusive()?;
        tracing::trace!("locked {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for KegLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::debug!("failed to unlock {}: {}", self.path.display(), e);
        }
    }
}
