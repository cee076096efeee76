//! Resolving which keg a command works on
//!
//! Order of precedence:
//! 1. the `--keg` argument, a configured keg name or a path
//! 2. `KEG_CURRENT`, same forms
//! 3. the configured `current` keg
//! 4. the current directory, if it holds a `keg` file

use std::path::{Path, PathBuf};

use crate::config::KegConfig;
use crate::error::{KegError, Result};
use crate::kegfile::KEG_FILE;

/// Resolve a path string, treating relative paths as relative to CWD.
pub fn resolve_path_or_cwd(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(current_dir()?.join(path))
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| KegError::KegNotFound {
        path: PathBuf::from(format!("current directory: {}", e)),
    })
}

/// Resolve a `--keg` style argument: a configured name first, then a path.
pub fn resolve_named(arg: &str, config: &KegConfig) -> Result<PathBuf> {
    match config.keg(arg) {
        Some(p) => resolve_path_or_cwd(p),
        None => resolve_path_or_cwd(Path::new(arg)),
    }
}

/// Find the keg to operate on.
pub fn resolve_keg(arg: Option<&str>, config: &KegConfig) -> Result<PathBuf> {
    let env = std::env::var("KEG_CURRENT").ok().filter(|v| !v.is_empty());
    if let Some(arg) = arg.or(env.as_deref()) {
        return resolve_named(arg, config);
    }

    if let Some(path) = config.current.as_deref().and_then(|c| config.keg(c)) {
        return resolve_path_or_cwd(path);
    }

    let cwd = current_dir()?;
    if cwd.join(KEG_FILE).is_file() {
        return Ok(cwd);
    }
    Err(KegError::KegNotFound { path: cwd })
}
