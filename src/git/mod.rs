//! Git operations for publishing a keg
//!
//! Uses subprocess calls to git, run inside the keg directory.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{KegError, Result};

/// Run a git command and return stdout as string
pub fn git_command(args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| KegError::Git {
        message: format!("Failed to execute git: {}", e),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(KegError::Git {
            message: format!("git {} failed: {}", args.join(" "), stderr.trim()),
        });
    }

    tracing::debug!("git {}", args.join(" "));
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a git command, returning None if it fails (for optional queries)
pub fn git_command_optional(args: &[&str], cwd: Option<&Path>) -> Option<String> {
    git_command(args, cwd).ok()
}

/// Check if the directory is inside a git work tree
pub fn is_git_repo(cwd: Option<&Path>) -> bool {
    git_command_optional(&["rev-parse", "--is-inside-work-tree"], cwd)
        .map(|s| s == "true")
        .unwrap_or(false)
}

/// Top level directory of the work tree containing `cwd`
pub fn repo_root(cwd: Option<&Path>) -> Result<PathBuf> {
    git_command(&["rev-parse", "--show-toplevel"], cwd).map(PathBuf::from)
}
