//! The keg metadata file (`<keg>/keg`)
//!
//! A YAML-like text file. Only its `updated:` line is ever rewritten; every
//! other byte is kept as is.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::dex::format_timestamp;

/// Name of the metadata file in the keg root.
pub const KEG_FILE: &str = "keg";

static UPDATED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^updated:.*$").expect("updated pattern is valid"));

pub fn kegfile_path(kegpath: &Path) -> PathBuf {
    kegpath.join(KEG_FILE)
}

/// Replace the first `updated:` line of `contents` with `updated: <when>`.
///
/// Returns `None` when there is no such line, leaving the caller to decide
/// what an absent field means.
pub fn replace_updated(contents: &str, when: &DateTime<Utc>) -> Option<String> {
    let m = UPDATED_LINE.find(contents)?;
    let line = format!("updated: {}", format_timestamp(when));
    // `\r` from CRLF files is part of the match; keep it
    let line = if m.as_str().ends_with('\r') {
        line + "\r"
    } else {
        line
    };
    Some(
        UPDATED_LINE
            .replace(contents, NoExpand(&line))
            .into_owned(),
    )
}
