//! Reading `latest.md` back into a [`Dex`]

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{parse_timestamp, Dex, DexEntry, ISO_DATE_EXP};
use crate::error::{KegError, Result};

/// Whole-line grammar of one `latest.md` entry.
pub static LATEST_DEX_ENTRY_EXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\* ({ISO_DATE_EXP}) \[(.*)\]\(\.\./([0-9]+)\)$"))
        .expect("dex entry pattern is valid")
});

/// Parse `latest.md` text into a [`Dex`], keeping file order.
///
/// Every line must match the entry grammar, blank lines included, and carry
/// a real calendar date. The first line that does not fails the whole parse
/// with its 1-based number.
pub fn parse_dex(input: &str) -> Result<Dex> {
    let mut dex = Dex::new();
    for (i, text) in input.lines().enumerate() {
        let line = i + 1;
        let caps = LATEST_DEX_ENTRY_EXP
            .captures(text)
            .ok_or(KegError::BadDexLine { line })?;
        let updated = parse_timestamp(&caps[1]).map_err(|e| match e {
            KegError::BadTimestamp { value, source } => KegError::BadDexTimestamp {
                line,
                value,
                source,
            },
            other => other,
        })?;
        let id = caps[3]
            .parse::<u64>()
            .map_err(|_| KegError::BadDexLine { line })?;
        dex.add(DexEntry::new(id, &caps[2], updated));
    }
    Ok(dex)
}

impl FromStr for Dex {
    type Err = KegError;

    fn from_str(s: &str) -> Result<Self> {
        parse_dex(s)
    }
}
