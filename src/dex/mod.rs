//! The keg index ("dex")
//!
//! A [`Dex`] is an ordered collection of [`DexEntry`] records, one per node.
//! It has two textual forms:
//!
//! - `latest.md`: `* <timestamp> [<title>](../<id>)` lines, most recently
//!   updated first. This is also the form read back by [`parse_dex`].
//! - `nodes.tsv`: `<id>\t<title>\t<timestamp>` lines in ascending id order.
//!
//! Timestamps are always UTC with second precision, written as
//! `YYYY-MM-DDThh:mm:ssZ` ([`ISO_DATE_FMT`]).

mod entry;
mod parse;

pub use entry::{Dex, DexEntry};
pub use parse::{parse_dex, LATEST_DEX_ENTRY_EXP};

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::error::{KegError, Result};

/// chrono layout of every timestamp written to or read from the index.
pub const ISO_DATE_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Regular expression source matching one [`ISO_DATE_FMT`] timestamp.
pub const ISO_DATE_EXP: &str = r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z";

/// Current UTC time truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.format(ISO_DATE_FMT).to_string()
}

/// Parse a timestamp in [`ISO_DATE_FMT`] layout.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, ISO_DATE_FMT)
        .map(|t| t.and_utc())
        .map_err(|source| KegError::BadTimestamp {
            value: s.to_string(),
            source,
        })
}
