//! Index records and the ordered collection holding them

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{format_timestamp, now};

/// One index record: node id, title, and last update time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexEntry {
    /// Node id, matching the node directory name
    pub id: u64,

    /// Title taken from the node document, possibly empty
    pub title: String,

    /// Last content change (UTC, whole seconds)
    pub updated: DateTime<Utc>,
}

impl DexEntry {
    pub fn new(id: u64, title: impl Into<String>, updated: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            updated,
        }
    }

    /// The id as a decimal string, which is also the node directory name.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Stamp the entry as updated now.
    pub fn update(&mut self) {
        self.updated = now();
    }

    /// `* <timestamp> [<title>](../<id>)`
    pub fn md_line(&self) -> String {
        format!(
            "* {} [{}](../{})",
            format_timestamp(&self.updated),
            self.title,
            self.id
        )
    }

    /// `<id>\t<title>\t<timestamp>`
    pub fn tsv_line(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.id,
            self.title,
            format_timestamp(&self.updated)
        )
    }
}

impl fmt::Display for DexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.md_line())
    }
}

/// An ordered collection of [`DexEntry`].
///
/// The order is insertion order; nothing keeps it sorted. [`Dex::by_id`] and
/// [`Dex::by_latest`] return sorted copies and [`Dex::md`] / [`Dex::tsv`]
/// render whatever order the receiver has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dex {
    entries: Vec<DexEntry>,
}

impl Dex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicate ids are not checked here.
    pub fn add(&mut self, entry: DexEntry) {
        self.entries.push(entry);
    }

    /// First entry with the given id.
    pub fn lookup(&self, id: u64) -> Option<&DexEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// First entry with the given id, for in-place changes.
    pub fn lookup_mut(&mut self, id: u64) -> Option<&mut DexEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Copy sorted by id, ascending.
    pub fn by_id(&self) -> Dex {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.id);
        Dex { entries }
    }

    /// Copy sorted by update time, newest first. Equal times keep their
    /// current relative order.
    pub fn by_latest(&self) -> Dex {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.updated.cmp(&a.updated));
        Dex { entries }
    }

    /// Markdown rendering, one line per entry, in the current order.
    pub fn md(&self) -> String {
        self.render(DexEntry::md_line)
    }

    /// Tab separated rendering, one line per entry, in the current order.
    pub fn tsv(&self) -> String {
        self.render(DexEntry::tsv_line)
    }

    fn render(&self, line: fn(&DexEntry) -> String) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&line(entry));
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DexEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DexEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<DexEntry> {
        self.entries
    }
}

impl From<Vec<DexEntry>> for Dex {
    fn from(entries: Vec<DexEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<DexEntry> for Dex {
    fn from_iter<I: IntoIterator<Item = DexEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Dex {
    type Item = DexEntry;
    type IntoIter = std::vec::IntoIter<DexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dex {
    type Item = &'a DexEntry;
    type IntoIter = std::slice::Iter<'a, DexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
