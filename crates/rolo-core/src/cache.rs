//! Local contact cache backed by a CSV file.
//!
//! The cache exists to avoid redundant paid API calls: a contact resolved in
//! an earlier run is answered locally. Rows are keyed by
//! (firstname, lastname, company); domain is not part of the key, so records
//! differing only in domain collide. That inconsistency is carried on
//! purpose from the original behavior.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EnrichResult;
use crate::table;
use crate::types::{CacheRow, ContactRecord, PersonData};

/// A cache hit: the values to reuse for a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHit {
    /// Cached email addresses (may be empty even on a hit).
    pub emails: Vec<String>,

    /// Cached phone numbers (may be empty even on a hit).
    pub phones: Vec<String>,
}

/// Contact cache: loaded once at startup, appended to during the run, and
/// rewritten in full after every append.
#[derive(Debug)]
pub struct ContactCache {
    /// Backing file path.
    path: PathBuf,

    /// Rows in insertion order.
    rows: Vec<CacheRow>,
}

impl ContactCache {
    /// Load the cache from `path`.
    ///
    /// An absent file is an empty cache; a present but malformed file is
    /// fatal.
    pub fn load(path: impl Into<PathBuf>) -> EnrichResult<Self> {
        let path = path.into();
        let rows = if path.exists() {
            table::read_cache(&path)?
        } else {
            debug!(path = %path.display(), "no cache file, starting empty");
            Vec::new()
        };

        debug!(path = %path.display(), rows = rows.len(), "cache loaded");
        Ok(Self { path, rows })
    }

    /// Number of cached rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cache has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a contact by its (firstname, lastname, company) key.
    ///
    /// A hit requires at least one matching row with non-empty emails or
    /// non-empty phones; the returned values always come from the first
    /// matching row (first-inserted wins), even when one of its fields is
    /// empty.
    pub fn lookup(&self, contact: &ContactRecord) -> Option<CacheHit> {
        let matches: Vec<&CacheRow> = self
            .rows
            .iter()
            .filter(|row| row.contact.same_key(contact))
            .collect();

        let resolved = matches
            .iter()
            .any(|row| !row.emails.is_empty() || !row.phones.is_empty());
        if !resolved {
            return None;
        }

        let first = matches[0];
        Some(CacheHit {
            emails: first.emails.clone(),
            phones: first.phones.clone(),
        })
    }

    /// Append a resolved contact and flush the whole cache to disk.
    pub fn append(&mut self, contact: &ContactRecord, data: &PersonData) -> EnrichResult<()> {
        self.rows.push(CacheRow {
            contact: contact.clone(),
            emails: data.emails.clone(),
            phones: data.phones.clone(),
        });
        self.flush()
    }

    /// Rewrite the backing file from the in-memory rows.
    pub fn flush(&self) -> EnrichResult<()> {
        table::write_cache(&self.path, &self.rows)
    }
}
