//! Prefix → ranked candidate index.
//!
//! The index maps a composed prefix (the raw letters typed so far, e.g.
//! "sawasdee") to the output texts it can be converted to, ranked by weight.
//! It is built once from already-parsed data and never mutated afterwards,
//! so a single instance is shared by every session behind an `Arc`.
//!
//! Ranking is fixed at build time: descending weight, with ties kept in the
//! order the source supplied them.

use crate::candidate::CandidateEntry;
use crate::utils;
use ahash::AHashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only mapping from prefix to ranked candidates.
#[derive(Debug, Clone)]
pub struct CandidateIndex {
    map: AHashMap<String, Arc<[CandidateEntry]>>,
    // Returned for every miss so lookups never allocate.
    empty: Arc<[CandidateEntry]>,
}

impl CandidateIndex {
    /// Create an empty index. Every lookup returns no candidates.
    pub fn new() -> Self {
        Self {
            map: AHashMap::new(),
            empty: Arc::from(Vec::new()),
        }
    }

    /// Build an index from `(prefix, entries)` groups.
    ///
    /// Prefixes are trimmed and lowercased, entry text is NFC-normalized.
    /// Groups sharing a prefix are concatenated in the order given. Entries
    /// with empty text or a weight that is negative or not finite are dropped.
    pub fn from_groups<I, K, E>(groups: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<E>)>,
        K: AsRef<str>,
        E: Into<CandidateEntry>,
    {
        let mut staged: AHashMap<String, Vec<CandidateEntry>> = AHashMap::new();
        let mut dropped = 0usize;

        for (prefix, entries) in groups {
            let prefix = prefix.as_ref().trim().to_lowercase();
            if prefix.is_empty() {
                dropped += entries.len();
                continue;
            }
            let bucket = staged.entry(prefix).or_default();
            for entry in entries {
                let mut entry: CandidateEntry = entry.into();
                entry.text = utils::normalize(&entry.text);
                if entry.text.is_empty() || !entry.weight.is_finite() || entry.weight < 0.0 {
                    dropped += 1;
                    continue;
                }
                bucket.push(entry);
            }
        }

        if dropped > 0 {
            warn!(dropped, "skipped malformed candidate entries");
        }

        let map: AHashMap<String, Arc<[CandidateEntry]>> = staged
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(prefix, mut entries)| {
                // sort_by is stable: equal weights keep source order
                entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));
                (prefix, Arc::from(entries))
            })
            .collect();

        debug!(prefixes = map.len(), "built candidate index");

        Self {
            map,
            empty: Arc::from(Vec::new()),
        }
    }

    /// Ranked candidates for `prefix`; empty when the prefix is unknown.
    pub fn lookup(&self, prefix: &str) -> Arc<[CandidateEntry]> {
        match self.map.get(prefix) {
            Some(entries) => Arc::clone(entries),
            None => Arc::clone(&self.empty),
        }
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.map.contains_key(prefix)
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All known prefixes, in no particular order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

impl Default for CandidateIndex {
    fn default() -> Self {
        Self::new()
    }
}
