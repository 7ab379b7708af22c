use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of `movies.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A movie as written to `movies/<id>.json`.
///
/// The fields the aggregation reads are optional so that a missing one can be
/// reported against the record id instead of as a parse failure. Everything
/// else the scraper wrote is kept in `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub meta_score_count: Option<i64>,
    #[serde(default)]
    pub imdb_score_count: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Category label to count, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(String, u64)>,
    positions: HashMap<String, usize>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `label`, appending it if it has not been seen yet.
    pub fn increment(&mut self, label: String) {
        match self.positions.get(&label) {
            Some(&index) => self.entries[index].1 += 1,
            None => {
                self.positions.insert(label.clone(), self.entries.len());
                self.entries.push((label, 1));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.positions.get(label).map(|&index| self.entries[index].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.values().sum()
    }

    pub fn max(&self) -> Option<u64> {
        self.values().max()
    }
}
