//! Category tallies over movie records.
//!
//! A [`Tally`] pairs an include predicate with a key extractor. The language
//! chart is [`Tally::languages`]; other breakdowns (genre, rating, ...) only
//! need another pair of functions.

use crate::domain::model::{CategoryCounts, MovieRecord};
use crate::utils::error::{ChartError, Result};

pub struct Tally<P, K>
where
    P: Fn(&MovieRecord) -> Result<bool>,
    K: Fn(&MovieRecord) -> Result<String>,
{
    include: P,
    key: K,
}

impl<P, K> Tally<P, K>
where
    P: Fn(&MovieRecord) -> Result<bool>,
    K: Fn(&MovieRecord) -> Result<String>,
{
    pub fn new(include: P, key: K) -> Self {
        Self { include, key }
    }

    /// Counts included records by key, in first-seen order.
    ///
    /// The key is resolved before the count is touched, so a failing record
    /// leaves no trace and the whole tally returns the error.
    pub fn aggregate<'a, I>(&self, records: I) -> Result<CategoryCounts>
    where
        I: IntoIterator<Item = &'a MovieRecord>,
    {
        let mut counts = CategoryCounts::new();
        let mut skipped = 0usize;

        for record in records {
            if !(self.include)(record)? {
                skipped += 1;
                continue;
            }
            let key = (self.key)(record)?;
            counts.increment(key);
        }

        tracing::debug!(
            "Tallied {} records into {} categories ({} excluded)",
            counts.total(),
            counts.len(),
            skipped
        );
        Ok(counts)
    }
}

type RecordPredicate = fn(&MovieRecord) -> Result<bool>;
type RecordKey = fn(&MovieRecord) -> Result<String>;

impl Tally<RecordPredicate, RecordKey> {
    /// Original language of every movie with Metacritic reviews.
    pub fn languages() -> Self {
        Self::new(has_metacritic_reviews, original_language)
    }
}

/// Language breakdown used by the chart.
pub fn aggregate(records: &[MovieRecord]) -> Result<CategoryCounts> {
    Tally::languages().aggregate(records)
}

// All movies with meta_score_count > 0 are expected to have imdb_score_count > 0 too.
pub fn has_metacritic_reviews(record: &MovieRecord) -> Result<bool> {
    let meta = required(record, "meta_score_count", record.meta_score_count)?;
    if meta > 0 && record.imdb_score_count.unwrap_or(0) <= 0 {
        tracing::debug!(
            "Record '{}' has Metacritic reviews but no IMDb votes",
            record.id
        );
    }
    Ok(meta > 0)
}

pub fn original_language(record: &MovieRecord) -> Result<String> {
    required(
        record,
        "original_language",
        record.original_language.clone(),
    )
}

fn required<T>(record: &MovieRecord, field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| ChartError::MissingFieldError {
        id: record.id.clone(),
        field: field.to_string(),
    })
}
