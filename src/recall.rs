//! Recall scoring and ranking
//!
//! Candidates come from three places: the associative index (keyword hits),
//! the working-memory window (continuity bias, always included), and the
//! full short-term tier. Whatever is not resolved by then is looked up in
//! the long-term store. Scoring blends keyword overlap, importance, and
//! recency under the configured weight triple.

use crate::config::RecallWeights;
use crate::types::{MemoryId, MemoryRecord};
use chrono::{DateTime, Utc};

/// Relevance of a record to a query, under the given weights.
///
/// `1 / (1 + hours_since_access)` is the recency term, so a freshly touched
/// record contributes the full recency weight and a stale one almost none.
pub fn score_record(
    record: &MemoryRecord,
    query_keywords: &[String],
    weights: &RecallWeights,
    now: DateTime<Utc>,
) -> f64 {
    let overlap = query_keywords
        .iter()
        .filter(|k| record.associations.contains(k))
        .count() as f64;
    let recency = 1.0 / (1.0 + record.hours_since_access(now));

    weights.keyword * overlap + weights.importance * record.importance + weights.recency * recency
}

/// A scored candidate, carrying just enough of the record for ordering.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RankedCandidate {
    pub id: MemoryId,
    pub score: f64,
    pub access_count: u64,
    pub created_at: DateTime<Utc>,
}

impl RankedCandidate {
    pub fn new(record: &MemoryRecord, score: f64) -> Self {
        Self {
            id: record.id,
            score,
            access_count: record.access_count,
            created_at: record.created_at,
        }
    }
}

/// Descending by score; ties broken by higher access count, then by more
/// recent creation.
pub(crate) fn sort_candidates(candidates: &mut [RankedCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.access_count.cmp(&a.access_count))
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}
