//! Memory record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for memory records.
///
/// Assigned from a monotonic counter owned by the manager, so ids are never
/// reused and their ordering matches creation order. Tiers and the
/// associative index reference records by id, never by content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MemoryId(pub u64);

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mem-{}", self.0)
    }
}

/// A single stored memory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryRecord {
    /// Unique identifier
    pub id: MemoryId,
    /// The memory content
    pub content: String,
    /// Free-form category tag (e.g. "observation", "dialogue")
    pub kind: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last returned by a recall
    pub last_accessed_at: DateTime<Utc>,
    /// Importance score, >= 0; decays toward 0 while in the short-term tier
    pub importance: f64,
    /// Label from an external emotion classifier, opaque to this subsystem
    pub emotional_tag: Option<String>,
    /// Keywords extracted from content at insertion
    pub associations: Vec<String>,
    /// Number of times this record was touched; creation counts as the first
    pub access_count: u64,
    /// Additional metadata (flexible key-value storage)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl MemoryRecord {
    /// Elapsed hours since the record was last accessed, never negative.
    pub fn hours_since_access(&self, now: DateTime<Utc>) -> f64 {
        let secs = (now - self.last_accessed_at).num_seconds().max(0);
        secs as f64 / 3600.0
    }

    /// Mark the record as touched by a recall.
    pub fn record_access(&mut self, now: DateTime<Utc>) {
        self.access_count += 1;
        self.last_accessed_at = now;
    }
}

/// Input for creating a memory
#[derive(Debug, Clone)]
pub struct MemoryInput {
    pub content: String,
    pub kind: String,
    pub importance: f64,
    pub emotional_tag: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl MemoryInput {
    pub fn new(content: impl Into<String>, kind: impl Into<String>, importance: f64) -> Self {
        Self {
            content: content.into(),
            kind: kind.into(),
            importance,
            emotional_tag: None,
            metadata: None,
        }
    }

    /// Attach a label from an external emotion classifier
    pub fn with_emotional_tag(mut self, tag: impl Into<String>) -> Self {
        self.emotional_tag = Some(tag.into());
        self
    }

    /// Attach caller-defined metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Recall result combining a record with its relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalledMemory {
    /// The record, cloned out of its owning tier
    pub record: MemoryRecord,
    /// Relevance score under the configured recall weights
    pub score: f64,
    /// Rank in results (1-based)
    pub rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_since_access_floors_at_zero() {
        let now = Utc::now();
        let record = MemoryRecord {
            id: MemoryId(1),
            content: "hello".into(),
            kind: "dialogue".into(),
            created_at: now,
            last_accessed_at: now + chrono::Duration::hours(1),
            importance: 0.5,
            emotional_tag: None,
            associations: Vec::new(),
            access_count: 1,
            metadata: None,
        };
        assert_eq!(record.hours_since_access(now), 0.0);
    }

    #[test]
    fn record_access_bumps_count_and_timestamp() {
        let created = Utc::now() - chrono::Duration::hours(5);
        let mut record = MemoryRecord {
            id: MemoryId(7),
            content: "note".into(),
            kind: "observation".into(),
            created_at: created,
            last_accessed_at: created,
            importance: 0.9,
            emotional_tag: None,
            associations: vec!["note".into()],
            access_count: 1,
            metadata: None,
        };

        let now = Utc::now();
        record.record_access(now);
        assert_eq!(record.access_count, 2);
        assert_eq!(record.last_accessed_at, now);
    }
}
