//! The memory manager façade
//!
//! Composes the four storage structures under a single reader-writer lock.
//! Consolidation and decay touch multiple structures atomically, so a recall
//! can never observe a record popped from the short-term tier but not yet
//! resolved into long-term storage.

use crate::associations::AssociativeIndex;
use crate::config::MemoryConfig;
use crate::error::Result;
use crate::keywords::{KeywordExtractor, SimpleKeywordExtractor};
use crate::long_term::LongTermStore;
use crate::maintenance::{self, MaintenanceHandle, MaintenanceReport};
use crate::recall::{score_record, sort_candidates, RankedCandidate};
use crate::short_term::ShortTermTier;
use crate::types::{MemoryId, MemoryInput, MemoryRecord, RecalledMemory};
use crate::working::WorkingMemory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Observability snapshot of the manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Records currently in the short-term tier
    pub short_term: usize,
    /// Records currently in long-term storage
    pub long_term: usize,
    /// Ids currently in the working window
    pub working: usize,
    /// Distinct keywords in the associative index
    pub keywords: usize,
    /// Records ever admitted over the manager's lifetime
    pub total_added: u64,
    /// Configured decay rate lambda
    pub decay_rate: f64,
    /// When the last maintenance pass ran
    pub last_maintenance: Option<DateTime<Utc>>,
}

/// All storage structures, guarded together.
struct MemoryState {
    short_term: ShortTermTier,
    long_term: LongTermStore,
    working: WorkingMemory,
    associations: AssociativeIndex,
    next_id: u64,
    last_maintenance: Option<DateTime<Utc>>,
}

/// Tiered memory manager for a conversational agent.
///
/// Cheap to clone; clones share the same state, which is how the background
/// maintenance task holds on to it.
#[derive(Clone)]
pub struct MemoryManager {
    state: Arc<RwLock<MemoryState>>,
    config: Arc<MemoryConfig>,
    extractor: Arc<dyn KeywordExtractor>,
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("config", &self.config)
            .field("extractor", &self.extractor.name())
            .finish()
    }
}

impl MemoryManager {
    /// Create a manager with the default keyword extractor. Fails fast on an
    /// invalid configuration; no partially-initialized manager is returned.
    pub fn new(config: MemoryConfig) -> Result<Self> {
        Self::with_extractor(config, Arc::new(SimpleKeywordExtractor::new()))
    }

    /// Create a manager with a custom keyword extractor.
    pub fn with_extractor(
        config: MemoryConfig,
        extractor: Arc<dyn KeywordExtractor>,
    ) -> Result<Self> {
        config.validate()?;

        let state = MemoryState {
            short_term: ShortTermTier::new(),
            long_term: LongTermStore::new(config.max_long_term),
            working: WorkingMemory::new(config.max_working),
            associations: AssociativeIndex::new(config.max_associations_per_keyword),
            next_id: 1,
            last_maintenance: None,
        };

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            config: Arc::new(config),
            extractor,
        })
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Admit a new memory. Convenience form of [`add`](Self::add).
    pub async fn add_memory(
        &self,
        content: impl Into<String>,
        kind: impl Into<String>,
        importance: f64,
    ) -> MemoryId {
        self.add(MemoryInput::new(content, kind, importance)).await
    }

    /// Admit a new memory: index its keywords, push the working window,
    /// insert into the short-term tier, and consolidate if that ran the tier
    /// past capacity. The capacity invariant holds again before this returns.
    pub async fn add(&self, input: MemoryInput) -> MemoryId {
        let keywords = self.extractor.extract(&input.content);
        let now = Utc::now();

        let mut state = self.state.write().await;
        let id = MemoryId(state.next_id);
        state.next_id += 1;

        let record = MemoryRecord {
            id,
            content: input.content,
            kind: input.kind,
            created_at: now,
            last_accessed_at: now,
            // NaN collapses to 0 here as well
            importance: input.importance.max(0.0),
            emotional_tag: input.emotional_tag,
            associations: keywords,
            access_count: 1,
            metadata: input.metadata,
        };

        state.associations.index(&record);
        state.working.push(id);
        state.short_term.insert(record);

        if state.short_term.len() > self.config.max_short_term {
            let (demoted, discarded) = Self::consolidate(&mut state, &self.config);
            tracing::debug!(demoted, discarded, "consolidated short-term tier");
        }

        id
    }

    /// Pop the lowest-importance records until the short-term tier is back
    /// within capacity, demoting each above the threshold and discarding the
    /// rest. Discarding is forgetting, not an error.
    fn consolidate(state: &mut MemoryState, config: &MemoryConfig) -> (usize, usize) {
        let threshold = config
            .consolidation
            .threshold_for(&state.short_term.importances());

        let mut demoted = 0;
        let mut discarded = 0;
        while state.short_term.len() > config.max_short_term {
            let Some(record) = state.short_term.pop_min() else {
                break;
            };
            if record.importance > threshold {
                state.long_term.store(record);
                demoted += 1;
            } else {
                tracing::debug!(id = %record.id, importance = record.importance,
                    "discarded below consolidation threshold");
                discarded += 1;
            }
        }
        (demoted, discarded)
    }

    /// Recall the `limit` most relevant records for a query, most relevant
    /// first. Every returned record gets its access count bumped and its
    /// last-accessed time set to now. `limit == 0` yields an empty list.
    pub async fn recall(&self, query: &str, limit: usize) -> Vec<RecalledMemory> {
        if limit == 0 {
            return Vec::new();
        }

        let query_keywords = self.extractor.extract(query);
        let now = Utc::now();

        let mut state = self.state.write().await;

        // Candidate generation: index hits, the working window, and the
        // whole short-term tier (bounded, cheap to scan).
        let mut candidate_ids: Vec<MemoryId> = Vec::new();
        for keyword in &query_keywords {
            candidate_ids.extend(state.associations.lookup(keyword));
        }
        candidate_ids.extend(state.working.iter());
        candidate_ids.extend(state.short_term.iter().map(|r| r.id));
        candidate_ids.sort_unstable();
        candidate_ids.dedup();

        let mut dangling = 0usize;
        let mut candidates: Vec<RankedCandidate> = Vec::with_capacity(candidate_ids.len());
        for id in candidate_ids {
            let record = state
                .short_term
                .get(id)
                .or_else(|| state.long_term.get(id));
            match record {
                Some(record) => {
                    let score =
                        score_record(record, &query_keywords, &self.config.recall_weights, now);
                    candidates.push(RankedCandidate::new(record, score));
                }
                // Owned by no tier: a defect the next cleanup pass heals.
                None => dangling += 1,
            }
        }
        if dangling > 0 {
            tracing::debug!(dangling, "recall skipped ids owned by no tier");
        }

        sort_candidates(&mut candidates);
        candidates.truncate(limit);

        let mut results = Vec::with_capacity(candidates.len());
        let MemoryState {
            short_term,
            long_term,
            ..
        } = &mut *state;
        for (rank, candidate) in candidates.into_iter().enumerate() {
            let record = match short_term.get_mut(candidate.id) {
                Some(record) => Some(record),
                None => long_term.get_mut(candidate.id),
            };
            if let Some(record) = record {
                record.record_access(now);
                results.push(RecalledMemory {
                    record: record.clone(),
                    score: candidate.score,
                    rank: rank + 1,
                });
            }
        }

        results
    }

    /// Resolved contents of the working window, oldest first. No access
    /// bookkeeping; this is the context feed, not a recall.
    pub async fn working_set(&self) -> Vec<MemoryRecord> {
        let state = self.state.read().await;
        state
            .working
            .iter()
            .filter_map(|id| {
                state
                    .short_term
                    .get(id)
                    .or_else(|| state.long_term.get(id))
                    .cloned()
            })
            .collect()
    }

    /// All records with the given category tag, across both tiers, newest
    /// first.
    pub async fn memories_of_kind(&self, kind: &str) -> Vec<MemoryRecord> {
        let state = self.state.read().await;
        let mut records: Vec<MemoryRecord> = state
            .short_term
            .iter()
            .filter(|r| r.kind == kind)
            .chain(state.long_term.iter_kind(kind))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }

    /// Observability snapshot.
    pub async fn stats(&self) -> MemoryStats {
        let state = self.state.read().await;
        MemoryStats {
            short_term: state.short_term.len(),
            long_term: state.long_term.len(),
            working: state.working.len(),
            keywords: state.associations.keyword_count(),
            total_added: state.next_id - 1,
            decay_rate: self.config.decay_rate,
            last_maintenance: state.last_maintenance,
        }
    }

    /// Run one maintenance pass: decay the short-term tier (then rebuild its
    /// ordering once), re-run consolidation, and drop associative entries
    /// referencing records owned by no tier.
    pub async fn run_maintenance(&self) -> MaintenanceReport {
        let now = Utc::now();
        let mut state = self.state.write().await;

        let decayed = state.short_term.apply_decay(self.config.decay_rate, now);
        let (demoted, discarded) = Self::consolidate(&mut state, &self.config);

        let MemoryState {
            short_term,
            long_term,
            associations,
            ..
        } = &mut *state;
        let associations_pruned =
            associations.retain_ids(|id| short_term.contains(id) || long_term.contains(id));

        state.last_maintenance = Some(now);

        MaintenanceReport {
            decayed,
            demoted,
            discarded,
            associations_pruned,
        }
    }

    /// Start the background maintenance task on the configured interval.
    pub fn spawn_maintenance(&self) -> MaintenanceHandle {
        maintenance::spawn(self.clone())
    }
}
