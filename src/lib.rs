//! # Engram - Tiered Memory Cache for Conversational Agents
//!
//! An in-memory, importance-weighted memory system designed to back an
//! agent's long-running context:
//! - Short-Term Tier: bounded priority structure, the primary write target
//! - Long-Term Store: keyed store for records that proved durable
//! - Working Memory: FIFO window guaranteeing immediate-context recall
//! - Associative Index: keyword candidate generation for recall
//! - Maintenance: periodic decay, consolidation, and index cleanup
//!
//! ```rust,no_run
//! use engram::{MemoryConfig, MemoryManager};
//!
//! #[tokio::main]
//! async fn main() {
//!     let memory = MemoryManager::new(MemoryConfig::default()).unwrap();
//!     let maintenance = memory.spawn_maintenance();
//!
//!     memory.add_memory("chat asked about the validator", "dialogue", 0.8).await;
//!     let relevant = memory.recall("validator", 5).await;
//!     for hit in &relevant {
//!         println!("{}: {}", hit.score, hit.record.content);
//!     }
//!
//!     maintenance.shutdown().await;
//! }
//! ```

pub mod associations;
pub mod config;
pub mod error;
pub mod keywords;
pub mod long_term;
pub mod maintenance;
pub mod manager;
pub mod recall;
pub mod short_term;
pub mod types;
pub mod working;

pub use associations::AssociativeIndex;
pub use config::{ConsolidationPolicy, MemoryConfig, MemoryConfigBuilder, RecallWeights};
pub use error::{MemoryError, Result};
pub use keywords::{KeywordExtractor, SimpleKeywordExtractor};
pub use long_term::LongTermStore;
pub use maintenance::{MaintenanceHandle, MaintenanceReport};
pub use manager::{MemoryManager, MemoryStats};
pub use recall::score_record;
pub use short_term::ShortTermTier;
pub use types::{MemoryId, MemoryInput, MemoryRecord, RecalledMemory};
pub use working::WorkingMemory;
