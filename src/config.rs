//! Manager configuration: tier capacities, decay, consolidation policy,
//! recall weights

use crate::error::{MemoryError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rule deciding which popped short-term records survive into long-term
/// storage. Evaluated as a pure function of the current tier population so
/// the policy stays serializable and testable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsolidationPolicy {
    /// Records above this importance are demoted, the rest are discarded
    Fixed(f64),
    /// Threshold adapts to load: the median importance of the tier
    AdaptiveMedian,
}

impl ConsolidationPolicy {
    /// Resolve the threshold against the tier's current importances.
    pub fn threshold_for(&self, importances: &[f64]) -> f64 {
        match self {
            ConsolidationPolicy::Fixed(threshold) => *threshold,
            ConsolidationPolicy::AdaptiveMedian => {
                if importances.is_empty() {
                    return 0.0;
                }
                let mut sorted = importances.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
        }
    }
}

/// Weights for the recall score blend. The three terms are keyword overlap
/// with the query, record importance, and access recency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecallWeights {
    pub keyword: f64,
    pub importance: f64,
    pub recency: f64,
}

impl Default for RecallWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            importance: 0.3,
            recency: 0.2,
        }
    }
}

/// Memory manager configuration, immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Capacity of the short-term priority tier
    pub max_short_term: usize,
    /// Capacity of the long-term store
    pub max_long_term: usize,
    /// Capacity of the working-memory window
    pub max_working: usize,
    /// Per-keyword cap on associative index entries
    pub max_associations_per_keyword: usize,
    /// Decay rate lambda per hour since last access
    pub decay_rate: f64,
    /// What survives consolidation out of the short-term tier
    pub consolidation: ConsolidationPolicy,
    /// Period of the background maintenance task
    pub maintenance_interval: Duration,
    /// Recall score blend
    pub recall_weights: RecallWeights,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_short_term: 100,
            max_long_term: 10_000,
            max_working: 20,
            max_associations_per_keyword: 100,
            decay_rate: 0.01,
            consolidation: ConsolidationPolicy::Fixed(0.5),
            maintenance_interval: Duration::from_secs(60 * 60),
            recall_weights: RecallWeights::default(),
        }
    }
}

impl MemoryConfig {
    /// Check the configuration, failing fast on anything a manager could not
    /// run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_short_term == 0 {
            return Err(MemoryError::Configuration(
                "max_short_term must be greater than zero".into(),
            ));
        }
        if self.max_long_term == 0 {
            return Err(MemoryError::Configuration(
                "max_long_term must be greater than zero".into(),
            ));
        }
        if self.max_working == 0 {
            return Err(MemoryError::Configuration(
                "max_working must be greater than zero".into(),
            ));
        }
        if self.max_associations_per_keyword == 0 {
            return Err(MemoryError::Configuration(
                "max_associations_per_keyword must be greater than zero".into(),
            ));
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(MemoryError::Configuration(format!(
                "decay_rate must be finite and non-negative, got {}",
                self.decay_rate
            )));
        }
        if let ConsolidationPolicy::Fixed(threshold) = self.consolidation {
            if !threshold.is_finite() {
                return Err(MemoryError::Configuration(format!(
                    "consolidation threshold must be finite, got {threshold}"
                )));
            }
        }
        if self.maintenance_interval.is_zero() {
            return Err(MemoryError::Configuration(
                "maintenance_interval must be greater than zero".into(),
            ));
        }
        let weights = [
            self.recall_weights.keyword,
            self.recall_weights.importance,
            self.recall_weights.recency,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(MemoryError::Configuration(
                "recall weights must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for memory config
pub struct MemoryConfigBuilder {
    config: MemoryConfig,
}

impl MemoryConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: MemoryConfig::default(),
        }
    }

    pub fn max_short_term(mut self, capacity: usize) -> Self {
        self.config.max_short_term = capacity;
        self
    }

    pub fn max_long_term(mut self, capacity: usize) -> Self {
        self.config.max_long_term = capacity;
        self
    }

    pub fn max_working(mut self, capacity: usize) -> Self {
        self.config.max_working = capacity;
        self
    }

    pub fn max_associations_per_keyword(mut self, capacity: usize) -> Self {
        self.config.max_associations_per_keyword = capacity;
        self
    }

    pub fn decay_rate(mut self, rate: f64) -> Self {
        self.config.decay_rate = rate;
        self
    }

    pub fn consolidation(mut self, policy: ConsolidationPolicy) -> Self {
        self.config.consolidation = policy;
        self
    }

    pub fn maintenance_interval(mut self, interval: Duration) -> Self {
        self.config.maintenance_interval = interval;
        self
    }

    pub fn recall_weights(mut self, weights: RecallWeights) -> Self {
        self.config.recall_weights = weights;
        self
    }

    pub fn build(self) -> MemoryConfig {
        self.config
    }
}

impl Default for MemoryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MemoryConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = MemoryConfigBuilder::new().max_short_term(0).build();
        assert!(matches!(
            config.validate(),
            Err(MemoryError::Configuration(_))
        ));

        let config = MemoryConfigBuilder::new().max_working(0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_decay_rate_is_rejected() {
        let config = MemoryConfigBuilder::new().decay_rate(-0.5).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn fixed_policy_ignores_tier_statistics() {
        let policy = ConsolidationPolicy::Fixed(0.7);
        assert_eq!(policy.threshold_for(&[0.1, 0.2, 0.3]), 0.7);
        assert_eq!(policy.threshold_for(&[]), 0.7);
    }

    #[test]
    fn adaptive_median_splits_the_tier() {
        let policy = ConsolidationPolicy::AdaptiveMedian;
        assert_eq!(policy.threshold_for(&[0.9, 0.1, 0.5]), 0.5);
        assert!((policy.threshold_for(&[0.2, 0.4]) - 0.3).abs() < 1e-9);
        assert_eq!(policy.threshold_for(&[]), 0.0);
    }
}
