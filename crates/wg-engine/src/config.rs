//! Engine configuration.

use wg_core::journal::DEFAULT_JOURNAL_CAPACITY;

/// What happens to applied effects when a choice leads to a missing branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailedTransitionPolicy {
    /// Restore the pre-choice state; only the error message remains.
    #[default]
    Rollback,
    /// Keep the applied stat and inventory changes. They cannot be undone.
    KeepEffects,
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls.
    pub seed: u64,
    /// Journal entries kept before the oldest are evicted.
    pub max_journal_entries: usize,
    /// Handling of choices whose destination does not exist.
    pub failed_transition: FailedTransitionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_journal_entries: DEFAULT_JOURNAL_CAPACITY,
            failed_transition: FailedTransitionPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the journal size (at least 1).
    pub fn with_journal_size(mut self, entries: usize) -> Self {
        self.max_journal_entries = entries.max(1);
        self
    }

    /// Set the failed-transition policy.
    pub fn with_failed_transition(mut self, policy: FailedTransitionPolicy) -> Self {
        self.failed_transition = policy;
        self
    }
}
