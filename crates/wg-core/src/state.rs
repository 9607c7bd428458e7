//! The mutable per-session game state.

use std::collections::BTreeMap;

use crate::condition::ConditionContext;
use crate::inventory::Inventory;
use crate::journal::Journal;
use crate::roll::RollOutcome;
use crate::snapshot::Snapshot;
use crate::tracker::{TransitionTracker, VisitTracker};

/// Everything that changes while a story is played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Branch the player is on.
    pub current_branch_id: String,
    /// Stat values by case-folded key.
    pub stats: BTreeMap<String, i64>,
    /// Items carried.
    pub inventory: Inventory,
    /// Summaries of applied effects.
    pub journal: Journal,
    /// Branches seen.
    pub visited: VisitTracker,
    /// Edges traversed.
    pub transitions: TransitionTracker,
    /// Outcome of the roll made by the latest choice, if any.
    pub last_roll: Option<RollOutcome>,
    /// Non-fatal problem raised by the latest action.
    pub system_error: Option<String>,
}

impl GameState {
    /// Create a state positioned at `start` with the given stat defaults.
    pub fn new(start: &str, defaults: &BTreeMap<String, i64>, max_journal_entries: usize) -> Self {
        let mut state = Self {
            current_branch_id: String::new(),
            stats: BTreeMap::new(),
            inventory: Inventory::new(),
            journal: Journal::with_capacity(max_journal_entries),
            visited: VisitTracker::new(),
            transitions: TransitionTracker::new(),
            last_roll: None,
            system_error: None,
        };
        state.reset(start, defaults);
        state
    }

    /// Reinitialize everything and mark `start` visited.
    pub fn reset(&mut self, start: &str, defaults: &BTreeMap<String, i64>) {
        self.stats = defaults.clone();
        self.inventory.clear();
        self.journal.clear();
        self.visited.clear();
        self.transitions.clear();
        self.last_roll = None;
        self.system_error = None;
        self.set_current_branch(start);
    }

    /// Move to a branch and mark it visited.
    pub fn set_current_branch(&mut self, branch_id: &str) {
        self.current_branch_id = branch_id.trim().to_string();
        self.visited.mark(branch_id);
    }

    /// Current value of a stat, if configured.
    pub fn stat(&self, key: &str) -> Option<i64> {
        self.stats.get(&key.to_lowercase()).copied()
    }

    /// View for condition evaluation.
    pub fn condition_context(&self) -> ConditionContext<'_> {
        ConditionContext {
            visited: &self.visited,
            inventory: &self.inventory,
        }
    }

    /// Deep copy of the restorable parts of the state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_branch_id: Some(self.current_branch_id.clone()),
            stats: self.stats.clone(),
            inventory: self.inventory.to_map(),
            journal: self.journal.to_vec(),
            visited_branches: self.visited.iter().map(str::to_string).collect(),
            visited_transitions: self.transitions.iter().cloned().collect(),
        }
    }

    /// Replace the state with a snapshot.
    ///
    /// Stats not present in `defaults` are dropped and configured stats the
    /// snapshot lacks fall back to their defaults. Inventory is taken as-is
    /// apart from non-positive counts. The branch id is copied without
    /// validation; callers that know the story check it afterwards.
    pub fn restore(&mut self, snapshot: &Snapshot, defaults: &BTreeMap<String, i64>) {
        self.stats = defaults
            .iter()
            .map(|(key, default)| {
                let value = snapshot
                    .stats
                    .iter()
                    .find(|(k, _)| k.to_lowercase() == *key)
                    .map_or(*default, |(_, v)| *v);
                (key.clone(), value)
            })
            .collect();
        self.inventory = Inventory::from_counts(snapshot.inventory.clone());
        self.journal.replace(snapshot.journal.iter().cloned());

        self.visited.clear();
        for id in &snapshot.visited_branches {
            self.visited.mark(id);
        }
        self.transitions.clear();
        for t in &snapshot.visited_transitions {
            self.transitions.mark(&t.from, &t.to);
        }

        self.current_branch_id = snapshot
            .current_branch_id
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if !self.current_branch_id.is_empty() {
            self.visited.mark(&self.current_branch_id);
        }
        self.last_roll = None;
        self.system_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::InventoryEffect;

    fn defaults() -> BTreeMap<String, i64> {
        BTreeMap::from([("luck".to_string(), 0), ("strength".to_string(), 3)])
    }

    #[test]
    fn new_state_visits_start() {
        let state = GameState::new("gate", &defaults(), 10);
        assert_eq!(state.current_branch_id, "gate");
        assert!(state.visited.contains("gate"));
        assert_eq!(state.stat("Strength"), Some(3));
        assert_eq!(state.stat("vigor"), None);
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut state = GameState::new("gate", &defaults(), 10);
        state.stats.insert("luck".to_string(), 4);
        state.inventory.apply_effects(&[InventoryEffect::new("Key", 1)]);
        state.journal.append("took the key");
        state.transitions.mark("gate", "hall");
        state.set_current_branch("hall");
        let snap = state.snapshot();

        let mut other = GameState::new("gate", &defaults(), 10);
        other.restore(&snap, &defaults());
        assert_eq!(other, state);
    }

    #[test]
    fn snapshot_keeps_edges_with_arrows_in_ids() {
        let mut state = GameState::new("a", &defaults(), 10);
        state.transitions.mark("a->b", "c");
        state.transitions.mark("a", "b->c");
        let snap = state.snapshot();
        assert_eq!(snap.visited_transitions.len(), 2);

        let mut other = GameState::new("a", &defaults(), 10);
        other.restore(&snap, &defaults());
        assert_eq!(other.snapshot(), snap);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut state = GameState::new("gate", &defaults(), 10);
        let snap = state.snapshot();
        state.stats.insert("luck".to_string(), 9);
        state.journal.append("later");
        assert_eq!(snap.stats["luck"], 0);
        assert!(snap.journal.is_empty());
    }

    #[test]
    fn restore_filters_stats() {
        let snap = Snapshot {
            current_branch_id: Some("hall".to_string()),
            stats: BTreeMap::from([("LUCK".to_string(), 7), ("vigor".to_string(), 2)]),
            ..Snapshot::default()
        };
        let mut state = GameState::new("gate", &defaults(), 10);
        state.restore(&snap, &defaults());
        assert_eq!(state.stat("luck"), Some(7));
        assert_eq!(state.stat("strength"), Some(3));
        assert_eq!(state.stat("vigor"), None);
        assert!(state.visited.contains("hall"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = GameState::new("gate", &defaults(), 10);
        state.inventory.apply_effects(&[InventoryEffect::new("Key", 1)]);
        state.system_error = Some("oops".to_string());
        state.set_current_branch("hall");
        state.reset("gate", &defaults());
        assert!(state.inventory.is_empty());
        assert_eq!(state.system_error, None);
        assert_eq!(state.visited.len(), 1);
    }
}
