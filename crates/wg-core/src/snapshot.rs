//! Serializable projection of the game state, used for undo and save files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tracker::Transition;

/// A deep copy of everything the player can change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Branch the player is on.
    #[serde(default)]
    pub current_branch_id: Option<String>,
    /// Stat values by case-folded key.
    #[serde(default)]
    pub stats: BTreeMap<String, i64>,
    /// Item counts.
    #[serde(default)]
    pub inventory: BTreeMap<String, i64>,
    /// Journal entries, oldest first.
    #[serde(default)]
    pub journal: Vec<String>,
    /// Visited branch ids, sorted.
    #[serde(default)]
    pub visited_branches: Vec<String>,
    /// Traversed edges, sorted by source then destination.
    #[serde(default)]
    pub visited_transitions: Vec<Transition>,
}
