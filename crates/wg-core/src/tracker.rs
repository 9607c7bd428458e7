//! Visit and transition tracking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Branches the player has seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitTracker {
    visited: BTreeSet<String>,
}

impl VisitTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a branch visited. Blank ids are ignored.
    ///
    /// Returns true if the branch was not visited before.
    pub fn mark(&mut self, branch_id: &str) -> bool {
        let id = branch_id.trim();
        if id.is_empty() {
            return false;
        }
        self.visited.insert(id.to_string())
    }

    /// Whether a branch has been visited.
    pub fn contains(&self, branch_id: &str) -> bool {
        self.visited.contains(branch_id.trim())
    }

    /// Visited ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    /// Number of visited branches.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Whether nothing has been visited.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Forget every visit.
    pub fn clear(&mut self) {
        self.visited.clear();
    }
}

/// A traversed edge between two branches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Source branch.
    pub from: String,
    /// Destination branch.
    pub to: String,
}

impl Transition {
    /// Create a transition.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Display label, `from->to`. Not unique when ids contain `->`.
    pub fn key(&self) -> String {
        format!("{}->{}", self.from, self.to)
    }
}

/// Edges the player has actually traversed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTracker {
    transitions: BTreeSet<Transition>,
}

impl TransitionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a traversal. Returns true if the edge was new.
    pub fn mark(&mut self, from: &str, to: &str) -> bool {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return false;
        }
        self.transitions.insert(Transition::new(from, to))
    }

    /// Whether an edge has been traversed.
    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.transitions
            .contains(&Transition::new(from.trim(), to.trim()))
    }

    /// Traversed edges ordered by source, then destination.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    /// Number of traversed edges.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing has been traversed.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Forget every traversal.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
