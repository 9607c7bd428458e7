//! Branches, choices, and the story graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::effect::{InventoryEffect, StatEffect};
use crate::error::{CoreError, CoreResult};
use crate::roll::RollDirective;

/// Identifier of a branch.
pub type BranchId = String;

/// One selectable action on a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Identifier, unique within its branch.
    pub id: String,
    /// Text shown to the player.
    pub text: String,
    /// Destination when the choice has no roll.
    pub next: Option<BranchId>,
    /// Stat changes.
    pub stats: Vec<StatEffect>,
    /// Inventory changes.
    pub inventory: Vec<InventoryEffect>,
    /// Dice test that overrides `next`.
    pub roll: Option<RollDirective>,
    /// Hides the choice when false.
    pub visibility_condition: Option<Condition>,
    /// Disables the choice when false.
    pub valid_condition: Option<Condition>,
}

impl Choice {
    /// Create a choice with no destination or effects.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next: None,
            stats: Vec::new(),
            inventory: Vec::new(),
            roll: None,
            visibility_condition: None,
            valid_condition: None,
        }
    }

    /// Set the destination branch.
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Add a stat effect.
    pub fn with_stat(mut self, effect: StatEffect) -> Self {
        self.stats.push(effect);
        self
    }

    /// Add an inventory effect.
    pub fn with_item(mut self, effect: InventoryEffect) -> Self {
        self.inventory.push(effect);
        self
    }

    /// Attach a roll.
    pub fn with_roll(mut self, roll: RollDirective) -> Self {
        self.roll = Some(roll);
        self
    }

    /// Set the visibility condition.
    pub fn with_visibility(mut self, condition: Condition) -> Self {
        self.visibility_condition = Some(condition);
        self
    }

    /// Set the validity condition.
    pub fn with_validity(mut self, condition: Condition) -> Self {
        self.valid_condition = Some(condition);
        self
    }

    /// Every branch this choice can lead to.
    pub fn destinations(&self) -> Vec<&str> {
        match &self.roll {
            Some(roll) => vec![roll.ok.as_str(), roll.fail.as_str()],
            None => self.next.as_deref().into_iter().collect(),
        }
    }
}

/// One narrative node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique, non-empty identifier.
    pub id: BranchId,
    /// Heading shown above the description.
    pub title: String,
    /// Prose; paragraphs are separated by a blank line.
    pub description: String,
    /// Available choices in script order.
    pub choices: Vec<Choice>,
}

impl Branch {
    /// Create a branch with no choices.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Find a choice by id.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// The description split into paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// A directed edge defined by the script.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Source branch.
    pub from: BranchId,
    /// Destination branch.
    pub to: BranchId,
    /// The choice that defines the edge.
    pub choice_id: String,
}

/// The immutable branch graph produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    start: BranchId,
    branches: BTreeMap<BranchId, Branch>,
    order: Vec<BranchId>,
}

impl Story {
    /// Assemble a story from branches in script order.
    ///
    /// The first branch becomes the start. Destinations are not checked here,
    /// so choices may point at branches that do not exist.
    pub fn from_branches(branches: Vec<Branch>) -> CoreResult<Self> {
        let start = branches
            .first()
            .map(|b| b.id.clone())
            .ok_or(CoreError::EmptyStory)?;

        let mut map = BTreeMap::new();
        let mut order = Vec::with_capacity(branches.len());
        for branch in branches {
            if map.contains_key(&branch.id) {
                return Err(CoreError::DuplicateBranch(branch.id));
            }
            order.push(branch.id.clone());
            map.insert(branch.id.clone(), branch);
        }

        Ok(Self {
            start,
            branches: map,
            order,
        })
    }

    /// Id of the first branch.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Look up a branch.
    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.get(id)
    }

    /// Whether a branch exists.
    pub fn contains(&self, id: &str) -> bool {
        self.branches.contains_key(id)
    }

    /// Branches in script order.
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.order.iter().filter_map(|id| self.branches.get(id))
    }

    /// Number of branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Always false for a constructed story.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Every edge the script defines, including both roll outcomes.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for branch in self.branches() {
            for choice in &branch.choices {
                for to in choice.destinations() {
                    edges.push(Edge {
                        from: branch.id.clone(),
                        to: to.to_string(),
                        choice_id: choice.id.clone(),
                    });
                }
            }
        }
        edges
    }

    /// Destinations named by choices that no branch defines.
    pub fn dangling_references(&self) -> BTreeSet<&str> {
        self.branches()
            .flat_map(|b| b.choices.iter())
            .flat_map(|c| c.destinations())
            .filter(|to| !self.contains(to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::DiceSpec;

    fn two_branch_story() -> Story {
        Story::from_branches(vec![
            Branch::new("a", "A", "First.")
                .with_choice(Choice::new("choice-1", "Go on").with_next("b"))
                .with_choice(Choice::new("choice-2", "Nowhere").with_next("z")),
            Branch::new("b", "B", "Second."),
        ])
        .unwrap()
    }

    #[test]
    fn first_branch_is_start() {
        let story = two_branch_story();
        assert_eq!(story.start(), "a");
        assert_eq!(story.len(), 2);
        let ids: Vec<_> = story.branches().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn empty_story_rejected() {
        assert_eq!(Story::from_branches(vec![]), Err(CoreError::EmptyStory));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Story::from_branches(vec![
            Branch::new("a", "A", "x"),
            Branch::new("a", "Again", "y"),
        ]);
        assert_eq!(result, Err(CoreError::DuplicateBranch("a".to_string())));
    }

    #[test]
    fn dangling_references_listed() {
        let story = two_branch_story();
        let dangling: Vec<_> = story.dangling_references().into_iter().collect();
        assert_eq!(dangling, ["z"]);
    }

    #[test]
    fn roll_choices_produce_two_edges() {
        let roll = RollDirective {
            stat: None,
            dice: DiceSpec::default(),
            target: 4,
            ok: "win".to_string(),
            fail: "lose".to_string(),
        };
        let choice = Choice::new("choice-1", "Try").with_next("ignored").with_roll(roll);
        assert_eq!(choice.destinations(), ["win", "lose"]);

        let story = Story::from_branches(vec![Branch::new("a", "A", "x").with_choice(choice)])
            .unwrap();
        assert_eq!(story.edges().len(), 2);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let branch = Branch::new("a", "A", "One.\n\nTwo.\n\n\nThree.");
        let paragraphs: Vec<_> = branch.paragraphs().collect();
        assert_eq!(paragraphs, ["One.", "Two.", "Three."]);
    }
}
