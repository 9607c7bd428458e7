//! Core types for Wegweiser: branches, choices, effects, and the game state.
//!
//! This crate defines the data model the story script parses into and the
//! mutable state the engine resolves choices against. It is independent of
//! the parser: you can construct a [`Story`] programmatically or restore a
//! [`GameState`] from a JSON [`Snapshot`].

/// Choice gating conditions and their evaluation.
pub mod condition;
/// Stat and inventory effects attached to choices.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Item counts carried by the player.
pub mod inventory;
/// Bounded log of applied effects.
pub mod journal;
/// Dice specifications, roll directives, and roll outcomes.
pub mod roll;
/// Serializable projection of the game state.
pub mod snapshot;
/// The mutable per-session game state.
pub mod state;
/// Branches, choices, and the story graph.
pub mod story;
/// Visited-branch and traversed-transition sets.
pub mod tracker;

/// Re-export condition types.
pub use condition::{Condition, ConditionContext, ConditionKind, condition_satisfied};
/// Re-export effect types.
pub use effect::{DynamicDelta, DynamicSource, InventoryEffect, StatEffect};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the inventory.
pub use inventory::Inventory;
/// Re-export the journal.
pub use journal::Journal;
/// Re-export roll types.
pub use roll::{DiceSpec, MAX_DICE, MAX_SIDES, RollDirective, RollOutcome};
/// Re-export snapshot types.
pub use snapshot::Snapshot;
/// Re-export the game state.
pub use state::GameState;
/// Re-export story graph types.
pub use story::{Branch, BranchId, Choice, Edge, Story};
/// Re-export tracker types.
pub use tracker::{Transition, TransitionTracker, VisitTracker};
