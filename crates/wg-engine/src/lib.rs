//! Narrative resolution engine for Wegweiser.
//!
//! The [`Engine`] takes a parsed [`wg_core::Story`] and a [`StatsManager`]
//! built from the stat config, then resolves the player's choices: it checks
//! conditions, rolls dice, applies stat and inventory effects, journals what
//! happened, and moves between branches. Every committed choice can be
//! undone, and the whole state round-trips through a JSON [`SavePayload`].

pub mod config;
pub mod engine;
pub mod error;
pub mod save;
pub mod stats;

pub use config::{EngineConfig, FailedTransitionPolicy};
pub use engine::{AvailableChoice, Begin, ChoiceOutcome, Engine, OutcomeStatus};
pub use error::{EngineError, EngineResult};
pub use save::{SAVE_VERSION, SavePayload, StoryMeta};
pub use stats::{ResolvedStat, StatEvaluation, StatPartition, StatsManager};
