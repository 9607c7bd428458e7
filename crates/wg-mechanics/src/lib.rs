//! Dice mechanics for Wegweiser.
//!
//! Rolls dice from an injectable [`DiceSource`] and adjudicates a choice's
//! [`RollDirective`](wg_core::RollDirective) into a
//! [`RollOutcome`](wg_core::RollOutcome). Production play uses a seeded
//! [`RngDice`]; tests and replays use [`FixedRolls`].

pub mod dice;
pub mod error;
pub mod resolve;

pub use dice::{DiceSource, FixedRolls, RngDice, roll_dice};
pub use error::{MechError, MechResult};
pub use resolve::resolve_roll;
