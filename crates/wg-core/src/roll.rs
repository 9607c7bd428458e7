//! Dice specifications, roll directives, and roll outcomes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::story::BranchId;

/// Most dice a single roll may throw.
pub const MAX_DICE: u32 = 100;

/// Most sides a die may have.
pub const MAX_SIDES: u32 = 1000;

/// A number of identical dice, written `NdM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSpec {
    /// How many dice to roll.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
}

impl DiceSpec {
    /// Create a dice spec.
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// Whether count lies in `1..=MAX_DICE` and sides in `1..=MAX_SIDES`.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_DICE).contains(&self.count) && (1..=MAX_SIDES).contains(&self.sides)
    }
}

impl Default for DiceSpec {
    fn default() -> Self {
        Self { count: 1, sides: 6 }
    }
}

impl FromStr for DiceSpec {
    type Err = CoreError;

    /// Parse `2d6`, `d20`, or `1D8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        let invalid = || CoreError::InvalidDice(s.trim().to_string());
        let (count, sides) = text.split_once('d').ok_or_else(invalid)?;
        let count = if count.trim().is_empty() {
            1
        } else {
            count.trim().parse::<u32>().map_err(|_| invalid())?
        };
        let sides = sides.trim().parse::<u32>().map_err(|_| invalid())?;
        let spec = Self { count, sides };
        if spec.is_valid() { Ok(spec) } else { Err(invalid()) }
    }
}

impl std::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// A dice test that picks one of two destination branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollDirective {
    /// Stat added to the dice total, if any.
    pub stat: Option<String>,
    /// Dice to roll.
    pub dice: DiceSpec,
    /// Minimum total for success.
    pub target: i64,
    /// Destination on success.
    pub ok: BranchId,
    /// Destination on failure.
    pub fail: BranchId,
}

/// The adjudicated result of a [`RollDirective`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The directive that was rolled.
    pub directive: RollDirective,
    /// Value of the directive's stat at roll time (0 without a stat).
    pub stat_value: i64,
    /// Individual die values, each in `1..=sides`.
    pub rolls: Vec<u32>,
    /// Sum of `rolls`.
    pub dice_total: i64,
    /// `stat_value + dice_total`.
    pub total: i64,
    /// Whether `total >= target`.
    pub success: bool,
}

impl RollOutcome {
    /// The branch this outcome leads to.
    pub fn destination(&self) -> &str {
        if self.success {
            &self.directive.ok
        } else {
            &self.directive.fail
        }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{} [{}] + {} = {} vs {}: {}",
            self.directive.dice,
            values.join(", "),
            self.stat_value,
            self.total,
            self.directive.target,
            if self.success { "success" } else { "failure" }
        )
    }
}
