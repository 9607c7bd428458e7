//! Dice sources and rolling.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wg_core::DiceSpec;

use crate::error::{MechError, MechResult};

/// Something that produces die faces.
pub trait DiceSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// Uniform dice backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct RngDice {
    rng: StdRng,
}

impl RngDice {
    /// Reproducible dice from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl DiceSource for RngDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// A predetermined sequence of faces.
///
/// Values are clamped into `1..=sides`; once the sequence is exhausted every
/// die shows 1.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    values: VecDeque<u32>,
}

impl FixedRolls {
    /// Create a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Faces not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl DiceSource for FixedRolls {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.values.pop_front().unwrap_or(1).clamp(1, sides.max(1))
    }
}

/// Roll every die in `spec`.
pub fn roll_dice(spec: DiceSpec, source: &mut dyn DiceSource) -> MechResult<Vec<u32>> {
    if !spec.is_valid() {
        return Err(MechError::InvalidDice(spec.to_string()));
    }
    Ok((0..spec.count).map(|_| source.roll_die(spec.sides)).collect())
}
