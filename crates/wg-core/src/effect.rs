//! Effects that modify player stats or inventory when a choice is made.

use serde::{Deserialize, Serialize};

/// Which part of the most recent roll a dynamic stat delta reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DynamicSource {
    /// The stat value plus the dice total.
    RollTotal,
    /// The sum of the dice alone.
    RollDice,
    /// The stat value the roll was made against.
    RollStat,
}

impl DynamicSource {
    /// Look up a dynamic amount keyword (`roll`, `dice`, `modifier`, ...).
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "roll" | "total" | "x" | "result" | "rolltotal" => Some(Self::RollTotal),
            "dice" | "die" | "dicetotal" => Some(Self::RollDice),
            "stat" | "modifier" | "mod" | "statvalue" => Some(Self::RollStat),
            _ => None,
        }
    }
}

impl std::fmt::Display for DynamicSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RollTotal => write!(f, "roll total"),
            Self::RollDice => write!(f, "dice total"),
            Self::RollStat => write!(f, "roll stat"),
        }
    }
}

/// A delta computed at resolution time from a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicDelta {
    /// The roll component to read.
    pub source: DynamicSource,
    /// The authored sign, `1` or `-1`.
    pub scale: i64,
}

/// A change to a single stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEffect {
    /// Case-folded stat key.
    pub stat: String,
    /// Static delta. Ignored when `dynamic` is set.
    pub delta: i64,
    /// Roll-dependent delta, if any.
    pub dynamic: Option<DynamicDelta>,
    /// The stat name as written in the script.
    pub label: String,
}

impl StatEffect {
    /// A fixed delta on `name`.
    pub fn fixed(name: impl Into<String>, delta: i64) -> Self {
        let label = name.into().trim().to_string();
        Self {
            stat: label.to_lowercase(),
            delta,
            dynamic: None,
            label,
        }
    }

    /// A delta on `name` computed from the most recent roll.
    pub fn dynamic(name: impl Into<String>, source: DynamicSource, scale: i64) -> Self {
        let label = name.into().trim().to_string();
        Self {
            stat: label.to_lowercase(),
            delta: 0,
            dynamic: Some(DynamicDelta {
                source,
                scale: scale.signum(),
            }),
            label,
        }
    }

    /// Whether the delta depends on a roll.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic.is_some()
    }
}

/// A change to the count of a single inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEffect {
    /// Item name, trimmed, case-sensitive.
    pub item: String,
    /// Non-zero count change.
    pub delta: i64,
}

impl InventoryEffect {
    /// Create an inventory effect.
    pub fn new(item: impl Into<String>, delta: i64) -> Self {
        Self {
            item: item.into().trim().to_string(),
            delta,
        }
    }
}

/// Format a delta with an explicit sign, e.g. `+5` or `-2`.
pub fn signed(delta: i64) -> String {
    if delta >= 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}
