//! Condition evaluation for choice visibility and validity.

use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;
use crate::tracker::VisitTracker;

/// The predicate a [`Condition`] applies to its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionKind {
    /// Every listed branch has been visited.
    VisitedAll,
    /// At least one listed branch has been visited.
    VisitedAny,
    /// No listed branch has been visited.
    VisitedNone,
    /// Every listed item is in the inventory.
    InventoryAll,
    /// At least one listed item is in the inventory.
    InventoryAny,
}

impl ConditionKind {
    /// Look up a condition keyword.
    ///
    /// Matching ignores case, `-`, `_`, and spaces, so `visited_any`,
    /// `Visited-Any`, and `visitedany` are the same keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let normalized: String = word
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' ' | '\t'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "visited" | "visitedall" | "allvisited" | "seen" => Some(Self::VisitedAll),
            "visitedany" | "anyvisited" | "seenany" => Some(Self::VisitedAny),
            "visitednone" | "notvisited" | "unvisited" | "notseen" | "never" => {
                Some(Self::VisitedNone)
            }
            "has" | "hasall" | "inventory" | "inventoryall" | "items" | "have" => {
                Some(Self::InventoryAll)
            }
            "hasany" | "inventoryany" | "anyitem" | "haveany" => Some(Self::InventoryAny),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VisitedAll => write!(f, "visited-all"),
            Self::VisitedAny => write!(f, "visited-any"),
            Self::VisitedNone => write!(f, "visited-none"),
            Self::InventoryAll => write!(f, "inventory-all"),
            Self::InventoryAny => write!(f, "inventory-any"),
        }
    }
}

/// A predicate over visit history or inventory contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// What to test.
    pub kind: ConditionKind,
    /// Branch ids or item names to test against.
    pub values: Vec<String>,
}

/// The state a condition is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
    /// Branches the player has visited.
    pub visited: &'a VisitTracker,
    /// Items the player carries.
    pub inventory: &'a Inventory,
}

impl Condition {
    /// Create a condition.
    pub fn new<I, S>(kind: ConditionKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluate the condition. An empty value list is always false.
    pub fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        if self.values.is_empty() {
            return false;
        }
        let mut values = self.values.iter().map(|v| v.trim());
        match self.kind {
            ConditionKind::VisitedAll => values.all(|v| ctx.visited.contains(v)),
            ConditionKind::VisitedAny => values.any(|v| ctx.visited.contains(v)),
            ConditionKind::VisitedNone => !values.any(|v| ctx.visited.contains(v)),
            ConditionKind::InventoryAll => values.all(|v| ctx.inventory.has(v)),
            ConditionKind::InventoryAny => values.any(|v| ctx.inventory.has(v)),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.values.join(", "))
    }
}

/// Evaluate an optional condition; a missing condition always passes.
pub fn condition_satisfied(condition: Option<&Condition>, ctx: &ConditionContext<'_>) -> bool {
    condition.is_none_or(|c| c.evaluate(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::InventoryEffect;

    fn fixture() -> (VisitTracker, Inventory) {
        let mut visited = VisitTracker::new();
        visited.mark("gate");
        visited.mark("hall");
        let mut inventory = Inventory::new();
        inventory.apply_effects(&[InventoryEffect::new("Lantern", 1)]);
        (visited, inventory)
    }

    #[test]
    fn visited_all_and_any() {
        let (visited, inventory) = fixture();
        let ctx = ConditionContext {
            visited: &visited,
            inventory: &inventory,
        };

        assert!(Condition::new(ConditionKind::VisitedAll, ["gate", "hall"]).evaluate(&ctx));
        assert!(!Condition::new(ConditionKind::VisitedAll, ["gate", "crypt"]).evaluate(&ctx));
        assert!(Condition::new(ConditionKind::VisitedAny, ["crypt", "hall"]).evaluate(&ctx));
        assert!(!Condition::new(ConditionKind::VisitedAny, ["crypt"]).evaluate(&ctx));
    }

    #[test]
    fn visited_none() {
        let (visited, inventory) = fixture();
        let ctx = ConditionContext {
            visited: &visited,
            inventory: &inventory,
        };

        assert!(Condition::new(ConditionKind::VisitedNone, ["crypt"]).evaluate(&ctx));
        assert!(!Condition::new(ConditionKind::VisitedNone, ["crypt", "gate"]).evaluate(&ctx));
    }

    #[test]
    fn inventory_predicates() {
        let (visited, inventory) = fixture();
        let ctx = ConditionContext {
            visited: &visited,
            inventory: &inventory,
        };

        assert!(Condition::new(ConditionKind::InventoryAll, ["Lantern"]).evaluate(&ctx));
        assert!(!Condition::new(ConditionKind::InventoryAll, ["lantern"]).evaluate(&ctx));
        assert!(Condition::new(ConditionKind::InventoryAny, ["Rope", "Lantern"]).evaluate(&ctx));
        assert!(!Condition::new(ConditionKind::InventoryAny, ["Rope"]).evaluate(&ctx));
    }

    #[test]
    fn empty_values_fail_closed() {
        let (visited, inventory) = fixture();
        let ctx = ConditionContext {
            visited: &visited,
            inventory: &inventory,
        };

        for kind in [
            ConditionKind::VisitedAll,
            ConditionKind::VisitedAny,
            ConditionKind::VisitedNone,
            ConditionKind::InventoryAll,
            ConditionKind::InventoryAny,
        ] {
            let cond = Condition::new(kind, Vec::<String>::new());
            assert!(!cond.evaluate(&ctx), "{kind} must fail closed");
        }
    }

    #[test]
    fn absent_condition_passes() {
        let (visited, inventory) = fixture();
        let ctx = ConditionContext {
            visited: &visited,
            inventory: &inventory,
        };
        assert!(condition_satisfied(None, &ctx));
    }

    #[test]
    fn keyword_synonyms() {
        assert_eq!(ConditionKind::from_keyword("Visited"), Some(ConditionKind::VisitedAll));
        assert_eq!(ConditionKind::from_keyword("visited_any"), Some(ConditionKind::VisitedAny));
        assert_eq!(ConditionKind::from_keyword("not-visited"), Some(ConditionKind::VisitedNone));
        assert_eq!(ConditionKind::from_keyword("has"), Some(ConditionKind::InventoryAll));
        assert_eq!(ConditionKind::from_keyword("HAS ANY"), Some(ConditionKind::InventoryAny));
        assert_eq!(ConditionKind::from_keyword("maybe"), None);
    }
}
