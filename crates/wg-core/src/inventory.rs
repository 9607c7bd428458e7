//! Item counts carried by the player.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::effect::InventoryEffect;

/// Item name to count. Every stored count is positive; an absent key means
/// the player holds none of that item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, i64>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from raw counts, dropping non-positive entries.
    pub fn from_counts(counts: BTreeMap<String, i64>) -> Self {
        let items = counts.into_iter().filter(|(_, count)| *count > 0).collect();
        Self { items }
    }

    /// Add each effect's delta; items at or below zero are removed.
    ///
    /// Returns the effects that changed a count.
    pub fn apply_effects(&mut self, effects: &[InventoryEffect]) -> Vec<InventoryEffect> {
        let mut applied = Vec::new();
        for effect in effects {
            if effect.item.is_empty() || effect.delta == 0 {
                continue;
            }
            let current = self.count(&effect.item);
            let next = current.saturating_add(effect.delta);
            if next > 0 {
                self.items.insert(effect.item.clone(), next);
            } else {
                self.items.remove(&effect.item);
            }
            if next.max(0) != current {
                applied.push(effect.clone());
            }
        }
        applied
    }

    /// How many of an item the player holds.
    pub fn count(&self, item: &str) -> i64 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Whether the player holds at least one of an item.
    pub fn has(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    /// All held items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of distinct items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the underlying counts.
    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.items.clone()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_and_remove() {
        let mut inv = Inventory::new();
        inv.apply_effects(&[InventoryEffect::new("Key", 1), InventoryEffect::new("Coin", 3)]);
        assert_eq!(inv.count("Coin"), 3);
        assert!(inv.has("Key"));

        inv.apply_effects(&[InventoryEffect::new("Coin", -3)]);
        assert!(!inv.has("Coin"));
        assert_eq!(inv.count("Coin"), 0);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn removing_missing_item_is_noop() {
        let mut inv = Inventory::new();
        let applied = inv.apply_effects(&[InventoryEffect::new("Rope", -1)]);
        assert!(applied.is_empty());
        assert!(inv.is_empty());
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut inv = Inventory::new();
        inv.apply_effects(&[InventoryEffect::new("Key", 1)]);
        assert!(!inv.has("key"));
    }

    #[test]
    fn from_counts_drops_non_positive() {
        let counts = BTreeMap::from([
            ("Key".to_string(), 1),
            ("Ghost".to_string(), 0),
            ("Debt".to_string(), -2),
        ]);
        let inv = Inventory::from_counts(counts);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut inv = Inventory::new();
        inv.apply_effects(&[InventoryEffect::new("Key", 2)]);
        assert_eq!(serde_json::to_string(&inv).unwrap(), r#"{"Key":2}"#);
    }

    proptest! {
        #[test]
        fn counts_stay_positive(deltas in proptest::collection::vec((0usize..3, -5i64..6), 0..40)) {
            let names = ["Coin", "Key", "Rope"];
            let mut inv = Inventory::new();
            for (idx, delta) in deltas {
                inv.apply_effects(&[InventoryEffect::new(names[idx], delta)]);
                for (_, count) in inv.iter() {
                    prop_assert!(count > 0);
                }
            }
        }
    }
}
