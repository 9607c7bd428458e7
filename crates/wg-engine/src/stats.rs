//! Stat registry and effect evaluation.
//!
//! Effects on stats the config does not define are reported, never applied.
//! Dynamic effects need a roll; without one they are dropped with an issue.

use std::collections::BTreeMap;

use wg_core::{DynamicSource, RollOutcome, StatEffect};

/// Stat effects split by whether the registry knows their stat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatPartition {
    /// Effects on configured stats, in order.
    pub allowed: Vec<StatEffect>,
    /// Distinct labels of unconfigured stats, in order of appearance.
    pub unknown: Vec<String>,
}

/// A stat change with its delta decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStat {
    /// Case-folded stat key.
    pub stat: String,
    /// Name as written in the script.
    pub label: String,
    /// Amount to add.
    pub delta: i64,
}

/// Evaluated effects plus the non-fatal problems found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatEvaluation {
    /// Effects ready to apply.
    pub effects: Vec<ResolvedStat>,
    /// Messages about effects that were dropped.
    pub issues: Vec<String>,
}

/// Registry of configured stats and their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsManager {
    defaults: BTreeMap<String, i64>,
}

impl StatsManager {
    /// Build a registry; names are case-folded.
    pub fn new<I, S>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        Self {
            defaults: defaults
                .into_iter()
                .map(|(name, value)| (name.as_ref().trim().to_lowercase(), value))
                .collect(),
        }
    }

    /// Whether a stat is configured.
    pub fn is_known(&self, name: &str) -> bool {
        self.defaults.contains_key(&name.trim().to_lowercase())
    }

    /// Configured default for a stat.
    pub fn default_value(&self, name: &str) -> Option<i64> {
        self.defaults.get(&name.trim().to_lowercase()).copied()
    }

    /// The configured defaults, keyed by case-folded name.
    pub fn defaults(&self) -> &BTreeMap<String, i64> {
        &self.defaults
    }

    /// A fresh stat map holding every default.
    pub fn default_stats(&self) -> BTreeMap<String, i64> {
        self.defaults.clone()
    }

    /// Number of configured stats.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether no stats are configured.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Split effects into configured and unknown stats.
    pub fn partition_effects(&self, effects: &[StatEffect]) -> StatPartition {
        let mut partition = StatPartition::default();
        for effect in effects {
            if self.is_known(&effect.stat) {
                partition.allowed.push(effect.clone());
            } else if !partition.unknown.contains(&effect.label) {
                partition.unknown.push(effect.label.clone());
            }
        }
        partition
    }

    /// Decide each effect's delta.
    ///
    /// `roll` is the roll made for this choice; `last_roll` is used when
    /// there is none.
    pub fn evaluate_effects(
        &self,
        effects: &[StatEffect],
        roll: Option<&RollOutcome>,
        last_roll: Option<&RollOutcome>,
    ) -> StatEvaluation {
        let context = roll.or(last_roll);
        let mut evaluation = StatEvaluation::default();
        for effect in effects {
            let delta = match (&effect.dynamic, context) {
                (None, _) => effect.delta,
                (Some(dynamic), Some(outcome)) => {
                    dynamic.scale.saturating_mul(roll_value(dynamic.source, outcome))
                }
                (Some(dynamic), None) => {
                    evaluation.issues.push(format!(
                        "No roll available for {} ({}).",
                        effect.label, dynamic.source
                    ));
                    continue;
                }
            };
            evaluation.effects.push(ResolvedStat {
                stat: effect.stat.clone(),
                label: effect.label.clone(),
                delta,
            });
        }
        evaluation
    }

    /// Add each delta onto `stats` and return those that changed something.
    ///
    /// Unset stats start from their default and sums saturate at the `i64`
    /// bounds. Zero deltas and unconfigured
    /// stats are skipped.
    pub fn apply_evaluated_effects(
        &self,
        stats: &mut BTreeMap<String, i64>,
        resolved: &[ResolvedStat],
    ) -> Vec<ResolvedStat> {
        let mut applied = Vec::new();
        for effect in resolved {
            if effect.delta == 0 {
                continue;
            }
            let Some(default) = self.defaults.get(&effect.stat) else {
                continue;
            };
            let value = stats.entry(effect.stat.clone()).or_insert(*default);
            *value = value.saturating_add(effect.delta);
            log::debug!("{} {:+} -> {}", effect.stat, effect.delta, value);
            applied.push(effect.clone());
        }
        applied
    }
}

fn roll_value(source: DynamicSource, outcome: &RollOutcome) -> i64 {
    match source {
        DynamicSource::RollTotal => outcome.total,
        DynamicSource::RollDice => outcome.dice_total,
        DynamicSource::RollStat => outcome.stat_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wg_core::{DiceSpec, RollDirective};

    fn manager() -> StatsManager {
        StatsManager::new([("Luck", 0), ("strength", 3), ("gold", 10)])
    }

    fn outcome(stat_value: i64, rolls: Vec<u32>) -> RollOutcome {
        let dice_total: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        RollOutcome {
            directive: RollDirective {
                stat: Some("strength".to_string()),
                dice: DiceSpec::new(2, 6),
                target: 10,
                ok: "win".to_string(),
                fail: "lose".to_string(),
            },
            stat_value,
            rolls,
            dice_total,
            total: stat_value + dice_total,
            success: true,
        }
    }

    #[test]
    fn registry_folds_case() {
        let m = manager();
        assert!(m.is_known("LUCK"));
        assert_eq!(m.default_value("Strength"), Some(3));
        assert_eq!(m.default_stats().len(), 3);
        assert!(!m.is_known("vigor"));
    }

    #[test]
    fn partition_reports_distinct_unknowns() {
        let effects = [
            StatEffect::fixed("luck", 1),
            StatEffect::fixed("Vigor", 1),
            StatEffect::fixed("vigor", 2),
            StatEffect::fixed("Mana", -1),
        ];
        let p = manager().partition_effects(&effects);
        assert_eq!(p.allowed.len(), 1);
        assert_eq!(p.unknown, ["Vigor", "Mana"]);
    }

    #[test]
    fn dynamic_effects_use_explicit_roll_first() {
        let effects = [
            StatEffect::dynamic("gold", DynamicSource::RollTotal, 1),
            StatEffect::dynamic("luck", DynamicSource::RollDice, -1),
            StatEffect::dynamic("strength", DynamicSource::RollStat, 1),
        ];
        let current = outcome(3, vec![4, 5]);
        let stale = outcome(0, vec![1, 1]);
        let eval = manager().evaluate_effects(&effects, Some(&current), Some(&stale));
        let deltas: Vec<i64> = eval.effects.iter().map(|e| e.delta).collect();
        assert_eq!(deltas, [12, -9, 3]);
        assert!(eval.issues.is_empty());
    }

    #[test]
    fn dynamic_effects_fall_back_to_last_roll() {
        let effects = [StatEffect::dynamic("gold", DynamicSource::RollDice, 1)];
        let last = outcome(0, vec![2, 2]);
        let eval = manager().evaluate_effects(&effects, None, Some(&last));
        assert_eq!(eval.effects[0].delta, 4);
    }

    #[test]
    fn dynamic_without_roll_is_an_issue() {
        let effects = [
            StatEffect::dynamic("gold", DynamicSource::RollTotal, 1),
            StatEffect::fixed("luck", 2),
        ];
        let eval = manager().evaluate_effects(&effects, None, None);
        assert_eq!(eval.effects.len(), 1);
        assert_eq!(eval.effects[0].stat, "luck");
        assert_eq!(eval.issues, ["No roll available for gold (roll total)."]);
    }

    #[test]
    fn apply_adds_onto_current_or_default() {
        let m = manager();
        let mut stats = BTreeMap::from([("luck".to_string(), 2)]);
        let resolved = [
            ResolvedStat { stat: "luck".into(), label: "Luck".into(), delta: 3 },
            ResolvedStat { stat: "gold".into(), label: "gold".into(), delta: -4 },
            ResolvedStat { stat: "strength".into(), label: "strength".into(), delta: 0 },
            ResolvedStat { stat: "vigor".into(), label: "vigor".into(), delta: 1 },
        ];
        let applied = m.apply_evaluated_effects(&mut stats, &resolved);
        assert_eq!(applied.len(), 2);
        assert_eq!(stats["luck"], 5);
        assert_eq!(stats["gold"], 6);
        assert!(!stats.contains_key("strength"));
        assert!(!stats.contains_key("vigor"));
    }

    #[test]
    fn huge_deltas_saturate() {
        let m = manager();
        let mut stats = BTreeMap::from([("gold".to_string(), 1), ("luck".to_string(), -5)]);
        let resolved = [
            ResolvedStat { stat: "gold".into(), label: "gold".into(), delta: i64::MAX },
            ResolvedStat { stat: "luck".into(), label: "Luck".into(), delta: i64::MIN },
        ];
        let applied = m.apply_evaluated_effects(&mut stats, &resolved);
        assert_eq!(applied.len(), 2);
        assert_eq!(stats["gold"], i64::MAX);
        assert_eq!(stats["luck"], i64::MIN);
    }
}
