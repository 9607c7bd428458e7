//! Roll adjudication: dice plus stat against a target.

use wg_core::{RollDirective, RollOutcome};

use crate::dice::{DiceSource, roll_dice};
use crate::error::MechResult;

/// Roll a directive's dice and decide success.
///
/// `stat_value` is asked for the directive's stat, if it names one; a missing
/// stat counts as 0. Success is `stat + sum(dice) >= target`.
pub fn resolve_roll<F>(
    directive: &RollDirective,
    stat_value: F,
    source: &mut dyn DiceSource,
) -> MechResult<RollOutcome>
where
    F: Fn(&str) -> Option<i64>,
{
    let rolls = roll_dice(directive.dice, source)?;
    let dice_total: i64 = rolls.iter().map(|&v| i64::from(v)).sum();
    let stat_value = directive
        .stat
        .as_deref()
        .and_then(stat_value)
        .unwrap_or(0);
    let total = stat_value.saturating_add(dice_total);
    let success = total >= directive.target;

    log::debug!(
        "rolled {} {:?} + {} = {} vs {} ({})",
        directive.dice,
        rolls,
        stat_value,
        total,
        directive.target,
        if success { "success" } else { "failure" }
    );

    Ok(RollOutcome {
        directive: directive.clone(),
        stat_value,
        rolls,
        dice_total,
        total,
        success,
    })
}
