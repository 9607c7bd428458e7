//! Item and stat effect grammars, plus bracket unwrapping shared by all values.

use wg_core::{DynamicSource, InventoryEffect, StatEffect};

use crate::error::SyntaxError;

/// Strip one layer of surrounding `[...]` and whitespace.
pub fn unwrap_brackets(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map_or(trimmed, str::trim)
}

/// Split `name+rest` / `name-rest` at the last sign.
fn split_signed(text: &str) -> Option<(&str, i64, &str)> {
    let idx = text.rfind(['+', '-'])?;
    let sign = if text[idx..].starts_with('+') { 1 } else { -1 };
    Some((text[..idx].trim(), sign, text[idx + 1..].trim()))
}

fn parse_count(digits: &str) -> Option<i64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse `name+count`, `name-count`, `name+`, or `name-`.
///
/// The count defaults to 1 and must be a positive integer.
pub fn parse_item_effect(text: &str) -> Result<InventoryEffect, SyntaxError> {
    let text = unwrap_brackets(text);
    let invalid = || SyntaxError::InvalidItem(text.to_string());
    let (name, sign, count) = split_signed(text).ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }
    let count = if count.is_empty() {
        1
    } else {
        parse_count(count).filter(|n| *n > 0).ok_or_else(invalid)?
    };
    Ok(InventoryEffect::new(name, sign * count))
}

/// Parse `name+amount` or `name-amount`, where the amount is an integer or a
/// roll keyword such as `roll`, `dice`, or `modifier`.
pub fn parse_stat_effect(text: &str) -> Result<StatEffect, SyntaxError> {
    let text = unwrap_brackets(text);
    let invalid = || SyntaxError::InvalidStat(text.to_string());
    let (name, sign, amount) = split_signed(text).ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }
    if let Some(amount) = parse_count(amount) {
        return Ok(StatEffect::fixed(name, sign * amount));
    }
    DynamicSource::from_keyword(amount)
        .map(|source| StatEffect::dynamic(name, source, sign))
        .ok_or_else(invalid)
}

/// Parse a comma-separated list with `parse_one`, skipping blank entries.
pub fn parse_list<T>(
    text: &str,
    parse_one: impl Fn(&str) -> Result<T, SyntaxError>,
) -> Result<Vec<T>, SyntaxError> {
    unwrap_brackets(text)
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_one)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_brackets_once() {
        assert_eq!(unwrap_brackets(" [ gate ] "), "gate");
        assert_eq!(unwrap_brackets("gate"), "gate");
        assert_eq!(unwrap_brackets("[[x]]"), "[x]");
        assert_eq!(unwrap_brackets("[open"), "[open");
    }

    #[test]
    fn item_defaults_to_one() {
        assert_eq!(parse_item_effect("Key+").unwrap(), InventoryEffect::new("Key", 1));
        assert_eq!(parse_item_effect("Key-").unwrap(), InventoryEffect::new("Key", -1));
    }

    #[test]
    fn item_with_count() {
        assert_eq!(
            parse_item_effect("Silver Coin + 3").unwrap(),
            InventoryEffect::new("Silver Coin", 3)
        );
        assert_eq!(
            parse_item_effect("[Rope-Ladder-2]").unwrap(),
            InventoryEffect::new("Rope-Ladder", -2)
        );
    }

    #[test]
    fn item_rejects_bad_counts() {
        assert!(parse_item_effect("Key+0").is_err());
        assert!(parse_item_effect("Key+two").is_err());
        assert!(parse_item_effect("Key").is_err());
        assert!(parse_item_effect("+2").is_err());
    }

    #[test]
    fn stat_numeric() {
        let e = parse_stat_effect("Luck+5").unwrap();
        assert_eq!(e.stat, "luck");
        assert_eq!(e.label, "Luck");
        assert_eq!(e.delta, 5);

        assert_eq!(parse_stat_effect("health - 2").unwrap().delta, -2);
    }

    #[test]
    fn stat_dynamic_keywords() {
        let e = parse_stat_effect("gold+roll").unwrap();
        let dynamic = e.dynamic.unwrap();
        assert_eq!(dynamic.source, DynamicSource::RollTotal);
        assert_eq!(dynamic.scale, 1);

        let e = parse_stat_effect("health-dice").unwrap();
        let dynamic = e.dynamic.unwrap();
        assert_eq!(dynamic.source, DynamicSource::RollDice);
        assert_eq!(dynamic.scale, -1);

        let e = parse_stat_effect("fame+modifier").unwrap();
        assert_eq!(e.dynamic.unwrap().source, DynamicSource::RollStat);
    }

    #[test]
    fn stat_rejects_garbage() {
        assert!(parse_stat_effect("luck").is_err());
        assert!(parse_stat_effect("luck+lots").is_err());
        assert!(parse_stat_effect("luck+").is_err());
        assert!(parse_stat_effect("-3").is_err());
    }

    #[test]
    fn list_parsing() {
        let effects = parse_list("[luck+1, strength-2]", parse_stat_effect).unwrap();
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[1].delta, -2);
    }
}
