//! The `Choice:` payload: `;`-separated `key=value` segments.

use wg_core::Choice;

use crate::condition::parse_condition;
use crate::effects::{parse_item_effect, parse_list, parse_stat_effect, unwrap_brackets};
use crate::error::SyntaxError;
use crate::roll::parse_roll;

/// Parse a choice payload into a [`Choice`] with the given id.
pub fn parse_choice(payload: &str, id: &str) -> Result<Choice, SyntaxError> {
    let mut display: Option<String> = None;
    let mut choice = Choice::new(id, "");

    for segment in payload.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (key, value) = segment
            .split_once('=')
            .ok_or_else(|| SyntaxError::MalformedSegment(segment.to_string()))?;
        let key = key.trim().to_lowercase();
        let value = unwrap_brackets(value);
        if value.is_empty() {
            return Err(SyntaxError::EmptyValue(key));
        }

        let once = |taken: bool| {
            if taken {
                Err(SyntaxError::DuplicateKey(key.clone()))
            } else {
                Ok(())
            }
        };

        match key.as_str() {
            "display" => {
                once(display.is_some())?;
                display = Some(value.to_string());
            }
            "next" => {
                once(choice.next.is_some())?;
                choice.next = Some(value.to_string());
            }
            "item" => choice.inventory.extend(parse_list(value, parse_item_effect)?),
            "stat" => choice.stats.extend(parse_list(value, parse_stat_effect)?),
            "roll" => {
                once(choice.roll.is_some())?;
                choice.roll = Some(parse_roll(value)?);
            }
            "optional" => {
                once(choice.visibility_condition.is_some())?;
                choice.visibility_condition = Some(parse_condition(value)?);
            }
            "valid" => {
                once(choice.valid_condition.is_some())?;
                choice.valid_condition = Some(parse_condition(value)?);
            }
            other => return Err(SyntaxError::UnknownKey(other.to_string())),
        }
    }

    choice.text = display.ok_or(SyntaxError::MissingDisplay)?;
    if choice.next.is_none() && choice.roll.is_none() {
        return Err(SyntaxError::MissingDestination(choice.text));
    }
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wg_core::{ConditionKind, InventoryEffect};

    #[test]
    fn simple_choice() {
        let c = parse_choice("display=Open the gate; next=[gate]", "choice-1").unwrap();
        assert_eq!(c.id, "choice-1");
        assert_eq!(c.text, "Open the gate");
        assert_eq!(c.next.as_deref(), Some("gate"));
        assert!(c.roll.is_none());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let c = parse_choice("Display=Go; NEXT=hall", "c").unwrap();
        assert_eq!(c.next.as_deref(), Some("hall"));
    }

    #[test]
    fn repeatable_effects_accumulate() {
        let c = parse_choice(
            "display=Loot; next=hall; item=Key+; item=[Coin+3, Torch-]; stat=luck+1, gold+roll",
            "c",
        )
        .unwrap();
        assert_eq!(
            c.inventory,
            [
                InventoryEffect::new("Key", 1),
                InventoryEffect::new("Coin", 3),
                InventoryEffect::new("Torch", -1),
            ]
        );
        assert_eq!(c.stats.len(), 2);
        assert!(c.stats[1].is_dynamic());
    }

    #[test]
    fn conditions_and_roll() {
        let c = parse_choice(
            "display=Climb; roll=[strength, dice=2d6, target=10, ok=top, fail=bottom]; \
             optional=visited(gate); valid=has(Rope)",
            "c",
        )
        .unwrap();
        assert_eq!(c.roll.as_ref().unwrap().ok, "top");
        assert_eq!(
            c.visibility_condition.unwrap().kind,
            ConditionKind::VisitedAll
        );
        assert_eq!(c.valid_condition.unwrap().kind, ConditionKind::InventoryAll);
    }

    #[test]
    fn display_may_contain_equals() {
        let c = parse_choice("display=Say a = b; next=x", "c").unwrap();
        assert_eq!(c.text, "Say a = b");
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_choice("next=x", "c").unwrap_err(),
            SyntaxError::MissingDisplay
        );
        assert_eq!(
            parse_choice("display=Wait", "c").unwrap_err(),
            SyntaxError::MissingDestination("Wait".to_string())
        );
        assert_eq!(
            parse_choice("display=a; next=x; next=y", "c").unwrap_err(),
            SyntaxError::DuplicateKey("next".to_string())
        );
        assert_eq!(
            parse_choice("display=a; next=x; colour=red", "c").unwrap_err(),
            SyntaxError::UnknownKey("colour".to_string())
        );
        assert_eq!(
            parse_choice("display=a; next x", "c").unwrap_err(),
            SyntaxError::MalformedSegment("next x".to_string())
        );
        assert_eq!(
            parse_choice("display=a; next=", "c").unwrap_err(),
            SyntaxError::EmptyValue("next".to_string())
        );
    }
}
