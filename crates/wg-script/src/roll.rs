//! Roll grammar: `stat, dice=2d6, target=10, ok=win, fail=lose`.

use wg_core::{DiceSpec, RollDirective};

use crate::effects::unwrap_brackets;
use crate::error::SyntaxError;
use crate::lexer::{fields, lex};

/// Parse a roll directive.
///
/// A bare token names the stat. `target`, `ok`, and `fail` are required;
/// `dice` defaults to 1d6.
pub fn parse_roll(text: &str) -> Result<RollDirective, SyntaxError> {
    let text = unwrap_brackets(text);
    let tokens = lex(text).map_err(|span| {
        SyntaxError::InvalidRoll(format!("unexpected character '{}'", &text[span]))
    })?;

    let mut stat = None;
    let mut dice = DiceSpec::default();
    let mut target = None;
    let mut ok = None;
    let mut fail = None;

    for field in fields(text, &tokens).map_err(SyntaxError::InvalidRoll)? {
        let (key, value) = match field.value {
            Some(value) => (field.text.to_lowercase(), unwrap_brackets(value)),
            None => ("stat".to_string(), unwrap_brackets(field.text)),
        };
        if value.is_empty() {
            return Err(SyntaxError::InvalidRoll(format!("{key} is empty")));
        }
        match key.as_str() {
            "stat" => {
                stat = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.to_lowercase())
                };
            }
            "dice" => {
                dice = value.parse().map_err(|_| SyntaxError::InvalidRoll(format!("bad dice \"{value}\"")))?;
            }
            "target" | "dc" => {
                target = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| SyntaxError::InvalidRoll(format!("bad target \"{value}\"")))?,
                );
            }
            "ok" | "success" | "pass" => ok = Some(value.to_string()),
            "fail" | "failure" => fail = Some(value.to_string()),
            other => return Err(SyntaxError::InvalidRoll(format!("unknown key \"{other}\""))),
        }
    }

    Ok(RollDirective {
        stat,
        dice,
        target: target.ok_or_else(|| SyntaxError::InvalidRoll("missing target".to_string()))?,
        ok: ok.ok_or_else(|| SyntaxError::InvalidRoll("missing ok branch".to_string()))?,
        fail: fail.ok_or_else(|| SyntaxError::InvalidRoll("missing fail branch".to_string()))?,
    })
}
