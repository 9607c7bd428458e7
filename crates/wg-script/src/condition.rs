//! Condition grammar: `keyword(arg1, arg2, ...)`.

use wg_core::{Condition, ConditionKind};

use crate::effects::unwrap_brackets;
use crate::error::SyntaxError;
use crate::lexer::{Token, fields, lex};

/// Parse a visibility or validity condition.
///
/// Arguments holding `(`, `)`, `,` or `=` must be wrapped in `[...]`, as in
/// `has([Key (old)])`.
pub fn parse_condition(text: &str) -> Result<Condition, SyntaxError> {
    let text = unwrap_brackets(text);
    let invalid = |reason: &str| SyntaxError::InvalidCondition {
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let open = text.find('(').ok_or_else(|| invalid("expected keyword(...)"))?;
    let keyword = text[..open].trim();
    if keyword.is_empty() {
        return Err(invalid("missing keyword"));
    }
    let kind = ConditionKind::from_keyword(keyword)
        .ok_or_else(|| invalid(&format!("unknown condition \"{keyword}\"")))?;

    let inner = text[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| invalid("missing closing ')'"))?;
    let tokens = lex(inner).map_err(|_| invalid("unexpected character"))?;
    if tokens.iter().any(|(t, _)| *t == Token::Equals) {
        return Err(invalid("unexpected '='"));
    }
    let args = fields(inner, &tokens).map_err(|reason| invalid(&reason))?;

    let values: Vec<&str> = args.iter().map(|f| unwrap_brackets(f.text)).collect();
    if values.iter().all(|v| v.is_empty()) {
        return Err(invalid("needs at least one argument"));
    }
    Ok(Condition::new(kind, values.into_iter().filter(|v| !v.is_empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_visited() {
        let c = parse_condition("visited(gate, Tower Top)").unwrap();
        assert_eq!(c.kind, ConditionKind::VisitedAll);
        assert_eq!(c.values, ["gate", "Tower Top"]);
    }

    #[test]
    fn keyword_synonyms_normalize() {
        assert_eq!(
            parse_condition("Not_Visited(cellar)").unwrap().kind,
            ConditionKind::VisitedNone
        );
        assert_eq!(
            parse_condition("has-any(Key, Torch)").unwrap().kind,
            ConditionKind::InventoryAny
        );
        assert_eq!(
            parse_condition("[have(Key)]").unwrap().kind,
            ConditionKind::InventoryAll
        );
    }

    #[test]
    fn bracketed_args_keep_special_characters() {
        let c = parse_condition("has([Key (old)], Torch)").unwrap();
        assert_eq!(c.values, ["Key (old)", "Torch"]);
        let c = parse_condition("visited([a=b])").unwrap();
        assert_eq!(c.values, ["a=b"]);
        assert!(parse_condition("has(Key (old))").is_err());
    }

    #[test]
    fn rejects_unknown_keyword() {
        let err = parse_condition("owns(Key)").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidCondition { .. }));
    }

    #[test]
    fn rejects_empty_args() {
        assert!(parse_condition("has()").is_err());
        assert!(parse_condition("has( , )").is_err());
    }

    #[test]
    fn rejects_unbalanced() {
        assert!(parse_condition("has(Key").is_err());
        assert!(parse_condition("has Key").is_err());
        assert!(parse_condition("has(Key))").is_err());
    }
}
