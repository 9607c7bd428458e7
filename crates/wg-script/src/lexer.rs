//! Lexer for the comma-separated value grammars used by rolls and conditions.

use std::ops::Range;

use logos::Logos;

/// Token type for roll and condition values.
///
/// Words never contain whitespace; multi-word names are rebuilt from the
/// source between the first and last word of a field. A `[...]` group is a
/// single literal, so it may hold parentheses, commas, and `=`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token("=")]
    Equals,

    #[regex(r"\[[^\[\]]*\]")]
    Bracketed,

    #[regex(r"[^(),=\s\[\]]+")]
    Word,
}

/// Lex a value into tokens with byte spans.
///
/// Returns the span of the first character no token matches.
pub(crate) fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, Range<usize>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(span),
        }
    }
    Ok(tokens)
}

/// A run of words between separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field<'s> {
    /// Source text from the first to the last word, inner spacing kept.
    pub text: &'s str,
    /// Text after `=`, if the field is `key = value`.
    pub value: Option<&'s str>,
}

/// Split tokens into comma-separated fields, each optionally `key = value`.
///
/// Returns an error message for stray parentheses or misplaced `=`.
pub(crate) fn fields<'s>(
    source: &'s str,
    tokens: &[(Token, Range<usize>)],
) -> Result<Vec<Field<'s>>, String> {
    let mut out = Vec::new();
    for group in tokens.split(|(t, _)| *t == Token::Comma) {
        if group.is_empty() {
            continue;
        }
        if let Some((t, _)) = group.iter().find(|(t, _)| matches!(t, Token::LParen | Token::RParen)) {
            return Err(format!("unexpected '{}'", if *t == Token::LParen { "(" } else { ")" }));
        }
        match group.iter().position(|(t, _)| *t == Token::Equals) {
            None => out.push(Field {
                text: words(source, group).unwrap_or_default(),
                value: None,
            }),
            Some(eq) => {
                let key = words(source, &group[..eq]).ok_or("missing key before '='")?;
                let value = words(source, &group[eq + 1..]).ok_or("missing value after '='")?;
                if group[eq + 1..].iter().any(|(t, _)| *t == Token::Equals) {
                    return Err(format!("too many '=' in \"{key}\""));
                }
                out.push(Field {
                    text: key,
                    value: Some(value),
                });
            }
        }
    }
    Ok(out)
}

/// Source text spanning a run of word tokens.
pub(crate) fn words<'s>(source: &'s str, tokens: &[(Token, Range<usize>)]) -> Option<&'s str> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(&source[first.1.start..last.1.end])
}
