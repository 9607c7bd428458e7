//! Error types for script and stat config parsing.

use std::ops::Range;

use thiserror::Error;

/// Result type for script parsing.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// A fatal problem found while loading a script or stat config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    /// Byte range of the offending line in the source.
    pub span: Range<usize>,
    /// What went wrong.
    pub kind: ScriptErrorKind,
}

impl ScriptError {
    /// Create an error at a line.
    pub fn new(line: usize, span: Range<usize>, kind: impl Into<ScriptErrorKind>) -> Self {
        Self {
            line,
            span,
            kind: kind.into(),
        }
    }
}

/// The kinds of load errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptErrorKind {
    /// Text outside any block that is not a directive.
    #[error("unrecognized line: \"{0}\"")]
    UnexpectedLine(String),

    /// A branch directive before the first `Title:`.
    #[error("{0}: appears before the first Title:")]
    OutsideBranch(String),

    /// `Branch:` or `Description:` repeated within one branch.
    #[error("branch already has a {0}: directive")]
    RepeatedDirective(String),

    /// `Title:` with nothing after it.
    #[error("title is empty")]
    EmptyTitle,

    /// `Branch:` with nothing after it.
    #[error("branch id is empty")]
    EmptyBranchId,

    /// A branch that never received a `Branch:` id.
    #[error("branch \"{0}\" has no Branch: id")]
    MissingBranchId(String),

    /// A branch without description text.
    #[error("branch \"{0}\" has no description")]
    MissingDescription(String),

    /// Two branches with the same id.
    #[error("duplicate branch id \"{0}\"")]
    DuplicateBranch(String),

    /// A script without any branch.
    #[error("story contains no branches")]
    EmptyStory,

    /// A malformed choice payload.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A stat config line without `=` or `:`.
    #[error("expected `name = value` or `name: value`")]
    MissingSeparator,

    /// A stat config line with an empty name.
    #[error("stat name is empty")]
    EmptyStatName,

    /// A stat config value that is not an integer.
    #[error("stat \"{name}\" has non-integer value \"{value}\"")]
    InvalidStatValue {
        /// Stat name as written.
        name: String,
        /// Offending value.
        value: String,
    },

    /// The same stat configured twice.
    #[error("duplicate stat \"{0}\"")]
    DuplicateStat(String),
}

/// Problems inside a `Choice:` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A segment without `=`.
    #[error("segment \"{0}\" is not a key=value pair")]
    MalformedSegment(String),

    /// A key the choice grammar does not define.
    #[error("unknown choice key \"{0}\"")]
    UnknownKey(String),

    /// A single-use key given twice.
    #[error("choice key \"{0}\" may only appear once")]
    DuplicateKey(String),

    /// A key whose value is blank.
    #[error("choice key \"{0}\" has an empty value")]
    EmptyValue(String),

    /// No `display=` segment.
    #[error("choice is missing display text")]
    MissingDisplay,

    /// Neither `next=` nor `roll=`.
    #[error("choice \"{0}\" needs a next branch or a roll")]
    MissingDestination(String),

    /// A malformed item effect.
    #[error("invalid item effect \"{0}\": expected name+count or name-count")]
    InvalidItem(String),

    /// A malformed stat effect.
    #[error("invalid stat effect \"{0}\": expected name+amount or name-amount")]
    InvalidStat(String),

    /// A malformed roll directive.
    #[error("invalid roll: {0}")]
    InvalidRoll(String),

    /// A malformed condition.
    #[error("invalid condition \"{text}\": {reason}")]
    InvalidCondition {
        /// Condition text as written.
        text: String,
        /// Why it was rejected.
        reason: String,
    },
}
