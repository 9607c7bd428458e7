/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building a story or restoring state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A story must contain at least one branch.
    #[error("story contains no branches")]
    EmptyStory,

    /// Two branches share the same id.
    #[error("duplicate branch id: \"{0}\"")]
    DuplicateBranch(String),

    /// A dice expression could not be parsed.
    #[error("invalid dice expression: \"{0}\"")]
    InvalidDice(String),

    /// A snapshot could not be applied to the game state.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
