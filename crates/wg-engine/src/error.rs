//! Error types for the story engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that reject a request outright.
///
/// Problems found while resolving a valid choice (unknown stats, missing
/// destinations) are not errors; they surface as `system_error`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No branch with this id.
    #[error("unknown branch \"{0}\"")]
    UnknownBranch(String),

    /// The branch has no choice with this id.
    #[error("branch \"{branch}\" has no choice \"{choice}\"")]
    UnknownChoice {
        /// Branch that was searched.
        branch: String,
        /// Requested choice id.
        choice: String,
    },

    /// The choice belongs to a branch the player is not on.
    #[error("branch \"{branch}\" is not the current branch \"{current}\"")]
    NotCurrentBranch {
        /// Branch named in the request.
        branch: String,
        /// Branch the player is on.
        current: String,
    },

    /// The visibility condition hides the choice.
    #[error("choice \"{0}\" is not available")]
    ChoiceHidden(String),

    /// The validity condition disables the choice.
    #[error("choice \"{0}\" cannot be taken right now")]
    ChoiceDisabled(String),

    /// A save payload written by an incompatible version.
    #[error("unsupported save version {0}")]
    UnsupportedVersion(String),

    /// A save payload without a `state` object.
    #[error("save payload has no state")]
    MissingState,

    /// Dice could not be rolled.
    #[error("{0}")]
    Mechanics(#[from] wg_mechanics::MechError),

    /// Invalid core data.
    #[error("{0}")]
    Core(#[from] wg_core::CoreError),

    /// Malformed JSON.
    #[error("invalid save JSON: {0}")]
    Json(#[from] serde_json::Error),
}
