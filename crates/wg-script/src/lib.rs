//! Parsers for Wegweiser story scripts and stat configs.
//!
//! A script is a sequence of `Title:`, `Branch:`, `Description:`, and
//! `Choice:` directives. [`parse_story`] turns it into an immutable
//! [`wg_core::Story`]; any malformed line aborts the load with a
//! [`ScriptError`] carrying its line number and byte span.

pub mod choice;
pub mod condition;
pub mod diagnostics;
pub mod effects;
pub mod error;
pub(crate) mod lexer;
pub mod parser;
pub mod roll;
pub mod stats_config;

pub use choice::parse_choice;
pub use condition::parse_condition;
pub use diagnostics::{Diagnostic, Severity, render_diagnostics, story_warnings};
pub use effects::{parse_item_effect, parse_stat_effect, unwrap_brackets};
pub use error::{ScriptError, ScriptErrorKind, ScriptResult, SyntaxError};
pub use parser::{ChoiceSpans, parse_story, parse_story_with_spans};
pub use roll::parse_roll;
pub use stats_config::parse_stats_config;
