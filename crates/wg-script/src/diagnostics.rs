//! Source-located diagnostics and their terminal rendering.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};
use wg_core::Story;

use crate::error::ScriptError;
use crate::parser::ChoiceSpans;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Stops the story from loading.
    Error,
    /// Worth fixing, but the story still plays.
    Warning,
}

/// A message tied to a byte range of the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Where in the source it applies.
    pub span: Range<usize>,
    /// Headline message.
    pub message: String,
    /// Text attached to the highlighted span; defaults to the message.
    pub label: Option<String>,
}

impl Diagnostic {
    /// An error diagnostic.
    pub fn error(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// A warning diagnostic.
    pub fn warning(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a label to the highlighted span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

impl From<&ScriptError> for Diagnostic {
    fn from(err: &ScriptError) -> Self {
        Self::error(err.span.clone(), err.kind.to_string())
            .with_label(format!("line {}", err.line))
    }
}

/// Warnings for a story that parsed: destinations that do not exist and
/// branches no choice can reach from the start.
pub fn story_warnings(story: &Story, spans: &ChoiceSpans) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();

    for branch in story.branches() {
        for choice in &branch.choices {
            for to in choice.destinations() {
                if story.contains(to) {
                    continue;
                }
                let span = spans
                    .get(&(branch.id.clone(), choice.id.clone()))
                    .cloned()
                    .unwrap_or(0..0);
                warnings.push(
                    Diagnostic::warning(span, format!("branch \"{to}\" is not defined"))
                        .with_label(format!("\"{}\" points here", choice.text)),
                );
            }
        }
    }

    let reachable = reachable_from_start(story);
    for branch in story.branches() {
        if !reachable.contains(branch.id.as_str()) {
            warnings.push(Diagnostic::warning(
                0..0,
                format!("branch \"{}\" is unreachable from \"{}\"", branch.id, story.start()),
            ));
        }
    }
    warnings
}

fn reachable_from_start(story: &Story) -> BTreeSet<&str> {
    let mut seen = BTreeSet::from([story.start()]);
    let mut queue = VecDeque::from([story.start()]);
    while let Some(id) = queue.pop_front() {
        let Some(branch) = story.branch(id) else {
            continue;
        };
        for to in branch.choices.iter().flat_map(|c| c.destinations()) {
            if seen.insert(to) {
                queue.push_back(to);
            }
        }
    }
    seen
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let (kind, color) = match diag.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };

        let span = (filename, diag.span.clone());
        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        Report::build(kind, span)
            .with_message(&diag.message)
            .with_label(
                Label::new((filename, diag.span.clone()))
                    .with_message(label_text)
                    .with_color(color),
            )
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptErrorKind;
    use crate::parser::parse_story_with_spans;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::warning(0..1, "branch \"z\" is not defined");
        assert_eq!(d.to_string(), "warning: branch \"z\" is not defined");
    }

    #[test]
    fn from_script_error() {
        let err = ScriptError::new(3, 10..15, ScriptErrorKind::EmptyTitle);
        let d = Diagnostic::from(&err);
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.span, 10..15);
        assert_eq!(d.label.as_deref(), Some("line 3"));
    }

    #[test]
    fn warnings_for_dangling_and_unreachable() {
        let src = "Title: A\nBranch: a\nDescription: x\nChoice: display=Go; next=z\n\n\
                   Title: B\nBranch: b\nDescription: y\nChoice: display=Back; next=a\n";
        let (story, spans) = parse_story_with_spans(src).unwrap();
        let warnings = story_warnings(&story, &spans);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("\"z\" is not defined"));
        assert!(src[warnings[0].span.clone()].starts_with("Choice: display=Go"));
        assert!(warnings[1].message.contains("\"b\" is unreachable"));
    }

    #[test]
    fn render_produces_output() {
        let source = "Title: A\nBranch: a\nhello\n";
        let diags = vec![Diagnostic::error(20..25, "unrecognized line").with_label("here")];
        let output = render_diagnostics(source, "story.txt", &diags);
        assert!(output.contains("unrecognized line"));
    }
}
