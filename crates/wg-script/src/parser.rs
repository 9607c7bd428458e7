//! Line-oriented story parser.
//!
//! Branches are collected as drafts and only assembled into a [`Story`] at
//! the end, so choices may name branches defined further down.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use wg_core::{Branch, Choice, CoreError, Story};

use crate::choice::parse_choice;
use crate::effects::unwrap_brackets;
use crate::error::{ScriptError, ScriptErrorKind, ScriptResult};

/// Byte span of a choice line, keyed by branch and choice id.
pub type ChoiceSpans = HashMap<(String, String), Range<usize>>;

/// Parse a story script.
pub fn parse_story(source: &str) -> ScriptResult<Story> {
    parse_story_with_spans(source).map(|(story, _)| story)
}

/// Parse a story script, also returning where each choice was written.
pub fn parse_story_with_spans(source: &str) -> ScriptResult<(Story, ChoiceSpans)> {
    let mut parser = Parser::default();
    let mut offset = 0;
    let mut line_count = 0;
    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let text = raw.trim_end_matches(['\r', '\n']);
        let line = Line {
            number: idx + 1,
            span: offset..offset + text.len(),
            text,
        };
        offset += raw.len();
        line_count = line.number;
        parser.line(&line)?;
    }
    parser.finish(line_count.max(1), source.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Title,
    Branch,
    Description,
    Choice,
}

impl Directive {
    fn name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Branch => "Branch",
            Self::Description => "Description",
            Self::Choice => "Choice",
        }
    }

    /// Split `Keyword: rest` when the keyword is a known directive.
    fn split(line: &str) -> Option<(Self, &str)> {
        let (head, rest) = line.split_once(':')?;
        let directive = match head.trim().to_ascii_lowercase().as_str() {
            "title" => Self::Title,
            "branch" => Self::Branch,
            "description" => Self::Description,
            "choice" => Self::Choice,
            _ => return None,
        };
        Some((directive, rest.trim()))
    }
}

struct Line<'s> {
    number: usize,
    span: Range<usize>,
    text: &'s str,
}

impl Line<'_> {
    fn error(&self, kind: impl Into<ScriptErrorKind>) -> ScriptError {
        ScriptError::new(self.number, self.span.clone(), kind)
    }
}

/// A branch still being read.
struct Draft {
    title: String,
    title_line: (usize, Range<usize>),
    id: Option<String>,
    described: bool,
    paragraphs: Vec<String>,
    paragraph: Vec<String>,
    choices: Vec<(Choice, Range<usize>)>,
}

impl Draft {
    fn new(title: &str, line: &Line<'_>) -> Self {
        Self {
            title: title.to_string(),
            title_line: (line.number, line.span.clone()),
            id: None,
            described: false,
            paragraphs: Vec::new(),
            paragraph: Vec::new(),
            choices: Vec::new(),
        }
    }

    fn break_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            self.paragraphs.push(self.paragraph.join(" "));
            self.paragraph.clear();
        }
    }
}

#[derive(Default)]
struct Parser {
    branches: Vec<Branch>,
    spans: ChoiceSpans,
    seen: HashSet<String>,
    draft: Option<Draft>,
    in_description: bool,
}

impl Parser {
    fn line(&mut self, line: &Line<'_>) -> ScriptResult<()> {
        let text = line.text.trim();
        if text.starts_with('#') {
            return Ok(());
        }

        let Some((directive, rest)) = Directive::split(text) else {
            return self.text_line(text, line);
        };

        if let Some(draft) = self.draft.as_mut() {
            draft.break_paragraph();
        }
        self.in_description = false;

        if directive == Directive::Title {
            self.finalize()?;
            if rest.is_empty() {
                return Err(line.error(ScriptErrorKind::EmptyTitle));
            }
            self.draft = Some(Draft::new(rest, line));
            return Ok(());
        }

        let Some(draft) = self.draft.as_mut() else {
            return Err(line.error(ScriptErrorKind::OutsideBranch(
                directive.name().to_string(),
            )));
        };

        match directive {
            Directive::Title => {}
            Directive::Branch => {
                if draft.id.is_some() {
                    return Err(line.error(ScriptErrorKind::RepeatedDirective(
                        directive.name().to_string(),
                    )));
                }
                let id = unwrap_brackets(rest);
                if id.is_empty() {
                    return Err(line.error(ScriptErrorKind::EmptyBranchId));
                }
                if self.seen.contains(id) {
                    return Err(line.error(ScriptErrorKind::DuplicateBranch(id.to_string())));
                }
                draft.id = Some(id.to_string());
            }
            Directive::Description => {
                if draft.described {
                    return Err(line.error(ScriptErrorKind::RepeatedDirective(
                        directive.name().to_string(),
                    )));
                }
                draft.described = true;
                self.in_description = true;
                if !rest.is_empty() {
                    draft.paragraph.push(rest.to_string());
                }
            }
            Directive::Choice => {
                let id = format!("choice-{}", draft.choices.len() + 1);
                let choice = parse_choice(rest, &id).map_err(|e| line.error(e))?;
                draft.choices.push((choice, line.span.clone()));
            }
        }
        Ok(())
    }

    fn text_line(&mut self, text: &str, line: &Line<'_>) -> ScriptResult<()> {
        match self.draft.as_mut() {
            Some(draft) if self.in_description => {
                if text.is_empty() {
                    draft.break_paragraph();
                } else {
                    draft.paragraph.push(text.to_string());
                }
                Ok(())
            }
            _ if text.is_empty() => Ok(()),
            _ => Err(line.error(ScriptErrorKind::UnexpectedLine(text.to_string()))),
        }
    }

    /// Close the open draft, if any, and add it to the branch list.
    fn finalize(&mut self) -> ScriptResult<()> {
        let Some(mut draft) = self.draft.take() else {
            return Ok(());
        };
        draft.break_paragraph();
        let (title_number, title_span) = draft.title_line;

        let Some(id) = draft.id else {
            return Err(ScriptError::new(
                title_number,
                title_span,
                ScriptErrorKind::MissingBranchId(draft.title),
            ));
        };
        if draft.paragraphs.is_empty() {
            return Err(ScriptError::new(
                title_number,
                title_span,
                ScriptErrorKind::MissingDescription(id),
            ));
        }

        let mut branch = Branch::new(id.clone(), draft.title, draft.paragraphs.join("\n\n"));
        for (choice, span) in draft.choices {
            self.spans.insert((id.clone(), choice.id.clone()), span);
            branch = branch.with_choice(choice);
        }
        log::debug!("parsed branch \"{id}\" with {} choices", branch.choices.len());
        self.seen.insert(id);
        self.branches.push(branch);
        Ok(())
    }

    fn finish(mut self, last_line: usize, end: usize) -> ScriptResult<(Story, ChoiceSpans)> {
        self.finalize()?;
        let story = Story::from_branches(self.branches).map_err(|e| {
            let kind = match e {
                CoreError::DuplicateBranch(id) => ScriptErrorKind::DuplicateBranch(id),
                _ => ScriptErrorKind::EmptyStory,
            };
            ScriptError::new(last_line, end..end, kind)
        })?;
        log::info!(
            "parsed story with {} branches, starting at \"{}\"",
            story.len(),
            story.start()
        );
        Ok((story, self.spans))
    }
}
