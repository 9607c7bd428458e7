pub mod check;
pub mod graph;
pub mod play;

use std::path::Path;

use wg_core::Story;
use wg_engine::{SavePayload, StatsManager};
use wg_script::{
    ChoiceSpans, Diagnostic, Severity, parse_stats_config, parse_story_with_spans,
    render_diagnostics,
};

/// A parsed story with the text it came from.
pub struct LoadedStory {
    pub source: String,
    pub story: Story,
    pub spans: ChoiceSpans,
}

fn read(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Parse a story script, printing a rendered diagnostic on failure.
fn load_story(path: &Path) -> Result<LoadedStory, String> {
    let source = read(path)?;
    match parse_story_with_spans(&source) {
        Ok((story, spans)) => {
            log::debug!("loaded {} with {} branches", path.display(), story.len());
            Ok(LoadedStory {
                source,
                story,
                spans,
            })
        }
        Err(err) => {
            print_diagnostics(&source, path, &[Diagnostic::from(&err)]);
            Err(format!("{} could not be loaded", path.display()))
        }
    }
}

/// Load stat defaults; no file means no stats.
fn load_stats(path: Option<&Path>) -> Result<StatsManager, String> {
    let Some(path) = path else {
        return Ok(StatsManager::default());
    };
    let source = read(path)?;
    match parse_stats_config(&source) {
        Ok(defaults) => Ok(StatsManager::new(defaults)),
        Err(err) => {
            print_diagnostics(&source, path, &[Diagnostic::from(&err)]);
            Err(format!("{} could not be loaded", path.display()))
        }
    }
}

fn load_save(path: &Path) -> Result<SavePayload, String> {
    let json = read(path)?;
    SavePayload::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Print diagnostics to stderr using ariadne.
fn print_diagnostics(source: &str, path: &Path, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let filename = path.display().to_string();
    eprint!("{}", render_diagnostics(source, &filename, diagnostics));

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;
    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
