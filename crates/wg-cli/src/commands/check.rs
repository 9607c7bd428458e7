use std::path::Path;

use colored::Colorize;
use wg_script::story_warnings;

pub fn run(story_path: &Path, stats_path: Option<&Path>) -> Result<(), String> {
    let loaded = super::load_story(story_path)?;
    let stats = super::load_stats(stats_path)?;

    let warnings = story_warnings(&loaded.story, &loaded.spans);
    super::print_diagnostics(&loaded.source, story_path, &warnings);

    let story = &loaded.story;
    let choices: usize = story.branches().map(|b| b.choices.len()).sum();
    let rolls = story
        .branches()
        .flat_map(|b| b.choices.iter())
        .filter(|c| c.roll.is_some())
        .count();

    println!("  {} \"{}\"", "Checked".bold(), story_path.display());
    println!(
        "  {} branches, {} choices, {} rolls, starting at \"{}\"",
        story.len(),
        choices,
        rolls,
        story.start()
    );
    if stats_path.is_some() {
        println!("  {} stats configured", stats.len());
    }

    let unknown = unconfigured_stats(story, &stats);
    if stats_path.is_some() && !unknown.is_empty() {
        println!(
            "  {} stats not in the config: {}",
            "note:".yellow(),
            unknown.join(", ")
        );
    }

    if warnings.is_empty() {
        println!("  All checks passed.");
    }
    Ok(())
}

/// Stat names used by effects or rolls that the config does not define.
fn unconfigured_stats(story: &wg_core::Story, stats: &wg_engine::StatsManager) -> Vec<String> {
    let mut names: Vec<String> = story
        .branches()
        .flat_map(|b| b.choices.iter())
        .flat_map(|c| {
            c.stats
                .iter()
                .map(|s| s.stat.clone())
                .chain(c.roll.as_ref().and_then(|r| r.stat.clone()))
        })
        .filter(|name| !stats.is_known(name))
        .collect();
    names.sort();
    names.dedup();
    names
}
