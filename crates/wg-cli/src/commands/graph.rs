use std::path::Path;

use colored::Colorize;
use wg_core::TransitionTracker;

pub fn run(story_path: &Path, save_path: Option<&Path>) -> Result<(), String> {
    let loaded = super::load_story(story_path)?;
    let story = &loaded.story;

    let mut traversed = TransitionTracker::new();
    let mut visited = Vec::new();
    if let Some(path) = save_path {
        let payload = super::load_save(path)?;
        for t in &payload.state.visited_transitions {
            traversed.mark(&t.from, &t.to);
        }
        visited = payload.state.visited_branches;
    }

    println!("  Branch graph for \"{}\"", story_path.display());
    println!();
    for branch in story.branches() {
        let marker = if visited.contains(&branch.id) { "*" } else { " " };
        let start = if branch.id == story.start() { " (start)" } else { "" };
        println!("  {marker} [{}] {}{start}", branch.id, branch.title.dimmed());
    }
    println!();

    let edges = story.edges();
    for edge in &edges {
        let arrow = if traversed.contains(&edge.from, &edge.to) {
            "==>".green().bold()
        } else {
            "-->".normal()
        };
        let missing = if story.contains(&edge.to) {
            String::new()
        } else {
            format!(" {}", "(missing)".red())
        };
        println!(
            "  [{}] {arrow} [{}]  {}{missing}",
            edge.from,
            edge.to,
            edge.choice_id.dimmed()
        );
    }

    println!();
    println!(
        "  {} branches, {} edges, {} traversed",
        story.len(),
        edges.len(),
        edges
            .iter()
            .filter(|e| traversed.contains(&e.from, &e.to))
            .count()
    );
    Ok(())
}
