use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wg_core::effect::signed;
use wg_engine::{Begin, ChoiceOutcome, Engine, EngineConfig, FailedTransitionPolicy, StoryMeta};

pub struct PlayOptions {
    pub story: PathBuf,
    pub stats: Option<PathBuf>,
    pub seed: u64,
    pub journal_size: usize,
    pub keep_failed_effects: bool,
    pub save: Option<PathBuf>,
    pub load: Option<PathBuf>,
}

pub fn run(opts: PlayOptions) -> Result<(), String> {
    let loaded = super::load_story(&opts.story)?;
    let stats = super::load_stats(opts.stats.as_deref())?;

    let policy = if opts.keep_failed_effects {
        FailedTransitionPolicy::KeepEffects
    } else {
        FailedTransitionPolicy::Rollback
    };
    let config = EngineConfig::default()
        .with_seed(opts.seed)
        .with_journal_size(opts.journal_size)
        .with_failed_transition(policy);
    let mut engine = Engine::new(loaded.story, stats, config);

    if let Some(path) = &opts.load {
        engine.load_payload(&super::load_save(path)?);
        println!("  {} {}", "Loaded".bold(), path.display());
    }

    let meta = StoryMeta::new(
        opts.story.display().to_string(),
        opts.stats
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    );

    println!("  Type a choice number, or 'help' for commands.\n");
    show_branch(&engine);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));
        match cmd.to_lowercase().as_str() {
            "" => {}
            "quit" | "q" => break,
            "help" | "?" => print_help(),
            "undo" | "u" => {
                if engine.undo() {
                    show_branch(&engine);
                } else {
                    println!("  Nothing to undo.\n");
                }
            }
            "stats" => print_stats(&engine),
            "inventory" | "inv" => print_inventory(&engine),
            "journal" => {
                let journal = &engine.state().journal;
                if rest.trim().eq_ignore_ascii_case("md") {
                    println!("{}", journal.export_markdown());
                } else {
                    println!("{}", journal.export_text());
                }
            }
            "save" => match &opts.save {
                Some(path) => {
                    let json = engine
                        .save_payload(&meta)
                        .to_json()
                        .map_err(|e| e.to_string())?;
                    std::fs::write(path, json)
                        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
                    println!("  Saved to {}.\n", path.display());
                }
                None => println!("{}\n", "  No save file; start with --save <file>.".yellow()),
            },
            other => match other.parse::<usize>() {
                Ok(number) => take_choice(&mut engine, number),
                Err(_) => println!("{}\n", format!("  Unknown command '{other}'.").yellow()),
            },
        }
    }

    Ok(())
}

fn take_choice(engine: &mut Engine, number: usize) {
    let picked = engine
        .visible_choices()
        .get(number.wrapping_sub(1))
        .map(|c| (c.choice.id.clone(), c.enabled));
    let Some((choice_id, enabled)) = picked else {
        println!("{}\n", format!("  There is no choice {number}.").yellow());
        return;
    };
    if !enabled {
        println!("{}\n", "  That choice is not available yet.".yellow());
        return;
    }

    let branch_id = engine.state().current_branch_id.clone();
    let outcome = match engine.begin_choice(&branch_id, &choice_id) {
        Ok(Begin::Ignored) => return,
        Ok(Begin::AwaitingRoll(roll)) => {
            println!("  {} {roll}", "Roll:".bold());
            engine.complete_choice()
        }
        Ok(Begin::Finished(outcome)) => Some(*outcome),
        Err(e) => {
            println!("{}\n", format!("  {e}").yellow());
            return;
        }
    };
    if let Some(outcome) = outcome {
        print_outcome(&outcome);
    }
    show_branch(engine);
}

fn print_outcome(outcome: &ChoiceOutcome) {
    for stat in &outcome.applied_stats {
        println!("  {} {}", stat.label, signed(stat.delta).green());
    }
    for item in &outcome.applied_inventory {
        println!("  {} {}", item.item, signed(item.delta).cyan());
    }
    if !outcome.applied_stats.is_empty() || !outcome.applied_inventory.is_empty() {
        println!();
    }
}

fn show_branch(engine: &Engine) {
    let Some(branch) = engine.current_branch() else {
        return;
    };
    println!("  {}", branch.title.bold().underline());
    println!();
    for paragraph in branch.paragraphs() {
        println!("  {paragraph}");
        println!();
    }
    if let Some(error) = &engine.state().system_error {
        println!("  {}\n", error.yellow());
    }

    let choices = engine.visible_choices();
    if choices.is_empty() {
        println!("  {}\n", "The End.".bold());
        return;
    }
    for (i, available) in choices.iter().enumerate() {
        if available.enabled {
            println!("  {}. {}", i + 1, available.choice.text);
        } else {
            println!(
                "  {}",
                format!("{}. {} (unavailable)", i + 1, available.choice.text).dimmed()
            );
        }
    }
    println!();
}

fn print_stats(engine: &Engine) {
    let defaults = engine.stats().defaults();
    if defaults.is_empty() {
        println!("  No stats configured.\n");
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value", "Default"]);
    for (name, default) in defaults {
        let value = engine.state().stat(name).unwrap_or(*default);
        table.add_row(vec![name.clone(), value.to_string(), default.to_string()]);
    }
    println!("{table}\n");
}

fn print_inventory(engine: &Engine) {
    let inventory = &engine.state().inventory;
    if inventory.is_empty() {
        println!("  Your pack is empty.\n");
        return;
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Item", "Count"]);
    for (item, count) in inventory.iter() {
        table.add_row(vec![item.to_string(), count.to_string()]);
    }
    println!("{table}\n");
}

fn print_help() {
    println!("  <number>      take a choice");
    println!("  undo          step back one choice");
    println!("  stats         show stats");
    println!("  inventory     show items");
    println!("  journal [md]  show the journal");
    println!("  save          write the save file");
    println!("  quit          leave the story");
    println!();
}
