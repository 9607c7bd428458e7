//! CLI frontend for the Wegweiser story engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wg",
    about = "Wegweiser: play and check branching story scripts",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a story and report errors and warnings
    Check {
        /// Story script
        story: PathBuf,

        /// Stat config to validate alongside the story
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// Print the branch graph as an edge list
    Graph {
        /// Story script
        story: PathBuf,

        /// Save file whose traversed edges should be marked
        #[arg(long)]
        load: Option<PathBuf>,
    },

    /// Play a story interactively
    Play {
        /// Story script
        story: PathBuf,

        /// Stat config with default values
        #[arg(long)]
        stats: Option<PathBuf>,

        /// RNG seed for deterministic rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Journal entries to keep
        #[arg(long, default_value = "50")]
        journal_size: usize,

        /// Keep effects of choices that lead to a missing branch
        #[arg(long)]
        keep_failed_effects: bool,

        /// File the `save` command writes to
        #[arg(long)]
        save: Option<PathBuf>,

        /// Save file to resume from
        #[arg(long)]
        load: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { story, stats } => commands::check::run(&story, stats.as_deref()),
        Commands::Graph { story, load } => commands::graph::run(&story, load.as_deref()),
        Commands::Play {
            story,
            stats,
            seed,
            journal_size,
            keep_failed_effects,
            save,
            load,
        } => commands::play::run(commands::play::PlayOptions {
            story,
            stats,
            seed,
            journal_size,
            keep_failed_effects,
            save,
            load,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
