use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{Dungeon, GameConfig, InputJournal, ReplayResult, replay_to_end};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the level JSON file the journal was recorded on
    #[arg(short, long)]
    level: PathBuf,
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// TOML game configuration the session was played with
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal = InputJournal::from_json(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;
    let dungeon = Dungeon::load(&args.level)
        .with_context(|| format!("Failed to load level: {}", args.level.display()))?;
    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    let result: ReplayResult =
        replay_to_end(&dungeon, &config, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Round: {}", result.final_round);
    println!("Outcome: {:?}", result.final_status);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
