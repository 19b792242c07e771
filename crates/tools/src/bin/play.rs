use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_tools::keys::{HELP, parse_input};
use dungeon_tools::render::{describe, render_board, status_line};
use dungeon_tools::seed::{generate_runtime_seed, resolve_seed};
use game_core::{Dungeon, Game, GameConfig, InputSource, PlayerInput, Renderer, SessionStatus};

#[derive(Parser)]
#[command(author, version, about = "Play one or more dungeon levels in the terminal", long_about = None)]
struct Args {
    /// Level files, played in order
    #[arg(required = true)]
    levels: Vec<PathBuf>,
    /// TOML game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// Directory to write one input journal per session into
    #[arg(long)]
    journal_dir: Option<PathBuf>,
}

/// Reads commands from stdin, asking again until a line decodes.
struct StdinInput;

impl InputSource for StdinInput {
    fn next_input(&mut self) -> PlayerInput {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return PlayerInput::Quit,
                Ok(_) => {}
            }
            if let Some(input) = parse_input(&line) {
                return input;
            }
            println!("{HELP}");
        }
    }
}

#[derive(Default)]
struct TerminalRenderer {
    shown_events: usize,
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, game: &Game) {
        // A reset starts a fresh log.
        if game.log().len() < self.shown_events {
            self.shown_events = 0;
        }
        let events = &game.log()[self.shown_events..];
        for line in events.iter().filter_map(|event| describe(game, event)) {
            println!("{line}");
        }
        self.shown_events = game.log().len();
        println!("{}{}", render_board(game), status_line(game));
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = resolve_seed(args.seed, config.seed, generate_runtime_seed());
    log::info!("using seed {seed:?}");

    let dungeons = args
        .levels
        .iter()
        .map(|path| {
            Dungeon::load(path).with_context(|| format!("Failed to load level: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{HELP}");
    for (level_index, dungeon) in dungeons.iter().enumerate() {
        let attempts = dungeon.spawn_positions().len();
        for (attempt, mut session) in dungeon.sessions(&config, seed.value()).enumerate() {
            let status = session.play(&mut StdinInput, &mut TerminalRenderer::default())?;

            if let Some(dir) = &args.journal_dir {
                let path = dir.join(format!("level{}_attempt{}.json", level_index + 1, attempt + 1));
                let text = session.journal().to_json().context("Failed to encode journal")?;
                fs::write(&path, text)
                    .with_context(|| format!("Failed to write journal: {}", path.display()))?;
            }

            match status {
                SessionStatus::Won => {
                    println!("you win");
                    break;
                }
                SessionStatus::Killed if attempt + 1 == attempts => {
                    println!("you lose");
                    return Ok(());
                }
                SessionStatus::Killed => println!("you died; starting from the next spawn point"),
                SessionStatus::Quit => return Ok(()),
            }
        }
    }
    Ok(())
}
