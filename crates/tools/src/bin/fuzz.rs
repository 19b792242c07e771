use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use game_core::{AttackKind, Command, Direction, Dungeon, GameConfig, PlayerInput, Session};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file to fuzz
    level: PathBuf,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maximum inputs per session
    #[arg(short, long, default_value_t = 1000)]
    rounds: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_input(rng: &mut ChaCha8Rng) -> PlayerInput {
    let direction = choose(rng, &Direction::ALL);
    match rng.next_u64() % 20 {
        0 => PlayerInput::Reset,
        1..=6 => PlayerInput::Command(Command::Attack {
            kind: choose(rng, &[AttackKind::Weapon, AttackKind::Spell, AttackKind::Fist]),
            direction,
        }),
        _ => PlayerInput::Command(Command::Move(direction)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} rounds...", args.seed, args.rounds);
    let dungeon = Dungeon::load(&args.level)
        .with_context(|| format!("Failed to load level: {}", args.level.display()))?;
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let sessions: Vec<Session> = dungeon.sessions(&config, args.seed).collect();
    for (attempt, mut session) in sessions.into_iter().enumerate() {
        let mut finished = None;
        for step in 0..args.rounds {
            finished = session.step(random_input(&mut rng))?;
            if let Some(violation) = session.game().state().invariant_violation() {
                bail!("Invariant failed in session {attempt} at input {step}: {violation}");
            }
            if finished.is_some() {
                break;
            }
        }
        println!(
            "Session {attempt} ended with {:?} after {} rounds (hash {})",
            finished,
            session.game().current_round(),
            session.game().snapshot_hash()
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
