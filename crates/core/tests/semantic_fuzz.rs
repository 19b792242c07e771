use dungeon_core::{
    AttackKind, Command, Direction, Dungeon, Game, GameConfig, RunOutcome, WinCondition,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const LEVELS: [&str; 2] =
    [include_str!("../../../levels/level1.json"), include_str!("../../../levels/level2.json")];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_command(rng: &mut ChaCha8Rng) -> Command {
    let direction = choose(rng, &Direction::ALL);
    match rng.next_u64() % 3 {
        0 => Command::Attack {
            kind: choose(rng, &[AttackKind::Weapon, AttackKind::Fist, AttackKind::Spell]),
            direction,
        },
        _ => Command::Move(direction),
    }
}

fn check(game: &Game, context: &str) -> Result<(), String> {
    if let Some(violation) = game.state().invariant_violation() {
        return Err(format!("Invariant failed after {context}: {violation}"));
    }
    Ok(())
}

fn run_fuzz_simulation(level: &str, game_seed: u64, command_seed: u64, max_rounds: u32) -> Result<(), String> {
    let dungeon = Dungeon::from_json_str(level).map_err(|err| err.to_string())?;
    let config = GameConfig {
        win_condition: WinCondition::GatewayOrEnemiesCleared,
        ..GameConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(command_seed);
    let spawn = choose(&mut rng, dungeon.spawn_positions());
    let mut game = dungeon.create_game(spawn, &config, game_seed).map_err(|err| err.to_string())?;

    for round in 0..max_rounds {
        let command = random_command(&mut rng);
        let mut failure = None;
        let outcome = game
            .play_round_with(command, |game| {
                if failure.is_none() {
                    failure = check(game, &format!("round {round} {command:?}")).err();
                }
            })
            .map_err(|err| format!("round {round} rejected {command:?}: {err}"))?;
        if let Some(failure) = failure {
            return Err(failure);
        }

        match outcome {
            Some(RunOutcome::Killed) if game.hero().is_alive() => {
                return Err(format!("Killed reported with a living hero on seed {game_seed}"));
            }
            Some(RunOutcome::Won)
                if game.state().grid.gateway_pos() != Some(game.hero().pos)
                    && !game.state().enemies.is_empty() =>
            {
                return Err(format!("Won reported without a win condition on seed {game_seed}"));
            }
            Some(_) => break,
            None => {}
        }
    }
    Ok(())
}

#[test]
fn test_fuzz_game_simulation() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(40));
    let cases = (0..LEVELS.len(), any::<u64>(), any::<u64>());

    runner
        .run(&cases, |(level, game_seed, command_seed)| {
            run_fuzz_simulation(LEVELS[level], game_seed, command_seed, 300)
                .map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
