use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::actor::Actor;
use crate::config::{GameConfig, WinCondition};
use crate::error::GameError;
use crate::state::{Cell, GameState};
use crate::types::*;

mod actions;
mod behavior;
mod engine;
mod hash;
mod perception;

#[cfg(test)]
mod test_support;

pub use behavior::{EnemyAction, decide_enemy_action};
pub use perception::Sighting;

/// Turn engine over one board. Owns the random source used for treasure
/// draws and rabid wandering, so a seed plus a command sequence fully
/// determines the run.
#[derive(Debug)]
pub struct Game {
    seed: u64,
    round: u64,
    rng: ChaCha8Rng,
    state: GameState,
    log: Vec<LogEvent>,
    win_condition: WinCondition,
    finished: Option<RunOutcome>,
}

impl Game {
    pub fn new(seed: u64, state: GameState, config: &GameConfig) -> Self {
        Self {
            seed,
            round: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state,
            log: Vec::new(),
            win_condition: config.win_condition,
            finished: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_round(&self) -> u64 {
        self.round
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hero(&self) -> &Actor {
        self.state.hero()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.finished
    }

    /// Replace the board wholesale and start a fresh event log. The random
    /// stream keeps going so a restarted attempt does not replay the same
    /// treasure draws.
    pub fn restore(&mut self, state: GameState) {
        self.state = state;
        self.round = 0;
        self.finished = None;
        self.log.clear();
        self.log.push(LogEvent::SessionReset);
        log::info!("session reset to initial snapshot");
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.finished {
            Some(outcome) => Err(GameError::Finished(outcome)),
            None => Ok(()),
        }
    }

    /// Applies `damage` to whoever stands on `target` and clears the cell
    /// when that kills them.
    fn damage_actor(&mut self, target: EntityId, damage: u32) -> bool {
        let actor = &mut self.state.actors[target];
        let killed = actor.take_damage(damage);
        if killed {
            let pos = actor.pos;
            self.state.grid.cleanup_at(pos);
            self.log.push(LogEvent::Died { actor: target, pos });
            log::debug!("{target:?} died at {pos:?}");
        }
        killed
    }
}
