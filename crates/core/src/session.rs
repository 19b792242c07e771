//! One attempt at a level: the game, its initial snapshot, and the loop
//! that feeds player input into rounds.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;
use crate::journal::InputJournal;
use crate::state::GameState;
use crate::types::{PlayerInput, Pos, SessionStatus};

/// Blocking source of player input. Sources that run dry should answer
/// `Quit`.
pub trait InputSource {
    fn next_input(&mut self) -> PlayerInput;
}

pub trait Renderer {
    fn render(&mut self, game: &Game);
}

/// Renderer for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _game: &Game) {}
}

/// Fixed list of inputs, then `Quit` forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput(VecDeque<PlayerInput>);

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = PlayerInput>) -> Self {
        Self(inputs.into_iter().collect())
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self) -> PlayerInput {
        self.0.pop_front().unwrap_or(PlayerInput::Quit)
    }
}

pub struct Session {
    game: Game,
    initial: GameState,
    animation_delay: Duration,
    journal: InputJournal,
    status: Option<SessionStatus>,
}

impl Session {
    /// Takes the snapshot `reset` returns to from `game` as it is now.
    pub fn new(game: Game, spawn: Pos, config: &GameConfig) -> Self {
        let initial = game.state().clone();
        let journal = InputJournal::new(game.seed(), spawn);
        Self { game, initial, animation_delay: config.animation_delay(), journal, status: None }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn into_journal(self) -> InputJournal {
        self.journal
    }

    pub fn status(&self) -> Option<SessionStatus> {
        self.status
    }

    /// Back to the snapshot taken at construction. The random stream is not
    /// rewound.
    pub fn reset(&mut self) {
        self.game.restore(self.initial.clone());
    }

    /// Applies one input without rendering. Returns the final status once
    /// the session is over; inputs after that are ignored and not recorded.
    pub fn step(&mut self, input: PlayerInput) -> Result<Option<SessionStatus>, GameError> {
        self.apply(input, |_| {})
    }

    /// Runs until the hero wins, dies, or the player quits. The renderer
    /// sees the board once up front and after every individual turn.
    pub fn play(
        &mut self,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
    ) -> Result<SessionStatus, GameError> {
        renderer.render(&self.game);
        let delay = self.animation_delay;
        loop {
            if let Some(status) = self.status {
                return Ok(status);
            }
            let next = input.next_input();
            self.apply(next, |game| {
                renderer.render(game);
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            })?;
        }
    }

    fn apply(
        &mut self,
        input: PlayerInput,
        mut observe: impl FnMut(&Game),
    ) -> Result<Option<SessionStatus>, GameError> {
        if let Some(status) = self.status {
            return Ok(Some(status));
        }
        self.journal.append(self.game.current_round(), input);

        let status = match input {
            PlayerInput::Reset => {
                self.reset();
                observe(&self.game);
                None
            }
            PlayerInput::Quit => Some(SessionStatus::Quit),
            PlayerInput::Command(command) => {
                self.game.play_round_with(command, &mut observe)?.map(SessionStatus::from)
            }
        };
        if let Some(status) = status {
            log::info!("session over after {} rounds: {status:?}", self.game.current_round());
            self.status = Some(status);
        }
        Ok(status)
    }
}
