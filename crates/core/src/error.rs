use std::io;

use thiserror::Error;

use crate::types::{Pos, RunOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    #[error("actor is dead")]
    Dead,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("game already finished: {0:?}")]
    Finished(RunOutcome),

    #[error(transparent)]
    Actor(#[from] ActorError),
}

/// Construction-time failures while turning a level description into a game.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map template is empty")]
    EmptyMap,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("unknown map marker {marker:?} at row {row}, column {col}")]
    UnknownMarker { row: usize, col: usize, marker: char },

    #[error("map has no gateway")]
    MissingGateway,

    #[error("map has more than one gateway (second at {0:?})")]
    DuplicateGateway(Pos),

    #[error("map has no spawn point")]
    MissingSpawn,

    #[error("{0:?} is not a spawn point")]
    NotASpawn(Pos),

    #[error("map places enemies but the level lists no enemy stats")]
    MissingEnemyStats,

    #[error("treasure chest at {0:?} has an empty loot table")]
    EmptyLootTable(Pos),

    #[error("loot override at {0:?} does not point at a treasure chest")]
    LootOverrideWithoutChest(Pos),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("journal ended before the session finished")]
    MissingInput,

    #[error("session finished with {remaining} unconsumed journal inputs")]
    TrailingInput { remaining: usize },
}
