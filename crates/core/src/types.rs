use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::actor::Treasure;

new_key_type! {
    pub struct EntityId;
}

/// Grid coordinate. Signed so that a step off the edge is still representable
/// and can be rejected by bounds checks instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self { row: self.row + dr, col: self.col + dc }
    }

    pub fn chebyshev(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Scan order used by enemy line-of-sight searches.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Direction to walk from `from` to reach `to`, if both lie on one row or
/// column and differ.
pub fn relative_direction(from: Pos, to: Pos) -> Option<Direction> {
    if from == to {
        return None;
    }
    if from.row == to.row {
        Some(if from.col > to.col { Direction::Left } else { Direction::Right })
    } else if from.col == to.col {
        Some(if from.row > to.row { Direction::Up } else { Direction::Down })
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    Weapon,
    Fist,
    Spell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Friendly,
    Aggressive,
    Rabid,
}

/// One validated hero command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Attack { kind: AttackKind, direction: Direction },
}

/// Everything an input source can hand the session between rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    Command(Command),
    Reset,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Won,
    Killed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Won,
    Killed,
    Quit,
}

impl From<RunOutcome> for SessionStatus {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Won => SessionStatus::Won,
            RunOutcome::Killed => SessionStatus::Killed,
        }
    }
}

/// What an attack actually did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit { target: EntityId, damage: u32, killed: bool },
    NoTarget,
    NotEnoughMana,
    Blocked { at: Pos },
    Evaporated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Moved { actor: EntityId, from: Pos, to: Pos },
    TreasureLooted { actor: EntityId, pos: Pos, treasure: Treasure },
    Attacked { attacker: EntityId, kind: AttackKind, outcome: AttackOutcome },
    Died { actor: EntityId, pos: Pos },
    HeroSpotted { enemy: EntityId, at: Pos },
    SessionReset,
}
