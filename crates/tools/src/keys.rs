//! Keyboard command decoding for the terminal front end.
//!
//! Directions use the numeric keypad layout: `8` up, `2` down, `4` left,
//! `6` right. An attack is a kind prefix followed by a direction: `w`
//! weapon, `s` spell, `f` fist. `r` resets the session and `q` quits.

use game_core::{AttackKind, Command, Direction, PlayerInput};

pub const HELP: &str =
    "move: 8 2 4 6 | attack: w/s/f + direction (e.g. w6) | r: reset | q: quit";

fn direction_key(key: char) -> Option<Direction> {
    match key {
        '8' => Some(Direction::Up),
        '2' => Some(Direction::Down),
        '4' => Some(Direction::Left),
        '6' => Some(Direction::Right),
        _ => None,
    }
}

fn attack_key(key: char) -> Option<AttackKind> {
    match key {
        'w' => Some(AttackKind::Weapon),
        's' => Some(AttackKind::Spell),
        'f' => Some(AttackKind::Fist),
        _ => None,
    }
}

/// Decodes one line of player input. Returns `None` for anything that is
/// not a complete command so the caller can ask again.
pub fn parse_input(line: &str) -> Option<PlayerInput> {
    let line = line.trim().to_ascii_lowercase();
    let mut keys = line.chars();
    let first = keys.next()?;
    let second = keys.next();
    if keys.next().is_some() {
        return None;
    }

    match (first, second) {
        ('q', None) => Some(PlayerInput::Quit),
        ('r', None) => Some(PlayerInput::Reset),
        (key, None) => direction_key(key).map(|direction| PlayerInput::Command(Command::Move(direction))),
        (prefix, Some(key)) => {
            let kind = attack_key(prefix)?;
            let direction = direction_key(key)?;
            Some(PlayerInput::Command(Command::Attack { kind, direction }))
        }
    }
}
