//! Plain ASCII board rendering.

use std::fmt::Write as _;

use game_core::{Actor, AttackOutcome, Cell, EntityId, Game, LogEvent, Pos};

pub fn cell_glyph(game: &Game, pos: Pos) -> char {
    let state = game.state();
    match &state.grid[pos] {
        Cell::Obstacle => '#',
        Cell::Treasure(_) => 'T',
        Cell::Actor(id) if state.actors.get(*id).is_some_and(Actor::is_hero) => 'H',
        Cell::Actor(_) => 'E',
        Cell::Walkable if state.grid.gateway_pos() == Some(pos) => 'G',
        Cell::Walkable => '.',
    }
}

pub fn render_board(game: &Game) -> String {
    let grid = &game.state().grid;
    let mut out = String::with_capacity((grid.ncols() + 1) * grid.nrows());
    for pos in grid.positions() {
        out.push(cell_glyph(game, pos));
        if pos.col as usize + 1 == grid.ncols() {
            out.push('\n');
        }
    }
    out
}

pub fn status_line(game: &Game) -> String {
    let hero = game.hero();
    let name = hero.as_hero().map(|info| info.known_as()).unwrap_or_default();
    let mut line = format!(
        "{name}  HP {}/{}  MP {}/{}  round {}",
        hero.health,
        hero.max_health,
        hero.mana,
        hero.max_mana,
        game.current_round()
    );
    if let Some(weapon) = &hero.weapon {
        let _ = write!(line, "  weapon: {} ({})", weapon.name, weapon.damage);
    }
    if let Some(spell) = &hero.spell {
        let _ = write!(line, "  spell: {} ({}, cost {})", spell.name, spell.damage, spell.mana_cost);
    }
    line
}

/// One-line description of an event, or `None` for events not worth showing.
pub fn describe(game: &Game, event: &LogEvent) -> Option<String> {
    let who = |id: EntityId| {
        if game.state().actors.get(id).is_some_and(Actor::is_hero) { "hero" } else { "enemy" }
    };
    match event {
        LogEvent::Moved { .. } => None,
        LogEvent::TreasureLooted { actor, treasure, .. } => {
            Some(format!("{} found {treasure:?}", who(*actor)))
        }
        LogEvent::Attacked { attacker, kind, outcome } => Some(match outcome {
            AttackOutcome::Hit { damage, killed: true, .. } => {
                format!("{} {kind:?} attack deals {damage} and kills", who(*attacker))
            }
            AttackOutcome::Hit { damage, .. } => {
                format!("{} {kind:?} attack deals {damage}", who(*attacker))
            }
            AttackOutcome::NoTarget => format!("{} {kind:?} attack hits nothing", who(*attacker)),
            AttackOutcome::NotEnoughMana => format!("{} cannot cast", who(*attacker)),
            AttackOutcome::Blocked { at } => format!("{} spell blocked at {at:?}", who(*attacker)),
            AttackOutcome::Evaporated => format!("{} spell fizzles out", who(*attacker)),
        }),
        LogEvent::Died { actor, pos } => Some(format!("{} died at {pos:?}", who(*actor))),
        LogEvent::HeroSpotted { .. } => None,
        LogEvent::SessionReset => Some("dungeon reset".to_string()),
    }
}
