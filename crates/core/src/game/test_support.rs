//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating board and actor setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::actor::{EnemyStats, HeroStats, LootTable, Spell, Treasure, TreasureChest};
use crate::state::Grid;

pub(super) fn bron_stats() -> HeroStats {
    HeroStats {
        name: "Bron".to_string(),
        title: "dragon slayer".to_string(),
        health: 100,
        mana: 100,
        mana_regeneration_rate: 2,
    }
}

/// Open `rows` x `cols` board with only the hero on it.
pub(super) fn corridor_game(rows: usize, cols: usize, hero_pos: Pos) -> Game {
    let grid = Grid::new(rows, cols);
    let state = GameState::new(grid, Actor::hero(&bron_stats(), hero_pos));
    Game::new(7, state, &GameConfig::default())
}

pub(super) fn add_enemy(game: &mut Game, pos: Pos, behavior: Behavior) -> EntityId {
    let stats = EnemyStats {
        health: 100,
        mana: 100,
        fist_damage: 20,
        behavior,
        weapon: None,
        spell: None,
    };
    game.state.add_enemy(Actor::enemy(&stats, pos))
}

pub(super) fn add_chest(game: &mut Game, pos: Pos, treasures: Vec<Treasure>) {
    let loot = LootTable::new(treasures).expect("test loot table must not be empty");
    game.state.add_chest(TreasureChest::new(pos, loot));
}

pub(super) fn fireball(cast_range: u32) -> Spell {
    Spell { name: "Fireball".to_string(), damage: 30, mana_cost: 50, cast_range }
}
