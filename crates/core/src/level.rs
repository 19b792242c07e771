//! Level descriptions: JSON decoding, map-template parsing and game setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, EnemyStats, HeroStats, LootTable, Treasure, TreasureChest};
use crate::config::GameConfig;
use crate::error::LevelError;
use crate::game::Game;
use crate::session::Session;
use crate::state::{Cell, GameState, Grid};
use crate::types::Pos;

const SPAWN: char = 'S';
const GATEWAY: char = 'G';
const WALKABLE: char = '.';
const OBSTACLE: char = '#';
const ENEMY: char = 'E';
const TREASURE: char = 'T';

/// Loot table for one specific chest, replacing the level-wide one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestLoot {
    pub pos: Pos,
    pub treasures: Vec<Treasure>,
}

/// On-disk level layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    pub hero: HeroStats,
    #[serde(default)]
    pub enemies: Vec<EnemyStats>,
    pub map_template: Vec<String>,
    #[serde(default)]
    pub treasures: Vec<Treasure>,
    #[serde(default)]
    pub chest_loot: Vec<ChestLoot>,
}

/// A validated level. The template grid already holds terrain, gateway and
/// chests; the hero and enemies are placed fresh for every game.
#[derive(Clone, Debug)]
pub struct Dungeon {
    hero: HeroStats,
    template: Grid,
    enemies: Vec<(Pos, EnemyStats)>,
    spawns: Vec<Pos>,
}

impl Dungeon {
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LevelError> {
        let level: LevelFile = serde_json::from_str(text)?;
        Self::from_level(level)
    }

    pub fn from_level(level: LevelFile) -> Result<Self, LevelError> {
        let rows = level.map_template.len();
        let cols = level.map_template.first().map_or(0, |row| row.chars().count());
        if rows == 0 || cols == 0 {
            return Err(LevelError::EmptyMap);
        }

        let shared_loot = LootTable::new(level.treasures);
        let mut template = Grid::new(rows, cols);
        let mut spawns = Vec::new();
        let mut enemy_slots = Vec::new();
        let mut chests = Vec::new();

        for (row, line) in level.map_template.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LevelError::RaggedRow { row, expected: cols, found });
            }
            for (col, marker) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                match marker {
                    WALKABLE => {}
                    OBSTACLE => template[pos] = Cell::Obstacle,
                    SPAWN => spawns.push(pos),
                    GATEWAY => {
                        if template.gateway_pos().is_some() {
                            return Err(LevelError::DuplicateGateway(pos));
                        }
                        template.set_gateway(pos);
                    }
                    ENEMY => enemy_slots.push(pos),
                    TREASURE => chests.push(pos),
                    marker => return Err(LevelError::UnknownMarker { row, col, marker }),
                }
            }
        }

        if template.gateway_pos().is_none() {
            return Err(LevelError::MissingGateway);
        }
        if spawns.is_empty() {
            return Err(LevelError::MissingSpawn);
        }
        if !enemy_slots.is_empty() && level.enemies.is_empty() {
            return Err(LevelError::MissingEnemyStats);
        }

        for ChestLoot { pos, .. } in &level.chest_loot {
            if !chests.contains(pos) {
                return Err(LevelError::LootOverrideWithoutChest(*pos));
            }
        }
        for pos in chests {
            let loot = match level.chest_loot.iter().find(|entry| entry.pos == pos) {
                Some(entry) => LootTable::new(entry.treasures.clone()),
                None => shared_loot.clone(),
            };
            let loot = loot.ok_or(LevelError::EmptyLootTable(pos))?;
            template[pos] = Cell::Treasure(TreasureChest::new(pos, loot));
        }

        let enemies =
            enemy_slots.into_iter().zip(level.enemies.iter().cycle().cloned()).collect::<Vec<_>>();

        log::debug!(
            "parsed {rows}x{cols} level: {} spawns, {} enemies",
            spawns.len(),
            enemies.len()
        );
        Ok(Self { hero: level.hero, template, enemies, spawns })
    }

    pub fn hero_stats(&self) -> &HeroStats {
        &self.hero
    }

    /// Spawn points in row-major order.
    pub fn spawn_positions(&self) -> &[Pos] {
        &self.spawns
    }

    /// Fresh game with the hero on `spawn` and every enemy at full strength.
    pub fn create_game(&self, spawn: Pos, config: &GameConfig, seed: u64) -> Result<Game, LevelError> {
        if !self.spawns.contains(&spawn) {
            return Err(LevelError::NotASpawn(spawn));
        }
        Ok(self.build_game(spawn, config, seed))
    }

    /// One session per spawn point, in order. A caller retrying after a
    /// death just takes the next one.
    pub fn sessions<'a>(
        &'a self,
        config: &'a GameConfig,
        seed: u64,
    ) -> impl Iterator<Item = Session> + 'a {
        self.spawns
            .iter()
            .map(move |&spawn| Session::new(self.build_game(spawn, config, seed), spawn, config))
    }

    fn build_game(&self, spawn: Pos, config: &GameConfig, seed: u64) -> Game {
        let mut state = GameState::new(self.template.clone(), Actor::hero(&self.hero, spawn));
        for (pos, stats) in &self.enemies {
            state.add_enemy(Actor::enemy(stats, *pos));
        }
        Game::new(seed, state, config)
    }
}
