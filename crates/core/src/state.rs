use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use crate::actor::{Actor, TreasureChest};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Obstacle,
    Walkable,
    Actor(EntityId),
    Treasure(TreasureChest),
}

impl Cell {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Cell::Walkable)
    }
}

/// Rectangular board. Indexing with an out-of-bounds `Pos` panics; callers
/// only index positions that came from `can_move_to`, `trace` or
/// `neighbours`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    gateway_pos: Option<Pos>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![Cell::Walkable; rows * cols], gateway_pos: None }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn gateway_pos(&self) -> Option<Pos> {
        self.gateway_pos
    }

    pub fn set_gateway(&mut self, pos: Pos) {
        assert!(self.in_bounds(pos), "gateway {pos:?} outside grid");
        self.gateway_pos = Some(pos);
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        if self.in_bounds(pos) { Some(&self.cells[self.offset(pos)]) } else { None }
    }

    pub fn can_move_to(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(Cell::Walkable | Cell::Treasure(_)))
    }

    pub fn contains_treasure_at(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(Cell::Treasure(_)))
    }

    pub fn actor_at(&self, pos: Pos) -> Option<EntityId> {
        match self.get(pos) {
            Some(Cell::Actor(id)) => Some(*id),
            _ => None,
        }
    }

    /// Removes dead bodies and looted chests.
    pub fn cleanup_at(&mut self, pos: Pos) {
        self[pos] = Cell::Walkable;
    }

    /// Lazy ray of positions from one step past `pos` to the grid edge.
    pub fn trace(&self, pos: Pos, direction: Direction) -> Trace {
        Trace { next: pos.step(direction), direction, rows: self.rows, cols: self.cols }
    }

    /// In-bounds cells around `pos`, clockwise from the top-left.
    pub fn neighbours(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        const RING: [(i32, i32); 8] =
            [(-1, -1), (-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1)];
        RING.into_iter()
            .map(move |(dr, dc)| Pos { row: pos.row + dr, col: pos.col + dc })
            .filter(move |candidate| self.in_bounds(*candidate))
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Pos { row: row as i32, col: col as i32 })
        })
    }

    fn offset(&self, pos: Pos) -> usize {
        (pos.row as usize) * self.cols + (pos.col as usize)
    }
}

impl Index<Pos> for Grid {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Cell {
        assert!(self.in_bounds(pos), "position {pos:?} outside {}x{} grid", self.rows, self.cols);
        &self.cells[self.offset(pos)]
    }
}

impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, pos: Pos) -> &mut Cell {
        assert!(self.in_bounds(pos), "position {pos:?} outside {}x{} grid", self.rows, self.cols);
        let idx = self.offset(pos);
        &mut self.cells[idx]
    }
}

/// Iterator returned by [`Grid::trace`]. Cloning it restarts from the same
/// point.
#[derive(Clone, Debug)]
pub struct Trace {
    next: Pos,
    direction: Direction,
    rows: usize,
    cols: usize,
}

impl Iterator for Trace {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let pos = self.next;
        let inside = pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols;
        if !inside {
            return None;
        }
        self.next = pos.step(self.direction);
        Some(pos)
    }
}

/// Everything that a session snapshot has to restore.
#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub actors: SlotMap<EntityId, Actor>,
    pub hero_id: EntityId,
    /// Live enemies in placement order. Turn order follows this list.
    pub enemies: Vec<EntityId>,
}

impl GameState {
    /// Builds a state with the hero already on the board. The hero's cell is
    /// overwritten.
    pub fn new(mut grid: Grid, hero: Actor) -> Self {
        let mut actors = SlotMap::with_key();
        let pos = hero.pos;
        let hero_id = actors.insert(hero);
        actors[hero_id].id = hero_id;
        grid[pos] = Cell::Actor(hero_id);
        Self { grid, actors, hero_id, enemies: Vec::new() }
    }

    pub fn add_enemy(&mut self, enemy: Actor) -> EntityId {
        let pos = enemy.pos;
        let id = self.actors.insert(enemy);
        self.actors[id].id = id;
        self.grid[pos] = Cell::Actor(id);
        self.enemies.push(id);
        id
    }

    pub fn add_chest(&mut self, chest: TreasureChest) {
        let pos = chest.pos;
        self.grid[pos] = Cell::Treasure(chest);
    }

    pub fn hero(&self) -> &Actor {
        &self.actors[self.hero_id]
    }

    pub fn hero_mut(&mut self) -> &mut Actor {
        &mut self.actors[self.hero_id]
    }

    /// First broken board invariant, if any. Used by tests and the fuzz tool.
    pub fn invariant_violation(&self) -> Option<String> {
        for (id, actor) in &self.actors {
            if actor.health > actor.max_health || actor.mana > actor.max_mana {
                return Some(format!("{id:?} has stats above their maximum"));
            }
            let on_board = self.grid.actor_at(actor.pos) == Some(id);
            if actor.is_alive() && !on_board {
                return Some(format!("live {id:?} is not on its cell {:?}", actor.pos));
            }
            if !actor.is_alive() && on_board {
                return Some(format!("dead {id:?} still occupies {:?}", actor.pos));
            }
        }
        for pos in self.grid.positions() {
            if let Cell::Actor(id) = self.grid[pos] {
                match self.actors.get(id) {
                    Some(actor) if actor.pos == pos => {}
                    _ => return Some(format!("cell {pos:?} points at a stale actor")),
                }
            }
        }
        None
    }
}
