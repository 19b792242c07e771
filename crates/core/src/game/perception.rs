//! Enemy line of sight: straight cardinal rays only.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sighting {
    pub pos: Pos,
    pub direction: Direction,
}

impl Game {
    /// Looks up, down, left and right (in that order) from `enemy` and
    /// reports the first ray on which the hero is visible. Any non-walkable
    /// cell that is not the hero blocks the ray.
    pub fn search_for_hero(&self, enemy: EntityId) -> Option<Sighting> {
        let origin = self.state.actors[enemy].pos;
        let grid = &self.state.grid;
        Direction::ALL.into_iter().find_map(|direction| {
            let blocker = grid.trace(origin, direction).find(|pos| !grid[*pos].is_walkable())?;
            let seen = grid.actor_at(blocker)?;
            (seen == self.state.hero_id).then_some(Sighting { pos: blocker, direction })
        })
    }
}
