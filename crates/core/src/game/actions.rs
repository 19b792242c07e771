//! Move and attack resolution against the shared board.
//! This is the only place that changes an actor's position or applies combat
//! damage; enemy decision making and round ordering live elsewhere.

use super::*;

impl Game {
    /// Steps `actor` one cell in `direction`. Opening a chest on the way is
    /// part of the move. Returns whether the actor moved.
    pub fn move_actor(&mut self, actor: EntityId, direction: Direction) -> Result<bool, GameError> {
        let from = self.state.actors[actor].pos;
        let to = from.step(direction);

        if !self.state.grid.can_move_to(to) {
            return Ok(false);
        }

        if let Cell::Treasure(chest) = &self.state.grid[to] {
            let treasure = chest.open(&mut self.rng).clone();
            treasure.give_to_actor(&mut self.state.actors[actor])?;
            self.state.grid.cleanup_at(to);
            log::debug!("{actor:?} looted {treasure:?} at {to:?}");
            self.log.push(LogEvent::TreasureLooted { actor, pos: to, treasure });
        }

        self.state.grid[from] = Cell::Walkable;
        self.state.grid[to] = Cell::Actor(actor);
        self.state.actors[actor].pos = to;
        self.log.push(LogEvent::Moved { actor, from, to });
        Ok(true)
    }

    pub fn attack(
        &mut self,
        attacker: EntityId,
        kind: AttackKind,
        direction: Direction,
    ) -> AttackOutcome {
        let outcome = match kind {
            AttackKind::Weapon | AttackKind::Fist => self.strike(attacker, kind, direction),
            AttackKind::Spell => self.cast(attacker, direction),
        };
        log::debug!("{attacker:?} attacked {direction:?} with {kind:?}: {outcome:?}");
        self.log.push(LogEvent::Attacked { attacker, kind, outcome });
        outcome
    }

    /// Weapon and fist attacks land on the first non-walkable cell along the
    /// ray, and only do anything if that cell holds an actor.
    fn strike(&mut self, attacker: EntityId, kind: AttackKind, direction: Direction) -> AttackOutcome {
        let Some(damage) = self.state.actors[attacker].attack_damage(kind) else {
            return AttackOutcome::NoTarget;
        };
        let origin = self.state.actors[attacker].pos;
        let grid = &self.state.grid;
        let first_hit = grid.trace(origin, direction).find(|pos| !grid[*pos].is_walkable());

        let Some(target) = first_hit.and_then(|pos| grid.actor_at(pos)) else {
            return AttackOutcome::NoTarget;
        };
        let killed = self.damage_actor(target, damage);
        AttackOutcome::Hit { target, damage, killed }
    }

    /// Mana is spent as soon as the cast is affordable, whatever it hits.
    fn cast(&mut self, caster: EntityId, direction: Direction) -> AttackOutcome {
        let actor = &mut self.state.actors[caster];
        let Some(spell) = actor.spell.clone() else {
            return AttackOutcome::NotEnoughMana;
        };
        if actor.mana < spell.mana_cost {
            return AttackOutcome::NotEnoughMana;
        }
        actor.take_mana(spell.mana_cost);
        let origin = actor.pos;

        let path = self.state.grid.trace(origin, direction).take(spell.cast_range as usize);
        for pos in path {
            match self.state.grid[pos] {
                Cell::Walkable => continue,
                Cell::Actor(target) => {
                    let killed = self.damage_actor(target, spell.damage);
                    return AttackOutcome::Hit { target, damage: spell.damage, killed };
                }
                Cell::Obstacle | Cell::Treasure(_) => return AttackOutcome::Blocked { at: pos },
            }
        }
        AttackOutcome::Evaporated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Spell, Treasure, Weapon};
    use crate::game::test_support::*;

    #[test]
    fn hero_moves_onto_walkable_and_vacates_old_cell() {
        let mut game = corridor_game(5, 10, Pos::new(0, 0));
        let hero = game.state.hero_id;

        assert!(game.move_actor(hero, Direction::Right).unwrap());
        assert_eq!(game.hero().pos, Pos::new(0, 1));
        assert_eq!(game.state.grid[Pos::new(0, 0)], Cell::Walkable);
        assert_eq!(game.state.grid[Pos::new(0, 1)], Cell::Actor(hero));
    }

    #[test]
    fn blocked_moves_leave_position_unchanged() {
        let mut game = corridor_game(3, 3, Pos::new(1, 1));
        let hero = game.state.hero_id;
        game.state.grid[Pos::new(0, 1)] = Cell::Obstacle;
        add_enemy(&mut game, Pos::new(1, 2), Behavior::Friendly);

        assert!(!game.move_actor(hero, Direction::Up).unwrap());
        assert!(!game.move_actor(hero, Direction::Right).unwrap());
        assert_eq!(game.hero().pos, Pos::new(1, 1));

        let mut edge = corridor_game(1, 1, Pos::new(0, 0));
        let edge_hero = edge.state.hero_id;
        for direction in Direction::ALL {
            assert!(!edge.move_actor(edge_hero, direction).unwrap());
        }
    }

    #[test]
    fn moving_onto_chest_applies_one_payload_and_clears_it() {
        let mut game = corridor_game(1, 3, Pos::new(0, 0));
        let hero = game.state.hero_id;
        let axe = Weapon { name: "The Axe of Destiny".to_string(), damage: 20 };
        add_chest(&mut game, Pos::new(0, 1), vec![Treasure::Weapon(axe.clone())]);

        assert!(game.move_actor(hero, Direction::Right).unwrap());
        assert_eq!(game.hero().weapon, Some(axe));
        assert_eq!(game.state.grid[Pos::new(0, 1)], Cell::Actor(hero));

        game.move_actor(hero, Direction::Right).unwrap();
        assert_eq!(game.state.grid[Pos::new(0, 1)], Cell::Walkable);
        let looted = game
            .log()
            .iter()
            .filter(|event| matches!(event, LogEvent::TreasureLooted { .. }))
            .count();
        assert_eq!(looted, 1);
    }

    #[test]
    fn fist_attack_from_adjacent_enemy_deals_fist_damage() {
        let mut game = corridor_game(1, 5, Pos::new(0, 2));
        let enemy = add_enemy(&mut game, Pos::new(0, 3), Behavior::Aggressive);
        game.state.actors[enemy].fist_damage = 20;

        let outcome = game.attack(enemy, AttackKind::Fist, Direction::Left);
        assert_eq!(
            outcome,
            AttackOutcome::Hit { target: game.state.hero_id, damage: 20, killed: false }
        );
        assert_eq!(game.hero().health, 80);
    }

    #[test]
    fn weapon_attack_reaches_first_occupied_cell_only() {
        let mut game = corridor_game(1, 6, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.actors[hero].equip(Weapon { name: "Spear".to_string(), damage: 15 });
        let near = add_enemy(&mut game, Pos::new(0, 3), Behavior::Aggressive);
        let far = add_enemy(&mut game, Pos::new(0, 5), Behavior::Aggressive);

        game.attack(hero, AttackKind::Weapon, Direction::Right);
        assert_eq!(game.state.actors[near].health, 85);
        assert_eq!(game.state.actors[far].health, 100);
    }

    #[test]
    fn strikes_into_obstacles_or_empty_rays_do_nothing() {
        let mut game = corridor_game(1, 5, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.grid[Pos::new(0, 2)] = Cell::Obstacle;
        let hidden = add_enemy(&mut game, Pos::new(0, 3), Behavior::Aggressive);
        game.state.actors[hero].fist_damage = 5;

        assert_eq!(game.attack(hero, AttackKind::Fist, Direction::Right), AttackOutcome::NoTarget);
        assert_eq!(game.attack(hero, AttackKind::Fist, Direction::Up), AttackOutcome::NoTarget);
        assert_eq!(game.attack(hero, AttackKind::Weapon, Direction::Right), AttackOutcome::NoTarget);
        assert_eq!(game.state.actors[hidden].health, 100);
    }

    #[test]
    fn killing_blow_clears_cell() {
        let mut game = corridor_game(1, 3, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.actors[hero].equip(Weapon { name: "Axe".to_string(), damage: 150 });
        let enemy = add_enemy(&mut game, Pos::new(0, 1), Behavior::Aggressive);

        let outcome = game.attack(hero, AttackKind::Weapon, Direction::Right);
        assert_eq!(outcome, AttackOutcome::Hit { target: enemy, damage: 150, killed: true });
        assert_eq!(game.state.grid[Pos::new(0, 1)], Cell::Walkable);
        assert_eq!(game.state.actors[enemy].health, 0);
    }

    #[test]
    fn unaffordable_spell_is_a_free_no_op() {
        let mut game = corridor_game(1, 4, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.actors[hero].learn(Spell {
            name: "Fireball".to_string(),
            damage: 30,
            mana_cost: 50,
            cast_range: 3,
        });
        game.state.actors[hero].mana = 40;
        let enemy = add_enemy(&mut game, Pos::new(0, 1), Behavior::Aggressive);

        let outcome = game.attack(hero, AttackKind::Spell, Direction::Right);
        assert_eq!(outcome, AttackOutcome::NotEnoughMana);
        assert_eq!(game.hero().mana, 40);
        assert_eq!(game.state.actors[enemy].health, 100);
    }

    #[test]
    fn spell_hits_first_actor_within_range_and_does_not_pierce() {
        let mut game = corridor_game(1, 6, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.actors[hero].learn(fireball(3));
        let first = add_enemy(&mut game, Pos::new(0, 2), Behavior::Aggressive);
        let second = add_enemy(&mut game, Pos::new(0, 3), Behavior::Aggressive);

        let outcome = game.attack(hero, AttackKind::Spell, Direction::Right);
        assert_eq!(outcome, AttackOutcome::Hit { target: first, damage: 30, killed: false });
        assert_eq!(game.state.actors[second].health, 100);
        assert_eq!(game.hero().mana, 50);
    }

    #[test]
    fn spell_blocked_by_obstacle_still_costs_mana() {
        let mut game = corridor_game(1, 6, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.actors[hero].learn(fireball(5));
        game.state.grid[Pos::new(0, 1)] = Cell::Obstacle;
        let behind = add_enemy(&mut game, Pos::new(0, 2), Behavior::Aggressive);

        let outcome = game.attack(hero, AttackKind::Spell, Direction::Right);
        assert_eq!(outcome, AttackOutcome::Blocked { at: Pos::new(0, 1) });
        assert_eq!(game.state.actors[behind].health, 100);
        assert_eq!(game.hero().mana, 50);
    }

    #[test]
    fn spell_out_of_range_evaporates_and_costs_mana() {
        let mut game = corridor_game(1, 6, Pos::new(0, 0));
        let hero = game.state.hero_id;
        game.state.actors[hero].learn(fireball(2));
        let far = add_enemy(&mut game, Pos::new(0, 3), Behavior::Aggressive);

        assert_eq!(game.attack(hero, AttackKind::Spell, Direction::Right), AttackOutcome::Evaporated);
        assert_eq!(game.state.actors[far].health, 100);
        assert_eq!(game.hero().mana, 50);

        assert_eq!(game.attack(hero, AttackKind::Spell, Direction::Left), AttackOutcome::Evaporated);
        assert_eq!(game.hero().mana, 0);
    }
}
