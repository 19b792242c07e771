//! Round orchestration: hero turn, enemy turns, and end-of-game checks.

use rand_chacha::rand_core::Rng;

use super::*;


impl Game {
    /// Resolves one hero command, then regenerates mana whether or not the
    /// command achieved anything. Returns `Won` when the hero ends on the
    /// gateway.
    pub fn hero_turn(&mut self, command: Command) -> Result<Option<RunOutcome>, GameError> {
        self.ensure_running()?;
        let hero = self.state.hero_id;

        match command {
            Command::Move(direction) => {
                self.move_actor(hero, direction)?;
            }
            Command::Attack { kind, direction } => {
                self.attack(hero, kind, direction);
            }
        }

        let hero_actor = self.state.hero_mut();
        let regen = hero_actor.as_hero().map_or(0, |info| info.mana_regeneration_rate);
        hero_actor.give_mana(regen);

        if self.state.grid.gateway_pos() == Some(self.state.hero().pos) {
            return Ok(Some(self.finish(RunOutcome::Won)));
        }
        Ok(None)
    }

    /// Drops enemies killed so far from the roster and the actor store.
    /// Returns `Won` when clearing the board is a win condition and nobody
    /// is left.
    pub fn prune_dead_enemies(&mut self) -> Option<RunOutcome> {
        let actors = &mut self.state.actors;
        self.state.enemies.retain(|id| {
            let alive = actors.get(*id).is_some_and(|actor| actor.is_alive());
            if !alive {
                actors.remove(*id);
            }
            alive
        });

        let cleared = self.state.enemies.is_empty();
        if self.win_condition == WinCondition::GatewayOrEnemiesCleared && cleared {
            return Some(self.finish(RunOutcome::Won));
        }
        None
    }

    /// Enemies due to act this round, in placement order.
    pub fn enemy_roster(&self) -> Vec<EntityId> {
        self.state.enemies.clone()
    }

    /// One enemy's perception, decision and action. Enemies that died
    /// earlier in the round are skipped.
    pub fn enemy_turn(&mut self, enemy: EntityId) -> Result<(), GameError> {
        self.ensure_running()?;
        if !self.state.actors.get(enemy).is_some_and(|actor| actor.is_alive()) {
            return Ok(());
        }

        let sighting = self.search_for_hero(enemy);
        let actor = &mut self.state.actors[enemy];
        let pos = actor.pos;
        if let Some(memory) = actor.as_enemy_mut() {
            match sighting {
                Some(seen) => memory.remember(seen.pos, seen.direction),
                None => memory.resync(pos),
            }
        }
        if let Some(seen) = sighting {
            self.log.push(LogEvent::HeroSpotted { enemy, at: seen.pos });
        }

        let action = decide_enemy_action(&self.state.actors[enemy], sighting);
        log::trace!("{enemy:?} at {pos:?} decided {action:?}");

        match action {
            EnemyAction::Idle => {}
            EnemyAction::Move(direction) => {
                self.move_actor(enemy, direction)?;
            }
            EnemyAction::Attack(kind, direction) => {
                self.attack(enemy, kind, direction);
            }
            EnemyAction::Wander => {
                let roll = (self.rng.next_u64() % Direction::ALL.len() as u64) as usize;
                self.move_actor(enemy, Direction::ALL[roll])?;
            }
        }

        let actor = &mut self.state.actors[enemy];
        let pos = actor.pos;
        if let Some(memory) = actor.as_enemy_mut() {
            memory.resync(pos);
        }
        Ok(())
    }

    /// Closes the enemies' half of the round.
    pub fn end_round(&mut self) -> Option<RunOutcome> {
        self.round += 1;
        if !self.state.hero().is_alive() {
            return Some(self.finish(RunOutcome::Killed));
        }
        None
    }

    /// A full round: hero turn, pruning, each enemy in order, then the death
    /// check. `observe` runs after every individual turn.
    pub fn play_round_with(
        &mut self,
        command: Command,
        mut observe: impl FnMut(&Game),
    ) -> Result<Option<RunOutcome>, GameError> {
        let won = self.hero_turn(command)?;
        observe(self);
        if won.is_some() {
            return Ok(won);
        }
        if let Some(outcome) = self.prune_dead_enemies() {
            return Ok(Some(outcome));
        }
        for enemy in self.enemy_roster() {
            self.enemy_turn(enemy)?;
            observe(self);
        }
        Ok(self.end_round())
    }

    pub fn play_round(&mut self, command: Command) -> Result<Option<RunOutcome>, GameError> {
        self.play_round_with(command, |_| {})
    }

    fn finish(&mut self, outcome: RunOutcome) -> RunOutcome {
        log::info!("game over after {} rounds: {outcome:?}", self.round);
        self.finished = Some(outcome);
        outcome
    }
}
