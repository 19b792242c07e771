//! Stable snapshot hashing for deterministic verification.
//! Two runs from the same seed and command sequence must agree on this value.
//! Optional fields are written behind a presence byte and strings behind
//! their length, so neighbouring fields can never shift into each other.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::actor::{Spell, Weapon};

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.row);
    hasher.write_i32(pos.col);
}

fn write_str(hasher: &mut Xxh3, text: &str) {
    hasher.write_usize(text.len());
    hasher.write(text.as_bytes());
}

fn write_weapon(hasher: &mut Xxh3, weapon: Option<&Weapon>) {
    let Some(weapon) = weapon else {
        hasher.write_u8(0);
        return;
    };
    hasher.write_u8(1);
    write_str(hasher, &weapon.name);
    hasher.write_u32(weapon.damage);
}

fn write_spell(hasher: &mut Xxh3, spell: Option<&Spell>) {
    let Some(spell) = spell else {
        hasher.write_u8(0);
        return;
    };
    hasher.write_u8(1);
    write_str(hasher, &spell.name);
    hasher.write_u32(spell.damage);
    hasher.write_u32(spell.mana_cost);
    hasher.write_u32(spell.cast_range);
}

fn write_actor(hasher: &mut Xxh3, actor: &Actor) {
    write_pos(hasher, actor.pos);
    hasher.write_u32(actor.health);
    hasher.write_u32(actor.max_health);
    hasher.write_u32(actor.mana);
    hasher.write_u32(actor.max_mana);
    hasher.write_u32(actor.fist_damage);
    write_weapon(hasher, actor.weapon.as_ref());
    write_spell(hasher, actor.spell.as_ref());

    let Some(memory) = actor.as_enemy() else {
        return;
    };
    hasher.write_u8(memory.behavior as u8);
    match memory.last_seen {
        Some(pos) => {
            hasher.write_u8(1);
            write_pos(hasher, pos);
        }
        None => hasher.write_u8(0),
    }
    match memory.hero_direction {
        Some(direction) => {
            hasher.write_u8(1);
            hasher.write_u8(direction as u8);
        }
        None => hasher.write_u8(0),
    }
}

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.round);
        hasher.write_u8(match self.finished {
            None => 0,
            Some(RunOutcome::Won) => 1,
            Some(RunOutcome::Killed) => 2,
        });

        write_actor(&mut hasher, self.state.hero());
        hasher.write_usize(self.state.enemies.len());
        for &id in &self.state.enemies {
            match self.state.actors.get(id) {
                Some(enemy) => {
                    hasher.write_u8(1);
                    write_actor(&mut hasher, enemy);
                }
                None => hasher.write_u8(0),
            }
        }

        for pos in self.state.grid.positions() {
            if self.state.grid.contains_treasure_at(pos) {
                write_pos(&mut hasher, pos);
            }
        }
        hasher.finish()
    }
}
