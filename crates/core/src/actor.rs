//! Hero, enemy and treasure value types.
//! Actors only know their own numbers; clearing a dead actor off the grid is
//! the engine's job.

use std::sync::Arc;

use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ActorError;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub damage: u32,
    pub mana_cost: u32,
    pub cast_range: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Treasure {
    Weapon(Weapon),
    Spell(Spell),
    HealthPotion { amount: u32 },
    ManaPotion { amount: u32 },
}

impl Treasure {
    pub fn give_to_actor(&self, actor: &mut Actor) -> Result<(), ActorError> {
        match self {
            Treasure::Weapon(weapon) => actor.equip(weapon.clone()),
            Treasure::Spell(spell) => actor.learn(spell.clone()),
            Treasure::HealthPotion { amount } => actor.heal(*amount)?,
            Treasure::ManaPotion { amount } => actor.give_mana(*amount),
        }
        Ok(())
    }
}

/// Read-only, non-empty list of payloads. Cloning shares the same table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LootTable(Arc<[Treasure]>);

impl LootTable {
    pub fn new(treasures: Vec<Treasure>) -> Option<Self> {
        if treasures.is_empty() { None } else { Some(Self(treasures.into())) }
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.0
    }

    pub fn shares_storage_with(&self, other: &LootTable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasureChest {
    pub pos: Pos,
    loot: LootTable,
}

impl TreasureChest {
    pub fn new(pos: Pos, loot: LootTable) -> Self {
        Self { pos, loot }
    }

    pub fn loot(&self) -> &LootTable {
        &self.loot
    }

    /// Draws one payload uniformly at random. The table itself is untouched.
    pub fn open(&self, rng: &mut impl Rng) -> &Treasure {
        let treasures = self.loot.treasures();
        let index = (rng.next_u64() % treasures.len() as u64) as usize;
        &treasures[index]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroStats {
    pub name: String,
    pub title: String,
    pub health: u32,
    pub mana: u32,
    pub mana_regeneration_rate: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: u32,
    pub mana: u32,
    pub fist_damage: u32,
    pub behavior: Behavior,
    #[serde(default)]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub spell: Option<Spell>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hero {
    pub name: String,
    pub title: String,
    pub mana_regeneration_rate: u32,
}

impl Hero {
    pub fn known_as(&self) -> String {
        format!("{} the {}", self.name, self.title)
    }
}

/// Enemy memory of the hero. `hero_direction` is only ever set together with
/// `last_seen` and is recomputed from the enemy's position after every move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub behavior: Behavior,
    pub last_seen: Option<Pos>,
    pub hero_direction: Option<Direction>,
}

impl Enemy {
    pub fn new(behavior: Behavior) -> Self {
        Self { behavior, last_seen: None, hero_direction: None }
    }

    pub fn remember(&mut self, pos: Pos, direction: Direction) {
        self.last_seen = Some(pos);
        self.hero_direction = Some(direction);
    }

    pub fn forget(&mut self) {
        self.last_seen = None;
        self.hero_direction = None;
    }

    /// Re-derive the chase direction from `from`. Standing on the remembered
    /// spot (or losing the line to it) drops the memory.
    pub fn resync(&mut self, from: Pos) {
        let Some(target) = self.last_seen else {
            self.hero_direction = None;
            return;
        };
        match relative_direction(from, target) {
            Some(direction) => self.hero_direction = Some(direction),
            None => self.forget(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Hero(Hero),
    Enemy(Enemy),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub pos: Pos,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub fist_damage: u32,
    pub weapon: Option<Weapon>,
    pub spell: Option<Spell>,
}

impl Actor {
    pub fn hero(stats: &HeroStats, pos: Pos) -> Self {
        Self {
            id: EntityId::default(),
            kind: ActorKind::Hero(Hero {
                name: stats.name.clone(),
                title: stats.title.clone(),
                mana_regeneration_rate: stats.mana_regeneration_rate,
            }),
            pos,
            health: stats.health,
            max_health: stats.health,
            mana: stats.mana,
            max_mana: stats.mana,
            fist_damage: 0,
            weapon: None,
            spell: None,
        }
    }

    pub fn enemy(stats: &EnemyStats, pos: Pos) -> Self {
        Self {
            id: EntityId::default(),
            kind: ActorKind::Enemy(Enemy::new(stats.behavior)),
            pos,
            health: stats.health,
            max_health: stats.health,
            mana: stats.mana,
            max_mana: stats.mana,
            fist_damage: stats.fist_damage,
            weapon: stats.weapon.clone(),
            spell: stats.spell.clone(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health != 0
    }

    pub fn can_cast(&self) -> bool {
        self.mana != 0
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, ActorKind::Hero(_))
    }

    pub fn as_hero(&self) -> Option<&Hero> {
        match &self.kind {
            ActorKind::Hero(hero) => Some(hero),
            ActorKind::Enemy(_) => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&Enemy> {
        match &self.kind {
            ActorKind::Enemy(enemy) => Some(enemy),
            ActorKind::Hero(_) => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut Enemy> {
        match &mut self.kind {
            ActorKind::Enemy(enemy) => Some(enemy),
            ActorKind::Hero(_) => None,
        }
    }

    /// Returns true when this hit took the actor from alive to dead.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn heal(&mut self, amount: u32) -> Result<(), ActorError> {
        if !self.is_alive() {
            return Err(ActorError::Dead);
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
        Ok(())
    }

    pub fn give_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
    }

    pub fn take_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_sub(amount);
    }

    pub fn equip(&mut self, weapon: Weapon) {
        self.weapon = Some(weapon);
    }

    pub fn learn(&mut self, spell: Spell) {
        self.spell = Some(spell);
    }

    /// Damage dealt by `kind`, or `None` when the actor has nothing to attack
    /// with. Mana is not considered here.
    pub fn attack_damage(&self, kind: AttackKind) -> Option<u32> {
        match kind {
            AttackKind::Fist => Some(self.fist_damage),
            AttackKind::Weapon => self.weapon.as_ref().map(|weapon| weapon.damage),
            AttackKind::Spell => self.spell.as_ref().map(|spell| spell.damage),
        }
    }

    pub fn can_afford_spell(&self) -> bool {
        self.spell.as_ref().is_some_and(|spell| self.mana >= spell.mana_cost)
    }
}
