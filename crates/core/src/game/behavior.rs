//! Enemy decision rules.
//! The decision is a pure function of the enemy's stats, its memory and the
//! current sighting; carrying the action out is left to the engine.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyAction {
    Idle,
    Move(Direction),
    Attack(AttackKind, Direction),
    /// Try a uniformly random cardinal step.
    Wander,
}

/// `actor` must be an enemy whose memory already reflects `sighting`.
pub fn decide_enemy_action(actor: &Actor, sighting: Option<Sighting>) -> EnemyAction {
    let Some(enemy) = actor.as_enemy() else {
        return EnemyAction::Idle;
    };
    let chase = enemy.hero_direction.map_or(EnemyAction::Idle, EnemyAction::Move);

    match enemy.behavior {
        Behavior::Friendly => chase,
        Behavior::Aggressive | Behavior::Rabid => match sighting {
            Some(seen) if actor.pos.chebyshev(seen.pos) <= 1 => {
                EnemyAction::Attack(strongest_melee_attack(actor), seen.direction)
            }
            Some(seen) if spell_reaches(actor, seen.pos) => {
                EnemyAction::Attack(AttackKind::Spell, seen.direction)
            }
            Some(seen) => EnemyAction::Move(seen.direction),
            None if enemy.last_seen.is_some() => chase,
            None if enemy.behavior == Behavior::Rabid => EnemyAction::Wander,
            None => EnemyAction::Idle,
        },
    }
}

/// Highest-damage attack the actor can use right now. Ties keep the earlier
/// of fist, weapon, spell, so a spell only wins when strictly stronger.
fn strongest_melee_attack(actor: &Actor) -> AttackKind {
    let mut best = (AttackKind::Fist, actor.fist_damage);
    if let Some(damage) = actor.attack_damage(AttackKind::Weapon)
        && damage > best.1
    {
        best = (AttackKind::Weapon, damage);
    }
    if actor.can_afford_spell()
        && let Some(damage) = actor.attack_damage(AttackKind::Spell)
        && damage > best.1
    {
        best = (AttackKind::Spell, damage);
    }
    best.0
}

fn spell_reaches(actor: &Actor, target: Pos) -> bool {
    actor.can_afford_spell()
        && actor.spell.as_ref().is_some_and(|spell| actor.pos.manhattan(target) <= spell.cast_range)
}
