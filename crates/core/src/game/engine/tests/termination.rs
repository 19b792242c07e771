//! Win and loss detection at round boundaries.

use super::support::*;

#[test]
fn hero_killed_during_enemy_turns_ends_the_round_as_killed() {
    let mut game = corridor_game(1, 3, Pos::new(0, 0));
    let hero = game.state.hero_id;
    game.state.actors[hero].health = 15;
    add_enemy(&mut game, Pos::new(0, 1), Behavior::Aggressive);

    let outcome = game.play_round(Command::Move(Direction::Up)).expect("round runs");

    assert_eq!(outcome, Some(RunOutcome::Killed));
    assert_eq!(game.hero().health, 0);
    assert_eq!(game.state.grid[Pos::new(0, 0)], Cell::Walkable, "corpse is cleared");
    assert!(game.state.invariant_violation().is_none());
}

#[test]
fn later_enemies_still_act_after_the_hero_falls() {
    let mut game = corridor_game(1, 4, Pos::new(0, 1));
    let hero = game.state.hero_id;
    game.state.actors[hero].health = 10;
    add_enemy(&mut game, Pos::new(0, 0), Behavior::Aggressive);
    let chaser = add_enemy(&mut game, Pos::new(0, 3), Behavior::Aggressive);
    game.state.actors[chaser]
        .as_enemy_mut()
        .expect("enemy")
        .remember(Pos::new(0, 1), Direction::Left);

    let outcome = game.play_round(Command::Move(Direction::Up)).expect("round runs");

    assert_eq!(outcome, Some(RunOutcome::Killed));
    assert_eq!(game.state.actors[chaser].pos, Pos::new(0, 2), "chaser still follows its memory");
}

#[test]
fn gateway_rule_ignores_an_empty_enemy_roster() {
    let mut game = corridor_game(1, 3, Pos::new(0, 0));
    game.state.grid.set_gateway(Pos::new(0, 2));
    assert_eq!(game.play_round(Command::Move(Direction::Right)).expect("round runs"), None);
    assert_eq!(game.outcome(), None);
}

#[test]
fn clearing_all_enemies_wins_when_configured() {
    let mut game = corridor_game(1, 3, Pos::new(0, 0));
    game.win_condition = WinCondition::GatewayOrEnemiesCleared;
    let hero = game.state.hero_id;
    game.state.actors[hero].equip(Weapon { name: "Axe".to_string(), damage: 200 });
    add_enemy(&mut game, Pos::new(0, 2), Behavior::Aggressive);

    let outcome = game
        .play_round(Command::Attack { kind: AttackKind::Weapon, direction: Direction::Right })
        .expect("round runs");

    assert_eq!(outcome, Some(RunOutcome::Won));
    assert!(game.state.enemies.is_empty());
}

#[test]
fn killed_game_rejects_further_commands() {
    let mut game = corridor_game(1, 2, Pos::new(0, 0));
    let hero = game.state.hero_id;
    game.state.actors[hero].health = 1;
    add_enemy(&mut game, Pos::new(0, 1), Behavior::Aggressive);

    game.play_round(Command::Move(Direction::Left)).expect("round runs");
    assert!(matches!(
        game.hero_turn(Command::Move(Direction::Left)),
        Err(GameError::Finished(RunOutcome::Killed))
    ));
    assert_eq!(game.current_round(), 1);
}

#[test]
fn restore_reopens_a_finished_game() {
    let mut game = corridor_game(1, 2, Pos::new(0, 0));
    let initial = game.state.clone();
    let hero = game.state.hero_id;
    game.state.actors[hero].health = 1;
    add_enemy(&mut game, Pos::new(0, 1), Behavior::Aggressive);
    game.play_round(Command::Move(Direction::Left)).expect("round runs");
    assert_eq!(game.outcome(), Some(RunOutcome::Killed));

    game.restore(initial);
    assert_eq!(game.outcome(), None);
    assert_eq!(game.hero().health, 100);
    assert!(game.state.enemies.is_empty());
    assert_eq!(game.log(), &[LogEvent::SessionReset], "earlier attempts are dropped from the log");
}

#[test]
fn spell_duel_keeps_stats_within_bounds() {
    let mut game = corridor_game(1, 5, Pos::new(0, 0));
    let hero = game.state.hero_id;
    game.state.actors[hero].learn(Spell {
        name: "Frost".to_string(),
        damage: 5,
        mana_cost: 7,
        cast_range: 4,
    });
    let enemy = add_enemy(&mut game, Pos::new(0, 4), Behavior::Aggressive);
    game.state.actors[enemy].learn(fireball(4));

    for _ in 0..6 {
        if game
            .play_round(Command::Attack { kind: AttackKind::Spell, direction: Direction::Right })
            .expect("round runs")
            .is_some()
        {
            break;
        }
        assert!(game.state.invariant_violation().is_none());
    }
    assert!(game.hero().mana <= game.hero().max_mana);
}
