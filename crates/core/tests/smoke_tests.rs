use dungeon_core::{
    AttackKind, Command, Direction, Dungeon, GameConfig, LogEvent, NullRenderer, PlayerInput, Pos,
    ScriptedInput, SessionStatus, Treasure,
};

const LEVEL: &str = include_str!("../../../levels/level1.json");

fn mv(direction: Direction) -> PlayerInput {
    PlayerInput::Command(Command::Move(direction))
}

#[test]
fn test_smoke_sessions_cover_every_spawn() {
    let dungeon = Dungeon::from_json_str(LEVEL).expect("level parses");
    let config = GameConfig::default();
    let statuses: Vec<SessionStatus> = dungeon
        .sessions(&config, 12345)
        .map(|mut session| {
            session
                .play(&mut ScriptedInput::new([mv(Direction::Up)]), &mut NullRenderer)
                .expect("session runs")
        })
        .collect();
    assert_eq!(statuses, vec![SessionStatus::Quit; 3]);
}

#[test]
fn test_smoke_chest_is_looted_on_entry() {
    let dungeon = Dungeon::from_json_str(LEVEL).expect("level parses");
    let config = GameConfig::default();
    let mut session = dungeon.sessions(&config, 7).next().expect("first spawn");
    assert_eq!(session.game().hero().pos, Pos::new(0, 0));

    session.step(mv(Direction::Right)).expect("round runs");
    session.step(mv(Direction::Down)).expect("round runs");

    let game = session.game();
    let hero_id = game.state().hero_id;
    assert_eq!(game.hero().pos, Pos::new(1, 1));
    assert!(!game.state().grid.contains_treasure_at(Pos::new(1, 1)));
    let looted: Vec<&Treasure> = game
        .log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::TreasureLooted { actor, treasure, .. } if *actor == hero_id => Some(treasure),
            _ => None,
        })
        .collect();
    assert_eq!(looted.len(), 1);
    let hero = game.hero();
    match looted[0] {
        Treasure::Weapon(weapon) => assert_eq!(hero.weapon.as_ref(), Some(weapon)),
        Treasure::Spell(spell) => assert_eq!(hero.spell.as_ref(), Some(spell)),
        Treasure::HealthPotion { .. } | Treasure::ManaPotion { .. } => {
            assert!(hero.weapon.is_none() && hero.spell.is_none());
        }
    }
}

#[test]
fn test_smoke_reset_after_looting_restores_the_chest() {
    let dungeon = Dungeon::from_json_str(LEVEL).expect("level parses");
    let config = GameConfig::default();
    let mut session = dungeon.sessions(&config, 7).next().expect("first spawn");

    session.step(mv(Direction::Right)).expect("round runs");
    session.step(mv(Direction::Down)).expect("round runs");
    session.step(PlayerInput::Reset).expect("reset runs");

    let game = session.game();
    assert_eq!(game.hero().pos, Pos::new(0, 0));
    assert!(game.state().grid.contains_treasure_at(Pos::new(1, 1)));
    assert_eq!(game.hero().weapon, None);
    assert_eq!(game.state().enemies.len(), 3);
}

#[test]
fn test_smoke_failed_attacks_still_spend_the_round() {
    let dungeon = Dungeon::from_json_str(LEVEL).expect("level parses");
    let config = GameConfig::default();
    let mut session = dungeon.sessions(&config, 1).next().expect("first spawn");

    for kind in [AttackKind::Weapon, AttackKind::Spell, AttackKind::Fist] {
        let input = PlayerInput::Command(Command::Attack { kind, direction: Direction::Right });
        assert_eq!(session.step(input).expect("round runs"), None);
    }
    assert_eq!(session.game().current_round(), 3);
    assert_eq!(session.game().hero().pos, Pos::new(0, 0));
}
