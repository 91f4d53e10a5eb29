use sim_core::cmd::Cmd;
use sim_core::config::GameConfig;
use sim_core::env::GridMap;
use sim_core::events::EventKind;
use sim_core::geo::{FULL_SCALE, TILE_HEIGHT, TILE_WIDTH, Vec2};
use sim_core::state::{ActorFlags, ActorId, CharId, ObjectiveId, PlayerId};
use sim_runtime::{RecordingSink, Session};

const JONES: CharId = CharId(0);
const CIVILIAN: CharId = CharId(4);

fn tile_center(tx: i32, ty: i32) -> Vec2 {
    Vec2::new(
        tx * TILE_WIDTH + TILE_WIDTH / 2,
        ty * TILE_HEIGHT + TILE_HEIGHT / 2,
    )
    .real_to_full()
}

fn session() -> Session<RecordingSink> {
    Session::<RecordingSink>::builder(GridMap::walled(Vec2::new(16, 16)))
        .seed(7)
        .build(RecordingSink::new())
}

fn run_idle(session: &mut Session<RecordingSink>, ticks: u32) {
    for _ in 0..ticks {
        session.tick(&[]).expect("idle tick");
    }
}

/// End-to-end mission scenario, driven tick by tick through the public
/// session API:
/// 1. A player joins with a loadout and spawns
/// 2. The player walks across open floor and is stopped by a wall
/// 3. The player fires, drains ammo, and eventually runs dry
/// 4. The player frees a prisoner, completing an objective
/// 5. The player dies and respawns, then dies for good
#[test]
fn complete_mission_scenario() {
    sim_runtime::logging::init_tracing();
    println!("\n════════════════════════════════════════════════════════");
    println!("  Mission scenario: walk, shoot, rescue, die");
    println!("════════════════════════════════════════════════════════\n");

    let mut session = session();

    // ================================================================
    // PHASE 1: Setup
    // ================================================================
    let player = session
        .add_player(JONES, &["machine_gun", "knife"], 2)
        .expect("player joins");
    let actor = session
        .spawn_player(player, tile_center(3, 3))
        .expect("player spawns");

    let a = session.world().actors.by_uid(actor).expect("actor exists");
    assert_eq!(a.pos, tile_center(3, 3), "preferred spawn tile was clear");
    assert_eq!(a.guns.len(), 2);
    assert_eq!(a.health, 60);
    // Starting ammo is twice the pickup amount for each class.
    assert_eq!(a.ammo[0], 60);
    assert!(session.sink().heard("spawn"));
    println!("✓ player spawned with machine gun + knife, 60 hp, 60 rounds");

    // ================================================================
    // PHASE 2: Movement
    // ================================================================
    let start = session.world().actors.by_uid(actor).unwrap().pos;
    for _ in 0..8 {
        session.tick(&[(player, Cmd::RIGHT)]).expect("walk tick");
    }
    let pos = session.world().actors.by_uid(actor).unwrap().pos;
    // Walking speed for this character is one real unit per tick.
    assert_eq!(pos.x, start.x + 8 * FULL_SCALE);
    assert_eq!(pos.y, start.y);
    println!("✓ walked 8 real units east");

    // Head-on into the west border wall: the actor ends flush against it
    // and stays there.
    for _ in 0..120 {
        session.tick(&[(player, Cmd::LEFT)]).expect("walk tick");
    }
    let real = session.world().actors.by_uid(actor).unwrap().real_pos();
    assert_eq!(real.x, TILE_WIDTH + 7, "flush against the border wall");
    let before = session.world().actors.by_uid(actor).unwrap().pos;
    session.tick(&[(player, Cmd::LEFT)]).expect("walk tick");
    assert_eq!(session.world().actors.by_uid(actor).unwrap().pos, before);
    println!("✓ wall stops movement at {real:?}");

    // Walking marks tiles explored.
    assert!(session.world().is_explored(real.real_to_tile()));

    // ================================================================
    // PHASE 3: Shooting
    // ================================================================
    session.sink_mut().clear();
    for _ in 0..8 {
        session.tick(&[(player, Cmd::BUTTON1)]).expect("fire tick");
    }
    // The lock of 6 ticks makes the refire period 6: shots land on
    // ticks 0 and 6 of the burst.
    assert_eq!(session.sink().bullets.len(), 2);
    assert_eq!(session.sink().bullets[0].bullet, "mg");
    assert!(session.sink().heard("machine_gun"));
    assert!(!session.sink().muzzle_flashes.is_empty());
    let a = session.world().actors.by_uid(actor).unwrap();
    assert_eq!(a.ammo[0], 58, "two rounds spent");
    println!("✓ two shots fired, 58 rounds left");

    // Dry-fire: with the magazine empty the gun clicks instead.
    run_idle(&mut session, 8);
    session
        .world_mut()
        .actors
        .by_uid_mut(actor)
        .unwrap()
        .ammo[0] = 0;
    session.sink_mut().clear();
    session.tick(&[(player, Cmd::BUTTON1)]).expect("dry fire");
    assert!(session.sink().bullets.is_empty());
    assert!(session.sink().heard("click"));
    println!("✓ empty gun clicks");

    // ================================================================
    // PHASE 4: Rescue
    // ================================================================
    let prisoner = session
        .spawn_character(
            CIVILIAN,
            tile_center(6, 3),
            ActorFlags::PRISONER,
            Some(ObjectiveId(0)),
        )
        .expect("prisoner spawns");
    session.sink_mut().clear();
    for _ in 0..80 {
        session.tick(&[(player, Cmd::RIGHT)]).expect("approach tick");
    }
    let freed = session.world().actors.by_uid(prisoner).unwrap();
    assert!(!freed.flags.contains(ActorFlags::PRISONER));
    assert!(session.sink().heard("rescue"));
    assert_eq!(session.world().objective_count(ObjectiveId(0)), 1);
    println!("✓ prisoner freed, objective advanced");

    // ================================================================
    // PHASE 5: Death and respawn
    // ================================================================
    session.sink_mut().clear();
    session.push_event(EventKind::ActorHit {
        uid: actor,
        player: Some(player),
        hitter_player: None,
        special: None,
        power: 999,
        vel: Vec2::ZERO,
    });
    session.process_events().expect("hit applies");
    assert!(session.sink().heard("scream"));
    assert!(!session.world().actors.by_uid(actor).unwrap().is_alive());

    // The death animation runs its course, then the server respawns the
    // player on a remaining life.
    run_idle(&mut session, 12);
    let p = session.world().players.get(player).unwrap();
    assert_eq!(p.lives, 1);
    let respawned = p.actor.expect("respawned actor");
    assert_ne!(respawned, actor, "uids are never recycled");
    let a = session.world().actors.by_uid(respawned).unwrap();
    assert_eq!(a.health, 60);
    // The corpse dropped ammo for the gun the player still uses.
    assert!(
        session
            .sink()
            .pickups
            .iter()
            .any(|p| p.class == "ammo_bullets"),
        "death drops an ammo pickup"
    );
    println!("✓ died, dropped ammo, respawned with 1 life left");

    // Final death: no lives remain, the sink is told the player is out.
    session.sink_mut().clear();
    session.push_event(EventKind::ActorHit {
        uid: respawned,
        player: Some(player),
        hitter_player: None,
        special: None,
        power: 999,
        vel: Vec2::ZERO,
    });
    session.process_events().expect("hit applies");
    run_idle(&mut session, 12);
    let p = session.world().players.get(player).unwrap();
    assert_eq!(p.lives, 0);
    assert!(p.actor.is_none());
    assert!(session.sink().out_of_lives.contains(&player));
    println!("✓ out of lives\n");
}

#[test]
fn unknown_loadout_guns_are_rejected() {
    let mut session = session();
    let err = session.add_player(JONES, &["bfg9000"], 1).unwrap_err();
    assert!(err.to_string().contains("bfg9000"));
    assert!(session.world().players.is_empty());
}

#[test]
fn sliding_outruns_walking() {
    let mut session = session();
    let player = session.add_player(JONES, &["machine_gun"], 1).unwrap();
    let actor = session.spawn_player(player, tile_center(4, 8)).unwrap();

    let start = session.world().actors.by_uid(actor).unwrap().pos;
    session
        .tick(&[(player, Cmd::BUTTON2 | Cmd::RIGHT)])
        .expect("slide tick");
    let a = session.world().actors.by_uid(actor).unwrap();
    assert!(session.sink().heard("slide"));
    assert!(
        a.pos.x - start.x > FULL_SCALE,
        "slide impulse beats walking speed"
    );
    assert!(a.slide_lock > 0, "slide is rate limited");
}

#[test]
fn poison_ticks_down_health_on_its_cadence() {
    let mut session = session();
    let player = session.add_player(JONES, &["machine_gun"], 1).unwrap();
    let actor = session.spawn_player(player, tile_center(8, 8)).unwrap();

    session
        .world_mut()
        .actors
        .by_uid_mut(actor)
        .unwrap()
        .poisoned = 16;
    for _ in 0..16 {
        session.tick(&[]).expect("idle tick");
    }
    let a = session.world().actors.by_uid(actor).unwrap();
    assert_eq!(a.poisoned, 0);
    // Damage lands when the countdown crosses a multiple of 8.
    assert_eq!(a.health, 58);
}

#[test]
fn pvp_kill_is_credited_to_the_hitter() {
    let mut config = GameConfig::new();
    config.pvp = true;
    let mut session = Session::<RecordingSink>::builder(GridMap::walled(Vec2::new(16, 16)))
        .seed(11)
        .config(config)
        .build(RecordingSink::new());

    let p1 = session.add_player(JONES, &["machine_gun"], 1).unwrap();
    let p2 = session.add_player(JONES, &["machine_gun"], 1).unwrap();
    let victim = session.spawn_player(p1, tile_center(3, 3)).unwrap();
    session.spawn_player(p2, tile_center(10, 10)).unwrap();

    session.push_event(EventKind::ActorHit {
        uid: victim,
        player: Some(p1),
        hitter_player: Some(p2),
        special: None,
        power: 999,
        vel: Vec2::ZERO,
    });
    session.process_events().expect("hit applies");

    let killer = session.world().players.get(p2).unwrap();
    assert_eq!(killer.kills, 1);
    assert_eq!(killer.friendlies, 0);
}

#[test]
fn gun_switch_cycles_the_loadout() {
    let mut session = session();
    let player = session
        .add_player(JONES, &["machine_gun", "knife"], 1)
        .unwrap();
    let actor = session.spawn_player(player, tile_center(5, 5)).unwrap();

    assert_eq!(
        session.world().actors.by_uid(actor).unwrap().gun().gun,
        "machine_gun"
    );
    session.switch_gun(player).expect("switch request");
    session.tick(&[]).expect("tick applies the switch");
    let a = session.world().actors.by_uid(actor).unwrap();
    assert_eq!(a.gun().gun, "knife");
    assert!(session.sink().heard("switch"));
}

#[test]
fn commands_for_dead_or_missing_actors_are_ignored() {
    let mut session = session();
    let player = session.add_player(JONES, &["machine_gun"], 1).unwrap();
    // No actor spawned yet; commands fall through.
    session.tick(&[(player, Cmd::RIGHT)]).expect("tick");

    let bogus = session
        .tick(&[(PlayerId(42), Cmd::RIGHT)])
        .expect_err("unknown player is an error");
    assert!(bogus.to_string().contains("42"));

    // Stale uids in externally pushed events are skipped, not fatal.
    session.push_event(EventKind::ActorDie { uid: ActorId(999) });
    session.process_events().expect("stale uid is ignored");
}

#[test]
fn allies_standing_inside_each_other_are_pushed_apart() {
    let mut session = session();
    let player = session.add_player(JONES, &["machine_gun"], 1).unwrap();
    let actor = session.spawn_player(player, tile_center(8, 8)).unwrap();
    let ally = session
        .spawn_character(CIVILIAN, tile_center(12, 12), ActorFlags::GOOD_GUY, None)
        .unwrap();
    // Spawn placement keeps them apart; force the overlap directly, as a
    // knockback impulse could.
    let overlap = tile_center(8, 8) + Vec2::new(2 * FULL_SCALE, 0);
    session.world_mut().actors.by_uid_mut(ally).unwrap().pos = overlap;

    for _ in 0..TILE_HEIGHT {
        session.tick(&[]).expect("idle tick");
    }
    let a = session.world().actors.by_uid(actor).unwrap().real_pos();
    let b = session.world().actors.by_uid(ally).unwrap().real_pos();
    assert!(
        (a.x - b.x).abs() >= 14 || (a.y - b.y).abs() >= 10,
        "repel separated the overlapping allies: {a:?} vs {b:?}"
    );
}

#[test]
fn empty_loadout_falls_back_to_the_character_gun() {
    let mut session = session();
    let player = session.add_player(JONES, &[], 1).unwrap();
    let actor = session.spawn_player(player, tile_center(5, 5)).unwrap();

    let a = session.world().actors.by_uid(actor).unwrap();
    assert_eq!(a.guns.len(), 1);
    assert_eq!(a.gun().gun, "machine_gun");
    assert!(!a.can_switch_gun());

    // The first tick updates the weapon; it must find one to update.
    run_idle(&mut session, 3);
    assert!(session.world().actors.by_uid(actor).is_some());
}

#[test]
fn solo_respawn_lands_near_the_origin() {
    let mut session = session();
    let player = session.add_player(JONES, &["machine_gun"], 2).unwrap();
    let actor = session.spawn_player(player, tile_center(12, 12)).unwrap();

    session.push_event(EventKind::ActorHit {
        uid: actor,
        player: Some(player),
        hitter_player: None,
        special: None,
        power: 999,
        vel: Vec2::ZERO,
    });
    session.process_events().expect("hit applies");
    run_idle(&mut session, 12);

    // With no other player actor alive, the respawn searches outward
    // from the origin, not from the death site.
    let p = session.world().players.get(player).unwrap();
    assert_eq!(p.lives, 1);
    let respawned = p.actor.expect("player respawned");
    assert_ne!(respawned, actor);
    let tile = session
        .world()
        .actors
        .by_uid(respawned)
        .unwrap()
        .real_pos()
        .real_to_tile();
    assert!(
        tile.x <= 9 && tile.y <= 9,
        "respawn tile {tile:?} is not near the origin"
    );
}
