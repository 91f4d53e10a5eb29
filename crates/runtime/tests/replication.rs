//! Event stream transport: serialization round trips and client-side
//! application of a server's events.

use std::io::BufReader;

use sim_core::events::{ActorAdd, EventKind, GameEvent, TileRun};
use sim_core::env::GridMap;
use sim_core::geo::{TILE_HEIGHT, TILE_WIDTH, Vec2};
use sim_core::state::{ActorFlags, ActorId, CharId, PlayerId};
use sim_core::Authority;
use sim_runtime::{read_event_log, EventLog, RecordingSink, Session};

fn tile_center(tx: i32, ty: i32) -> Vec2 {
    Vec2::new(
        tx * TILE_WIDTH + TILE_WIDTH / 2,
        ty * TILE_HEIGHT + TILE_HEIGHT / 2,
    )
    .real_to_full()
}

fn sample_events() -> Vec<GameEvent> {
    vec![
        GameEvent::new(EventKind::Score {
            player: PlayerId(0),
            amount: 25,
        }),
        GameEvent::new(EventKind::ActorAdd(ActorAdd {
            uid: ActorId(3),
            player: None,
            char_id: CharId(1),
            health: 40,
            pos: tile_center(5, 5),
            extra_flags: ActorFlags::PRISONER,
            objective: None,
        })),
        GameEvent::delayed(
            EventKind::SoundAt {
                sound: "alarm".into(),
                pos: Vec2::new(80, 60),
                is_hit: false,
            },
            3,
        ),
        GameEvent::new(EventKind::ExploreTiles {
            runs: vec![
                TileRun {
                    tile: Vec2::new(2, 2),
                    run: 4,
                },
                TileRun {
                    tile: Vec2::new(2, 3),
                    run: 2,
                },
            ],
        }),
        GameEvent::new(EventKind::GunFire {
            actor: ActorId(1),
            player: Some(PlayerId(0)),
            gun: "shotgun".into(),
            pos: tile_center(4, 4),
            angle: 1.5,
            flags: ActorFlags::empty(),
            sound: true,
        }),
    ]
}

#[test]
fn events_survive_a_binary_round_trip() {
    let events = sample_events();
    let bytes = bincode::serialize(&events).expect("serialize");
    let back: Vec<GameEvent> = bincode::deserialize(&bytes).expect("deserialize");
    assert_eq!(events, back);
}

#[test]
fn event_log_round_trips_through_json_lines() {
    let mut log = EventLog::new(Vec::new());
    let events = sample_events();
    for event in &events {
        log.record(event).expect("record");
    }
    let buf = log.into_inner();
    assert_eq!(buf.iter().filter(|&&b| b == b'\n').count(), events.len());

    let back = read_event_log(BufReader::new(buf.as_slice())).expect("read back");
    assert_eq!(events, back);
}

#[test]
fn client_session_applies_replicated_spawns() {
    let mut client = Session::<RecordingSink>::builder(GridMap::walled(Vec2::new(16, 16)))
        .authority(Authority::Client)
        .build(RecordingSink::new());

    client.push_event(EventKind::ActorAdd(ActorAdd {
        uid: ActorId(0),
        player: None,
        char_id: CharId(1),
        health: 40,
        pos: tile_center(6, 6),
        extra_flags: ActorFlags::empty(),
        objective: None,
    }));
    client.process_events().expect("spawn applies");

    let actor = client.world().actors.by_uid(ActorId(0)).expect("replicated actor");
    assert_eq!(actor.health, 40);
    assert_eq!(actor.pos, tile_center(6, 6));

    // Replaying the same spawn (a duplicated packet) is harmless.
    client.push_event(EventKind::ActorAdd(ActorAdd {
        uid: ActorId(0),
        player: None,
        char_id: CharId(1),
        health: 40,
        pos: tile_center(6, 6),
        extra_flags: ActorFlags::empty(),
        objective: None,
    }));
    client.process_events().expect("duplicate spawn is ignored");
    assert_eq!(client.world().actors.live_count(), 1);
}

#[test]
fn clients_never_spawn_authoritative_bullets() {
    let mut client = Session::<RecordingSink>::builder(GridMap::walled(Vec2::new(16, 16)))
        .authority(Authority::Client)
        .build(RecordingSink::new());

    client.push_event(EventKind::GunFire {
        actor: ActorId(9),
        player: None,
        gun: "machine_gun".into(),
        pos: tile_center(4, 4),
        angle: 0.0,
        flags: ActorFlags::empty(),
        sound: true,
    });
    client.process_events().expect("fire applies");

    // The client renders the flash and sound but waits for the server's
    // AddBullet events instead of inventing bullets locally.
    assert!(client.sink().bullets.is_empty());
    assert!(client.sink().heard("machine_gun"));
    assert!(!client.sink().muzzle_flashes.is_empty());
}
