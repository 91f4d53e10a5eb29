//! Effect sinks for hosts and tests, plus a JSON event log.

use std::io::{self, BufRead, Write};

use sim_core::effects::{EffectSink, HudNumber};
use sim_core::events::{BulletSpawn, GameEvent, PickupSpawn};
use sim_core::geo::Vec2;
use sim_core::state::{ActorId, PlayerId};

/// One positional sound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundCall {
    pub name: String,
    pub pos: Vec2,
    pub extra_distance: i32,
}

/// Sink that records every effect for later inspection. Used by tests and
/// by headless hosts that forward effects elsewhere.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sounds: Vec<SoundCall>,
    pub hud: Vec<(HudNumber, u32, i32)>,
    pub bullets: Vec<BulletSpawn>,
    pub muzzle_flashes: Vec<(String, Vec2, f32)>,
    pub pickups: Vec<PickupSpawn>,
    pub removed_pickups: Vec<u32>,
    pub pickup_requests: Vec<(ActorId, u32, bool)>,
    pub blood: Vec<(Vec2, i32)>,
    pub object_damage: Vec<(u32, i32)>,
    pub out_of_lives: Vec<PlayerId>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a sound with this name was recorded.
    pub fn heard(&self, name: &str) -> bool {
        self.sounds.iter().any(|s| s.name == name)
    }
}

impl EffectSink for RecordingSink {
    fn play_sound(&mut self, sound: &str, pos: Vec2, extra_distance: i32) {
        self.sounds.push(SoundCall {
            name: sound.to_string(),
            pos,
            extra_distance,
        });
    }

    fn hud_update(&mut self, kind: HudNumber, target: u32, amount: i32) {
        self.hud.push((kind, target, amount));
    }

    fn damage_object(&mut self, uid: u32, power: i32) {
        self.object_damage.push((uid, power));
    }

    fn add_bullet(&mut self, spawn: &BulletSpawn) {
        self.bullets.push(spawn.clone());
    }

    fn add_muzzle_flash(&mut self, class: &str, pos: Vec2, angle: f32) {
        self.muzzle_flashes.push((class.to_string(), pos, angle));
    }

    fn add_pickup(&mut self, spawn: &PickupSpawn) {
        self.pickups.push(spawn.clone());
    }

    fn remove_pickup(&mut self, uid: u32, _spawner: Option<u32>) {
        self.removed_pickups.push(uid);
    }

    fn try_pickup(&mut self, actor: ActorId, pickup: u32, pickup_all: bool) {
        self.pickup_requests.push((actor, pickup, pickup_all));
    }

    fn add_blood(&mut self, pos: Vec2, power: i32, _vel: Vec2) {
        self.blood.push((pos, power));
    }

    fn player_out_of_lives(&mut self, player: PlayerId) {
        self.out_of_lives.push(player);
    }
}

/// Line-delimited JSON log of game events.
///
/// Hosts building replication or replays write the authoritative event
/// stream here; [`read_event_log`] restores it.
pub struct EventLog<W: Write> {
    out: W,
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, event: &GameEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Read back a line-delimited JSON event log.
pub fn read_event_log(input: impl BufRead) -> io::Result<Vec<GameEvent>> {
    let mut events = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        events.push(serde_json::from_str(&line)?);
    }
    Ok(events)
}
