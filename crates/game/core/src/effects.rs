//! Outbound effect surface.
//!
//! The simulation core owns actors and players but not sound, rendering,
//! bullets, particles, or pickups. Everything it wants from those systems
//! goes through this sink so hosts can wire up a full game, a headless
//! server, or a recording harness for tests. All methods default to
//! no-ops; hosts override what they care about.

use crate::events::{BulletSpawn, PickupSpawn};
use crate::geo::Vec2;
use crate::state::{ActorId, PlayerId};

/// Which HUD counter a numeric update applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudNumber {
    Score,
    Health,
    Ammo,
    Objective,
}

/// Receiver for simulation side effects. Positions are real coordinates.
pub trait EffectSink {
    /// Positional sound. `extra_distance` widens the audible radius
    /// (footsteps and reloads carry further than their position implies).
    fn play_sound(&mut self, _sound: &str, _pos: Vec2, _extra_distance: i32) {}

    /// Numeric HUD update. `target` is a player uid, or the objective
    /// index for [`HudNumber::Objective`].
    fn hud_update(&mut self, _kind: HudNumber, _target: u32, _amount: i32) {}

    /// Melee damage against an external map object.
    fn damage_object(&mut self, _uid: u32, _power: i32) {}

    /// Forward a bullet to the projectile system.
    fn add_bullet(&mut self, _spawn: &BulletSpawn) {}

    /// Spawn a muzzle flash particle.
    fn add_muzzle_flash(&mut self, _class: &str, _pos: Vec2, _angle: f32) {}

    /// Forward a pickup spawn to the pickup system.
    fn add_pickup(&mut self, _spawn: &PickupSpawn) {}

    /// Remove a pickup; `spawner` is notified so it can respawn one.
    fn remove_pickup(&mut self, _uid: u32, _spawner: Option<u32>) {}

    /// An actor standing on a pickup wants to collect it. The pickup
    /// system resolves the class and enqueues the resulting events.
    fn try_pickup(&mut self, _actor: ActorId, _pickup: u32, _pickup_all: bool) {}

    /// Blood splatter particles for a damaging hit.
    fn add_blood(&mut self, _pos: Vec2, _power: i32, _vel: Vec2) {}

    /// An actor died with no lives left; the mission layer decides what
    /// that means (game over, spectate).
    fn player_out_of_lives(&mut self, _player: PlayerId) {}
}

/// Sink that drops every effect; useful for replay verification and tests
/// that only care about state.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EffectSink for NullSink {}
