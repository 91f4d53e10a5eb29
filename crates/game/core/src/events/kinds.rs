//! The closed set of game events.
//!
//! Every mutation of shared simulation state flows through one of these
//! variants so a server and its clients can apply an identical stream.
//! Payloads are plain value data only (ids, positions, names, enums) so
//! events stay serializable for network transport.

use crate::combat::SpecialDamage;
use crate::env::TargetKind;
use crate::geo::{Direction, Vec2};
use crate::state::{ActorFlags, ActorId, AnimationKind, CharId, GunState, ObjectiveId, PlayerId};

/// A queued mutation request.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameEvent {
    /// Remaining ticks before the event is due. Events are applied once
    /// the countdown passes below zero and are then discarded.
    pub delay: i32,
    pub kind: EventKind,
}

impl GameEvent {
    /// An event due on the next drain pass.
    pub fn new(kind: EventKind) -> Self {
        Self { delay: 0, kind }
    }

    pub fn delayed(kind: EventKind, delay: i32) -> Self {
        Self { delay, kind }
    }
}

/// Payload for actor creation, kept as a named struct because spawn logic
/// consumes it outside the dispatcher as well.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorAdd {
    pub uid: ActorId,
    pub player: Option<PlayerId>,
    pub char_id: CharId,
    pub health: i32,
    /// Spawn position in full coordinates.
    pub pos: Vec2,
    /// Extra flags beyond the character template's (objective marking).
    pub extra_flags: ActorFlags,
    pub objective: Option<ObjectiveId>,
}

/// Payload for bullet spawning, forwarded to the external bullet system.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulletSpawn {
    pub bullet: String,
    /// Muzzle position in full coordinates.
    pub pos: Vec2,
    pub angle: f32,
    pub flags: ActorFlags,
    pub player: Option<PlayerId>,
    pub actor: ActorId,
}

/// Payload for pickup spawning, forwarded to the external pickup system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupSpawn {
    pub uid: u32,
    pub class: String,
    /// Real coordinates.
    pub pos: Vec2,
    pub is_random_spawned: bool,
    pub spawner: Option<u32>,
}

/// A run of consecutive explored tiles in row-major order; a run may
/// continue past the right map edge onto the next row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRun {
    pub tile: Vec2,
    pub run: u32,
}

/// Every kind of game event, with its payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Score delta for a player (also the classic ammo currency).
    Score { player: PlayerId, amount: i32 },
    /// Positional sound request.
    SoundAt {
        sound: String,
        /// Real coordinates.
        pos: Vec2,
        /// Hit-confirmation sounds can be disabled by config.
        is_hit: bool,
    },
    ActorAdd(ActorAdd),
    /// Position + velocity snapshot; replaying it is idempotent.
    ActorMove {
        uid: ActorId,
        pos: Vec2,
        move_vel: Vec2,
    },
    ActorState {
        uid: ActorId,
        state: AnimationKind,
    },
    ActorDir {
        uid: ActorId,
        dir: Direction,
    },
    ActorSlide {
        uid: ActorId,
        vel: Vec2,
    },
    ActorImpulse {
        uid: ActorId,
        vel: Vec2,
        /// Position resync snapshot; zero means "keep current".
        pos: Vec2,
    },
    ActorSwitchGun {
        uid: ActorId,
        gun_index: usize,
    },
    ActorPickupAll {
        uid: ActorId,
        pickup_all: bool,
    },
    ActorReplaceGun {
        uid: ActorId,
        gun: String,
        gun_index: usize,
    },
    ActorHeal {
        uid: ActorId,
        player: Option<PlayerId>,
        amount: i32,
        is_random_spawned: bool,
    },
    ActorAddAmmo {
        uid: ActorId,
        player: Option<PlayerId>,
        ammo_id: u32,
        amount: i32,
        is_random_spawned: bool,
    },
    ActorUseAmmo {
        uid: ActorId,
        player: Option<PlayerId>,
        ammo_id: u32,
        amount: i32,
    },
    /// Terminal death: lives accounting, respawn, record destruction.
    ActorDie { uid: ActorId },
    /// Melee intent raised when movement was blocked by a damageable
    /// target.
    ActorMelee {
        uid: ActorId,
        bullet: String,
        target_kind: TargetKind,
        target_uid: u32,
        /// False when the hit sound is suppressed by the sound lock;
        /// damage applies either way.
        hit: bool,
    },
    /// Status-effect tag plus numeric power; zero power is status-only.
    ActorHit {
        uid: ActorId,
        /// Victim's player, for HUD updates.
        player: Option<PlayerId>,
        hitter_player: Option<PlayerId>,
        special: Option<SpecialDamage>,
        power: i32,
        /// Hit direction for blood splatter.
        vel: Vec2,
    },
    GunFire {
        actor: ActorId,
        player: Option<PlayerId>,
        gun: String,
        /// Muzzle position in full coordinates.
        pos: Vec2,
        angle: f32,
        flags: ActorFlags,
        sound: bool,
    },
    GunReload {
        gun: String,
        /// Full coordinates.
        pos: Vec2,
        direction: Direction,
    },
    GunState {
        uid: ActorId,
        state: GunState,
    },
    AddBullet(BulletSpawn),
    AddPickup(PickupSpawn),
    RemovePickup {
        uid: u32,
        spawner: Option<u32>,
    },
    RescueCharacter { uid: ActorId },
    ObjectiveUpdate {
        objective: ObjectiveId,
        count: i32,
    },
    ExploreTiles { runs: Vec<TileRun> },
}
