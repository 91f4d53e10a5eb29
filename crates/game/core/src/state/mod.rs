//! Simulation state: identifiers, actors, players, and the world container.

pub mod actor;
pub mod anim;
pub mod arena;
pub mod player;
pub mod weapon;
pub mod world;

pub use actor::{ACTOR_HEIGHT, ACTOR_WIDTH, Actor, ActorFlags, AiState, EntityFlags};
pub use anim::{Animation, AnimationKind};
pub use arena::ActorArena;
pub use player::{Player, PlayerRegistry};
pub use weapon::{GunState, Weapon};
pub use world::World;

// ============================================================
// Identifiers
// ============================================================

/// Monotonic actor uid; never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

/// Index into the actor arena. Slots are recycled, so a `SlotId` is only
/// valid until the occupant is destroyed; durable references use
/// [`ActorId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

/// Index into the character catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharId(pub u16);

/// Index into the gun catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GunId(pub u32);

/// Index into the ammo catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoId(pub u32);

/// Index into the mission's objective list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveId(pub u32);
