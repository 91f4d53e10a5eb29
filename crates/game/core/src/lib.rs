//! Deterministic actor simulation core for a top-down tile-based action
//! game.
//!
//! The crate models characters ("actors") on a tile map: movement with
//! wall sliding, weapons and ammo, status effects, deaths and respawns.
//! All shared-state mutation flows through a queue of [`events::GameEvent`]
//! values so a server and replicating clients can apply the same stream
//! and stay in lockstep. Read-only world data (map geometry, weapon
//! catalogs, external obstacle overlaps, randomness) is supplied through
//! the oracle traits in [`env`]; outbound effects (sounds, HUD numbers,
//! bullets, pickups) leave through [`effects::EffectSink`].
//!
//! # Coordinates
//!
//! Positions come in three granularities: tile coordinates, "real"
//! pixel coordinates, and "full" coordinates at 256 subunits per real
//! unit so sub-pixel velocities survive integration. See [`geo`].
//!
//! # Determinism
//!
//! The core performs no I/O and draws randomness only from the
//! [`env::RngOracle`], keyed by game seed, tick, and actor uid, so a
//! replay with the same inputs reproduces the same states.

pub mod actor;
pub mod cmd;
pub mod collision;
pub mod combat;
pub mod config;
pub mod effects;
pub mod env;
pub mod error;
pub mod events;
pub mod geo;
pub mod state;

pub use cmd::Cmd;
pub use config::GameConfig;
pub use effects::{EffectSink, HudNumber, NullSink};
pub use error::SimError;
pub use events::{EventKind, EventQueue, GameEvent};
pub use state::{Actor, ActorId, PlayerId, World};

use env::Env;

/// Whether this process is authoritative for the simulation.
///
/// Several operations only run on the server: spawning pickups, dealing
/// melee damage, respawning players. A client applies the resulting
/// events when they arrive instead of generating them locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Authority {
    #[default]
    Server,
    Client,
}

impl Authority {
    pub fn is_server(self) -> bool {
        self == Authority::Server
    }
}

/// One tick's working context: mutable world state plus the read-only
/// oracles and the effect sink.
///
/// All simulation entry points hang off this type; the event queue is
/// passed separately because handlers enqueue follow-up events while the
/// queue is being drained.
pub struct Sim<'a> {
    pub world: &'a mut World,
    pub env: Env<'a>,
    pub config: &'a GameConfig,
    pub authority: Authority,
    pub sink: &'a mut dyn EffectSink,
}

impl<'a> Sim<'a> {
    pub fn new(
        world: &'a mut World,
        env: Env<'a>,
        config: &'a GameConfig,
        authority: Authority,
        sink: &'a mut dyn EffectSink,
    ) -> Self {
        Self {
            world,
            env,
            config,
            authority,
            sink,
        }
    }
}
