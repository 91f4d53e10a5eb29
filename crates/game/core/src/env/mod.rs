//! Traits describing read-only world data.
//!
//! Oracles expose static map geometry, catalog definitions, external
//! obstacle overlap queries, and deterministic randomness. The [`Env`]
//! aggregate bundles them so the simulation can reach everything it needs
//! without hard coupling to concrete implementations.
mod catalog;
mod map;
mod obstacle;
mod rng;

pub use catalog::{AmmoDef, BotProfile, BulletDef, CatalogOracle, CharacterDef, GunDef};
pub use map::{GridMap, MapOracle, TileFlags};
pub use obstacle::{NoObstacles, Obstacle, ObstacleOracle, PickupRef, TargetKind};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the read-only oracles required by the simulation.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub map: &'a dyn MapOracle,
    pub catalog: &'a dyn CatalogOracle,
    pub obstacles: &'a dyn ObstacleOracle,
    pub rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(
        map: &'a dyn MapOracle,
        catalog: &'a dyn CatalogOracle,
        obstacles: &'a dyn ObstacleOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            map,
            catalog,
            obstacles,
            rng,
        }
    }
}
