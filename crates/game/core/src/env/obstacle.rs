//! Obstacle oracle: non-actor entities that participate in collision.
//!
//! Map objects (crates, explosive barrels) and pickups live outside the
//! simulation core; this oracle exposes just enough of them for movement
//! blocking, melee target selection, and pickup scanning.

use crate::collision::CollisionTeam;
use crate::geo::Vec2;

/// Entity category used in collision and damage events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    Character,
    Object,
    Pickup,
}

/// A non-actor entity overlapping a queried footprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub uid: u32,
    pub kind: TargetKind,
    /// Real-coordinate center.
    pub pos: Vec2,
    /// Dangerous objects (armed barrels) are not valid melee targets.
    pub dangerous: bool,
}

/// A pickup overlapping a queried footprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickupRef {
    pub uid: u32,
    /// Manual pickups need an explicit command; greedy scans skip them.
    pub manual: bool,
}

/// Read-only overlap queries against external (non-actor) entities.
pub trait ObstacleOracle: Send + Sync {
    /// First impassable non-actor entity overlapping the footprint, honoring
    /// the collision-team exclusion (same non-`None` team never collides).
    fn first_impassable(
        &self,
        pos_real: Vec2,
        size: Vec2,
        team: CollisionTeam,
    ) -> Option<Obstacle>;

    /// All pickups overlapping the footprint.
    fn pickups_overlapping(&self, pos_real: Vec2, size: Vec2) -> Vec<PickupRef>;
}

/// Oracle for worlds without external objects or pickups.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl ObstacleOracle for NoObstacles {
    fn first_impassable(
        &self,
        _pos_real: Vec2,
        _size: Vec2,
        _team: CollisionTeam,
    ) -> Option<Obstacle> {
        None
    }

    fn pickups_overlapping(&self, _pos_real: Vec2, _size: Vec2) -> Vec<PickupRef> {
        Vec::new()
    }
}
