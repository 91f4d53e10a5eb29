//! Spawn placement: find a clear spot near a preferred position.

use crate::collision::{CollisionTeam, first_blocking_actor, is_collision_with_wall};
use crate::env::MapOracle;
use crate::geo::{TILE_HEIGHT, TILE_WIDTH, Vec2};
use crate::state::{ActorArena, ActorId};

/// How far out (in tiles) the ring search is willing to go.
const PLACEMENT_MAX_RADIUS: i32 = 8;

/// Find a position near `preferred` (full coordinates) where a footprint
/// of `size` fits without touching walls or live actors.
///
/// Searches outward ring by ring in tile steps; if nothing within range
/// is free the preferred position is returned as-is and the spawn move
/// will sort itself out against the walls.
pub fn find_spawn_position(
    map: &dyn MapOracle,
    actors: &ActorArena,
    preferred: Vec2,
    size: Vec2,
) -> Vec2 {
    let fits = |candidate: Vec2| -> bool {
        let real = candidate.full_to_real();
        if is_collision_with_wall(map, real, size) {
            return false;
        }
        let live = actors.iter().map(|(_, a)| a).filter(|a| a.is_alive());
        // Spawns must not overlap anyone, friend or foe.
        first_blocking_actor(live, ActorId(u32::MAX), real, size, CollisionTeam::None, false)
            .is_none()
    };

    if fits(preferred) {
        return preferred;
    }
    for radius in 1..=PLACEMENT_MAX_RADIUS {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() != radius && dy.abs() != radius {
                    continue;
                }
                let candidate = preferred
                    + Vec2::new(dx * TILE_WIDTH, dy * TILE_HEIGHT).real_to_full();
                if fits(candidate) {
                    return candidate;
                }
            }
        }
    }
    preferred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridMap;
    use crate::state::{ACTOR_HEIGHT, ACTOR_WIDTH, Actor};

    fn size() -> Vec2 {
        Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT)
    }

    fn tile_center_full(tx: i32, ty: i32) -> Vec2 {
        Vec2::new(
            tx * TILE_WIDTH + TILE_WIDTH / 2,
            ty * TILE_HEIGHT + TILE_HEIGHT / 2,
        )
        .real_to_full()
    }

    #[test]
    fn free_preferred_position_is_kept() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let actors = ActorArena::new();
        let preferred = tile_center_full(6, 6);
        assert_eq!(find_spawn_position(&map, &actors, preferred, size()), preferred);
    }

    #[test]
    fn occupied_position_moves_to_a_neighbor() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let mut actors = ActorArena::new();
        let preferred = tile_center_full(6, 6);
        let mut squatter = Actor::new(ActorId(0), preferred);
        squatter.health = 10;
        actors.insert(squatter);

        let got = find_spawn_position(&map, &actors, preferred, size());
        assert_ne!(got, preferred);
        let real = got.full_to_real();
        assert!(!is_collision_with_wall(&map, real, size()));
    }
}
