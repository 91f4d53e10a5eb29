//! Collision queries: actor-vs-wall and actor-vs-actor.
//!
//! Wall tests sample the map at points around the actor's footprint rather
//! than rasterizing it. The box test samples corners and edge midpoints;
//! the diamond test walks the footprint's diamond outline, which lets
//! actors slip around tile corners.

use crate::geo::{TILE_HEIGHT, TILE_WIDTH, Vec2};
use crate::env::MapOracle;
use crate::state::{Actor, ActorFlags, ActorId, EntityFlags};

/// Alignment used to decide whether two overlapping actors block each
/// other. Two actors on the same non-`None` team pass through each other
/// outside PVP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionTeam {
    /// Collides with everyone.
    #[default]
    None,
    Good,
    Bad,
}

/// Team of an actor for collision purposes.
///
/// Prisoners collide with everything so rescue bumps register, and PVP
/// makes everyone collide with everyone.
pub fn collision_team(actor: &Actor, pvp: bool) -> CollisionTeam {
    if actor.flags.contains(ActorFlags::PRISONER) || pvp {
        return CollisionTeam::None;
    }
    if actor.player.is_some() || actor.flags.contains(ActorFlags::GOOD_GUY) {
        CollisionTeam::Good
    } else {
        CollisionTeam::Bad
    }
}

fn same_team(a: CollisionTeam, b: CollisionTeam, pvp: bool) -> bool {
    a != CollisionTeam::None && a == b && !pvp
}

/// Axis-aligned overlap of two footprints centered on real positions.
pub fn rects_overlap(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    (pos_a.x - pos_b.x).abs() < (size_a.x + size_b.x) / 2
        && (pos_a.y - pos_b.y).abs() < (size_a.y + size_b.y) / 2
}

/// Whether a box footprint centered at `pos` (real coordinates) touches a
/// wall. Samples four corners and four edge midpoints.
pub fn is_collision_with_wall(map: &dyn MapOracle, pos: Vec2, size: Vec2) -> bool {
    let half = Vec2::new(size.x / 2, size.y / 2);
    let map_real = Vec2::new(map.size().x * TILE_WIDTH, map.size().y * TILE_HEIGHT);
    if pos.x - half.x < 0
        || pos.y - half.y < 0
        || pos.x + half.x >= map_real.x
        || pos.y + half.y >= map_real.y
    {
        return true;
    }
    map.hit_wall(Vec2::new(pos.x - half.x, pos.y - half.y))
        || map.hit_wall(Vec2::new(pos.x - half.x, pos.y))
        || map.hit_wall(Vec2::new(pos.x - half.x, pos.y + half.y))
        || map.hit_wall(Vec2::new(pos.x, pos.y + half.y))
        || map.hit_wall(Vec2::new(pos.x + half.x, pos.y + half.y))
        || map.hit_wall(Vec2::new(pos.x + half.x, pos.y))
        || map.hit_wall(Vec2::new(pos.x + half.x, pos.y - half.y))
        || map.hit_wall(Vec2::new(pos.x, pos.y - half.y))
}

/// Whether a diamond inscribed in the footprint touches a wall. The
/// diamond misses the box's corners, which is what allows corner slipping.
/// Only wider-than-tall footprints are supported.
pub fn is_collision_diamond(map: &dyn MapOracle, pos: Vec2, size: Vec2) -> bool {
    let half = Vec2::new(size.x / 2, size.y / 2);
    debug_assert!(half.x >= half.y, "tall collision not supported");
    let map_real = Vec2::new(map.size().x * TILE_WIDTH, map.size().y * TILE_HEIGHT);
    if pos.x - half.x < 0
        || pos.y - half.y < 0
        || pos.x + half.x >= map_real.x
        || pos.y + half.y >= map_real.y
    {
        return true;
    }
    let gradient = half.y as f64 / half.x as f64;
    for i in 0..half.x {
        let y = (i as f64 * gradient).round() as i32;
        // Walk all four edges of the diamond outline at once.
        if map.hit_wall(Vec2::new(pos.x + i, pos.y - half.y + y))
            || map.hit_wall(Vec2::new(pos.x + i, pos.y + half.y - y))
            || map.hit_wall(Vec2::new(pos.x - i, pos.y + half.y - y))
            || map.hit_wall(Vec2::new(pos.x - i, pos.y - half.y + y))
        {
            return true;
        }
    }
    false
}

/// First live, impassable actor overlapping a footprint at `pos` (real
/// coordinates), excluding `exclude` and same-team actors.
pub fn first_blocking_actor<'a>(
    actors: impl Iterator<Item = &'a Actor>,
    exclude: ActorId,
    pos: Vec2,
    size: Vec2,
    team: CollisionTeam,
    pvp: bool,
) -> Option<&'a Actor> {
    actors
        .filter(|a| a.uid != exclude)
        .filter(|a| a.entity_flags.contains(EntityFlags::IMPASSABLE))
        .filter(|a| !same_team(team, collision_team(a, pvp), pvp))
        .find(|a| rects_overlap(pos, size, a.real_pos(), a.size))
}

/// Constrain a full-coordinate move against walls.
///
/// The happy path returns `to` unchanged. On collision the move degrades
/// gracefully: diagonal moves retry each axis alone (recursively, so an
/// axis retry can itself corner-slip), and single-axis moves retry
/// diagonally using the diamond test, scaled horizontally because the
/// footprint is wider than tall. The position and arguments are in full
/// coordinates so sub-pixel movement is not flattened away.
pub fn constrained_move(map: &dyn MapOracle, from: Vec2, to: Vec2, size: Vec2) -> Vec2 {
    if !is_collision_with_wall(map, to.full_to_real(), size) {
        return to;
    }

    debug_assert!(size.x >= size.y, "tall collision not supported");
    let dv = to - from;

    if dv.x != 0 && dv.y != 0 {
        let x_vec = Vec2::new(to.x, from.y);
        if !is_collision_with_wall(map, x_vec.full_to_real(), size) {
            return x_vec;
        }
        let y_vec = Vec2::new(from.x, to.y);
        if !is_collision_with_wall(map, y_vec.full_to_real(), size) {
            return y_vec;
        }
        // Possibly stuck on a corner that clears the diamond but not the
        // box; retry each axis with the benefit of diamond slipping.
        let x_pos = constrained_move(map, from, x_vec, size);
        if x_pos != from {
            return x_pos;
        }
        let y_pos = constrained_move(map, from, y_vec, size);
        if y_pos != from {
            return y_pos;
        }
    }

    // dx/dy keep their full magnitude here; halving them would collapse
    // slow moves to zero and kill the slip entirely.
    if dv.x == 0 && dv.y != 0 {
        let x_scale = if size.x > size.y {
            (size.x as f64 / size.y as f64).ceil() as i32
        } else {
            1
        };
        let diag1 = from + Vec2::new(-dv.y * x_scale, dv.y);
        if !is_collision_diamond(map, diag1.full_to_real(), size) {
            return diag1;
        }
        let diag2 = from + Vec2::new(dv.y * x_scale, dv.y);
        if !is_collision_diamond(map, diag2.full_to_real(), size) {
            return diag2;
        }
    } else if dv.y == 0 && dv.x != 0 {
        let diag1 = from + Vec2::new(dv.x, -dv.x);
        if !is_collision_diamond(map, diag1.full_to_real(), size) {
            return diag1;
        }
        let diag2 = from + Vec2::new(dv.x, dv.x);
        if !is_collision_diamond(map, diag2.full_to_real(), size) {
            return diag2;
        }
    }

    from
}

// ============================================================
// Tests
// ============================================================
