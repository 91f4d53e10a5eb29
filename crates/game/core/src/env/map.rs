//! Map oracle: static tile geometry consulted by collision resolution.

use bitflags::bitflags;

use crate::geo::Vec2;

bitflags! {
    /// Collision-relevant properties of a single tile.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        /// Solid wall; blocks all movement.
        const WALL = 0x01;
        /// Not walkable by actors (pits, water) but not a wall for bullets.
        const NO_WALK = 0x02;
    }
}

/// Static map oracle exposing immutable tile layout.
///
/// Positions outside the map must report [`TileFlags::WALL`] so the edge of
/// the world is solid without a separate bounds check at every call site.
pub trait MapOracle: Send + Sync {
    /// Map size in tiles.
    fn size(&self) -> Vec2;

    /// Flags of the tile at the given tile coordinate.
    fn tile(&self, tile: Vec2) -> TileFlags;

    /// Whether the tile under a real-coordinate point blocks actors.
    fn hit_wall(&self, real: Vec2) -> bool {
        if real.x < 0 || real.y < 0 {
            return true;
        }
        self.tile(real.real_to_tile())
            .intersects(TileFlags::WALL | TileFlags::NO_WALK)
    }
}

/// Rectangular map with uniform floor and an explicit wall set; the
/// smallest oracle that supports the collision tests.
#[derive(Clone, Debug, Default)]
pub struct GridMap {
    size: Vec2,
    walls: Vec<TileFlags>,
}

impl GridMap {
    /// An open floor of the given size (in tiles) ringed by walls.
    pub fn walled(size: Vec2) -> Self {
        let mut map = Self {
            size,
            walls: vec![TileFlags::empty(); (size.x * size.y) as usize],
        };
        for x in 0..size.x {
            map.set_tile(Vec2::new(x, 0), TileFlags::WALL);
            map.set_tile(Vec2::new(x, size.y - 1), TileFlags::WALL);
        }
        for y in 0..size.y {
            map.set_tile(Vec2::new(0, y), TileFlags::WALL);
            map.set_tile(Vec2::new(size.x - 1, y), TileFlags::WALL);
        }
        map
    }

    pub fn set_tile(&mut self, tile: Vec2, flags: TileFlags) {
        if tile.x >= 0 && tile.y >= 0 && tile.x < self.size.x && tile.y < self.size.y {
            self.walls[(tile.y * self.size.x + tile.x) as usize] = flags;
        }
    }
}

impl MapOracle for GridMap {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn tile(&self, tile: Vec2) -> TileFlags {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.size.x || tile.y >= self.size.y {
            return TileFlags::WALL;
        }
        self.walls[(tile.y * self.size.x + tile.x) as usize]
    }
}
