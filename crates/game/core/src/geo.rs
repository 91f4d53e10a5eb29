//! Spatial primitives: fixed-point positions, tile sizes, facing directions.
//!
//! Two coordinate spaces exist. "Real" coordinates are pixel-level positions
//! used for collision footprints and sound placement. "Full" coordinates are
//! real coordinates scaled by 256 so that per-tick movement smaller than one
//! real unit is not lost to truncation. Collision always converts full to
//! real at the query boundary.

use core::f32::consts::PI;
use core::ops::{Add, Neg, Sub};

use strum::EnumIter;

/// Width of one map tile in real coordinates.
pub const TILE_WIDTH: i32 = 16;
/// Height of one map tile in real coordinates.
pub const TILE_HEIGHT: i32 = 12;

/// Scale factor between real and full coordinates.
pub const FULL_SCALE: i32 = 256;

/// Two-dimensional integer vector, used for both real and full coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    pub const fn scale(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Converts a full-coordinate vector to real coordinates.
    pub const fn full_to_real(self) -> Self {
        Self::new(self.x / FULL_SCALE, self.y / FULL_SCALE)
    }

    /// Converts a real-coordinate vector to full coordinates.
    pub const fn real_to_full(self) -> Self {
        Self::new(self.x * FULL_SCALE, self.y * FULL_SCALE)
    }

    /// Converts a real-coordinate position to the tile containing it.
    pub const fn real_to_tile(self) -> Self {
        Self::new(self.x / TILE_WIDTH, self.y / TILE_HEIGHT)
    }

    /// Scales this vector to the given length, preserving direction.
    ///
    /// Returns zero for the zero vector.
    pub fn with_length(self, length: i32) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let magnitude = ((self.x as f32).hypot(self.y as f32)).max(1.0);
        Self::new(
            ((self.x as f32) * length as f32 / magnitude) as i32,
            ((self.y as f32) * length as f32 / magnitude) as i32,
        )
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Eight-way facing direction.
///
/// Discriminant order matches the clockwise-from-up angle convention, so a
/// direction's angle in radians is `index * PI / 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    UpRight,
    Right,
    DownRight,
    #[default]
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::Up,
            1 => Self::UpRight,
            2 => Self::Right,
            3 => Self::DownRight,
            4 => Self::Down,
            5 => Self::DownLeft,
            6 => Self::Left,
            _ => Self::UpLeft,
        }
    }

    /// Facing angle in radians, clockwise from up.
    pub fn radians(self) -> f32 {
        self.index() as f32 * (PI / 4.0)
    }

    /// Nearest eight-way direction for an arbitrary angle.
    pub fn from_radians(radians: f32) -> Self {
        let step = PI / 4.0;
        let normalized = radians.rem_euclid(2.0 * PI);
        Self::from_index(((normalized + step / 2.0) / step) as usize)
    }

    /// Unit displacement for this direction (screen coordinates, y down).
    pub const fn delta(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0, -1),
            Self::UpRight => Vec2::new(1, -1),
            Self::Right => Vec2::new(1, 0),
            Self::DownRight => Vec2::new(1, 1),
            Self::Down => Vec2::new(0, 1),
            Self::DownLeft => Vec2::new(-1, 1),
            Self::Left => Vec2::new(-1, 0),
            Self::UpLeft => Vec2::new(-1, -1),
        }
    }

    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }
}

/// Moves `current` toward `target` by at most `max_step` radians, taking the
/// shorter rotational path. Angles wrap at ±π.
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let mut angle = current;
    if angle - target > PI {
        angle -= 2.0 * PI;
    }
    if angle - target < -PI {
        angle += 2.0 * PI;
    }
    let diff = angle - target;
    if diff < 0.0 {
        angle + max_step.min(-diff)
    } else {
        angle - max_step.min(diff)
    }
}
