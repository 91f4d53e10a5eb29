//! Actor animation state.
//!
//! An animation is a fixed-size list of sprite frame indices with a matching
//! per-frame duration list. A negative duration marks an unused slot. Random
//! animations alternate deterministically between frame 0 and a (seeded)
//! random other active frame, so clients replay the same frames as the
//! server given the same seed stream.

use crate::config::GameConfig;
use crate::env::RngOracle;

/// Sprite frame indices shared with the (external) renderer.
pub const FRAME_IDLE: i32 = 0;
pub const FRAME_IDLE_LEFT: i32 = 1;
pub const FRAME_IDLE_RIGHT: i32 = 2;
pub const FRAME_WALK_1: i32 = 3;
pub const FRAME_WALK_2: i32 = 4;
pub const FRAME_WALK_3: i32 = 5;
pub const FRAME_WALK_4: i32 = 6;

/// Duration sentinel marking an inactive frame slot.
const UNUSED: i32 = -1;

/// Discrete animation mode of an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    #[default]
    Idle,
    Walking,
}

/// A running animation instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub kind: AnimationKind,
    /// Index into `frames` / `ticks_per_frame`.
    frame: usize,
    frames: [i32; GameConfig::MAX_ANIMATION_FRAMES],
    ticks_per_frame: [i32; GameConfig::MAX_ANIMATION_FRAMES],
    frame_counter: i32,
    random_frames: bool,
    /// True for exactly the tick on which `frame` changed.
    new_frame: bool,
}

impl Animation {
    pub fn idle() -> Self {
        Self {
            kind: AnimationKind::Idle,
            frame: 0,
            frames: [FRAME_IDLE, FRAME_IDLE_LEFT, FRAME_IDLE_RIGHT, UNUSED],
            ticks_per_frame: [90, 60, 60, UNUSED],
            frame_counter: 0,
            random_frames: true,
            new_frame: false,
        }
    }

    pub fn walking() -> Self {
        Self {
            kind: AnimationKind::Walking,
            frame: 0,
            frames: [FRAME_WALK_1, FRAME_WALK_2, FRAME_WALK_3, FRAME_WALK_4],
            ticks_per_frame: [4, 4, 4, 4],
            frame_counter: 0,
            random_frames: false,
            new_frame: false,
        }
    }

    pub fn of_kind(kind: AnimationKind) -> Self {
        match kind {
            AnimationKind::Idle => Self::idle(),
            AnimationKind::Walking => Self::walking(),
        }
    }

    /// The sprite frame index currently shown.
    pub fn current_frame(&self) -> i32 {
        self.frames[self.frame]
    }

    pub fn is_new_frame(&self) -> bool {
        self.new_frame
    }

    /// Advances the animation by `ticks`.
    ///
    /// Sequential animations wrap back to the first frame past the last
    /// active slot. Random animations alternate between frame 0 and a
    /// random non-zero active frame.
    pub fn update(&mut self, ticks: i32, rng: &(impl RngOracle + ?Sized), seed: u64) {
        self.frame_counter += ticks;
        self.new_frame = false;
        if self.frame_counter <= self.ticks_per_frame[self.frame] {
            return;
        }
        self.frame_counter -= self.ticks_per_frame[self.frame];
        self.new_frame = true;
        if self.random_frames {
            if self.frame == 0 {
                // Pick a random non-first frame; reroll past unused slots.
                let mut roll = 0;
                loop {
                    let pick = 1 + (rng.next_u32(seed.wrapping_add(roll))
                        % (GameConfig::MAX_ANIMATION_FRAMES as u32 - 1))
                        as usize;
                    if self.ticks_per_frame[pick] >= 0 {
                        self.frame = pick;
                        break;
                    }
                    roll += 1;
                }
            } else {
                self.frame = 0;
            }
        } else {
            self.frame += 1;
            if self.frame >= GameConfig::MAX_ANIMATION_FRAMES
                || self.ticks_per_frame[self.frame] < 0
            {
                self.frame = 0;
            }
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::idle()
    }
}
