//! Per-entity simulation state.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::anim::Animation;
use super::weapon::Weapon;
use super::{ActorId, CharId, ObjectiveId, PlayerId};
use crate::cmd::Cmd;
use crate::config::GameConfig;
use crate::geo::{Direction, Vec2};

/// Actor footprint in real coordinates. Width must stay >= height; the
/// corner-slip collision path only supports wide/flat footprints.
pub const ACTOR_WIDTH: i32 = 14;
pub const ACTOR_HEIGHT: i32 = 10;

bitflags! {
    /// Gameplay capability and allegiance flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorFlags: u32 {
        /// Cannot be damaged at all.
        const INVULNERABLE = 0x0001;
        /// Allied with players for friendly-fire and collision purposes.
        const GOOD_GUY = 0x0002;
        /// Rescuable; collides with everything until rescued.
        const PRISONER = 0x0004;
        /// Drawn translucent; purely presentational here.
        const SEETHROUGH = 0x0008;
        /// AI has not noticed the player yet; cleared by taking a hit.
        const SLEEPING = 0x0010;
        /// Never spawns asleep.
        const AWAKE_ALWAYS = 0x0020;
        /// Immune to flame.
        const ASBESTOS = 0x0040;
        /// Immune to poison and confusion.
        const IMMUNITY = 0x0080;
        /// Damage from this actor ignores invulnerability shields.
        const HURT_ALWAYS = 0x0100;
        /// Always vulnerable, even to same-side damage.
        const VICTIM = 0x0200;
        /// Killing this actor counts as a friendly kill.
        const PENALTY = 0x0400;
    }
}

bitflags! {
    /// Spatial-index flags; the entity equivalent of tile flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityFlags: u8 {
        /// Blocks movement of other entities.
        const IMPASSABLE = 0x01;
        /// Valid target for bullets and melee.
        const CAN_BE_SHOT = 0x02;
    }
}

/// Minimal AI bookkeeping carried by bot-controlled actors. Decision
/// making lives outside the core; the simulation only tracks enough to
/// wake sleepers and surface chatter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiState {
    #[default]
    None,
    Idle,
}

/// A live entity instance.
#[derive(Clone, Debug)]
pub struct Actor {
    /// Process-lifetime unique id; never recycled.
    pub uid: ActorId,
    /// Owning player, if player-controlled.
    pub player: Option<PlayerId>,
    /// Character template for non-player actors.
    pub char_id: Option<CharId>,

    /// Position in full (sub-tile fixed-point) coordinates.
    pub pos: Vec2,
    /// Per-tick displacement intent in full coordinates.
    pub move_vel: Vec2,
    /// Residual impulse velocity; decays toward zero each tick.
    pub vel: Vec2,
    /// Collision footprint in real coordinates.
    pub size: Vec2,

    pub direction: Direction,
    /// Interpolated draw angle, chasing `direction`.
    pub draw_radians: f32,
    pub anim: Animation,

    pub guns: ArrayVec<Weapon, { GameConfig::MAX_GUNS }>,
    pub gun_index: usize,
    /// Carried rounds per ammo class, indexed by `AmmoId`.
    pub ammo: Vec<i32>,

    pub health: i32,
    /// 0 = alive; 1..=DEATH_MAX death animation step; beyond = removable.
    pub dead: u32,

    // Status timers, in ticks remaining.
    pub flamed: i32,
    pub poisoned: i32,
    pub petrified: i32,
    pub confused: i32,

    /// Generic pacing counter; gates death-animation steps.
    pub state_counter: i32,
    pub slide_lock: i32,

    pub chatter: String,
    pub chatter_counter: i32,

    pub flags: ActorFlags,
    pub entity_flags: EntityFlags,
    /// Mission objective this actor counts toward, if any.
    pub objective: Option<ObjectiveId>,

    /// Greedily pick up overlapping items each tick.
    pub pickup_all: bool,
    /// Standing over a pickup that needs an explicit command.
    pub can_pickup_special: bool,
    /// Set while a move is being resolved; forces a resync move event when
    /// the move was blocked.
    pub has_collided: bool,
    pub last_cmd: Cmd,

    /// Present iff the actor is bot-controlled.
    pub ai: Option<AiState>,
}

impl Actor {
    /// Bare actor used as the starting point by spawn and by tests.
    pub fn new(uid: ActorId, pos: Vec2) -> Self {
        Self {
            uid,
            player: None,
            char_id: None,
            pos,
            move_vel: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
            direction: Direction::Down,
            draw_radians: Direction::Down.radians(),
            anim: Animation::idle(),
            guns: ArrayVec::new(),
            gun_index: 0,
            ammo: Vec::new(),
            health: 1,
            dead: 0,
            flamed: 0,
            poisoned: 0,
            petrified: 0,
            confused: 0,
            state_counter: 0,
            slide_lock: 0,
            chatter: String::new(),
            chatter_counter: 0,
            flags: ActorFlags::empty(),
            entity_flags: EntityFlags::IMPASSABLE | EntityFlags::CAN_BE_SHOT,
            objective: None,
            pickup_all: false,
            can_pickup_special: false,
            has_collided: false,
            last_cmd: Cmd::empty(),
            ai: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Real-coordinate position.
    #[inline]
    pub fn real_pos(&self) -> Vec2 {
        self.pos.full_to_real()
    }

    /// The currently selected weapon.
    pub fn gun(&self) -> &Weapon {
        &self.guns[self.gun_index]
    }

    pub fn gun_mut(&mut self) -> &mut Weapon {
        &mut self.guns[self.gun_index]
    }

    pub fn can_switch_gun(&self) -> bool {
        self.guns.len() > 1
    }
}
