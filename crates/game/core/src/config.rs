//! Simulation configuration constants and tunable parameters.

/// How allied actors that collide with each other are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllyCollision {
    /// Allies block each other like any other impassable entity.
    Normal,
    /// Colliding allies receive symmetric repel impulses.
    #[default]
    Repel,
}

/// Game configuration; runtime-tunable rules the core consults each tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Whether good-aligned sides can damage each other outside PVP.
    pub friendly_fire: bool,
    /// Whether guns consume tracked ammo. When off, guns with a score cost
    /// consume score instead (the classic rule).
    pub ammo: bool,
    /// Whether walking actors emit footstep sounds.
    pub footsteps: bool,
    /// Whether hit-confirmation sounds play.
    pub hit_sounds: bool,
    /// Ally collision behavior.
    pub ally_collision: AllyCollision,
    /// Whether this session is a player-versus-player mode. Disables the
    /// good-side friendly-fire shield and friendly-kill accounting.
    pub pvp: bool,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum guns carried by one actor.
    pub const MAX_GUNS: usize = 3;
    /// Frame slots in one animation descriptor.
    pub const MAX_ANIMATION_FRAMES: usize = 4;

    // ===== simulation tuning constants =====
    /// Number of distinct death sprites; `dead` beyond this is terminal.
    pub const DEATH_MAX: u32 = 2;
    /// State-counter pause between death animation steps, in ticks.
    pub const DEATH_STATE_TICKS: i32 = 4;
    /// Extra hearing distance for footstep sounds.
    pub const FOOTSTEP_DISTANCE_PLUS: i32 = 380;
    /// Extra hearing distance for reload sounds.
    pub const RELOAD_DISTANCE_PLUS: i32 = 300;
    /// Magnitude of the ally repel impulse, in full coordinates.
    pub const REPEL_STRENGTH: i32 = 14;
    /// Ticks between slides.
    pub const SLIDE_LOCK: i32 = 50;
    /// Slide velocity per axis, in full coordinates.
    pub const SLIDE_VEL_X: i32 = crate::geo::TILE_WIDTH / 3 * crate::geo::FULL_SCALE;
    pub const SLIDE_VEL_Y: i32 = crate::geo::TILE_HEIGHT / 3 * crate::geo::FULL_SCALE;
    /// Residual impulse velocity decay per tick, in full coordinates.
    /// The y decay deliberately uses tile width as well.
    pub const VEL_DECAY_X: i32 = crate::geo::TILE_WIDTH * 2;
    pub const VEL_DECAY_Y: i32 = crate::geo::TILE_WIDTH * 2;
    /// Ticks between out-of-ammo click sounds.
    pub const SOUND_LOCK_WEAPON_CLICK: i32 = 20;
    /// Chance that a dying actor drops its gun, in percent.
    pub const DROP_GUN_CHANCE_PERCENT: u32 = 20;
    /// Draw-angle interpolation speed, radians per tick.
    pub const DRAW_RADIAN_SPEED: f32 = core::f32::consts::PI / 16.0;
    /// Starting ammo is this multiple of the ammo class's pickup amount.
    pub const AMMO_STARTING_MULTIPLE: i32 = 2;
    /// Padding around the footprint when checking for rescuable actors.
    pub const RESCUE_CHECK_PAD: i32 = 2;

    pub fn new() -> Self {
        Self {
            friendly_fire: false,
            ammo: true,
            footsteps: true,
            hit_sounds: true,
            ally_collision: AllyCollision::Repel,
            pvp: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
