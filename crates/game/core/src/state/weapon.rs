//! A carried weapon instance: cooldowns plus a small firing state machine.

use crate::config::GameConfig;
use crate::env::GunDef;
use crate::events::{EventKind, EventQueue};
use crate::geo::{Direction, Vec2};

/// Ticks spent in each non-ready gun state before advancing.
const GUN_STATE_TICKS: i32 = 8;

/// Barrel animation state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GunState {
    #[default]
    Ready,
    Firing,
    Recoil,
}

/// Per-actor weapon slot. The gun class itself lives in the catalog; this
/// carries only the mutable timers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    /// Catalog name of the gun class.
    pub gun: String,
    pub state: GunState,
    /// Ticks until the gun can fire again.
    pub lock: i32,
    /// Ticks during which the firing sound is suppressed.
    pub sound_lock: i32,
    /// Ticks during which the out-of-ammo click is suppressed.
    pub click_lock: i32,
    /// Countdown for the current non-ready state.
    pub state_counter: i32,
}

impl Weapon {
    pub fn new(gun: impl Into<String>) -> Self {
        Self {
            gun: gun.into(),
            state: GunState::Ready,
            lock: 0,
            sound_lock: 0,
            click_lock: 0,
            state_counter: -1,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.lock <= 0
    }

    /// Advance timers by `ticks`.
    ///
    /// Emits a `GunReload` event at the moment the remaining lock crosses
    /// the class's reload lead, so the reload sound plays slightly before
    /// the gun is ready again. `pos` is in full coordinates.
    pub fn update(
        &mut self,
        ticks: i32,
        def: &GunDef,
        pos: Vec2,
        direction: Direction,
        events: &mut EventQueue,
    ) {
        if def.has_reload_sound()
            && self.lock > def.reload_lead
            && self.lock - ticks <= def.reload_lead
            && self.lock > 0
        {
            events.push(EventKind::GunReload {
                gun: self.gun.clone(),
                pos,
                direction,
            });
        }
        self.lock = (self.lock - ticks).max(0);
        if self.sound_lock > 0 {
            self.sound_lock = (self.sound_lock - ticks).max(0);
        }
        if self.click_lock > 0 {
            self.click_lock = (self.click_lock - ticks).max(0);
        }
        if self.state_counter >= 0 {
            self.state_counter = (self.state_counter - ticks).max(0);
            if self.state_counter == 0 {
                match self.state {
                    GunState::Firing => self.set_state(GunState::Recoil),
                    GunState::Recoil | GunState::Ready => self.set_state(GunState::Ready),
                }
            }
        }
    }

    /// Start the fire cooldown and barrel animation.
    pub fn on_fire(&mut self, def: &GunDef) {
        self.lock = def.lock;
        if self.sound_lock <= 0 {
            self.sound_lock = def.sound_lock;
        }
        self.set_state(GunState::Firing);
    }

    /// Arm the out-of-ammo click suppression; returns whether the click
    /// should sound this time.
    pub fn try_click(&mut self) -> bool {
        if self.click_lock > 0 {
            return false;
        }
        self.click_lock = GameConfig::SOUND_LOCK_WEAPON_CLICK;
        true
    }

    pub fn set_state(&mut self, state: GunState) {
        self.state = state;
        self.state_counter = match state {
            GunState::Ready => -1,
            GunState::Firing | GunState::Recoil => GUN_STATE_TICKS,
        };
    }

    /// Whether the reload sound is still pending for the current lock.
    pub fn is_reloading(&self, def: &GunDef) -> bool {
        def.has_reload_sound() && self.lock > def.reload_lead
    }
}

// ============================================================
// Tests
// ============================================================
