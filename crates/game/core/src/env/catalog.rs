//! Catalog oracles: immutable gun, bullet, ammo, and character definitions.
//!
//! Definitions are resolved by handle or by name (events carry names so
//! they stay meaningful across processes with differently-ordered
//! catalogs).

use crate::combat::SpecialDamage;
use crate::state::{ActorFlags, AmmoId, CharId, GunId};

/// Immutable description of a gun class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GunDef {
    pub name: String,
    /// Bullet class fired (and used for melee damage when `can_shoot` is
    /// false).
    pub bullet: Option<String>,
    /// False for melee-only weapons such as knives.
    pub can_shoot: bool,
    /// Ammo class consumed per shot; `None` for unlimited weapons.
    pub ammo: Option<AmmoId>,
    /// Score consumed per shot when ammo tracking is disabled.
    pub cost: i32,
    /// Ticks between shots.
    pub lock: i32,
    /// Remaining lock at which the reload sound/event fires; 0 disables.
    pub reload_lead: i32,
    pub sound: Option<String>,
    pub reload_sound: Option<String>,
    pub switch_sound: Option<String>,
    /// Minimum ticks between melee hit sounds from this gun.
    pub sound_lock: i32,
    /// Number of bullets per shot.
    pub spread_count: u32,
    /// Angle between bullets in a spread, radians.
    pub spread_width: f32,
    /// Constant aim offset, radians.
    pub angle_offset: f32,
    /// Maximum random angle perturbation per bullet, radians.
    pub recoil: f32,
    pub muzzle_flash: Option<String>,
}

impl GunDef {
    pub fn has_reload_sound(&self) -> bool {
        self.reload_lead > 0 && self.reload_sound.is_some()
    }
}

/// Immutable description of a bullet class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulletDef {
    pub name: String,
    /// Health removed on hit; 0 means status-effect only.
    pub power: i32,
    pub special: Option<SpecialDamage>,
    pub hit_sound_flesh: Option<String>,
    pub hit_sound_object: Option<String>,
}

/// Immutable description of an ammo class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmmoDef {
    pub name: String,
    /// Clamp ceiling for carried ammo of this class.
    pub max: i32,
    /// Rounds granted by one pickup.
    pub amount: i32,
}

/// Bot behavior profile attached to AI characters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotProfile {
    /// Zero means the character never shoots (unarmed civilians); such
    /// actors do not drop weapon pickups when they die.
    pub probability_to_shoot: u32,
}

/// Immutable character template for non-player actors (and the base
/// appearance/stats record for players).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDef {
    pub name: String,
    pub max_health: i32,
    /// Movement speed in full coordinates per tick.
    pub speed: i32,
    pub flags: ActorFlags,
    pub gun: GunId,
    pub bot: Option<BotProfile>,
}

/// Read-only catalog lookups for weapon, ammo, and character definitions.
pub trait CatalogOracle: Send + Sync {
    fn gun(&self, id: GunId) -> Option<&GunDef>;
    fn gun_by_name(&self, name: &str) -> Option<(GunId, &GunDef)>;
    fn bullet(&self, name: &str) -> Option<&BulletDef>;
    fn ammo(&self, id: AmmoId) -> Option<&AmmoDef>;
    fn ammo_count(&self) -> usize;
    fn character(&self, id: CharId) -> Option<&CharacterDef>;
}
