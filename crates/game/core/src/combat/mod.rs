//! Damage rules: who can hit whom, and what a hit does.

mod damage;

pub use damage::{
    can_damage_actor, can_hit_actor, damage_actor, is_immune, is_invulnerable, take_hit,
    take_special_damage,
};
pub(crate) use damage::track_kills;

use strum::EnumIter;

/// Elemental damage carried by a bullet in addition to its power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialDamage {
    Flame,
    Poison,
    Petrify,
    Confuse,
}
