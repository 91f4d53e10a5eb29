//! Hit eligibility, invulnerability, status application, kill accounting.

use super::SpecialDamage;
use crate::config::GameConfig;
use crate::state::{Actor, ActorFlags, ActorId, AiState, Player, PlayerId};

/// Status durations, in ticks.
const FLAMED_COUNT: i32 = 10;
const POISONED_COUNT: i32 = 8;
const MAX_POISONED_COUNT: i32 = 140;
const PETRIFIED_COUNT: i32 = 95;
const CONFUSED_COUNT: i32 = 700;

/// Whether a hit from `hitter_flags`/`hitter_uid` may touch this actor at
/// all. Actors never hit themselves unless the source hurts always.
pub fn can_hit_actor(hitter_flags: ActorFlags, hitter_uid: ActorId, target: &Actor) -> bool {
    if !hitter_flags.contains(ActorFlags::HURT_ALWAYS) && hitter_uid == target.uid {
        return false;
    }
    true
}

/// Immunity to a particular special damage. Dead actors are immune to
/// everything so overkill events are ignored.
pub fn is_immune(actor: &Actor, special: Option<SpecialDamage>) -> bool {
    match special {
        Some(SpecialDamage::Flame) if actor.flags.contains(ActorFlags::ASBESTOS) => return true,
        Some(SpecialDamage::Poison) | Some(SpecialDamage::Confuse)
            if actor.flags.contains(ActorFlags::IMMUNITY) =>
        {
            return true;
        }
        _ => {}
    }
    actor.health <= 0
}

/// Alignment-based damage shield.
///
/// Beyond the explicit invulnerable flag: the same player never hurts
/// themself, good sides shield each other unless friendly fire or PVP is
/// on, and enemies never hurt each other. Hurt-always sources and victim
/// targets bypass all of that.
pub fn is_invulnerable(
    target: &Actor,
    hitter_flags: ActorFlags,
    hitter_player: Option<PlayerId>,
    config: &GameConfig,
) -> bool {
    if target.flags.contains(ActorFlags::INVULNERABLE) {
        return true;
    }
    if !hitter_flags.contains(ActorFlags::HURT_ALWAYS)
        && !target.flags.contains(ActorFlags::VICTIM)
    {
        if hitter_player.is_some() && hitter_player == target.player {
            return true;
        }
        let is_good = hitter_player.is_some() || hitter_flags.contains(ActorFlags::GOOD_GUY);
        let is_target_good =
            target.player.is_some() || target.flags.contains(ActorFlags::GOOD_GUY);
        if !config.pvp && !config.friendly_fire && is_good && is_target_good {
            return true;
        }
        if !is_good && !is_target_good {
            return true;
        }
    }
    false
}

/// Full damage eligibility: hit check, immunity, invulnerability.
pub fn can_damage_actor(
    hitter_flags: ActorFlags,
    hitter_player: Option<PlayerId>,
    hitter_uid: ActorId,
    target: &Actor,
    special: Option<SpecialDamage>,
    config: &GameConfig,
) -> bool {
    if !can_hit_actor(hitter_flags, hitter_uid, target) {
        return false;
    }
    if is_immune(target, special) {
        return false;
    }
    !is_invulnerable(target, hitter_flags, hitter_player, config)
}

/// Apply a status effect.
///
/// Flame and confusion restart their timers; poison accumulates up to a
/// cap; petrify only starts when not already petrified, so the first
/// petrifying hit wins.
pub fn take_special_damage(actor: &mut Actor, special: SpecialDamage) {
    match special {
        SpecialDamage::Flame => actor.flamed = FLAMED_COUNT,
        SpecialDamage::Poison => {
            if actor.poisoned < MAX_POISONED_COUNT {
                actor.poisoned += POISONED_COUNT;
            }
        }
        SpecialDamage::Petrify => {
            if actor.petrified == 0 {
                actor.petrified = PETRIFIED_COUNT;
            }
        }
        SpecialDamage::Confuse => actor.confused = CONFUSED_COUNT,
    }
}

/// React to an incoming hit: wake sleeping bots, then apply the status
/// effect unless immune. Immunity is re-checked here because several
/// overlapping damage events may land on the same tick.
pub fn take_hit(actor: &mut Actor, special: Option<SpecialDamage>) {
    if actor.ai.is_some() {
        actor.flags.remove(ActorFlags::SLEEPING);
        actor.ai = Some(AiState::None);
    }
    if is_immune(actor, special) {
        return;
    }
    if let Some(special) = special {
        take_special_damage(actor, special);
    }
}

/// Subtract health and, on a killing blow, credit the hitter's player.
/// Eligibility must already have passed [`can_damage_actor`].
pub fn damage_actor(victim: &mut Actor, power: i32, hitter: Option<&mut Player>, pvp: bool) {
    let starting_health = victim.health;
    victim.health -= power;
    if starting_health > 0 && victim.health <= 0 {
        if let Some(hitter) = hitter {
            track_kills(hitter, victim, pvp);
        }
    }
}

/// Kill attribution. Outside PVP any player or good/penalty victim counts
/// against the hitter as a friendly kill; own deaths count as suicides;
/// everything else as a kill.
pub(crate) fn track_kills(pd: &mut Player, victim: &Actor, pvp: bool) {
    let friendly = victim.player.is_some()
        || victim
            .flags
            .intersects(ActorFlags::GOOD_GUY | ActorFlags::PENALTY);
    if friendly && !pvp {
        pd.friendlies += 1;
    } else if victim.player == Some(pd.uid) {
        pd.suicides += 1;
    } else {
        pd.kills += 1;
    }
}

// ============================================================
// Tests
// ============================================================
