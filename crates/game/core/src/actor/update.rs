//! Per-tick actor advancement.

use crate::Sim;
use crate::collision::collision_team;
use crate::config::{AllyCollision, GameConfig};
use crate::env::compute_seed;
use crate::events::{EventKind, EventQueue, PickupSpawn};
use crate::geo::{TILE_HEIGHT, TILE_WIDTH, Vec2, rotate_towards};
use crate::state::{ActorId, EntityFlags, anim::FRAME_WALK_1};

// Seed contexts, so independent rolls within one actor-tick differ.
const SEED_ANIM: u32 = 0;
const SEED_DROP_GUN: u32 = 1;
const SEED_DROP_INDEX: u32 = 2;
const SEED_DROP_OFFSET: u32 = 16;

impl Sim<'_> {
    /// Advance every live actor by `ticks`.
    ///
    /// Each actor integrates its position, then its state (weapon,
    /// statuses, animation). Actors whose death animation has finished
    /// are resolved on the server. Finally, allied actors left standing
    /// inside each other are pushed apart.
    pub fn update_all_actors(&mut self, ticks: i32, events: &mut EventQueue) {
        for slot in 0..self.world.actors.slot_count() {
            let Some(actor) = self.world.actors.get(crate::state::SlotId(slot)) else {
                continue;
            };
            let uid = actor.uid;
            self.actor_update_position(uid, ticks, events);
            self.update_actor_state(uid, ticks, events);

            let Some(actor) = self.world.actors.by_uid(uid) else {
                continue;
            };
            if actor.dead > GameConfig::DEATH_MAX {
                if self.authority.is_server() {
                    self.actor_die(uid, events);
                }
                continue;
            }
            if self.authority.is_server()
                && self.config.ally_collision == AllyCollision::Repel
            {
                self.repel_allies(uid, events);
            }
        }
    }

    /// Integrate movement and residual impulse velocity.
    fn actor_update_position(&mut self, uid: ActorId, ticks: i32, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        let mut new_pos = actor.pos + actor.move_vel;
        if !actor.vel.is_zero() {
            new_pos = new_pos + actor.vel.scale(ticks);
            // Impulses decay linearly to rest.
            for _ in 0..ticks {
                if actor.vel.x > 0 {
                    actor.vel.x = (actor.vel.x - GameConfig::VEL_DECAY_X).max(0);
                } else {
                    actor.vel.x = (actor.vel.x + GameConfig::VEL_DECAY_X).min(0);
                }
                if actor.vel.y > 0 {
                    actor.vel.y = (actor.vel.y - GameConfig::VEL_DECAY_Y).max(0);
                } else {
                    actor.vel.y = (actor.vel.y + GameConfig::VEL_DECAY_Y).min(0);
                }
            }
        }
        let moved = actor.pos != new_pos;
        if moved {
            self.try_move_actor(uid, new_pos, events);
        }
        self.check_manual_pickups(uid);
    }

    /// Advance weapon timers, status effects, death, facing, animation,
    /// and chatter for one actor.
    fn update_actor_state(&mut self, uid: ActorId, ticks: i32, events: &mut EventQueue) {
        // Weapon timers first; the reload event wants the current pos.
        let gun_ctx = self.world.actors.by_uid(uid).map(|a| {
            (a.gun().gun.clone(), a.pos, a.direction)
        });
        if let Some((gun_name, pos, direction)) = gun_ctx {
            if let Some((_, def)) = self.env.catalog.gun_by_name(&gun_name) {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.gun_mut().update(ticks, def, pos, direction, events);
                }
            }
        }

        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        if actor.pickup_all && self.authority.is_server() {
            self.check_pickups(uid);
        }

        // Status effects only tick while alive.
        let mut poison_injury = false;
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        if actor.health > 0 {
            actor.flamed = (actor.flamed - ticks).max(0);
            if actor.poisoned > 0 {
                // Poison damages on a fixed cadence of its countdown.
                if (actor.poisoned & 7) == 0 {
                    poison_injury = true;
                }
                actor.poisoned = (actor.poisoned - ticks).max(0);
            }
            actor.petrified = (actor.petrified - ticks).max(0);
            actor.confused = (actor.confused - ticks).max(0);
        }
        if poison_injury {
            self.injure_actor(uid, 1, events);
        }

        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        actor.slide_lock = (actor.slide_lock - ticks).max(0);
        actor.state_counter = (actor.state_counter - ticks).max(0);
        if actor.state_counter > 0 {
            return;
        }

        if actor.health <= 0 {
            // Step the death animation; the corpse no longer collides.
            actor.dead += 1;
            actor.move_vel = Vec2::ZERO;
            actor.state_counter = GameConfig::DEATH_STATE_TICKS;
            actor.entity_flags = EntityFlags::empty();
            return;
        }

        // Turn the drawn facing towards the logical facing a little at a
        // time, taking the shorter arc.
        actor.draw_radians = rotate_towards(
            actor.draw_radians,
            actor.direction.radians(),
            GameConfig::DRAW_RADIAN_SPEED * ticks as f32,
        );

        // Footsteps land on the first walk frame.
        let footstep = self.config.footsteps
            && actor.anim.current_frame() == FRAME_WALK_1
            && actor.anim.is_new_frame();
        let pos = actor.real_pos();
        if footstep {
            self.sink
                .play_sound("footstep", pos, GameConfig::FOOTSTEP_DISTANCE_PLUS);
        }

        let seed = compute_seed(self.world.game_seed, self.world.tick, uid.0, SEED_ANIM);
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        actor.anim.update(ticks, self.env.rng, seed);

        actor.chatter_counter = (actor.chatter_counter - ticks).max(0);
        if actor.chatter_counter == 0 && !actor.chatter.is_empty() {
            actor.chatter.clear();
        }
    }

    /// Push apart two allied actors standing inside each other. Both get
    /// symmetric impulses away from each other.
    fn repel_allies(&mut self, uid: ActorId, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let team = collision_team(actor, self.config.pvp);
        let pos = actor.pos;
        let real = actor.real_pos();
        let size = actor.size;
        let other = self
            .world
            .actors
            .iter()
            .map(|(_, a)| a)
            .filter(|a| a.uid != uid && a.is_alive())
            .filter(|a| a.entity_flags.contains(EntityFlags::IMPASSABLE))
            .filter(|a| collision_team(a, self.config.pvp) == team)
            .find(|a| {
                crate::collision::rects_overlap(real, size, a.real_pos(), a.size)
            })
            .map(|a| (a.uid, a.pos));
        let Some((other_uid, other_pos)) = other else {
            return;
        };
        let mut v = pos - other_pos;
        if v.is_zero() {
            v = Vec2::new(1, 0);
        }
        let v = v.with_length(GameConfig::REPEL_STRENGTH);
        events.push(EventKind::ActorImpulse { uid, vel: v, pos });
        events.push(EventKind::ActorImpulse {
            uid: other_uid,
            vel: -v,
            pos: other_pos,
        });
    }

    /// Server-side death resolution: spawn drops, then queue the final
    /// `ActorDie` for lives accounting and destruction.
    pub(crate) fn actor_die(&mut self, uid: ActorId, events: &mut EventQueue) {
        if self.config.ammo {
            self.drop_ammo_pickups(uid, events);
        }
        let seed = compute_seed(self.world.game_seed, self.world.tick, uid.0, SEED_DROP_GUN);
        if self
            .env
            .rng
            .percent(seed, GameConfig::DROP_GUN_CHANCE_PERCENT)
        {
            self.drop_gun_pickup(uid, events);
        }
        events.push(EventKind::ActorDie { uid });
    }

    /// Drop an ammo pickup for each of the dead actor's guns with a
    /// tracked ammo class that some player actually uses.
    fn drop_ammo_pickups(&mut self, uid: ActorId, events: &mut EventQueue) {
        if self.is_unarmed_bot(uid) {
            return;
        }
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let real = actor.real_pos();
        let guns: Vec<String> = actor.guns.iter().map(|w| w.gun.clone()).collect();
        for (i, gun_name) in guns.iter().enumerate() {
            let Some(ammo_id) = self
                .env
                .catalog
                .gun_by_name(gun_name)
                .and_then(|(_, d)| d.ammo)
            else {
                continue;
            };
            if !self.any_player_uses_ammo(ammo_id.0) {
                continue;
            }
            let Some(ammo) = self.env.catalog.ammo(ammo_id) else {
                continue;
            };
            // Jitter the drop so stacked pickups fan out.
            let sx = compute_seed(
                self.world.game_seed,
                self.world.tick,
                uid.0,
                SEED_DROP_OFFSET + i as u32 * 2,
            );
            let sy = compute_seed(
                self.world.game_seed,
                self.world.tick,
                uid.0,
                SEED_DROP_OFFSET + i as u32 * 2 + 1,
            );
            let offset = Vec2::new(
                self.env.rng.range(sx, -TILE_WIDTH, TILE_WIDTH) / 2,
                self.env.rng.range(sy, -TILE_HEIGHT, TILE_HEIGHT) / 2,
            );
            let pickup_uid = self.world.next_pickup_uid();
            events.push(EventKind::AddPickup(PickupSpawn {
                uid: pickup_uid,
                class: format!("ammo_{}", ammo.name),
                pos: real + offset,
                is_random_spawned: false,
                spawner: None,
            }));
        }
    }

    /// Drop one of the dead actor's guns, chosen at random.
    fn drop_gun_pickup(&mut self, uid: ActorId, events: &mut EventQueue) {
        if self.is_unarmed_bot(uid) {
            return;
        }
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        if actor.guns.is_empty() {
            return;
        }
        let seed = compute_seed(
            self.world.game_seed,
            self.world.tick,
            uid.0,
            SEED_DROP_INDEX,
        );
        let index = self.env.rng.range(seed, 0, actor.guns.len() as i32 - 1) as usize;
        let gun = actor.guns[index].gun.clone();
        let real = actor.real_pos();
        let pickup_uid = self.world.next_pickup_uid();
        events.push(EventKind::AddPickup(PickupSpawn {
            uid: pickup_uid,
            class: format!("gun_{gun}"),
            pos: real,
            is_random_spawned: false,
            spawner: None,
        }));
    }

    /// Bots that never shoot are unarmed civilians; no drops from them.
    fn is_unarmed_bot(&self, uid: ActorId) -> bool {
        self.world
            .actors
            .by_uid(uid)
            .and_then(|a| a.char_id)
            .and_then(|c| self.env.catalog.character(c))
            .and_then(|c| c.bot.as_ref())
            .map(|b| b.probability_to_shoot == 0)
            .unwrap_or(false)
    }

    /// Whether any player's live actor consumes this ammo class.
    fn any_player_uses_ammo(&self, ammo_id: u32) -> bool {
        let uids: Vec<ActorId> = self
            .world
            .players
            .iter()
            .filter_map(|p| p.actor)
            .collect();
        uids.iter().any(|&uid| self.actor_uses_ammo(uid, ammo_id))
    }
}
