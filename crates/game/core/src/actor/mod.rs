//! Actor operations: spawning, damage, weapons, and player commands.
//!
//! Operations that must replicate enqueue events rather than mutating
//! directly; immediate mutation is reserved for state the local process
//! owns (weapon timers, command bookkeeping).

mod movement;
mod placement;
mod update;

pub use placement::find_spawn_position;

use crate::Sim;
use crate::cmd::Cmd;
use crate::config::GameConfig;
use crate::error::SimError;
use crate::events::{ActorAdd, EventKind, EventQueue};
use crate::geo::Vec2;
use crate::state::{
    Actor, ActorFlags, ActorId, AiState, Animation, AnimationKind, GunState, SlotId, Weapon,
};

impl Sim<'_> {
    /// Spawn an actor from its catalog template.
    ///
    /// Players get their full loadout; NPCs get their character's sole
    /// gun. Starting ammo is a multiple of each class's pickup amount.
    /// The spawn position is adjusted by wall collision like any other
    /// move.
    pub fn actor_add(
        &mut self,
        add: &ActorAdd,
        events: &mut EventQueue,
    ) -> Result<SlotId, SimError> {
        if self.world.actors.by_uid(add.uid).is_some() {
            return Err(SimError::DuplicateActor(add.uid));
        }
        let character = self
            .env
            .catalog
            .character(add.char_id)
            .ok_or(SimError::UnknownCharacter(add.char_id))?;

        let mut actor = Actor::new(add.uid, Vec2::ZERO);
        actor.player = add.player;
        actor.char_id = Some(add.char_id);
        actor.health = add.health;
        actor.objective = add.objective;
        for i in 0..self.env.catalog.ammo_count() {
            let amount = self
                .env
                .catalog
                .ammo(crate::state::AmmoId(i as u32))
                .map(|a| a.amount * GameConfig::AMMO_STARTING_MULTIPLE)
                .unwrap_or(0);
            actor.ammo.push(amount);
        }
        if let Some(player_uid) = add.player {
            if let Some(player) = self.world.players.get_mut(player_uid) {
                for gun in &player.loadout {
                    actor.guns.push(Weapon::new(gun.clone()));
                }
                player.actor = Some(add.uid);
            }
        }
        if actor.guns.is_empty() {
            // An empty loadout falls back to the character's own gun so
            // every actor always has a selected weapon.
            let gun = self
                .env
                .catalog
                .gun(character.gun)
                .ok_or_else(|| SimError::UnknownGun(format!("{:?}", character.gun)))?;
            actor.guns.push(Weapon::new(gun.name.clone()));
        }
        actor.flags = ActorFlags::SLEEPING | character.flags | add.extra_flags;
        if actor.flags.contains(ActorFlags::AWAKE_ALWAYS) {
            actor.flags.remove(ActorFlags::SLEEPING);
        }
        if character.bot.is_some() {
            actor.ai = Some(AiState::Idle);
        }

        let slot = self.world.actors.insert(actor);
        if add.pos != Vec2::ZERO {
            self.try_move_actor(add.uid, add.pos, events);
        }
        if add.player.is_some() {
            let pos = self
                .world
                .actors
                .by_uid(add.uid)
                .map(|a| a.real_pos())
                .unwrap_or_default();
            self.sink.play_sound("spawn", pos, 0);
        }
        Ok(slot)
    }

    /// Remove an actor, clearing its player's live-actor link.
    pub fn actor_destroy(&mut self, uid: ActorId) {
        let Some(slot) = self.world.actors.slot_of(uid) else {
            return;
        };
        let actor = self.world.actors.remove(slot);
        if let Some(player_uid) = actor.player {
            if let Some(player) = self.world.players.get_mut(player_uid) {
                player.actor = None;
            }
        }
    }

    /// Restore health, clamped to the character's maximum.
    pub fn actor_heal(&mut self, uid: ActorId, amount: i32) {
        let max_health = self
            .world
            .actors
            .by_uid(uid)
            .and_then(|a| a.char_id)
            .and_then(|c| self.env.catalog.character(c))
            .map(|c| c.max_health)
            .unwrap_or(i32::MAX);
        if let Some(actor) = self.world.actors.by_uid_mut(uid) {
            actor.health = (actor.health + amount).min(max_health);
        }
    }

    /// Subtract health. Crossing into death resets the state counter so
    /// the death animation starts immediately, screams, and advances a
    /// kill objective if the victim was marked with one.
    pub fn injure_actor(&mut self, uid: ActorId, injury: i32, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        let last_health = actor.health;
        actor.health -= injury;
        if last_health > 0 && actor.health <= 0 {
            actor.state_counter = 0;
            let pos = actor.real_pos();
            let is_player = actor.player.is_some();
            let objective = actor.objective;
            self.sink.play_sound("scream", pos, 0);
            if is_player {
                self.sink.play_sound("hahaha", pos, 0);
            }
            if let Some(objective) = objective {
                events.push(EventKind::ObjectiveUpdate {
                    objective,
                    count: 1,
                });
            }
        }
    }

    /// Adjust carried ammo, clamped to `[0, max]` for the class.
    pub fn actor_add_ammo(&mut self, uid: ActorId, ammo_id: u32, amount: i32) {
        let max = self
            .env
            .catalog
            .ammo(crate::state::AmmoId(ammo_id))
            .map(|a| a.max)
            .unwrap_or(0);
        if let Some(actor) = self.world.actors.by_uid_mut(uid) {
            if let Some(ammo) = actor.ammo.get_mut(ammo_id as usize) {
                *ammo = (*ammo + amount).clamp(0, max);
            }
        }
    }

    /// Whether any of the actor's guns consume this ammo class.
    pub fn actor_uses_ammo(&self, uid: ActorId, ammo_id: u32) -> bool {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return false;
        };
        actor.guns.iter().any(|w| {
            self.env
                .catalog
                .gun_by_name(&w.gun)
                .and_then(|(_, def)| def.ammo)
                .map(|a| a.0 == ammo_id)
                .unwrap_or(false)
        })
    }

    /// Give the actor a gun, either appended (and selected) or replacing
    /// an existing slot. No-op if the actor already carries this gun.
    pub fn actor_replace_gun(
        &mut self,
        uid: ActorId,
        gun: &str,
        gun_index: usize,
    ) -> Result<(), SimError> {
        let (_, def) = self
            .env
            .catalog
            .gun_by_name(gun)
            .ok_or_else(|| SimError::UnknownGun(gun.to_string()))?;
        let switch_sound = def.switch_sound.clone();
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return Ok(());
        };
        if actor.guns.iter().any(|w| w.gun == gun) {
            return Ok(());
        }
        let weapon = Weapon::new(gun);
        if gun_index >= actor.guns.len() {
            debug_assert!(gun_index <= actor.guns.len(), "gun index would leave gap");
            actor.guns.push(weapon);
            actor.gun_index = actor.guns.len() - 1;
        } else {
            actor.guns[gun_index] = weapon;
        }
        let pos = actor.real_pos();
        if let Some(sound) = switch_sound {
            self.sink.play_sound(&sound, pos, 0);
        }
        Ok(())
    }

    /// Select a gun slot directly (applied from a switch event).
    pub fn actor_switch_gun(&mut self, uid: ActorId, gun_index: usize) {
        let switch_sound = self
            .world
            .actors
            .by_uid(uid)
            .and_then(|a| a.guns.get(gun_index))
            .and_then(|w| self.env.catalog.gun_by_name(&w.gun))
            .and_then(|(_, def)| def.switch_sound.clone());
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        if gun_index >= actor.guns.len() {
            return;
        }
        actor.gun_index = gun_index;
        let pos = actor.real_pos();
        if let Some(sound) = switch_sound {
            self.sink.play_sound(&sound, pos, 0);
        }
    }

    /// Request a cycle to the next carried gun.
    pub fn actor_try_switch_gun(&self, uid: ActorId, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        if !actor.can_switch_gun() {
            return;
        }
        events.push(EventKind::ActorSwitchGun {
            uid,
            gun_index: (actor.gun_index + 1) % actor.guns.len(),
        });
    }

    /// Whether the selected gun can fire right now (cooldown and ammo).
    pub fn actor_can_fire(&self, uid: ActorId) -> bool {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return false;
        };
        let gun = actor.gun();
        if !gun.can_fire() {
            return false;
        }
        if self.config.ammo {
            if let Some((_, def)) = self.env.catalog.gun_by_name(&gun.gun) {
                if let Some(ammo_id) = def.ammo {
                    return actor
                        .ammo
                        .get(ammo_id.0 as usize)
                        .map(|&a| a > 0)
                        .unwrap_or(false);
                }
            }
        }
        true
    }

    /// Fire (or click) the selected gun.
    ///
    /// Firing enqueues a `GunFire` event (bullets, flash, sound) and, for
    /// players, the matching ammo or score consumption. Out of ammo, an
    /// unlocked gun clicks instead, rate-limited by the click lock.
    pub fn shoot(&mut self, uid: ActorId, events: &mut EventQueue) {
        if !self.actor_can_fire(uid) {
            let ammo_on = self.config.ammo;
            let Some(actor) = self.world.actors.by_uid_mut(uid) else {
                return;
            };
            let pos = actor.real_pos();
            if !actor.gun().can_fire() || !ammo_on {
                return;
            }
            if actor.gun_mut().try_click() {
                self.sink.play_sound("click", pos, 0);
            }
            return;
        }

        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let gun_name = actor.gun().gun.clone();
        let Some((_, def)) = self.env.catalog.gun_by_name(&gun_name) else {
            return;
        };
        events.push(EventKind::GunFire {
            actor: uid,
            player: actor.player,
            gun: gun_name.clone(),
            pos: actor.pos,
            angle: actor.direction.radians(),
            flags: actor.flags,
            sound: true,
        });
        let player = actor.player;
        if let Some(actor) = self.world.actors.by_uid_mut(uid) {
            actor.gun_mut().on_fire(def);
        }
        if let Some(player) = player {
            if self.config.ammo {
                if let Some(ammo_id) = def.ammo {
                    events.push(EventKind::ActorUseAmmo {
                        uid,
                        player: Some(player),
                        ammo_id: ammo_id.0,
                        amount: 1,
                    });
                }
            } else if def.cost != 0 {
                // Classic rule: guns with a cost burn score instead.
                events.push(EventKind::Score {
                    player,
                    amount: -def.cost,
                });
            }
        }
    }

    /// Request a slide (dodge) in the command's direction. Rate-limited
    /// by the slide lock; petrified actors cannot slide, confused ones
    /// slide the wrong way.
    pub fn slide_actor(&mut self, uid: ActorId, cmd: Cmd, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        if actor.slide_lock > 0 || actor.petrified > 0 {
            return;
        }
        let cmd = if actor.confused > 0 { cmd.reversed() } else { cmd };
        let mut vel = Vec2::ZERO;
        if cmd.contains(Cmd::LEFT) {
            vel.x = -GameConfig::SLIDE_VEL_X;
        } else if cmd.contains(Cmd::RIGHT) {
            vel.x = GameConfig::SLIDE_VEL_X;
        }
        if cmd.contains(Cmd::UP) {
            vel.y = -GameConfig::SLIDE_VEL_Y;
        } else if cmd.contains(Cmd::DOWN) {
            vel.y = GameConfig::SLIDE_VEL_Y;
        }
        events.push(EventKind::ActorSlide { uid, vel });
        actor.slide_lock = GameConfig::SLIDE_LOCK;
    }

    /// Drive an actor with one tick's worth of input.
    ///
    /// Confusion reverses the command before anything looks at it. A live
    /// actor turns, shoots, and moves in that order; doing none of them
    /// drops it back to the idle animation. Button 2 with a direction
    /// slides; alone it toggles greedy pickup.
    pub fn command_actor(&mut self, uid: ActorId, cmd: Cmd, ticks: i32, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let cmd = if actor.confused > 0 { cmd.reversed() } else { cmd };

        if actor.health > 0 {
            let turned = self.try_change_direction(uid, cmd, events);
            let shot = self.try_shoot(uid, cmd, events);
            let moved = self.try_move_command(uid, cmd, shot, ticks, events);
            if !turned && !shot && !moved {
                let Some(actor) = self.world.actors.by_uid(uid) else {
                    return;
                };
                if actor.anim.kind != AnimationKind::Idle {
                    events.push(EventKind::ActorState {
                        uid,
                        state: AnimationKind::Idle,
                    });
                }
            }
        }

        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        actor.last_cmd = cmd;
        if cmd.contains(Cmd::BUTTON2) {
            if cmd.has_direction() {
                self.slide_actor(uid, cmd, events);
            } else {
                let Some(actor) = self.world.actors.by_uid_mut(uid) else {
                    return;
                };
                if !actor.pickup_all {
                    events.push(EventKind::ActorPickupAll {
                        uid,
                        pickup_all: true,
                    });
                }
                actor.pickup_all = true;
            }
        } else if actor.pickup_all {
            events.push(EventKind::ActorPickupAll {
                uid,
                pickup_all: false,
            });
            actor.pickup_all = false;
        }
    }

    /// Turn to face the command's direction. The turn applies
    /// immediately (it affects shooting this tick) and replicates via an
    /// event.
    fn try_change_direction(&mut self, uid: ActorId, cmd: Cmd, events: &mut EventQueue) -> bool {
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return false;
        };
        let will_turn = actor.petrified == 0 && cmd.has_direction();
        if let Some(dir) = cmd.direction() {
            if will_turn && dir != actor.direction {
                events.push(EventKind::ActorDir { uid, dir });
                actor.direction = dir;
            }
        }
        will_turn
    }

    /// Shoot if button 1 is held; otherwise let the gun return to ready.
    fn try_shoot(&mut self, uid: ActorId, cmd: Cmd, events: &mut EventQueue) -> bool {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return false;
        };
        let will_shoot = actor.petrified == 0 && cmd.contains(Cmd::BUTTON1);
        if will_shoot {
            self.shoot(uid, events);
        } else if actor.gun().state != GunState::Ready {
            events.push(EventKind::GunState {
                uid,
                state: GunState::Ready,
            });
        }
        will_shoot
    }

    /// Convert directional input into this tick's movement velocity, and
    /// keep the walk/idle animation in sync. Shooting stops movement for
    /// the tick.
    fn try_move_command(
        &mut self,
        uid: ActorId,
        cmd: Cmd,
        has_shot: bool,
        ticks: i32,
        events: &mut EventQueue,
    ) -> bool {
        let speed = self
            .world
            .actors
            .by_uid(uid)
            .and_then(|a| a.char_id)
            .and_then(|c| self.env.catalog.character(c))
            .map(|c| c.speed)
            .unwrap_or(0);
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return false;
        };
        let will_move = actor.petrified == 0 && cmd.has_direction() && !has_shot;
        actor.move_vel = Vec2::ZERO;
        if will_move {
            let amount = speed * ticks;
            if cmd.contains(Cmd::LEFT) {
                actor.move_vel.x -= amount;
            } else if cmd.contains(Cmd::RIGHT) {
                actor.move_vel.x += amount;
            }
            if cmd.contains(Cmd::UP) {
                actor.move_vel.y -= amount;
            } else if cmd.contains(Cmd::DOWN) {
                actor.move_vel.y += amount;
            }
            if actor.anim.kind != AnimationKind::Walking {
                events.push(EventKind::ActorState {
                    uid,
                    state: AnimationKind::Walking,
                });
            }
        } else if actor.anim.kind != AnimationKind::Idle {
            events.push(EventKind::ActorState {
                uid,
                state: AnimationKind::Idle,
            });
        }

        // Replicate position and velocity when inputs change, or after a
        // collision perturbed the position.
        if cmd != actor.last_cmd || actor.has_collided {
            events.push(EventKind::ActorMove {
                uid,
                pos: actor.pos,
                move_vel: actor.move_vel,
            });
        }
        will_move
    }

    /// Switch the animation state machine.
    pub fn actor_set_state(&mut self, uid: ActorId, state: AnimationKind) {
        if let Some(actor) = self.world.actors.by_uid_mut(uid) {
            if actor.anim.kind != state {
                actor.anim = Animation::of_kind(state);
            }
        }
    }

    /// Wake a sleeping bot and reset its AI state (used when hit).
    pub fn actor_set_ai_state(&mut self, uid: ActorId, state: AiState) {
        if let Some(actor) = self.world.actors.by_uid_mut(uid) {
            if actor.ai.is_some() {
                actor.ai = Some(state);
            }
        }
    }
}
