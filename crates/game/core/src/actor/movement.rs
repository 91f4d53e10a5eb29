//! Actor movement: wall constraint, entity collision, melee intent.

use crate::Sim;
use crate::collision::{
    collision_team, constrained_move, first_blocking_actor, is_collision_with_wall,
};
use crate::combat::can_hit_actor;
use crate::config::GameConfig;
use crate::env::TargetKind;
use crate::events::{EventKind, EventQueue};
use crate::geo::Vec2;
use crate::state::{ActorFlags, ActorId};

/// A thing blocking an actor's path.
enum Blocker {
    Actor(ActorId),
    Object { uid: u32, dangerous: bool },
}

impl Sim<'_> {
    /// Try to move an actor to `pos` (full coordinates).
    ///
    /// The move is first constrained against walls, then against other
    /// entities. Walking into a damageable entity with a melee weapon
    /// raises a melee intent instead of moving; otherwise blocked axes
    /// are dropped one at a time so the actor slides along whatever is
    /// in the way. Returns whether any movement happened.
    pub fn try_move_actor(&mut self, uid: ActorId, pos: Vec2, events: &mut EventQueue) -> bool {
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return false;
        };
        actor.has_collided = true;
        actor.can_pickup_special = false;

        let from = actor.pos;
        let size = actor.size;
        let flags = actor.flags;
        let health = actor.health;
        let player = actor.player;
        let team = collision_team(actor, self.config.pvp);

        let mut pos = constrained_move(self.env.map, from, pos, size);
        if pos == from {
            return false;
        }

        // Entity collision can deal melee damage, so only the actor's
        // owner resolves it; everyone else waits for the events.
        let is_local_player = player
            .and_then(|p| self.world.players.get(p))
            .map(|p| p.is_local)
            .unwrap_or(false);
        if (self.authority.is_server() && player.is_none()) || is_local_player {
            if let Some(blocker) = self.first_blocker(uid, pos.full_to_real(), size, team) {
                let gun_name = self
                    .world
                    .actors
                    .by_uid(uid)
                    .map(|a| a.gun().gun.clone())
                    .unwrap_or_default();
                let gun_def = self.env.catalog.gun_by_name(&gun_name).map(|(_, d)| d);
                let is_melee = gun_def.map(|d| !d.can_shoot).unwrap_or(false);
                let dangerous = matches!(blocker, Blocker::Object { dangerous: true, .. });

                if is_melee && health > 0 && !dangerous {
                    self.raise_melee(uid, flags, &blocker, events);
                    return false;
                }

                // Try each axis in isolation so we slide along entities
                // just like walls.
                let real_y = Vec2::new(from.x, pos.y).full_to_real();
                if self.first_blocker(uid, real_y, size, team).is_some() {
                    pos.y = from.y;
                }
                let real_x = Vec2::new(pos.x, from.y).full_to_real();
                if self.first_blocker(uid, real_x, size, team).is_some() {
                    pos.x = from.x;
                }
                if pos.x != from.x && pos.y != from.y {
                    // Corner-vs-corner: both single axes are viable;
                    // arbitrarily prefer x-only movement.
                    pos.y = from.y;
                }
                if pos == from || is_collision_with_wall(self.env.map, pos.full_to_real(), size) {
                    return false;
                }
            }
        }

        if let Some(actor) = self.world.actors.by_uid_mut(uid) {
            actor.pos = pos;
            actor.has_collided = false;
        }
        self.on_move(uid, events);
        true
    }

    /// First impassable entity (actor or external object) overlapping the
    /// footprint.
    fn first_blocker(
        &self,
        uid: ActorId,
        pos_real: Vec2,
        size: Vec2,
        team: crate::collision::CollisionTeam,
    ) -> Option<Blocker> {
        let live = self
            .world
            .actors
            .iter()
            .map(|(_, a)| a)
            .filter(|a| a.is_alive());
        if let Some(hit) =
            first_blocking_actor(live, uid, pos_real, size, team, self.config.pvp)
        {
            return Some(Blocker::Actor(hit.uid));
        }
        self.env
            .obstacles
            .first_impassable(pos_real, size, team)
            .map(|o| Blocker::Object {
                uid: o.uid,
                dangerous: o.dangerous,
            })
    }

    /// Enqueue a melee intent against whatever blocked us. The hit sound
    /// is suppressed while the gun's sound lock runs so held-direction
    /// walking doesn't machine-gun the clang.
    fn raise_melee(
        &mut self,
        uid: ActorId,
        flags: ActorFlags,
        blocker: &Blocker,
        events: &mut EventQueue,
    ) {
        let (target_kind, target_uid) = match *blocker {
            Blocker::Actor(target) => {
                let Some(other) = self.world.actors.by_uid(target) else {
                    return;
                };
                if !can_hit_actor(flags, uid, other) {
                    return;
                }
                (TargetKind::Character, target.0)
            }
            Blocker::Object { uid: ouid, .. } => (TargetKind::Object, ouid),
        };
        let Some(actor) = self.world.actors.by_uid_mut(uid) else {
            return;
        };
        let bullet = self
            .env
            .catalog
            .gun_by_name(&actor.gun().gun)
            .and_then(|(_, d)| d.bullet.clone());
        let Some(bullet) = bullet else {
            return;
        };
        let sound_lock_len = self
            .env
            .catalog
            .gun_by_name(&actor.gun().gun)
            .map(|(_, d)| d.sound_lock)
            .unwrap_or(0);
        let hit = actor.gun().sound_lock <= 0;
        if hit {
            actor.gun_mut().sound_lock += sound_lock_len;
        }
        events.push(EventKind::ActorMelee {
            uid,
            bullet,
            target_kind,
            target_uid,
            hit,
        });
    }

    /// Post-move checks: exploration, rescue, manual pickups.
    pub(crate) fn on_move(&mut self, uid: ActorId, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let is_player = actor.player.is_some();
        let tile = actor.real_pos().real_to_tile();
        if is_player && !self.world.is_explored(tile) {
            self.world.explore_run(tile, 1);
        }
        if is_player {
            self.check_rescue(uid, events);
        }
        self.check_manual_pickups(uid);
    }

    /// Free a nearby prisoner. The footprint is padded slightly so
    /// brushing past counts. The prisoner flag drops immediately; the
    /// event replicates the rescue.
    fn check_rescue(&mut self, uid: ActorId, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let pos = actor.real_pos();
        let size = actor.size
            + Vec2::new(GameConfig::RESCUE_CHECK_PAD, GameConfig::RESCUE_CHECK_PAD);
        let team = collision_team(actor, self.config.pvp);
        let live = self
            .world
            .actors
            .iter()
            .map(|(_, a)| a)
            .filter(|a| a.is_alive());
        let prisoner = first_blocking_actor(live, uid, pos, size, team, self.config.pvp)
            .filter(|a| a.flags.contains(ActorFlags::PRISONER))
            .map(|a| (a.uid, a.objective));
        if let Some((prisoner_uid, objective)) = prisoner {
            if let Some(other) = self.world.actors.by_uid_mut(prisoner_uid) {
                other.flags.remove(ActorFlags::PRISONER);
            }
            events.push(EventKind::RescueCharacter { uid: prisoner_uid });
            if let Some(objective) = objective {
                events.push(EventKind::ObjectiveUpdate {
                    objective,
                    count: 1,
                });
            }
        }
    }

    /// Note manual pickups underfoot so the HUD can prompt for them.
    pub(crate) fn check_manual_pickups(&mut self, uid: ActorId) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        if actor.player.is_none() {
            return;
        }
        let pos = actor.real_pos();
        let size = actor.size;
        let manual = self
            .env
            .obstacles
            .pickups_overlapping(pos, size)
            .into_iter()
            .any(|p| p.manual);
        if manual {
            if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                actor.chatter = "pick up".to_string();
                actor.chatter_counter = 2;
                actor.can_pickup_special = true;
            }
        }
    }

    /// Greedy pickup scan: hand every pickup underfoot to the pickup
    /// system. Only players collect.
    pub(crate) fn check_pickups(&mut self, uid: ActorId) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        if actor.player.is_none() {
            return;
        }
        let pos = actor.real_pos();
        let size = actor.size;
        let pickup_all = actor.pickup_all;
        for p in self.env.obstacles.pickups_overlapping(pos, size) {
            self.sink.try_pickup(uid, p.uid, pickup_all);
        }
    }
}
