//! The event dispatcher: applies drained events to the world.
//!
//! Server and client both run this over the same stream, so handlers
//! must tolerate events that arrive for state that is already gone (a
//! heal for an actor that died in the same pass is a no-op, not an
//! error). Server-only consequences, like spawning bullets or dealing
//! melee damage, check [`crate::Authority`] so clients wait for the
//! authoritative events instead.

use crate::Sim;
use crate::combat;
use crate::config::GameConfig;
use crate::effects::HudNumber;
use crate::env::{TargetKind, compute_seed};
use crate::error::SimError;
use crate::events::{ActorAdd, BulletSpawn, EventKind, EventQueue};
use crate::geo::Vec2;
use crate::state::{ACTOR_HEIGHT, ACTOR_WIDTH, ActorFlags, ActorId};

/// Seed context base for per-bullet recoil rolls; must not collide with
/// the contexts used by actor updates.
const SEED_RECOIL: u32 = 32;

impl Sim<'_> {
    /// Run one drain pass over the queue, applying every due event.
    ///
    /// Follow-up events enqueued by handlers are applied before the pass
    /// ends. The first handler error is reported after the pass finishes;
    /// later events are still applied so the world does not desync over
    /// one bad payload.
    pub fn handle_events(&mut self, events: &mut EventQueue) -> Result<(), SimError> {
        let mut first_err = None;
        events.drain(|queue, kind| {
            if let Err(err) = self.handle_event(kind, queue) {
                first_err.get_or_insert(err);
            }
        });
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Apply a single event. Stale actor ids are silently skipped.
    pub fn handle_event(
        &mut self,
        kind: EventKind,
        events: &mut EventQueue,
    ) -> Result<(), SimError> {
        match kind {
            EventKind::Score { player, amount } => {
                if let Some(p) = self.world.players.get_mut(player) {
                    p.add_score(amount);
                    self.sink.hud_update(HudNumber::Score, player.0, amount);
                }
            }
            EventKind::SoundAt { sound, pos, is_hit } => {
                if !is_hit || self.config.hit_sounds {
                    self.sink.play_sound(&sound, pos, 0);
                }
            }
            EventKind::ActorAdd(add) => {
                // A client can receive a spawn it already applied locally.
                match self.actor_add(&add, events) {
                    Ok(_) | Err(SimError::DuplicateActor(_)) => {}
                    Err(err) => return Err(err),
                }
            }
            EventKind::ActorMove { uid, pos, move_vel } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.pos = pos;
                    actor.move_vel = move_vel;
                    self.on_move(uid, events);
                }
            }
            EventKind::ActorState { uid, state } => self.actor_set_state(uid, state),
            EventKind::ActorDir { uid, dir } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.direction = dir;
                }
            }
            EventKind::ActorSlide { uid, vel } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.vel = vel;
                    let pos = actor.real_pos();
                    if self.config.footsteps {
                        self.sink.play_sound("slide", pos, 0);
                    }
                }
            }
            EventKind::ActorImpulse { uid, vel, pos } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.vel = actor.vel + vel;
                    if !pos.is_zero() {
                        actor.pos = pos;
                    }
                }
            }
            EventKind::ActorSwitchGun { uid, gun_index } => self.actor_switch_gun(uid, gun_index),
            EventKind::ActorPickupAll { uid, pickup_all } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.pickup_all = pickup_all;
                }
            }
            EventKind::ActorReplaceGun {
                uid,
                gun,
                gun_index,
            } => self.actor_replace_gun(uid, &gun, gun_index)?,
            EventKind::ActorHeal {
                uid,
                player,
                amount,
                ..
            } => {
                let Some(actor) = self.world.actors.by_uid(uid) else {
                    return Ok(());
                };
                if !actor.is_alive() {
                    return Ok(());
                }
                let pos = actor.real_pos();
                self.actor_heal(uid, amount);
                self.sink.play_sound("health", pos, 0);
                if let Some(player) = player {
                    self.sink.hud_update(HudNumber::Health, player.0, amount);
                }
            }
            EventKind::ActorAddAmmo {
                uid,
                player,
                ammo_id,
                amount,
                ..
            } => {
                let alive = self
                    .world
                    .actors
                    .by_uid(uid)
                    .map(|a| a.is_alive())
                    .unwrap_or(false);
                if alive {
                    self.actor_add_ammo(uid, ammo_id, amount);
                    if let Some(player) = player {
                        self.sink.hud_update(HudNumber::Ammo, player.0, amount);
                    }
                }
            }
            EventKind::ActorUseAmmo {
                uid,
                player,
                ammo_id,
                amount,
            } => {
                let alive = self
                    .world
                    .actors
                    .by_uid(uid)
                    .map(|a| a.is_alive())
                    .unwrap_or(false);
                if alive {
                    self.actor_add_ammo(uid, ammo_id, -amount);
                    if let Some(player) = player {
                        self.sink.hud_update(HudNumber::Ammo, player.0, -amount);
                    }
                }
            }
            EventKind::ActorDie { uid } => self.handle_actor_die(uid, events),
            EventKind::ActorMelee {
                uid,
                bullet,
                target_kind,
                target_uid,
                hit,
            } => self.handle_actor_melee(uid, &bullet, target_kind, target_uid, hit, events)?,
            EventKind::ActorHit {
                uid,
                player,
                hitter_player,
                special,
                power,
                vel,
            } => {
                let Some(actor) = self.world.actors.by_uid_mut(uid) else {
                    return Ok(());
                };
                combat::take_hit(actor, special);
                if power > 0 {
                    let pos = actor.real_pos();
                    let was_alive = actor.is_alive();
                    self.injure_actor(uid, power, events);
                    if was_alive {
                        let world = &mut *self.world;
                        if let Some(victim) = world.actors.by_uid(uid) {
                            if !victim.is_alive() {
                                if let Some(pd) =
                                    hitter_player.and_then(|p| world.players.get_mut(p))
                                {
                                    combat::track_kills(pd, victim, self.config.pvp);
                                }
                            }
                        }
                    }
                    if let Some(player) = player {
                        self.sink.hud_update(HudNumber::Health, player.0, -power);
                    }
                    self.sink.add_blood(pos, power, vel);
                }
            }
            EventKind::GunFire {
                actor,
                player,
                gun,
                pos,
                angle,
                flags,
                sound,
            } => {
                let Some((_, def)) = self.env.catalog.gun_by_name(&gun) else {
                    return Err(SimError::UnknownGun(gun));
                };
                if self.authority.is_server() && def.can_shoot {
                    if let Some(bullet) = &def.bullet {
                        let spread_start = def.angle_offset
                            - def.spread_count.saturating_sub(1) as f32 * def.spread_width / 2.0;
                        for i in 0..def.spread_count {
                            let seed = compute_seed(
                                self.world.game_seed,
                                self.world.tick,
                                actor.0,
                                SEED_RECOIL + i,
                            );
                            let recoil = if def.recoil > 0.0 {
                                self.env.rng.unit_f32(seed) * def.recoil - def.recoil / 2.0
                            } else {
                                0.0
                            };
                            events.push(EventKind::AddBullet(BulletSpawn {
                                bullet: bullet.clone(),
                                pos,
                                angle: angle + spread_start + i as f32 * def.spread_width + recoil,
                                flags,
                                player,
                                actor,
                            }));
                        }
                    }
                }
                let real = pos.full_to_real();
                if let Some(flash) = &def.muzzle_flash {
                    self.sink.add_muzzle_flash(flash, real, angle);
                }
                if sound {
                    if let Some(fire_sound) = &def.sound {
                        self.sink.play_sound(fire_sound, real, 0);
                    }
                }
            }
            EventKind::GunReload { gun, pos, .. } => {
                let Some((_, def)) = self.env.catalog.gun_by_name(&gun) else {
                    return Err(SimError::UnknownGun(gun));
                };
                if let Some(sound) = &def.reload_sound {
                    self.sink.play_sound(
                        sound,
                        pos.full_to_real(),
                        GameConfig::RELOAD_DISTANCE_PLUS,
                    );
                }
            }
            EventKind::GunState { uid, state } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.gun_mut().set_state(state);
                }
            }
            EventKind::AddBullet(spawn) => self.sink.add_bullet(&spawn),
            EventKind::AddPickup(spawn) => {
                self.sink.play_sound("spawn_item", spawn.pos, 0);
                self.sink.add_pickup(&spawn);
            }
            EventKind::RemovePickup { uid, spawner } => self.sink.remove_pickup(uid, spawner),
            EventKind::RescueCharacter { uid } => {
                if let Some(actor) = self.world.actors.by_uid_mut(uid) {
                    actor.flags.remove(ActorFlags::PRISONER);
                    let pos = actor.real_pos();
                    self.sink.play_sound("rescue", pos, 0);
                }
            }
            EventKind::ObjectiveUpdate { objective, count } => {
                self.world.update_objective(objective, count);
                self.sink.hud_update(HudNumber::Objective, objective.0, count);
            }
            EventKind::ExploreTiles { runs } => {
                for run in &runs {
                    self.world.explore_run(run.tile, run.run);
                }
            }
        }
        Ok(())
    }

    /// Terminal death: lives accounting, respawn scheduling, removal.
    ///
    /// The respawn is enqueued as a fresh `ActorAdd`, so it is applied in
    /// the same drain pass and replicated to clients like any spawn.
    fn handle_actor_die(&mut self, uid: ActorId, events: &mut EventQueue) {
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return;
        };
        let pos = actor.pos;
        if let Some(player_uid) = actor.player {
            let mut respawn = None;
            if let Some(player) = self.world.players.get_mut(player_uid) {
                player.lives -= 1;
                debug_assert!(player.lives >= 0, "player lives went negative");
                if player.lives <= 0 {
                    self.sink.player_out_of_lives(player_uid);
                } else if self.authority.is_server() {
                    respawn = Some(player.char_id);
                }
            }
            if let Some(char_id) = respawn {
                let near = self.closest_player_actor_pos(uid, pos);
                let spawn = crate::actor::find_spawn_position(
                    self.env.map,
                    &self.world.actors,
                    near,
                    Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
                );
                let health = self
                    .env
                    .catalog
                    .character(char_id)
                    .map(|c| c.max_health)
                    .unwrap_or(1);
                events.push(EventKind::ActorAdd(ActorAdd {
                    uid: self.world.actors.next_uid(),
                    player: Some(player_uid),
                    char_id,
                    health,
                    pos: spawn,
                    extra_flags: ActorFlags::empty(),
                    objective: None,
                }));
            }
        }
        self.actor_destroy(uid);
    }

    /// Respawns land next to whichever player actor is still standing
    /// closest to the death site, or at the origin when no other player
    /// actor remains.
    fn closest_player_actor_pos(&self, dying: ActorId, pos: Vec2) -> Vec2 {
        let mut best: Option<(i64, Vec2)> = None;
        for player in self.world.players.iter() {
            let Some(actor_uid) = player.actor else {
                continue;
            };
            if actor_uid == dying {
                continue;
            }
            let Some(actor) = self.world.actors.by_uid(actor_uid) else {
                continue;
            };
            if !actor.is_alive() {
                continue;
            }
            let dx = (actor.pos.x - pos.x) as i64;
            let dy = (actor.pos.y - pos.y) as i64;
            let d2 = dx * dx + dy * dy;
            if best.map(|(b, _)| d2 < b).unwrap_or(true) {
                best = Some((d2, actor.pos));
            }
        }
        best.map(|(_, p)| p).unwrap_or(Vec2::ZERO)
    }

    /// Melee resolution. The `hit` flag only gates the hit sound (it is
    /// the sound lock); damage always applies on the server, routed
    /// through an `ActorHit` event for characters and straight to the
    /// sink for external objects.
    fn handle_actor_melee(
        &mut self,
        uid: ActorId,
        bullet: &str,
        target_kind: TargetKind,
        target_uid: u32,
        hit: bool,
        events: &mut EventQueue,
    ) -> Result<(), SimError> {
        let Some(def) = self.env.catalog.bullet(bullet) else {
            return Err(SimError::UnknownBullet(bullet.to_string()));
        };
        let Some(actor) = self.world.actors.by_uid(uid) else {
            return Ok(());
        };
        let hitter_flags = actor.flags;
        let hitter_player = actor.player;
        let own_pos = actor.real_pos();

        if hit && self.config.hit_sounds {
            let (sound, pos) = match target_kind {
                TargetKind::Character => (
                    def.hit_sound_flesh.as_deref(),
                    self.world
                        .actors
                        .by_uid(ActorId(target_uid))
                        .map(|t| t.real_pos())
                        .unwrap_or(own_pos),
                ),
                _ => (def.hit_sound_object.as_deref(), own_pos),
            };
            if let Some(sound) = sound {
                self.sink.play_sound(sound, pos, 0);
            }
        }

        if self.authority.is_server() {
            match target_kind {
                TargetKind::Character => {
                    if let Some(target) = self.world.actors.by_uid(ActorId(target_uid)) {
                        if combat::can_damage_actor(
                            hitter_flags,
                            hitter_player,
                            uid,
                            target,
                            def.special,
                            self.config,
                        ) {
                            events.push(EventKind::ActorHit {
                                uid: target.uid,
                                player: target.player,
                                hitter_player,
                                special: def.special,
                                power: def.power,
                                vel: Vec2::ZERO,
                            });
                        }
                    }
                }
                TargetKind::Object => self.sink.damage_object(target_uid, def.power),
                TargetKind::Pickup => {}
            }
        }
        Ok(())
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::effects::EffectSink;
    use crate::env::{
        AmmoDef, BulletDef, CatalogOracle, CharacterDef, Env, GridMap, GunDef, NoObstacles, PcgRng,
    };
    use crate::events::{PickupSpawn, TileRun};
    use crate::geo::{TILE_HEIGHT, TILE_WIDTH};
    use crate::state::{AmmoId, CharId, GunId, Player, PlayerId, World};
    use crate::{Authority, Sim};

    struct TestCatalog {
        gun: GunDef,
        bullet: BulletDef,
        ammo: AmmoDef,
        character: CharacterDef,
    }

    impl TestCatalog {
        fn new() -> Self {
            Self {
                gun: GunDef {
                    name: "blaster".into(),
                    bullet: Some("blaster_shot".into()),
                    can_shoot: true,
                    ammo: Some(AmmoId(0)),
                    cost: 1,
                    lock: 6,
                    reload_lead: 0,
                    sound: Some("blaster_fire".into()),
                    reload_sound: None,
                    switch_sound: None,
                    sound_lock: 20,
                    spread_count: 3,
                    spread_width: 0.1,
                    angle_offset: 0.0,
                    recoil: 0.0,
                    muzzle_flash: None,
                },
                bullet: BulletDef {
                    name: "blaster_shot".into(),
                    power: 5,
                    special: None,
                    hit_sound_flesh: Some("hit_flesh".into()),
                    hit_sound_object: Some("hit_hard".into()),
                },
                ammo: AmmoDef {
                    name: "cells".into(),
                    max: 300,
                    amount: 30,
                },
                character: CharacterDef {
                    name: "jones".into(),
                    max_health: 40,
                    speed: 256,
                    flags: ActorFlags::empty(),
                    gun: GunId(0),
                    bot: None,
                },
            }
        }
    }

    impl CatalogOracle for TestCatalog {
        fn gun(&self, id: GunId) -> Option<&GunDef> {
            (id.0 == 0).then_some(&self.gun)
        }
        fn gun_by_name(&self, name: &str) -> Option<(GunId, &GunDef)> {
            (name == self.gun.name).then(|| (GunId(0), &self.gun))
        }
        fn bullet(&self, name: &str) -> Option<&BulletDef> {
            (name == self.bullet.name).then_some(&self.bullet)
        }
        fn ammo(&self, id: AmmoId) -> Option<&AmmoDef> {
            (id.0 == 0).then_some(&self.ammo)
        }
        fn ammo_count(&self) -> usize {
            1
        }
        fn character(&self, id: CharId) -> Option<&CharacterDef> {
            (id.0 == 0).then_some(&self.character)
        }
    }

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<String>,
        bullets: Vec<BulletSpawn>,
        hud: Vec<(HudNumber, u32, i32)>,
        out_of_lives: Vec<PlayerId>,
    }

    impl EffectSink for Recorder {
        fn play_sound(&mut self, sound: &str, _pos: Vec2, _extra_distance: i32) {
            self.sounds.push(sound.to_string());
        }
        fn hud_update(&mut self, kind: HudNumber, target: u32, amount: i32) {
            self.hud.push((kind, target, amount));
        }
        fn add_bullet(&mut self, spawn: &BulletSpawn) {
            self.bullets.push(spawn.clone());
        }
        fn player_out_of_lives(&mut self, player: PlayerId) {
            self.out_of_lives.push(player);
        }
    }

    fn world() -> World {
        World::new(Vec2::new(12, 12), 7)
    }

    fn sim<'a>(
        world: &'a mut World,
        map: &'a GridMap,
        catalog: &'a TestCatalog,
        config: &'a GameConfig,
        sink: &'a mut Recorder,
    ) -> Sim<'a> {
        static OBSTACLES: NoObstacles = NoObstacles;
        static RNG: PcgRng = PcgRng;
        Sim::new(
            world,
            Env::new(map, catalog, &OBSTACLES, &RNG),
            config,
            Authority::Server,
            sink,
        )
    }

    fn tile_center_full(tx: i32, ty: i32) -> Vec2 {
        Vec2::new(
            tx * TILE_WIDTH + TILE_WIDTH / 2,
            ty * TILE_HEIGHT + TILE_HEIGHT / 2,
        )
        .real_to_full()
    }

    fn add_actor(sim: &mut Sim, events: &mut EventQueue, add: ActorAdd) {
        events.push(EventKind::ActorAdd(add));
        sim.handle_events(events).unwrap();
    }

    fn player_add(uid: u32, player: u32, tx: i32, ty: i32) -> ActorAdd {
        ActorAdd {
            uid: ActorId(uid),
            player: Some(PlayerId(player)),
            char_id: CharId(0),
            health: 40,
            pos: tile_center_full(tx, ty),
            extra_flags: ActorFlags::empty(),
            objective: None,
        }
    }

    fn npc_add(uid: u32, tx: i32, ty: i32) -> ActorAdd {
        ActorAdd {
            uid: ActorId(uid),
            player: None,
            char_id: CharId(0),
            health: 40,
            pos: tile_center_full(tx, ty),
            extra_flags: ActorFlags::empty(),
            objective: None,
        }
    }

    fn new_player(uid: u32) -> Player {
        let mut p = Player::new(PlayerId(uid), CharId(0));
        p.loadout.push("blaster".into());
        p
    }

    #[test]
    fn score_event_updates_player_and_hud() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        world.players.add(new_player(0));
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        events.push(EventKind::Score {
            player: PlayerId(0),
            amount: 50,
        });
        sim.handle_events(&mut events).unwrap();

        assert_eq!(world.players.get(PlayerId(0)).unwrap().score, 50);
        assert!(sink.hud.contains(&(HudNumber::Score, 0, 50)));
    }

    #[test]
    fn gun_fire_spawns_spread_and_plays_sound() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        events.push(EventKind::GunFire {
            actor: ActorId(1),
            player: None,
            gun: "blaster".into(),
            pos: tile_center_full(4, 4),
            angle: 0.0,
            flags: ActorFlags::empty(),
            sound: true,
        });
        sim.handle_events(&mut events).unwrap();

        // Three bullets, fanned around the aim angle. Recoil is zero so
        // the fan is exact.
        assert_eq!(sink.bullets.len(), 3);
        let angles: Vec<f32> = sink.bullets.iter().map(|b| b.angle).collect();
        assert!((angles[0] + 0.1).abs() < 1e-6);
        assert!(angles[1].abs() < 1e-6);
        assert!((angles[2] - 0.1).abs() < 1e-6);
        assert!(sink.sounds.contains(&"blaster_fire".to_string()));
    }

    #[test]
    fn melee_damages_target_through_hit_event() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        world.players.add(new_player(0));
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, player_add(1, 0, 2, 2));
        add_actor(&mut sim, &mut events, npc_add(2, 3, 2));

        events.push(EventKind::ActorMelee {
            uid: ActorId(1),
            bullet: "blaster_shot".into(),
            target_kind: TargetKind::Character,
            target_uid: 2,
            hit: true,
        });
        sim.handle_events(&mut events).unwrap();

        // The follow-up ActorHit applies in the same pass.
        assert_eq!(world.actors.by_uid(ActorId(2)).unwrap().health, 35);
        assert!(sink.sounds.contains(&"hit_flesh".to_string()));
    }

    #[test]
    fn melee_between_enemies_never_hurts_allies() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, npc_add(1, 2, 2));
        add_actor(&mut sim, &mut events, npc_add(2, 3, 2));

        events.push(EventKind::ActorMelee {
            uid: ActorId(1),
            bullet: "blaster_shot".into(),
            target_kind: TargetKind::Character,
            target_uid: 2,
            hit: false,
        });
        sim.handle_events(&mut events).unwrap();

        // Two bad guys cannot damage each other.
        assert_eq!(world.actors.by_uid(ActorId(2)).unwrap().health, 40);
    }

    #[test]
    fn actor_die_decrements_lives_and_respawns() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut p0 = new_player(0);
        p0.lives = 2;
        world.players.add(p0);
        world.players.add(new_player(1));
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, player_add(1, 0, 2, 2));
        add_actor(&mut sim, &mut events, player_add(2, 1, 8, 8));

        events.push(EventKind::ActorDie { uid: ActorId(1) });
        sim.handle_events(&mut events).unwrap();

        let p0 = world.players.get(PlayerId(0)).unwrap();
        assert_eq!(p0.lives, 1);
        // The respawn ActorAdd applied in the same pass: a fresh actor,
        // linked back to the player, at full health.
        let new_uid = p0.actor.unwrap();
        assert_ne!(new_uid, ActorId(1));
        assert!(world.actors.by_uid(ActorId(1)).is_none());
        assert_eq!(world.actors.by_uid(new_uid).unwrap().health, 40);
        assert!(sink.out_of_lives.is_empty());
    }

    #[test]
    fn actor_die_on_last_life_reports_out_of_lives() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        world.players.add(new_player(0));
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, player_add(1, 0, 2, 2));

        events.push(EventKind::ActorDie { uid: ActorId(1) });
        sim.handle_events(&mut events).unwrap();

        assert_eq!(sink.out_of_lives, vec![PlayerId(0)]);
        let p0 = world.players.get(PlayerId(0)).unwrap();
        assert_eq!(p0.lives, 0);
        assert!(p0.actor.is_none());
        assert_eq!(world.actors.live_count(), 0);
    }

    #[test]
    fn heal_ignores_the_dead_and_clamps_to_max() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, npc_add(1, 2, 2));
        add_actor(&mut sim, &mut events, npc_add(2, 4, 4));
        sim.world.actors.by_uid_mut(ActorId(1)).unwrap().health = 0;
        sim.world.actors.by_uid_mut(ActorId(2)).unwrap().health = 35;

        events.push(EventKind::ActorHeal {
            uid: ActorId(1),
            player: None,
            amount: 10,
            is_random_spawned: false,
        });
        events.push(EventKind::ActorHeal {
            uid: ActorId(2),
            player: None,
            amount: 10,
            is_random_spawned: false,
        });
        sim.handle_events(&mut events).unwrap();

        assert_eq!(world.actors.by_uid(ActorId(1)).unwrap().health, 0);
        assert_eq!(world.actors.by_uid(ActorId(2)).unwrap().health, 40);
    }

    #[test]
    fn use_ammo_consumes_and_updates_hud() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        world.players.add(new_player(0));
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, player_add(1, 0, 2, 2));
        // Starting ammo is twice the pickup amount.
        assert_eq!(sim.world.actors.by_uid(ActorId(1)).unwrap().ammo[0], 60);

        events.push(EventKind::ActorUseAmmo {
            uid: ActorId(1),
            player: Some(PlayerId(0)),
            ammo_id: 0,
            amount: 1,
        });
        sim.handle_events(&mut events).unwrap();

        assert_eq!(world.actors.by_uid(ActorId(1)).unwrap().ammo[0], 59);
        assert!(sink.hud.contains(&(HudNumber::Ammo, 0, -1)));
    }

    #[test]
    fn explore_tiles_marks_runs() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        events.push(EventKind::ExploreTiles {
            runs: vec![TileRun {
                tile: Vec2::new(1, 1),
                run: 3,
            }],
        });
        sim.handle_events(&mut events).unwrap();

        assert!(world.is_explored(Vec2::new(1, 1)));
        assert!(world.is_explored(Vec2::new(3, 1)));
        assert!(!world.is_explored(Vec2::new(4, 1)));
    }

    #[test]
    fn every_added_pickup_announces_itself() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        events.push(EventKind::AddPickup(PickupSpawn {
            uid: 0,
            class: "ammo_bullets".into(),
            pos: Vec2::new(40, 40),
            // Dropped by a death, not randomly spawned; the spawn sound
            // plays regardless.
            is_random_spawned: false,
            spawner: None,
        }));
        sim.handle_events(&mut events).unwrap();

        assert!(sink.sounds.contains(&"spawn_item".to_string()));
    }

    #[test]
    fn rescue_clears_prisoner_flag() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        let mut add = npc_add(1, 2, 2);
        add.extra_flags = ActorFlags::PRISONER;
        add_actor(&mut sim, &mut events, add);

        events.push(EventKind::RescueCharacter { uid: ActorId(1) });
        sim.handle_events(&mut events).unwrap();

        let actor = world.actors.by_uid(ActorId(1)).unwrap();
        assert!(!actor.flags.contains(ActorFlags::PRISONER));
        assert!(sink.sounds.contains(&"rescue".to_string()));
    }

    #[test]
    fn stale_actor_ids_are_skipped() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        events.push(EventKind::ActorDir {
            uid: ActorId(99),
            dir: crate::geo::Direction::Up,
        });
        events.push(EventKind::ActorDie { uid: ActorId(99) });
        sim.handle_events(&mut events).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn hit_event_credits_the_killer() {
        let map = GridMap::walled(Vec2::new(12, 12));
        let catalog = TestCatalog::new();
        let config = GameConfig::new();
        let mut world = world();
        world.players.add(new_player(0));
        let mut sink = Recorder::default();
        let mut events = EventQueue::new();

        let mut sim = sim(&mut world, &map, &catalog, &config, &mut sink);
        add_actor(&mut sim, &mut events, player_add(1, 0, 2, 2));
        add_actor(&mut sim, &mut events, npc_add(2, 4, 4));

        events.push(EventKind::ActorHit {
            uid: ActorId(2),
            player: None,
            hitter_player: Some(PlayerId(0)),
            special: None,
            power: 50,
            vel: Vec2::ZERO,
        });
        sim.handle_events(&mut events).unwrap();

        assert!(world.actors.by_uid(ActorId(2)).unwrap().health <= 0);
        assert_eq!(world.players.get(PlayerId(0)).unwrap().kills, 1);
    }
}
