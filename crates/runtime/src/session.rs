//! The session driver: owns the world, advances ticks, routes input.
//!
//! A session is one mission in flight. The server runs one with
//! [`Authority::Server`]; a replicating client runs the same type with
//! [`Authority::Client`] and feeds it the server's event stream through
//! [`Session::push_event`] instead of generating authoritative events
//! locally.

use tracing::{debug, info, trace, warn};

use sim_content::ContentCatalog;
use sim_core::cmd::Cmd;
use sim_core::config::GameConfig;
use sim_core::env::{CatalogOracle, Env, GridMap, MapOracle, NoObstacles, ObstacleOracle, PcgRng};
use sim_core::events::{ActorAdd, EventKind, EventQueue};
use sim_core::geo::Vec2;
use sim_core::state::{
    ACTOR_HEIGHT, ACTOR_WIDTH, ActorFlags, ActorId, CharId, ObjectiveId, Player, PlayerId, World,
};
use sim_core::{Authority, EffectSink, Sim};

use crate::error::{Result, SessionError};

/// Builder for [`Session`]. Only the map is mandatory; everything else
/// has stock defaults.
pub struct SessionBuilder {
    map: GridMap,
    config: GameConfig,
    seed: u64,
    authority: Authority,
    catalog: Box<dyn CatalogOracle>,
    obstacles: Box<dyn ObstacleOracle>,
}

impl SessionBuilder {
    pub fn new(map: GridMap) -> Self {
        Self {
            map,
            config: GameConfig::default(),
            seed: 0,
            authority: Authority::Server,
            catalog: Box::new(ContentCatalog::builtin()),
            obstacles: Box::new(NoObstacles),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn authority(mut self, authority: Authority) -> Self {
        self.authority = authority;
        self
    }

    pub fn catalog(mut self, catalog: impl CatalogOracle + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn obstacles(mut self, obstacles: impl ObstacleOracle + 'static) -> Self {
        self.obstacles = Box::new(obstacles);
        self
    }

    pub fn build<S: EffectSink>(self, sink: S) -> Session<S> {
        let map_size = self.map.size();
        info!(seed = self.seed, ?map_size, "session created");
        Session {
            world: World::new(map_size, self.seed),
            queue: EventQueue::new(),
            map: self.map,
            catalog: self.catalog,
            obstacles: self.obstacles,
            rng: PcgRng,
            config: self.config,
            authority: self.authority,
            sink,
        }
    }
}

/// One mission in flight: world state, the event queue, and the oracles
/// the simulation reads.
pub struct Session<S: EffectSink> {
    world: World,
    queue: EventQueue,
    map: GridMap,
    catalog: Box<dyn CatalogOracle>,
    obstacles: Box<dyn ObstacleOracle>,
    rng: PcgRng,
    config: GameConfig,
    authority: Authority,
    sink: S,
}

impl<S: EffectSink> Session<S> {
    pub fn builder(map: GridMap) -> SessionBuilder {
        SessionBuilder::new(map)
    }

    /// Register a player with a validated loadout. Players join before
    /// their first spawn and persist across deaths.
    pub fn add_player(&mut self, char_id: CharId, loadout: &[&str], lives: i32) -> Result<PlayerId> {
        if self.catalog.character(char_id).is_none() {
            return Err(SessionError::UnknownCharacter(char_id.0));
        }
        if loadout.len() > GameConfig::MAX_GUNS {
            return Err(SessionError::LoadoutTooLarge(
                loadout.len(),
                GameConfig::MAX_GUNS,
            ));
        }
        let uid = PlayerId(self.world.players.len() as u32);
        let mut player = Player::new(uid, char_id);
        player.lives = lives;
        for gun in loadout {
            if self.catalog.gun_by_name(gun).is_none() {
                return Err(SessionError::UnknownGun(gun.to_string()));
            }
            player.loadout.push(gun.to_string());
        }
        self.world.players.add(player);
        info!(player = uid.0, "player joined");
        Ok(uid)
    }

    /// Spawn (or first-spawn) a player's actor on a clear position near
    /// `preferred` (full coordinates). Applies immediately.
    pub fn spawn_player(&mut self, player: PlayerId, preferred: Vec2) -> Result<ActorId> {
        let (char_id, health) = {
            let p = self
                .world
                .players
                .get(player)
                .ok_or(SessionError::UnknownPlayer(player))?;
            let health = self
                .catalog
                .character(p.char_id)
                .map(|c| c.max_health)
                .unwrap_or(1);
            (p.char_id, health)
        };
        let pos = sim_core::actor::find_spawn_position(
            &self.map,
            &self.world.actors,
            preferred,
            Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
        );
        let uid = self.world.actors.next_uid();
        self.queue.push(EventKind::ActorAdd(ActorAdd {
            uid,
            player: Some(player),
            char_id,
            health,
            pos,
            extra_flags: ActorFlags::empty(),
            objective: None,
        }));
        self.process_events()?;
        Ok(uid)
    }

    /// Spawn a non-player character. Applies immediately.
    pub fn spawn_character(
        &mut self,
        char_id: CharId,
        pos: Vec2,
        extra_flags: ActorFlags,
        objective: Option<ObjectiveId>,
    ) -> Result<ActorId> {
        let health = self
            .catalog
            .character(char_id)
            .ok_or(SessionError::UnknownCharacter(char_id.0))?
            .max_health;
        let uid = self.world.actors.next_uid();
        self.queue.push(EventKind::ActorAdd(ActorAdd {
            uid,
            player: None,
            char_id,
            health,
            pos,
            extra_flags,
            objective,
        }));
        self.process_events()?;
        Ok(uid)
    }

    /// Advance the session one tick: route each player's command, apply
    /// the command events, integrate every actor, then apply the update
    /// events.
    ///
    /// Command events must land before integration; the `ActorMove`
    /// snapshot carries the pre-move position and would undo the move if
    /// it were applied afterwards.
    pub fn tick(&mut self, commands: &[(PlayerId, Cmd)]) -> Result<()> {
        trace!(tick = self.world.tick, "tick");
        for &(player, cmd) in commands {
            let actor = self
                .world
                .players
                .get(player)
                .ok_or(SessionError::UnknownPlayer(player))?
                .actor;
            if let Some(uid) = actor {
                self.with_sim(|sim, queue| sim.command_actor(uid, cmd, 1, queue));
            }
        }
        self.process_events()?;
        self.with_sim(|sim, queue| sim.update_all_actors(1, queue));
        self.process_events()?;
        self.world.tick += 1;
        Ok(())
    }

    /// Request a gun cycle for a player's actor; applies next tick.
    pub fn switch_gun(&mut self, player: PlayerId) -> Result<()> {
        let actor = self
            .world
            .players
            .get(player)
            .ok_or(SessionError::UnknownPlayer(player))?
            .actor;
        if let Some(uid) = actor {
            self.with_sim(|sim, queue| sim.actor_try_switch_gun(uid, queue));
        }
        Ok(())
    }

    /// Enqueue an external event (pickup effects, replicated server
    /// events on a client). Applied on the next drain.
    pub fn push_event(&mut self, kind: EventKind) {
        self.queue.push(kind);
    }

    /// Drain the queue once, applying all due events.
    pub fn process_events(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        debug!(pending = self.queue.len(), "applying events");
        let result = self.with_sim(|sim, queue| sim.handle_events(queue));
        if let Err(err) = &result {
            warn!(%err, "event application failed");
        }
        result.map_err(Into::into)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct state access for hosts and tests; the replicated path goes
    /// through events.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn with_sim<R>(&mut self, f: impl FnOnce(&mut Sim, &mut EventQueue) -> R) -> R {
        let env = Env::new(
            &self.map,
            self.catalog.as_ref(),
            self.obstacles.as_ref(),
            &self.rng,
        );
        let mut sim = Sim::new(
            &mut self.world,
            env,
            &self.config,
            self.authority,
            &mut self.sink,
        );
        f(&mut sim, &mut self.queue)
    }
}
