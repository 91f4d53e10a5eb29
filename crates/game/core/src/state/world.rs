//! The mutable simulation state: actors, players, exploration.

use crate::geo::Vec2;
use crate::state::{ActorArena, ObjectiveId, PlayerRegistry};

/// Everything the dispatcher mutates. Read-only context (map, catalogs,
/// obstacle queries, rng) stays outside in [`crate::env::Env`].
#[derive(Debug)]
pub struct World {
    pub actors: ActorArena,
    pub players: PlayerRegistry,
    /// Per-objective progress counts.
    pub objectives: Vec<i32>,
    /// Row-major explored flags, one per map tile.
    explored: Vec<bool>,
    map_size: Vec2,
    explored_count: u32,
    /// Seed mixed into every derived rng stream.
    pub game_seed: u64,
    /// Current simulation tick.
    pub tick: u64,
    /// Uid source for pickups spawned by the simulation.
    next_pickup_uid: u32,
}

impl World {
    pub fn new(map_size: Vec2, game_seed: u64) -> Self {
        let tiles = (map_size.x * map_size.y).max(0) as usize;
        Self {
            actors: ActorArena::new(),
            players: PlayerRegistry::new(),
            objectives: Vec::new(),
            explored: vec![false; tiles],
            map_size,
            explored_count: 0,
            game_seed,
            tick: 0,
            next_pickup_uid: 0,
        }
    }

    pub fn next_pickup_uid(&mut self) -> u32 {
        let uid = self.next_pickup_uid;
        self.next_pickup_uid += 1;
        uid
    }

    pub fn objective_count(&self, objective: ObjectiveId) -> i32 {
        self.objectives.get(objective.0 as usize).copied().unwrap_or(0)
    }

    pub fn update_objective(&mut self, objective: ObjectiveId, delta: i32) {
        let idx = objective.0 as usize;
        if idx >= self.objectives.len() {
            self.objectives.resize(idx + 1, 0);
        }
        self.objectives[idx] += delta;
    }

    fn tile_index(&self, tile: Vec2) -> Option<usize> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.map_size.x || tile.y >= self.map_size.y {
            return None;
        }
        Some((tile.y * self.map_size.x + tile.x) as usize)
    }

    pub fn is_explored(&self, tile: Vec2) -> bool {
        self.tile_index(tile)
            .map(|i| self.explored[i])
            .unwrap_or(false)
    }

    /// Mark a run of tiles as explored, in row-major order. A run that
    /// crosses the right map edge continues on the next row; tiles past
    /// the last row and already-explored tiles are skipped.
    pub fn explore_run(&mut self, tile: Vec2, run: u32) {
        let Some(start) = self.tile_index(tile) else {
            return;
        };
        let end = (start + run as usize).min(self.explored.len());
        for i in start..end {
            if !self.explored[i] {
                self.explored[i] = true;
                self.explored_count += 1;
            }
        }
    }

    /// Fraction of the map seen so far, in [0, 1].
    pub fn explored_fraction(&self) -> f32 {
        let tiles = self.explored.len();
        if tiles == 0 {
            return 0.0;
        }
        self.explored_count as f32 / tiles as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explore_runs_wrap_rows_and_dedupe() {
        let mut w = World::new(Vec2::new(4, 4), 0);
        w.explore_run(Vec2::new(2, 1), 4);
        assert!(w.is_explored(Vec2::new(2, 1)));
        assert!(w.is_explored(Vec2::new(3, 1)));
        // The run continues on the next row.
        assert!(w.is_explored(Vec2::new(0, 2)));
        assert!(w.is_explored(Vec2::new(1, 2)));
        assert!(!w.is_explored(Vec2::new(0, 1)));
        assert!(!w.is_explored(Vec2::new(2, 2)));
        // Re-exploring does not inflate the counter.
        w.explore_run(Vec2::new(2, 1), 2);
        assert!((w.explored_fraction() - 4.0 / 16.0).abs() < 1e-6);
        // A run off the last row clips at the map end.
        w.explore_run(Vec2::new(3, 3), 5);
        assert!(w.is_explored(Vec2::new(3, 3)));
        assert!((w.explored_fraction() - 5.0 / 16.0).abs() < 1e-6);
    }

    #[test]
    fn objective_counts_grow_on_demand() {
        let mut w = World::new(Vec2::new(2, 2), 0);
        assert_eq!(w.objective_count(ObjectiveId(3)), 0);
        w.update_objective(ObjectiveId(3), 2);
        w.update_objective(ObjectiveId(3), 1);
        assert_eq!(w.objective_count(ObjectiveId(3)), 3);
        assert_eq!(w.objective_count(ObjectiveId(0)), 0);
    }

    #[test]
    fn pickup_uids_are_monotonic() {
        let mut w = World::new(Vec2::new(2, 2), 0);
        assert_eq!(w.next_pickup_uid(), 0);
        assert_eq!(w.next_pickup_uid(), 1);
    }
}
