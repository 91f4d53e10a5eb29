//! Replicated game events: the queue, the payloads, and the dispatcher
//! that applies them to the world.

mod handle;
mod kinds;
mod queue;

pub use kinds::{ActorAdd, BulletSpawn, EventKind, GameEvent, PickupSpawn, TileRun};
pub use queue::EventQueue;
