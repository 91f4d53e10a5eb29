//! Simulation errors.

use thiserror::Error;

use crate::state::{ActorId, CharId};

/// Errors surfaced while applying events or spawning actors. Stale actor
/// references are not errors (they are expected during replication and
/// ignored); these cover genuinely bad inputs such as unknown catalog
/// names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("actor uid {0:?} already exists")]
    DuplicateActor(ActorId),
    #[error("unknown character {0:?}")]
    UnknownCharacter(CharId),
    #[error("unknown gun class {0}")]
    UnknownGun(String),
    #[error("unknown bullet class {0}")]
    UnknownBullet(String),
}
