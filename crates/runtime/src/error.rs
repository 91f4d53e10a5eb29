//! Session errors.

use sim_core::SimError;
use sim_core::state::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown player {0:?}")]
    UnknownPlayer(PlayerId),
    #[error("unknown gun class {0:?} in loadout")]
    UnknownGun(String),
    #[error("loadout holds {0} guns, the maximum is {1}")]
    LoadoutTooLarge(usize, usize),
    #[error("unknown character id {0}")]
    UnknownCharacter(u16),
    #[error(transparent)]
    Sim(#[from] SimError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
