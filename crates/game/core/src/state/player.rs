//! Player bookkeeping: lives, score, and kill accounting.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{ActorId, CharId, PlayerId};

/// Persistent per-player state. Players outlive their actors; an actor
/// death leaves the record in place with `actor` cleared until respawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub uid: PlayerId,
    /// Character template this player spawns as.
    pub char_id: CharId,
    /// Gun class names for the spawn loadout.
    pub loadout: ArrayVec<String, { GameConfig::MAX_GUNS }>,
    /// The player's live actor, if any.
    pub actor: Option<ActorId>,
    pub lives: i32,
    pub score: i32,
    pub total_score: i32,
    pub kills: u32,
    pub suicides: u32,
    pub friendlies: u32,
    /// Whether this player is driven from this machine (HUD updates and
    /// screen shake apply only to local players).
    pub is_local: bool,
}

impl Player {
    pub fn new(uid: PlayerId, char_id: CharId) -> Self {
        Self {
            uid,
            char_id,
            loadout: ArrayVec::new(),
            actor: None,
            lives: 1,
            score: 0,
            total_score: 0,
            kills: 0,
            suicides: 0,
            friendlies: 0,
            is_local: true,
        }
    }

    pub fn add_score(&mut self, amount: i32) {
        self.score += amount;
        self.total_score += amount;
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_some()
    }
}

/// All players in the session, looked up by uid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, player: Player) {
        debug_assert!(
            self.get(player.uid).is_none(),
            "duplicate player uid {:?}",
            player.uid
        );
        self.players.push(player);
    }

    pub fn get(&self, uid: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.uid == uid)
    }

    pub fn get_mut(&mut self, uid: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.uid == uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
