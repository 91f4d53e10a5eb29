//! The actor table: a growable slot arena with reusable slots and
//! process-unique uids.
//!
//! Slots are recycled on destroy; uids never are. All cross-tick and
//! cross-process references use uids, so a recycled slot can never alias a
//! live reference.

use super::actor::Actor;
use super::{ActorId, SlotId};

/// Growable arena of actor slots.
#[derive(Clone, Debug, Default)]
pub struct ActorArena {
    slots: Vec<Option<Actor>>,
    next_uid: u32,
}

impl ActorArena {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(64),
            next_uid: 0,
        }
    }

    /// Allocates the next process-unique actor uid.
    pub fn next_uid(&mut self) -> ActorId {
        let uid = ActorId(self.next_uid);
        self.next_uid += 1;
        uid
    }

    /// First free slot, or a fresh slot at the end.
    fn free_index(&mut self) -> SlotId {
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.is_none() {
                return SlotId(i);
            }
        }
        self.slots.push(None);
        SlotId(self.slots.len() - 1)
    }

    /// Places an actor into a free slot and returns it. The uid counter
    /// advances past externally assigned uids so later allocations never
    /// collide.
    pub fn insert(&mut self, actor: Actor) -> SlotId {
        self.next_uid = self.next_uid.max(actor.uid.0.saturating_add(1));
        let slot = self.free_index();
        self.slots[slot.0] = Some(actor);
        slot
    }

    /// Releases a slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the slot is already free; destroying a
    /// free slot is a programming error.
    pub fn remove(&mut self, slot: SlotId) -> Actor {
        let actor = self.slots[slot.0].take();
        debug_assert!(actor.is_some(), "destroying free actor slot");
        actor.expect("destroying free actor slot")
    }

    pub fn get(&self, slot: SlotId) -> Option<&Actor> {
        self.slots.get(slot.0).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut Actor> {
        self.slots.get_mut(slot.0).and_then(|s| s.as_mut())
    }

    pub fn by_uid(&self, uid: ActorId) -> Option<&Actor> {
        self.iter().map(|(_, a)| a).find(|a| a.uid == uid)
    }

    pub fn by_uid_mut(&mut self, uid: ActorId) -> Option<&mut Actor> {
        self.iter_mut().map(|(_, a)| a).find(|a| a.uid == uid)
    }

    pub fn slot_of(&self, uid: ActorId) -> Option<SlotId> {
        self.iter().find(|(_, a)| a.uid == uid).map(|(s, _)| s)
    }

    /// Iterates live actors with their slots.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Actor)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|a| (SlotId(i), a)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut Actor)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|a| (SlotId(i), a)))
    }

    /// Number of slots, free or live.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.iter().count()
    }
}
