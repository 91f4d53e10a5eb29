//! FIFO event queue with per-event delays.

use super::{EventKind, GameEvent};

/// Pending events, drained once per tick.
///
/// Draining walks the queue by index so events enqueued while a handler
/// runs are seen in the same pass. Events whose delay has not elapsed
/// are kept for later ticks.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event due on the next drain pass.
    pub fn push(&mut self, kind: EventKind) {
        self.events.push(GameEvent::new(kind));
    }

    /// Enqueue an event that becomes due after `delay` ticks.
    pub fn push_delayed(&mut self, kind: EventKind, delay: i32) {
        self.events.push(GameEvent::delayed(kind, delay));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Run one drain pass.
    ///
    /// Each event's delay is decremented; events whose countdown drops
    /// below zero are handed to `apply` in enqueue order and discarded.
    /// `apply` receives the queue itself so handlers can enqueue
    /// follow-up events, which are processed before the pass ends.
    pub fn drain(&mut self, mut apply: impl FnMut(&mut EventQueue, EventKind)) {
        let mut i = 0;
        while i < self.events.len() {
            self.events[i].delay -= 1;
            if self.events[i].delay < 0 {
                let kind = self.events[i].kind.clone();
                apply(self, kind);
            }
            i += 1;
        }
        self.events.retain(|e| e.delay >= 0);
    }
}

// ============================================================
// Tests
// ============================================================
