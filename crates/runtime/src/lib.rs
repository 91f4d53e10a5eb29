//! Session driver for the deterministic actor simulation.
//!
//! This crate wires the simulation core, a content catalog, and an effect
//! sink into a runnable session. Consumers embed [`Session`] to advance
//! fixed ticks, route player input, and observe side effects.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session driver and its builder
//! - [`effects`] provides a recording sink and a JSON event log for
//!   replication and tests
//! - [`logging`] sets up tracing for hosts that want it

pub mod effects;
pub mod error;
pub mod logging;
pub mod session;

pub use effects::{EventLog, RecordingSink, SoundCall, read_event_log};
pub use error::{Result, SessionError};
pub use session::{Session, SessionBuilder};
