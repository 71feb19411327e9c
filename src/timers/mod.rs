//! Deferred work on a virtual clock.
//!
//! The controller never sleeps or spawns. Hosts drive time forward (from a
//! frame loop, a browser `setTimeout`, or a test) and the scheduler hands
//! back whichever timers came due.

mod scheduler;

pub use scheduler::{Scheduler, TimerId};
