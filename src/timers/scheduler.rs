//! Virtual-time one-shot timer queue.
//!
//! Timers fire in deadline order; timers sharing a deadline fire in the
//! order they were scheduled. The clock only moves when the host advances
//! it, so every timed sequence is reproducible in tests.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer. Never reused within a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl TimerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// One-shot timer queue over a virtual millisecond clock.
///
/// ```
/// use space_memory::timers::Scheduler;
///
/// let mut timers = Scheduler::new();
/// let slow = timers.schedule(500, "slow");
/// timers.schedule(100, "fast");
/// timers.cancel(slow);
///
/// assert_eq!(timers.pop_due(1000).map(|(_, t)| t), Some("fast"));
/// assert_eq!(timers.now(), 100);
/// assert!(timers.pop_due(1000).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    /// Current virtual time in milliseconds.
    now: u64,

    /// Pending timers keyed by (deadline, id).
    queue: BTreeMap<(u64, TimerId), T>,

    /// Deadline lookup for cancellation.
    deadlines: FxHashMap<TimerId, u64>,

    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            queue: BTreeMap::new(),
            deadlines: FxHashMap::default(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `payload` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = self.now.saturating_add(delay_ms);
        self.queue.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.queue.remove(&(deadline, id))
    }

    /// Check if a timer is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Remove the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline, so anything the caller
    /// schedules while handling it is measured from when it fired.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let (deadline, _) = *self.queue.keys().next()?;
        if deadline > until {
            return None;
        }

        let ((deadline, id), payload) = self.queue.pop_first()?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, payload))
    }

    /// Move the clock forward to `time`. Never moves backwards.
    pub fn advance_clock(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = Scheduler::new();
        timers.schedule(300, 'c');
        timers.schedule(100, 'a');
        timers.schedule(200, 'b');

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(1000).map(|(_, t)| t)).collect();

        assert_eq!(fired, vec!['a', 'b', 'c']);
        assert_eq!(timers.now(), 300);
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut timers = Scheduler::new();
        timers.schedule(50, 1);
        timers.schedule(50, 2);
        timers.schedule(50, 3);

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(50).map(|(_, t)| t)).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = Scheduler::new();
        timers.schedule(100, ());

        assert!(timers.pop_due(99).is_none());
        assert_eq!(timers.now(), 0);
        assert_eq!(timers.next_deadline(), Some(100));
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(100, "x");

        assert!(timers.is_pending(id));
        assert_eq!(timers.cancel(id), Some("x"));
        assert!(!timers.is_pending(id));
        assert_eq!(timers.cancel(id), None);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_chained_timer_measured_from_fire_time() {
        let mut timers = Scheduler::new();
        timers.schedule(5000, "reveal");

        let (_, first) = timers.pop_due(10_000).unwrap();
        assert_eq!(first, "reveal");

        timers.schedule(500, "hide");
        assert_eq!(timers.next_deadline(), Some(5500));
    }

    #[test]
    fn test_clock_never_moves_backwards() {
        let mut timers: Scheduler<()> = Scheduler::new();
        timers.advance_clock(100);
        timers.advance_clock(50);
        assert_eq!(timers.now(), 100);
    }

    #[test]
    fn test_ids_not_reused_after_cancel() {
        let mut timers = Scheduler::new();
        let a = timers.schedule(10, ());
        timers.cancel(a);
        let b = timers.schedule(10, ());

        assert_ne!(a, b);
        assert!(!timers.is_pending(a));
        assert!(timers.is_pending(b));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_fired_timer_not_pending() {
        let mut timers = Scheduler::new();
        let id = timers.schedule(10, ());
        timers.pop_due(10);
        assert!(!timers.is_pending(id));
    }
}
