//! Deferred event scheduler
//!
//! A cancellable timer queue running on a virtual clock. Nothing advances on
//! its own: the host loop measures real elapsed time and feeds it in through
//! the owning component's `tick`, which makes every transition reproducible
//! in tests by simply advancing simulated time.
//!
//! Events are plain values rather than callbacks, so the owner decides how to
//! apply them to its own state without shared mutable borrows.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Handle to a scheduled event, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A virtual-time queue of deferred events
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_seq: u64,
    /// Min-heap of (due time, sequence) so equal deadlines fire in schedule order
    queue: BinaryHeap<Reverse<(Duration, u64)>>,
    events: HashMap<u64, E>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            events: HashMap::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to become due `delay` from now
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((self.now.saturating_add(delay), seq)));
        self.events.insert(seq, event);
        TimerId(seq)
    }

    /// Cancel a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.events.remove(&id.0).is_some()
    }

    /// Number of events still waiting to fire
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Pop the earliest event due at or before `until`, moving the clock to its deadline
    ///
    /// Callers loop on this so that events scheduled while handling an earlier
    /// event still fire inside the same tick window when they fall due.
    pub fn next_due(&mut self, until: Duration) -> Option<E> {
        while let Some(Reverse((due, seq))) = self.queue.peek().copied() {
            if due > until {
                return None;
            }
            self.queue.pop();
            // Cancelled entries leave a stale heap key behind
            if let Some(event) = self.events.remove(&seq) {
                self.now = self.now.max(due);
                return Some(event);
            }
        }
        None
    }

    /// Move the clock to `until` once all due events were drained
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Drain every event due within `elapsed` from now, in deadline order
    ///
    /// Convenience for owners whose handlers never schedule follow-up events.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<E> {
        let target = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();
        while let Some(event) = self.next_due(target) {
            fired.push(event);
        }
        self.settle(target);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_events_fire_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), "late");
        scheduler.schedule(ms(10), "early");
        scheduler.schedule(ms(10), "early-second");

        assert!(scheduler.advance(ms(5)).is_empty());
        assert_eq!(scheduler.advance(ms(5)), vec!["early", "early-second"]);
        assert_eq!(scheduler.now(), ms(10));
        assert_eq!(scheduler.advance(ms(1000)), vec!["late"]);
        assert_eq!(scheduler.now(), ms(1010));
    }

    #[test]
    fn test_cancelled_event_never_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(ms(10), 1);
        scheduler.schedule(ms(20), 2);

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(ms(50)), vec![2]);
    }

    #[test]
    fn test_next_due_moves_clock_to_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), 'a');

        assert_eq!(scheduler.next_due(ms(100)), Some('a'));
        assert_eq!(scheduler.now(), ms(10));

        // Follow-up scheduled relative to the deadline, not the window end
        scheduler.schedule(ms(30), 'b');
        assert_eq!(scheduler.next_due(ms(100)), Some('b'));
        assert_eq!(scheduler.now(), ms(40));
        assert_eq!(scheduler.next_due(ms(100)), None);

        scheduler.settle(ms(100));
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn test_far_deadlines_saturate() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(ms(1));
        scheduler.schedule(Duration::MAX, "never");

        assert!(scheduler.advance(Duration::MAX).contains(&"never"));
        assert_eq!(scheduler.now(), Duration::MAX);
        assert!(scheduler.advance(ms(10)).is_empty());
    }
}
