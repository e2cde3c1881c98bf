//! Scheduler module - deterministic timer queue
//!
//! Flip completions and stagger delays are modelled as timed events rather
//! than callbacks. The board owns one [`TimerQueue`] and drains it from its
//! fixed-timestep `tick`, so tests can drive the whole board on a simulated
//! clock.

use std::collections::BTreeMap;

/// Handle to a scheduled event, used for cancellation.
///
/// Ordering is `(due time, scheduling order)`, which is exactly the order in
/// which the queue fires events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    due_ms: u64,
    seq: u64,
}

impl TimerId {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// Anything that can run an event after a delay.
pub trait Scheduler<E> {
    fn schedule_after(&mut self, delay_ms: u32, event: E) -> TimerId;

    /// Returns false if the timer already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Simulated-clock timer queue.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now_ms: u64,
    next_seq: u64,
    pending: BTreeMap<TimerId, E>,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending event.
    pub fn next_due(&self) -> Option<u64> {
        self.pending.keys().next().map(|id| id.due_ms)
    }

    /// Remove and return the earliest event due at or before `deadline_ms`.
    ///
    /// The clock moves to the event's due time, so anything scheduled while
    /// handling it is timed from the moment it fired, not from the deadline.
    pub fn pop_due_by(&mut self, deadline_ms: u64) -> Option<E> {
        let id = *self.pending.keys().next()?;
        if id.due_ms > deadline_ms {
            return None;
        }
        self.now_ms = self.now_ms.max(id.due_ms);
        self.pending.remove(&id)
    }

    /// Move the clock forward. Never moves backwards.
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Cancel every pending event matching the predicate.
    pub fn cancel_where(&mut self, mut f: impl FnMut(&E) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, e| !f(e));
        before - self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> for TimerQueue<E> {
    fn schedule_after(&mut self, delay_ms: u32, event: E) -> TimerId {
        let id = TimerId {
            due_ms: self.now_ms + delay_ms as u64,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(id, event);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }
}
