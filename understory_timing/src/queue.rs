// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic one-shot timer queue.

use alloc::vec::Vec;

use crate::host::{ScheduleError, TimerHost, TimerId};

/// A timer whose deadline has been reached, as returned by [`TimerQueue::pop_due`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueTimer {
    /// Id returned when the timer was scheduled.
    pub id: TimerId,
    /// Deadline the timer was scheduled for.
    pub deadline: u64,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    deadline: u64,
    id: TimerId,
}

/// Host-driven one-shot timer queue.
///
/// The queue keeps its own notion of "now", which only moves when the host
/// calls [`TimerQueue::advance_to`]. Timers are delivered by
/// [`TimerQueue::pop_due`] in deadline order; timers sharing a deadline are
/// delivered in the order they were scheduled.
///
/// Pending timers are kept in a small sorted `Vec`. UI components rarely hold
/// more than a handful of timers at once, so insertion and cancellation are
/// linear scans.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: u64,
    next_id: u64,
    capacity: Option<usize>,
    entries: Vec<Entry>,
}

impl TimerQueue {
    /// Creates an empty queue with `now == 0` and no capacity limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            capacity: None,
            entries: Vec::new(),
        }
    }

    /// Creates an empty queue that refuses to hold more than `capacity`
    /// pending timers.
    ///
    /// Scheduling beyond the limit fails with [`ScheduleError::Full`]. A limit
    /// of zero models a host that cannot schedule timers at all.
    #[must_use]
    pub const fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            now: 0,
            next_id: 0,
            capacity: Some(capacity),
            entries: Vec::new(),
        }
    }

    /// Returns the queue's current time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `id` is scheduled and has neither fired nor been cancelled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the earliest pending deadline, if any.
    ///
    /// Hosts typically use this to decide how long their event loop may sleep.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Schedules a timer at an absolute deadline.
    ///
    /// A deadline at or before [`TimerQueue::now`] is due immediately and is
    /// returned by the next [`TimerQueue::pop_due`].
    pub fn schedule_at(&mut self, deadline: u64) -> Result<TimerId, ScheduleError> {
        if let Some(capacity) = self.capacity
            && self.entries.len() >= capacity
        {
            return Err(ScheduleError::Full { capacity });
        }
        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;
        // Insert after every entry with the same deadline to keep FIFO order.
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(at, Entry { deadline, id });
        Ok(id)
    }

    /// Schedules a timer `delay_ms` milliseconds after [`TimerQueue::now`].
    pub fn schedule_after(&mut self, delay_ms: u64) -> Result<TimerId, ScheduleError> {
        let deadline = self
            .now
            .checked_add(delay_ms)
            .ok_or(ScheduleError::DeadlineOverflow)?;
        self.schedule_at(deadline)
    }

    /// Cancels a pending timer. Returns `true` if it was pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(at) => {
                self.entries.remove(at);
                true
            }
            None => false,
        }
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves the queue's clock forward to `now`.
    ///
    /// The clock is monotonic: a `now` earlier than the current time is
    /// ignored.
    pub fn advance_to(&mut self, now: u64) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    ///
    /// Call this in a loop after [`TimerQueue::advance_to`] to drain every
    /// due timer. Timers scheduled while draining with a deadline `<= now`
    /// are delivered by the same loop.
    pub fn pop_due(&mut self) -> Option<DueTimer> {
        let first = self.entries.first()?;
        if first.deadline > self.now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some(DueTimer {
            id: entry.id,
            deadline: entry.deadline,
        })
    }
}

impl TimerHost for TimerQueue {
    fn schedule_after(&mut self, delay_ms: u64) -> Result<TimerId, ScheduleError> {
        Self::schedule_after(self, delay_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        Self::cancel(self, id)
    }
}
