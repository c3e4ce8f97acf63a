// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer host capability.

use alloc::rc::Rc;
use core::cell::RefCell;

/// Opaque identifier of a scheduled one-shot timer.
///
/// Ids are unique per host for the lifetime of that host. Platform hosts that
/// wrap a native timer API can mint ids with [`TimerId::from_raw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Creates an id from a raw host-defined value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host-defined value.
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Reasons a host can refuse to schedule a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The host already holds as many pending timers as it allows.
    #[error("timer host is full ({capacity} pending timers)")]
    Full {
        /// Maximum number of pending timers the host accepts.
        capacity: usize,
    },
    /// `now + delay` does not fit in the host clock.
    #[error("timer deadline overflows the host clock")]
    DeadlineOverflow,
}

/// Capability to schedule and cancel one-shot timers.
///
/// A host delivers a fired timer by handing its [`TimerId`] back to the
/// component that scheduled it; how that happens is up to the host. Components
/// must treat a fired id that they no longer hold as stale and ignore it.
pub trait TimerHost {
    /// Schedules a one-shot timer `delay_ms` milliseconds from the host's now.
    fn schedule_after(&mut self, delay_ms: u64) -> Result<TimerId, ScheduleError>;

    /// Cancels a pending timer.
    ///
    /// Returns `true` if the timer was pending and is now cancelled, `false`
    /// if it already fired, was already cancelled, or is unknown.
    fn cancel(&mut self, id: TimerId) -> bool;
}

impl<H: TimerHost + ?Sized> TimerHost for &mut H {
    fn schedule_after(&mut self, delay_ms: u64) -> Result<TimerId, ScheduleError> {
        (**self).schedule_after(delay_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        (**self).cancel(id)
    }
}

impl<H: TimerHost + ?Sized> TimerHost for Rc<RefCell<H>> {
    fn schedule_after(&mut self, delay_ms: u64) -> Result<TimerId, ScheduleError> {
        self.borrow_mut().schedule_after(delay_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.borrow_mut().cancel(id)
    }
}
