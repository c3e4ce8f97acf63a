// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay: a single one-shot timer that periodically advances the carousel.
//!
//! ## States
//!
//! - [`AutoplayState::Idle`]: no timer pending. Autoplay is disabled,
//!   suppressed by an interaction, detached, or the host refused to schedule.
//! - [`AutoplayState::Armed`]: exactly one timer is pending with the host.
//! - [`AutoplayState::Firing`]: the timer fired and an advance is in flight.
//!
//! The scheduler never holds more than one timer. Every path that could arm a
//! timer cancels the previous one first, and every path into `Idle` cancels
//! the pending timer synchronously.

use understory_timing::{TimerHost, TimerId};

use crate::config::AutoplayConfig;

/// Observable autoplay state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoplayState {
    /// No timer pending.
    Idle,
    /// A timer is pending.
    Armed,
    /// The timer fired and the advance has not completed yet.
    Firing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Armed(TimerId),
    Firing,
}

/// Autoplay state machine.
///
/// The scheduler does not own a [`TimerHost`]; every operation that schedules
/// or cancels takes the host explicitly so that ownership of the host stays
/// with the controller.
#[derive(Clone, Debug)]
pub struct AutoplayScheduler {
    enabled: bool,
    interval_ms: u64,
    suppressed: bool,
    attached: bool,
    phase: Phase,
}

impl Default for AutoplayScheduler {
    fn default() -> Self {
        Self::new(&AutoplayConfig::default())
    }
}

impl AutoplayScheduler {
    /// Creates an idle, attached scheduler from `config`.
    ///
    /// No timer is scheduled until [`AutoplayScheduler::restart`] or another
    /// arming operation is called with a host.
    #[must_use]
    pub fn new(config: &AutoplayConfig) -> Self {
        Self {
            enabled: config.enabled,
            interval_ms: config.interval_ms,
            suppressed: false,
            attached: true,
            phase: Phase::Idle,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AutoplayState {
        match self.phase {
            Phase::Idle => AutoplayState::Idle,
            Phase::Armed(_) => AutoplayState::Armed,
            Phase::Firing => AutoplayState::Firing,
        }
    }

    /// Returns the pending timer, if armed.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        match self.phase {
            Phase::Armed(id) => Some(id),
            Phase::Idle | Phase::Firing => None,
        }
    }

    /// Returns `true` if autoplay is enabled by the caller.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` while an interaction suppresses autoplay.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Returns `true` unless the scheduler was detached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns the delay between advances, in milliseconds.
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Sets the delay between advances. Takes effect the next time the timer is armed.
    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    /// Enables or disables autoplay.
    ///
    /// Enabling restarts the cycle with a fresh timer; disabling cancels the
    /// pending timer.
    pub fn set_enabled<T: TimerHost + ?Sized>(&mut self, enabled: bool, host: &mut T) {
        self.enabled = enabled;
        if enabled {
            self.restart(host);
        } else {
            self.cancel(host);
        }
    }

    /// Suppresses or releases autoplay on behalf of an interaction.
    ///
    /// Suppressing cancels the pending timer immediately. An advance already
    /// in flight may complete but will not re-arm. Releasing re-arms if
    /// autoplay is otherwise allowed.
    pub fn set_suppressed<T: TimerHost + ?Sized>(&mut self, suppressed: bool, host: &mut T) {
        self.suppressed = suppressed;
        if suppressed {
            self.cancel(host);
        } else {
            self.restart(host);
        }
    }

    /// Marks the carousel as detached from its presentation context.
    ///
    /// Detaching behaves like disabling: the pending timer is cancelled and no
    /// timer is armed until [`AutoplayScheduler::attach`].
    pub fn detach<T: TimerHost + ?Sized>(&mut self, host: &mut T) {
        self.attached = false;
        self.cancel(host);
    }

    /// Marks the carousel as attached again and re-arms if allowed.
    pub fn attach<T: TimerHost + ?Sized>(&mut self, host: &mut T) {
        self.attached = true;
        self.restart(host);
    }

    /// Cancels any pending timer and arms a fresh one if allowed.
    pub fn restart<T: TimerHost + ?Sized>(&mut self, host: &mut T) {
        self.cancel(host);
        if !self.can_arm() {
            return;
        }
        match host.schedule_after(self.interval_ms) {
            Ok(id) => self.transition(Phase::Armed(id)),
            Err(err) => {
                log::warn!("autoplay unavailable: {err}");
            }
        }
    }

    /// Cancels the pending timer, if any, and goes idle.
    pub fn cancel<T: TimerHost + ?Sized>(&mut self, host: &mut T) {
        if let Phase::Armed(id) = self.phase {
            host.cancel(id);
        }
        self.transition(Phase::Idle);
    }

    /// Handles a timer delivered by the host.
    ///
    /// Returns `true` if `id` is the pending timer, in which case the
    /// scheduler is now [`AutoplayState::Firing`] and the caller must start an
    /// advance. Stale ids, and any id while detached, return `false` and change
    /// nothing.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if !self.attached {
            log::warn!("autoplay timer {id:?} fired into a detached carousel");
            return false;
        }
        if self.phase != Phase::Armed(id) {
            log::trace!("ignoring stale autoplay timer {id:?}");
            return false;
        }
        self.transition(Phase::Firing);
        true
    }

    /// Handles completion of an advance started by [`AutoplayScheduler::fire`].
    ///
    /// Re-arms if autoplay is still allowed. If the scheduler left
    /// [`AutoplayState::Firing`] while the advance was in flight (because of
    /// an interaction, a restart or a detach) this is a no-op.
    pub fn complete_advance<T: TimerHost + ?Sized>(&mut self, host: &mut T) {
        if self.phase == Phase::Firing {
            self.restart(host);
        }
    }

    fn can_arm(&self) -> bool {
        self.enabled && !self.suppressed && self.attached
    }

    fn transition(&mut self, next: Phase) {
        if self.phase != next {
            log::trace!("autoplay {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }
}
