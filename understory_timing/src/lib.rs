// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives.
//!
//! UI components often need "call me back in N milliseconds" without knowing
//! which event loop they run on. This crate splits that need in two:
//!
//! - [`TimerHost`]: the capability a component uses to schedule and cancel
//!   one-shot timers. Components hold on to the returned [`TimerId`] and
//!   compare it against the id delivered when the timer fires.
//! - [`TimerQueue`]: a small, deterministic implementation of [`TimerHost`]
//!   driven by a caller-supplied monotonic clock. Hosts advance it from their
//!   frame or idle callbacks and dispatch due timers to whoever owns them.
//!
//! Time is expressed as a `u64` count of milliseconds on a monotonic clock the
//! host chooses. The queue never reads a system clock itself, which keeps it
//! usable in `no_std` targets and makes timer-driven behavior fully
//! reproducible in tests.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::TimerQueue;
//!
//! let mut queue = TimerQueue::new();
//!
//! let blink = queue.schedule_after(500).unwrap();
//! let tooltip = queue.schedule_after(1_200).unwrap();
//! assert_eq!(queue.next_deadline(), Some(500));
//!
//! // The tooltip was dismissed before it showed up.
//! assert!(queue.cancel(tooltip));
//!
//! queue.advance_to(1_000);
//! let due = queue.pop_due().unwrap();
//! assert_eq!(due.id, blink);
//! assert_eq!(due.deadline, 500);
//! assert!(queue.pop_due().is_none());
//! ```
//!
//! ## Sharing a host
//!
//! [`TimerHost`] is implemented for `&mut H` and for `Rc<RefCell<H>>`, so one
//! queue can serve several components (for example nested carousels) while
//! each component owns its own handle to it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
mod queue;

pub use host::{ScheduleError, TimerHost, TimerId};
pub use queue::{DueTimer, TimerQueue};
