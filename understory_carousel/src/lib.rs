// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: a headless, windowed, circular carousel.
//!
//! A carousel shows an ordered sequence of pages as if it were endless and
//! circular, while only ever materializing three physical slots: the previous,
//! current and next page. As the viewport scrolls towards either edge of the
//! three-slot strip, the slot furthest behind is recycled to the front and the
//! scroll position is rewound by one tile, so the user never reaches an edge.
//!
//! The crate provides:
//!
//! - [`CarouselController`]: owns the window, the viewport position and the
//!   autoplay state, and exposes the event-driven public contract.
//! - [`PhysicalWindow`]: the three slots and their binding to logical pages.
//! - [`AxisGeometry`]: pure threshold and layout math along one [`Axis`].
//! - [`RecycleEngine`]: decides when to shift the window and by how much to
//!   rewind.
//! - [`AutoplayScheduler`]: a one-timer state machine that advances the
//!   carousel periodically and stays out of the way of live gestures.
//!
//! It does **not** render, animate or recognize gestures. Hosts are
//! responsible for:
//!
//! - Laying out the three slots ([`CarouselController::slot_rect`]) and
//!   attaching the handles from [`CarouselController::window_bindings`].
//! - Reporting scroll positions, drag begin/end and momentum settling.
//! - Applying each returned position together with its [`SlotRebind`] in the
//!   same frame.
//! - Delivering timers from their [`understory_timing::TimerHost`] and
//!   animating each [`AdvanceRequest`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::{CarouselController, SlotPosition};
//! use understory_timing::TimerQueue;
//!
//! let pages = vec!["a", "b", "c", "d", "e"];
//! let mut carousel = CarouselController::new(pages, TimerQueue::new()).unwrap();
//! carousel.set_viewport_size(Size::new(320.0, 200.0)).unwrap();
//!
//! // Centered on page 0, with the last page to its left.
//! assert_eq!(carousel.position(), 320.0);
//! assert_eq!(carousel.window().indices(), [4, 0, 1]);
//!
//! // The user drags most of the way to the right-hand tile.
//! carousel.on_interaction_begin();
//! let update = carousel.on_viewport_position_changed(500.0);
//! let rebind = update.rebind.unwrap();
//!
//! // The leftmost slot was recycled to the right and the position rewound.
//! assert_eq!(update.position, 180.0);
//! assert_eq!(rebind.slot, SlotPosition::Trailing);
//! assert_eq!((rebind.evicted, rebind.loaded), ("e", "c"));
//! assert_eq!(carousel.middle_index(), 1);
//! carousel.on_interaction_end(false);
//! ```
//!
//! ## Autoplay
//!
//! Autoplay arms one timer with the carousel's timer host. When the host
//! delivers it, [`CarouselController::on_autoplay_timer`] returns an
//! [`AdvanceRequest`] for the host to animate; recycling is held while the
//! animation runs and [`CarouselController::on_advance_complete`] performs the
//! shift and re-arms the timer.
//!
//! ```rust
//! use kurbo::Size;
//! use understory_carousel::CarouselController;
//! use understory_timing::TimerQueue;
//!
//! let mut carousel = CarouselController::new((0..8).collect::<Vec<u32>>(), TimerQueue::new()).unwrap();
//! carousel.set_viewport_size(Size::new(100.0, 100.0)).unwrap();
//!
//! carousel.host_mut().advance_to(2_500);
//! let due = carousel.host_mut().pop_due().unwrap();
//! let advance = carousel.on_autoplay_timer(due.id).unwrap();
//! assert_eq!((advance.from, advance.to), (100.0, 200.0));
//!
//! // The host animates the viewport, then reports completion.
//! let _ = carousel.on_viewport_position_changed(advance.to);
//! let update = carousel.on_advance_complete();
//! assert!(update.shifted());
//! assert_eq!(update.position, 100.0);
//! assert_eq!(carousel.middle_index(), 1);
//! ```
//!
//! Interactions hold autoplay: [`CarouselController::on_interaction_begin`]
//! cancels the pending timer synchronously, and the timer is re-armed when the
//! interaction (including any momentum) ends. A nested zoomable page that
//! reports a live gesture through [`GeometryListener`] holds autoplay the same
//! way.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: shifts and reloads at `debug`,
//! autoplay transitions at `trace`, and refused timers at `warn`. Nothing is
//! emitted unless the application installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod autoplay;
mod axis;
mod config;
mod controller;
mod error;
mod event;
mod geometry;
mod recycle;
mod window;

pub use autoplay::{AutoplayScheduler, AutoplayState};
pub use axis::{Axis, AxisGeometry, DEFAULT_BOUNDARY_EPSILON, Direction, Zone};
pub use config::{
    AutoplayConfig, CarouselConfig, DEFAULT_ADVANCE_DURATION_MS, DEFAULT_INTERVAL_MS,
};
pub use controller::CarouselController;
pub use error::CarouselError;
pub use event::{AdvanceRequest, CarouselEvent, CarouselOutput, PositionUpdate};
pub use geometry::{GeometryListener, GestureFlags, InternalGeometryState};
pub use recycle::{Recycle, RecycleEngine};
pub use window::{Binding, PhysicalWindow, SLOT_COUNT, Shift, SlotPosition, SlotRebind};
