// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel inputs and outputs.
//!
//! Gesture callbacks, timer callbacks and animation completions all mutate the
//! same controller. Hosts that cannot call into the controller from every
//! callback (for example because the controller is already borrowed further
//! up the stack) can wrap each input in a [`CarouselEvent`], queue it with
//! [`crate::CarouselController::push_event`] and drain the queue from one
//! place with [`crate::CarouselController::process_events`]. Events are
//! processed strictly in arrival order.

use understory_timing::TimerId;

use crate::geometry::InternalGeometryState;
use crate::window::SlotRebind;

/// One input to a carousel.
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    /// The viewport moved to a new position along the axis.
    ViewportPositionChanged(f64),
    /// A drag (or zoom) gesture started on the carousel.
    InteractionBegan,
    /// The drag gesture ended.
    InteractionEnded {
        /// `true` if the viewport keeps moving under momentum.
        will_settle_with_momentum: bool,
    },
    /// Momentum-driven motion came to rest.
    SettleCompleted,
    /// A timer scheduled with the carousel's timer host fired.
    AutoplayTimerFired(TimerId),
    /// The host finished animating an [`AdvanceRequest`].
    AdvanceCompleted,
    /// A page's zoom/pan content reported its geometry.
    ContentGeometryChanged(InternalGeometryState),
}

/// Result of handling a viewport position change.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct PositionUpdate<H> {
    /// Position the host must apply, possibly rewound by one tile.
    pub position: f64,
    /// Middle index after handling the change.
    pub middle_index: usize,
    /// Slot rebind to apply in the same frame as `position`, if a shift happened.
    pub rebind: Option<SlotRebind<H>>,
}

impl<H> PositionUpdate<H> {
    /// Returns `true` if the window shifted.
    #[must_use]
    pub fn shifted(&self) -> bool {
        self.rebind.is_some()
    }
}

/// Request for the host to animate one autoplay advance.
///
/// The host animates the viewport from `from` to `to` over `duration_ms`,
/// reporting intermediate positions as usual, and then reports completion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdvanceRequest {
    /// Position at the start of the animation.
    pub from: f64,
    /// Position that shows the trailing slot.
    pub to: f64,
    /// Suggested animation duration, in milliseconds.
    pub duration_ms: u64,
}

/// Result of dispatching one [`CarouselEvent`].
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselOutput<H> {
    /// Nothing for the host to do.
    None,
    /// Apply a position (and possibly a slot rebind).
    Position(PositionUpdate<H>),
    /// Start an advance animation.
    Advance(AdvanceRequest),
}
