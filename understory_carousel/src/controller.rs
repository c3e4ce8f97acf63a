// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller: owns all carousel state and the public contract.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use understory_timing::{TimerHost, TimerId};

use crate::autoplay::{AutoplayScheduler, AutoplayState};
use crate::axis::{Axis, AxisGeometry};
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::event::{AdvanceRequest, CarouselEvent, CarouselOutput, PositionUpdate};
use crate::geometry::{GeometryListener, InternalGeometryState};
use crate::recycle::RecycleEngine;
use crate::window::{Binding, PhysicalWindow, SLOT_COUNT, SlotPosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Interaction {
    Idle,
    Dragging,
    Settling,
}

/// Windowed circular carousel over a sequence of content handles.
///
/// The controller keeps three physical slots bound to consecutive pages of a
/// circular page sequence and recycles them as the viewport approaches either
/// edge of the three-tile strip. It also drives autoplay through a
/// [`TimerHost`], holding autoplay while a gesture is live on the carousel
/// or on a nested content view.
///
/// `H` is the caller's content handle. The controller only clones handles and
/// moves them between slots; it never inspects them.
///
/// Dropping the controller cancels its pending autoplay timer.
#[derive(Debug)]
pub struct CarouselController<H, T: TimerHost> {
    window: PhysicalWindow<H>,
    engine: RecycleEngine,
    viewport: Size,
    position: f64,
    circling_enabled: bool,
    advance_duration_ms: u64,
    advancing: bool,
    interaction: Interaction,
    nested_gesture: bool,
    autoplay: AutoplayScheduler,
    host: T,
    revision: u64,
    events: VecDeque<CarouselEvent>,
}

impl<H: Clone, T: TimerHost> CarouselController<H, T> {
    /// Creates a carousel over `pages` with the default configuration.
    ///
    /// Autoplay is armed immediately through `host`.
    pub fn new(pages: Vec<H>, host: T) -> Result<Self, CarouselError> {
        Self::with_config(pages, CarouselConfig::default(), host)
    }

    /// Creates a carousel over `pages` with `config`.
    ///
    /// The window starts centered on page `0`. Fails when `pages` holds three
    /// pages or fewer.
    pub fn with_config(
        pages: Vec<H>,
        config: CarouselConfig,
        host: T,
    ) -> Result<Self, CarouselError> {
        let window = PhysicalWindow::new(pages, 0)?;
        let geometry =
            AxisGeometry::new(config.axis).with_boundary_epsilon(config.boundary_epsilon);
        let mut carousel = Self {
            window,
            engine: RecycleEngine::new(geometry),
            viewport: Size::ZERO,
            position: 0.0,
            circling_enabled: config.circling_enabled,
            advance_duration_ms: config.autoplay.advance_duration_ms,
            advancing: false,
            interaction: Interaction::Idle,
            nested_gesture: false,
            autoplay: AutoplayScheduler::new(&config.autoplay),
            host,
            revision: 0,
            events: VecDeque::new(),
        };
        carousel.autoplay.restart(&mut carousel.host);
        Ok(carousel)
    }

    /// Replaces the page sequence.
    ///
    /// The window is rebound around page `0`, the position is recentered and
    /// autoplay restarts, abandoning any advance in flight. No rebind
    /// notifications are produced; read [`CarouselController::window_bindings`]
    /// after the reload. On error nothing changes.
    pub fn set_pages(&mut self, pages: Vec<H>) -> Result<(), CarouselError> {
        self.window = PhysicalWindow::new(pages, 0)?;
        self.advancing = false;
        self.reload();
        self.autoplay.restart(&mut self.host);
        Ok(())
    }

    /// Switches the scroll axis.
    ///
    /// A no-op if `axis` is already active. Otherwise the window is rebound
    /// around the current middle index, the position is recentered and
    /// autoplay restarts, abandoning any advance in flight.
    pub fn set_axis(&mut self, axis: Axis) {
        if axis == self.axis() {
            return;
        }
        let geometry = AxisGeometry::new(axis)
            .with_boundary_epsilon(self.engine.geometry().boundary_epsilon());
        self.engine = RecycleEngine::new(geometry);
        self.window.reset(self.window.middle_index());
        self.advancing = false;
        self.reload();
        self.autoplay.restart(&mut self.host);
    }

    /// Sets the viewport size, which determines the tile extent.
    ///
    /// The position is recentered on the middle tile. An advance in flight
    /// keeps running: recycling stays held until
    /// [`CarouselController::on_advance_complete`]. Fails on negative or
    /// non-finite sizes without changing anything.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<(), CarouselError> {
        for extent in [size.width, size.height] {
            if !(extent.is_finite() && extent >= 0.0) {
                return Err(CarouselError::InvalidViewportExtent { extent });
            }
        }
        if size == self.viewport {
            return Ok(());
        }
        self.viewport = size;
        self.reload();
        Ok(())
    }

    /// Turns slot recycling on or off.
    pub fn set_circling_enabled(&mut self, enabled: bool) {
        self.circling_enabled = enabled;
    }

    /// Enables or disables autoplay.
    pub fn set_autoplay_enabled(&mut self, enabled: bool) {
        self.autoplay.set_enabled(enabled, &mut self.host);
    }

    /// Sets the delay between autoplay advances, in milliseconds.
    ///
    /// Takes effect the next time the timer is armed.
    pub fn set_autoplay_interval_ms(&mut self, interval_ms: u64) {
        self.autoplay.set_interval_ms(interval_ms);
    }

    /// Sets the duration suggested in [`AdvanceRequest`]s, in milliseconds.
    pub fn set_advance_duration_ms(&mut self, duration_ms: u64) {
        self.advance_duration_ms = duration_ms;
    }

    /// Detaches the carousel from its presentation context.
    ///
    /// Autoplay stops and cannot re-arm until [`CarouselController::attach`].
    pub fn detach(&mut self) {
        self.autoplay.detach(&mut self.host);
    }

    /// Re-attaches the carousel and re-arms autoplay if allowed.
    pub fn attach(&mut self) {
        self.autoplay.attach(&mut self.host);
    }

    /// A drag or zoom gesture started. Cancels the pending autoplay timer.
    pub fn on_interaction_begin(&mut self) {
        self.interaction = Interaction::Dragging;
        self.update_suppression();
    }

    /// The drag gesture ended.
    ///
    /// Without momentum autoplay resumes now; with momentum it resumes on
    /// [`CarouselController::on_settle_complete`].
    pub fn on_interaction_end(&mut self, will_settle_with_momentum: bool) {
        self.interaction = if will_settle_with_momentum {
            Interaction::Settling
        } else {
            Interaction::Idle
        };
        self.update_suppression();
    }

    /// Momentum-driven motion came to rest. Resumes autoplay if allowed.
    ///
    /// Gesture notifications that do not change whether the carousel is
    /// interacting leave a pending timer alone.
    pub fn on_settle_complete(&mut self) {
        self.interaction = Interaction::Idle;
        self.update_suppression();
    }

    /// Handles a viewport position change, recycling slots if needed.
    ///
    /// The returned position and rebind must be applied together.
    /// While an autoplay advance is in flight, or with circling off, the
    /// position passes through unchanged.
    pub fn on_viewport_position_changed(&mut self, position: f64) -> PositionUpdate<H> {
        if self.advancing || !self.circling_enabled {
            self.position = position;
            return self.unchanged();
        }
        let tile = self.tile_extent();
        let recycle = self.engine.evaluate(&mut self.window, position, tile);
        self.position = recycle.position;
        PositionUpdate {
            position: self.position,
            middle_index: self.window.middle_index(),
            rebind: recycle.shift.map(|shift| shift.rebind),
        }
    }

    /// Handles an autoplay timer delivered by the host.
    ///
    /// Returns the advance to animate if `id` is the pending autoplay timer.
    /// Recycling is held until [`CarouselController::on_advance_complete`].
    pub fn on_autoplay_timer(&mut self, id: TimerId) -> Option<AdvanceRequest> {
        if !self.autoplay.fire(id) {
            return None;
        }
        self.advancing = true;
        let request = AdvanceRequest {
            from: self.position,
            to: self.tile_extent() * 2.0,
            duration_ms: self.advance_duration_ms,
        };
        log::trace!("autoplay advance {} -> {}", request.from, request.to);
        Some(request)
    }

    /// The host finished an advance animation.
    ///
    /// Recycles at the current position and re-arms autoplay unless an
    /// interaction started meanwhile.
    pub fn on_advance_complete(&mut self) -> PositionUpdate<H> {
        self.advancing = false;
        let update = self.on_viewport_position_changed(self.position);
        self.autoplay.complete_advance(&mut self.host);
        update
    }

    /// A page's zoom/pan content reported its geometry.
    ///
    /// A live nested gesture holds autoplay like an interaction on the
    /// carousel itself.
    pub fn on_content_geometry_changed(&mut self, state: &InternalGeometryState) {
        let interacting = state.is_interacting();
        if interacting != self.nested_gesture {
            self.nested_gesture = interacting;
            self.update_suppression();
        }
    }

    /// Handles one event. This is the single entry point behind every
    /// `on_*` method.
    pub fn dispatch(&mut self, event: CarouselEvent) -> CarouselOutput<H> {
        match event {
            CarouselEvent::ViewportPositionChanged(position) => {
                CarouselOutput::Position(self.on_viewport_position_changed(position))
            }
            CarouselEvent::InteractionBegan => {
                self.on_interaction_begin();
                CarouselOutput::None
            }
            CarouselEvent::InteractionEnded {
                will_settle_with_momentum,
            } => {
                self.on_interaction_end(will_settle_with_momentum);
                CarouselOutput::None
            }
            CarouselEvent::SettleCompleted => {
                self.on_settle_complete();
                CarouselOutput::None
            }
            CarouselEvent::AutoplayTimerFired(id) => self
                .on_autoplay_timer(id)
                .map_or(CarouselOutput::None, CarouselOutput::Advance),
            CarouselEvent::AdvanceCompleted => {
                CarouselOutput::Position(self.on_advance_complete())
            }
            CarouselEvent::ContentGeometryChanged(state) => {
                self.on_content_geometry_changed(&state);
                CarouselOutput::None
            }
        }
    }

    /// Queues an event for [`CarouselController::process_events`].
    pub fn push_event(&mut self, event: CarouselEvent) {
        self.events.push_back(event);
    }

    /// Dispatches queued events in arrival order, returning every output
    /// that is not [`CarouselOutput::None`].
    pub fn process_events(&mut self) -> Vec<CarouselOutput<H>> {
        let mut outputs = Vec::new();
        while let Some(event) = self.events.pop_front() {
            match self.dispatch(event) {
                CarouselOutput::None => {}
                output => outputs.push(output),
            }
        }
        outputs
    }

    /// Logical index bound to the middle slot.
    #[must_use]
    pub fn middle_index(&self) -> usize {
        self.window.middle_index()
    }

    /// The three slot bindings in layout order.
    #[must_use]
    pub fn window_bindings(&self) -> &[Binding<H>; SLOT_COUNT] {
        self.window.bindings()
    }

    /// The physical window.
    #[must_use]
    pub fn window(&self) -> &PhysicalWindow<H> {
        &self.window
    }

    /// Current viewport position along the axis.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Active scroll axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.engine.geometry().axis()
    }

    /// Geometry for the active axis.
    #[must_use]
    pub fn geometry(&self) -> AxisGeometry {
        self.engine.geometry()
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Tile extent: the viewport size along the axis.
    #[must_use]
    pub fn tile_extent(&self) -> f64 {
        self.geometry().tile_extent(self.viewport)
    }

    /// Size of the three-tile content strip.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.geometry().content_size(self.viewport)
    }

    /// Frame of `slot` in content coordinates.
    #[must_use]
    pub fn slot_rect(&self, slot: SlotPosition) -> Rect {
        self.geometry().slot_rect(slot, self.viewport)
    }

    /// Returns `true` if slot recycling is on.
    #[must_use]
    pub fn is_circling_enabled(&self) -> bool {
        self.circling_enabled
    }

    /// Returns `true` while an autoplay advance is in flight.
    #[must_use]
    pub fn is_advancing(&self) -> bool {
        self.advancing
    }

    /// Returns `true` while a gesture on the carousel (including momentum)
    /// or on nested content holds autoplay.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.interaction != Interaction::Idle || self.nested_gesture
    }

    /// Current autoplay state.
    #[must_use]
    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// The autoplay scheduler.
    #[must_use]
    pub fn autoplay(&self) -> &AutoplayScheduler {
        &self.autoplay
    }

    /// Counter bumped on every full reload of the window.
    ///
    /// Hosts rebuild all three slots from
    /// [`CarouselController::window_bindings`] when this changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The timer host.
    #[must_use]
    pub fn host(&self) -> &T {
        &self.host
    }

    /// Mutable access to the timer host.
    ///
    /// Cancelling the carousel's pending timer through this reference leaves
    /// autoplay armed with a timer that never fires; use
    /// [`CarouselController::set_autoplay_enabled`] instead.
    pub fn host_mut(&mut self) -> &mut T {
        &mut self.host
    }

    fn reload(&mut self) {
        self.position = self.geometry().centered_position(self.tile_extent());
        self.revision += 1;
        log::debug!(
            "reloaded window {:?} on {} axis, position {}",
            self.window.indices(),
            self.axis(),
            self.position
        );
    }

    fn unchanged(&self) -> PositionUpdate<H> {
        PositionUpdate {
            position: self.position,
            middle_index: self.window.middle_index(),
            rebind: None,
        }
    }

    fn update_suppression(&mut self) {
        let suppressed = self.is_interacting();
        if suppressed != self.autoplay.is_suppressed() {
            self.autoplay.set_suppressed(suppressed, &mut self.host);
        }
    }
}

impl<H: Clone, T: TimerHost> GeometryListener for CarouselController<H, T> {
    fn geometry_changed(&mut self, state: &InternalGeometryState) {
        self.on_content_geometry_changed(state);
    }
}

impl<H, T: TimerHost> Drop for CarouselController<H, T> {
    fn drop(&mut self) {
        self.autoplay.cancel(&mut self.host);
    }
}
