// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot recycling: the circular illusion.

use crate::axis::{AxisGeometry, Direction, Zone};
use crate::window::{MIN_PAGE_COUNT, PhysicalWindow, Shift};

/// Outcome of evaluating one position change.
#[derive(Clone, Debug, PartialEq)]
pub struct Recycle<H> {
    /// Position to apply, rewound by one tile if a shift happened.
    pub position: f64,
    /// The shift performed, if any.
    pub shift: Option<Shift<H>>,
}

impl<H> Recycle<H> {
    fn unchanged(position: f64) -> Self {
        Self {
            position,
            shift: None,
        }
    }
}

/// Decides when the window must shift and performs the shift and rewind.
///
/// Evaluation performs at most one shift. After a shift the rewound position
/// lies more than half a tile inside the opposite threshold, so evaluating
/// again at the rewound position is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RecycleEngine {
    geometry: AxisGeometry,
}

impl RecycleEngine {
    /// Creates an engine using `geometry` for zone classification.
    #[must_use]
    pub const fn new(geometry: AxisGeometry) -> Self {
        Self { geometry }
    }

    /// Returns the geometry used for zone classification.
    #[must_use]
    pub const fn geometry(&self) -> AxisGeometry {
        self.geometry
    }

    /// Evaluates `position` against `window`, shifting it when the viewport is
    /// within half a tile of either edge of the strip.
    ///
    /// # Panics
    ///
    /// Panics if the window holds three pages or fewer.
    pub fn evaluate<H: Clone>(
        &self,
        window: &mut PhysicalWindow<H>,
        position: f64,
        tile: f64,
    ) -> Recycle<H> {
        assert!(
            window.page_count() > MIN_PAGE_COUNT,
            "recycling requires more than {MIN_PAGE_COUNT} pages, window has {}",
            window.page_count()
        );
        let direction = match self.geometry.zone_of(position, tile) {
            Zone::NearTrailing => Direction::Forward,
            Zone::NearLeading => Direction::Backward,
            Zone::Center | Zone::Other => return Recycle::unchanged(position),
        };
        let shift = window.shift(direction);
        let position = self.geometry.rewind(position, tile, direction);
        log::debug!(
            "recycled {direction:?}: middle index {}, position {position}",
            shift.middle_index
        );
        Recycle {
            position,
            shift: Some(shift),
        }
    }
}
