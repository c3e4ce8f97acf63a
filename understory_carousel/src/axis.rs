// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll axis and the pure geometry of the three-tile strip.
//!
//! Positions are offsets of the viewport's leading edge into a strip of three
//! viewport-sized tiles laid out along the active axis. A position of one tile
//! extent shows the middle tile exactly.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

use crate::error::CarouselError;
use crate::window::SlotPosition;

/// Default tolerance, in position units, applied to recycle thresholds.
pub const DEFAULT_BOUNDARY_EPSILON: f64 = 1e-6;

/// Scroll axis of a carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Tiles are laid out left to right.
    #[default]
    Horizontal,
    /// Tiles are laid out top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the lowercase name of the axis.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("horizontal") {
            Ok(Self::Horizontal)
        } else if s.eq_ignore_ascii_case("vertical") {
            Ok(Self::Vertical)
        } else {
            Err(CarouselError::InvalidAxis(s.to_string()))
        }
    }
}

/// Direction of travel through the logical page sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the next page (right / down).
    Forward,
    /// Towards the previous page (left / up).
    Backward,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Classification of a position relative to the recycle thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Less than half a tile from the leading edge of the strip.
    NearLeading,
    /// Showing the middle tile exactly (within the boundary epsilon).
    Center,
    /// Less than half a tile from the trailing edge of the strip.
    NearTrailing,
    /// Anywhere else.
    Other,
}

/// Pure geometry helpers for one axis.
///
/// `AxisGeometry` holds only parameters (the axis and the boundary epsilon)
/// and never changes; every method is a pure function of its inputs.
///
/// ## Boundary policy
///
/// A position crosses a recycle threshold only when its distance to the outer
/// edge is strictly less than `0.5 * tile - boundary_epsilon`. Positions that
/// sit on the threshold, or within epsilon of it, are treated as not yet
/// crossing. This keeps a carousel at rest from flickering between shifts when
/// fractional pixel offsets round differently across platforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGeometry {
    axis: Axis,
    boundary_epsilon: f64,
}

impl Default for AxisGeometry {
    fn default() -> Self {
        Self::new(Axis::default())
    }
}

impl AxisGeometry {
    /// Creates geometry for `axis` with [`DEFAULT_BOUNDARY_EPSILON`].
    #[must_use]
    pub const fn new(axis: Axis) -> Self {
        Self {
            axis,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
        }
    }

    /// Returns a copy using `epsilon` as the boundary tolerance.
    ///
    /// Negative and NaN values are treated as zero.
    #[must_use]
    pub fn with_boundary_epsilon(self, epsilon: f64) -> Self {
        Self {
            boundary_epsilon: if epsilon > 0.0 { epsilon } else { 0.0 },
            ..self
        }
    }

    /// Returns the axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the boundary tolerance.
    #[must_use]
    pub const fn boundary_epsilon(&self) -> f64 {
        self.boundary_epsilon
    }

    /// Tile extent for a viewport: the viewport's size along the axis.
    #[must_use]
    pub fn tile_extent(&self, viewport: Size) -> f64 {
        match self.axis {
            Axis::Horizontal => viewport.width,
            Axis::Vertical => viewport.height,
        }
    }

    /// Size of the scrollable content: three tiles along the axis.
    #[must_use]
    pub fn content_size(&self, viewport: Size) -> Size {
        match self.axis {
            Axis::Horizontal => Size::new(viewport.width * 3.0, viewport.height),
            Axis::Vertical => Size::new(viewport.width, viewport.height * 3.0),
        }
    }

    /// Position that shows the middle tile exactly.
    #[must_use]
    pub fn centered_position(&self, tile: f64) -> f64 {
        tile
    }

    /// Converts a position into a content offset point.
    #[must_use]
    pub fn offset_point(&self, position: f64) -> Point {
        match self.axis {
            Axis::Horizontal => Point::new(position, 0.0),
            Axis::Vertical => Point::new(0.0, position),
        }
    }

    /// Extracts the position from a content offset point.
    #[must_use]
    pub fn position_of(&self, offset: Point) -> f64 {
        match self.axis {
            Axis::Horizontal => offset.x,
            Axis::Vertical => offset.y,
        }
    }

    /// Frame of a slot inside the content, in content coordinates.
    #[must_use]
    pub fn slot_rect(&self, slot: SlotPosition, viewport: Size) -> Rect {
        let along = self.tile_extent(viewport) * slot.ordinal() as f64;
        Rect::from_origin_size(self.offset_point(along), viewport)
    }

    /// Classifies `position` against the recycle thresholds.
    ///
    /// Returns [`Zone::Other`] when `tile` is not a positive finite extent
    /// (for example before the first layout).
    #[must_use]
    pub fn zone_of(&self, position: f64, tile: f64) -> Zone {
        if !(tile > 0.0 && tile.is_finite() && position.is_finite()) {
            return Zone::Other;
        }
        let threshold = tile * 0.5 - self.boundary_epsilon;
        let to_leading_edge = position;
        let to_trailing_edge = 2.0 * tile - position;
        if to_leading_edge < threshold {
            Zone::NearLeading
        } else if to_trailing_edge < threshold {
            Zone::NearTrailing
        } else if (position - tile).abs() <= self.boundary_epsilon {
            Zone::Center
        } else {
            Zone::Other
        }
    }

    /// Position adjustment applied after a shift so content does not jump.
    ///
    /// A forward shift moves content one tile towards the leading edge, so the
    /// position moves back by one tile; a backward shift is the mirror image.
    #[must_use]
    pub fn rewind(&self, position: f64, tile: f64, direction: Direction) -> f64 {
        match direction {
            Direction::Forward => position - tile,
            Direction::Backward => position + tile,
        }
    }
}
