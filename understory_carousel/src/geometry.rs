// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry reports from zoom/pan page content.
//!
//! Pages shown in a carousel may themselves be zoomable, pannable views, or
//! nested carousels. Such views own their gestures; they only report their
//! internal geometry to a [`GeometryListener`]. A carousel listening to its
//! pages uses the report to hold autoplay while a nested gesture is live.

use kurbo::{Affine, Insets, Point, Rect, Size, Vec2};

bitflags::bitflags! {
    /// Gesture activity of a zoom/pan content view.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureFlags: u8 {
        /// A touch or pointer is down on the view.
        const TRACKING      = 0b0000_0001;
        /// The view is being dragged.
        const DRAGGING      = 0b0000_0010;
        /// The view is settling after a fling.
        const DECELERATING  = 0b0000_0100;
        /// A zoom gesture is in progress.
        const ZOOMING       = 0b0000_1000;
        /// The zoom scale is bouncing back into its limits.
        const ZOOM_BOUNCING = 0b0001_0000;
    }
}

/// Snapshot of a zoom/pan content view's internal geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InternalGeometryState {
    /// Offset of the visible region into the content.
    pub content_offset: Point,
    /// Size of the (zoomed) content.
    pub content_size: Size,
    /// Inset applied around the content.
    pub content_inset: Insets,
    /// Bounds of the view in its own coordinates.
    pub bounds: Rect,
    /// Frame of the zoomed content view, when there is one.
    pub content_frame: Option<Rect>,
    /// Transform applied to the content view, when there is one.
    pub content_transform: Option<Affine>,
    /// Live gesture activity.
    pub gestures: GestureFlags,
}

impl InternalGeometryState {
    /// Returns `true` while any gesture is live on the view.
    #[must_use]
    pub fn is_interacting(&self) -> bool {
        !self.gestures.is_empty()
    }

    /// Padding that centers content smaller than the bounds.
    ///
    /// Each component is `(bounds - content) / 2` along that axis, or zero
    /// when the content already fills the bounds.
    #[must_use]
    pub fn centering_padding(&self) -> Vec2 {
        let dx = (self.bounds.width() - self.content_size.width) * 0.5;
        let dy = (self.bounds.height() - self.content_size.height) * 0.5;
        Vec2::new(dx.max(0.0), dy.max(0.0))
    }

    /// Zoom scale of the content transform, `1.0` when there is none.
    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.content_transform.map_or(1.0, |t| t.as_coeffs()[0])
    }
}

/// Receives geometry reports from a zoom/pan content view.
pub trait GeometryListener {
    /// Called whenever the reporting view lays out.
    fn geometry_changed(&mut self, state: &InternalGeometryState);
}
