// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration.

use crate::axis::{Axis, DEFAULT_BOUNDARY_EPSILON};

/// Default delay between autoplay advances, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 2_500;

/// Default duration of one autoplay advance animation, in milliseconds.
pub const DEFAULT_ADVANCE_DURATION_MS: u64 = 300;

/// Autoplay settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoplayConfig {
    /// Whether autoplay runs at all.
    pub enabled: bool,
    /// Delay between the end of one advance (or interaction) and the next advance.
    pub interval_ms: u64,
    /// Suggested duration for the host's advance animation.
    pub advance_duration_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            advance_duration_ms: DEFAULT_ADVANCE_DURATION_MS,
        }
    }
}

/// Carousel settings.
///
/// ```rust
/// use understory_carousel::{Axis, CarouselConfig};
///
/// let config = CarouselConfig {
///     axis: Axis::Vertical,
///     ..CarouselConfig::default()
/// };
/// assert!(config.autoplay.enabled);
/// assert_eq!(config.autoplay.interval_ms, 2_500);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Initial scroll axis.
    pub axis: Axis,
    /// Whether slots are recycled as the viewport approaches an edge.
    ///
    /// With circling off the window stays put and the carousel behaves like a
    /// plain three-page strip.
    pub circling_enabled: bool,
    /// Tolerance applied to recycle thresholds, in position units.
    pub boundary_epsilon: f64,
    /// Autoplay settings.
    pub autoplay: AutoplayConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            circling_enabled: true,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
            autoplay: AutoplayConfig::default(),
        }
    }
}
