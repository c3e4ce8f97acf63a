// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::window::MIN_PAGE_COUNT;

/// Precondition violations reported by carousel operations.
///
/// An operation that returns one of these has not changed any state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CarouselError {
    /// The page sequence was empty.
    #[error("page sequence is empty")]
    EmptyPages,
    /// The page sequence is too short to recycle three slots.
    #[error("page count ({count}) must be greater than 3")]
    TooFewPages {
        /// Number of pages supplied.
        count: usize,
    },
    /// An axis name did not match `horizontal` or `vertical`.
    #[error("invalid axis `{0}`, expected `horizontal` or `vertical`")]
    InvalidAxis(String),
    /// A viewport extent was negative, NaN or infinite.
    #[error("invalid viewport extent {extent}")]
    InvalidViewportExtent {
        /// The rejected extent.
        extent: f64,
    },
}

/// Checks that `count` pages are enough to fill and recycle the window.
pub(crate) fn check_page_count(count: usize) -> Result<(), CarouselError> {
    match count {
        0 => Err(CarouselError::EmptyPages),
        n if n <= MIN_PAGE_COUNT => Err(CarouselError::TooFewPages { count: n }),
        _ => Ok(()),
    }
}
