// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three physical slots and their binding to logical pages.

use alloc::vec::Vec;

use crate::axis::Direction;
use crate::error::{CarouselError, check_page_count};

/// Number of physical slots in a window.
pub const SLOT_COUNT: usize = 3;

/// A page sequence must be strictly longer than this to recycle slots.
pub(crate) const MIN_PAGE_COUNT: usize = SLOT_COUNT;

/// Physical position of a slot along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    /// Left slot (horizontal) or top slot (vertical).
    Leading,
    /// Middle slot, shown when the carousel is at rest.
    Middle,
    /// Right slot (horizontal) or bottom slot (vertical).
    Trailing,
}

impl SlotPosition {
    /// All slot positions in layout order.
    pub const ALL: [Self; SLOT_COUNT] = [Self::Leading, Self::Middle, Self::Trailing];

    /// Zero-based position of the slot in layout order.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Leading => 0,
            Self::Middle => 1,
            Self::Trailing => 2,
        }
    }
}

/// A logical page bound to a physical slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding<H> {
    /// Logical index of the page in the page sequence.
    pub index: usize,
    /// The page's content handle.
    pub handle: H,
}

/// Notification that one slot was rebound during a shift.
///
/// Presentation layers detach `evicted` from their tree and attach `loaded`
/// at `slot`, in the same frame as applying the rewound position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRebind<H> {
    /// Slot that received the new page.
    pub slot: SlotPosition,
    /// Handle that left the window.
    pub evicted: H,
    /// Logical index of the evicted page.
    pub evicted_index: usize,
    /// Handle that entered the window.
    pub loaded: H,
    /// Logical index of the loaded page.
    pub loaded_index: usize,
}

/// Result of [`PhysicalWindow::shift`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shift<H> {
    /// Middle index after the shift.
    pub middle_index: usize,
    /// The slot that was rebound.
    pub rebind: SlotRebind<H>,
}

/// Three slots bound to consecutive logical pages of a circular sequence.
///
/// For `N` pages and middle index `m`, the slots always hold pages
/// `(m - 1 + N) % N`, `m` and `(m + 1) % N`, in layout order. The only way to
/// move the window is [`PhysicalWindow::shift`], which rebinds exactly one
/// slot; [`PhysicalWindow::reset`] rebinds all three without notifications.
#[derive(Clone, Debug)]
pub struct PhysicalWindow<H> {
    pages: Vec<H>,
    middle: usize,
    slots: [Binding<H>; SLOT_COUNT],
}

impl<H: Clone> PhysicalWindow<H> {
    /// Binds the window to `pages`, centered on `start`.
    ///
    /// Fails without allocating a window when `pages` holds three pages or
    /// fewer.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not a valid index into `pages`.
    pub fn new(pages: Vec<H>, start: usize) -> Result<Self, CarouselError> {
        check_page_count(pages.len())?;
        assert!(
            start < pages.len(),
            "start index {start} out of range for {} pages",
            pages.len()
        );
        let slots = Self::bind(&pages, start);
        Ok(Self {
            pages,
            middle: start,
            slots,
        })
    }

    /// Returns the logical index bound to the middle slot.
    #[must_use]
    pub fn middle_index(&self) -> usize {
        self.middle
    }

    /// Returns the number of logical pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the full logical page sequence.
    #[must_use]
    pub fn pages(&self) -> &[H] {
        &self.pages
    }

    /// Returns the three bindings in layout order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding<H>; SLOT_COUNT] {
        &self.slots
    }

    /// Returns the binding of one slot.
    #[must_use]
    pub fn binding(&self, slot: SlotPosition) -> &Binding<H> {
        &self.slots[slot.ordinal()]
    }

    /// Returns the three bound logical indices in layout order.
    #[must_use]
    pub fn indices(&self) -> [usize; SLOT_COUNT] {
        [self.slots[0].index, self.slots[1].index, self.slots[2].index]
    }

    /// Rebinds all three slots around `start` without emitting rebinds.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not a valid index into the page sequence.
    pub fn reset(&mut self, start: usize) {
        assert!(
            start < self.pages.len(),
            "start index {start} out of range for {} pages",
            self.pages.len()
        );
        self.slots = Self::bind(&self.pages, start);
        self.middle = start;
    }

    /// Moves the window one page in `direction`.
    ///
    /// The slot on the side opposite to `direction` is evicted, the remaining
    /// two move one position towards it, and the page that follows the window
    /// in `direction` is loaded into the freed slot.
    pub fn shift(&mut self, direction: Direction) -> Shift<H> {
        let n = self.pages.len();
        let (slot, evicted, loaded_index) = match direction {
            Direction::Forward => {
                let loaded_index = (self.middle + 2) % n;
                let loaded = self.binding_for(loaded_index);
                self.slots.rotate_left(1);
                let evicted = core::mem::replace(&mut self.slots[2], loaded);
                self.middle = (self.middle + 1) % n;
                (SlotPosition::Trailing, evicted, loaded_index)
            }
            Direction::Backward => {
                let loaded_index = (self.middle + n - 2) % n;
                let loaded = self.binding_for(loaded_index);
                self.slots.rotate_right(1);
                let evicted = core::mem::replace(&mut self.slots[0], loaded);
                self.middle = (self.middle + n - 1) % n;
                (SlotPosition::Leading, evicted, loaded_index)
            }
        };
        debug_assert_eq!(
            self.indices(),
            Self::expected_indices(n, self.middle),
            "window out of step with middle index"
        );
        Shift {
            middle_index: self.middle,
            rebind: SlotRebind {
                slot,
                evicted: evicted.handle,
                evicted_index: evicted.index,
                loaded: self.slots[slot.ordinal()].handle.clone(),
                loaded_index,
            },
        }
    }

    fn binding_for(&self, index: usize) -> Binding<H> {
        Binding {
            index,
            handle: self.pages[index].clone(),
        }
    }

    fn bind(pages: &[H], middle: usize) -> [Binding<H>; SLOT_COUNT] {
        Self::expected_indices(pages.len(), middle).map(|index| Binding {
            index,
            handle: pages[index].clone(),
        })
    }

    fn expected_indices(n: usize, middle: usize) -> [usize; SLOT_COUNT] {
        [(middle + n - 1) % n, middle, (middle + 1) % n]
    }
}
