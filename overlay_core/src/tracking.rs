// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry reporting from rendered elements back into the manager.
//!
//! Rendered elements report through small per-element helpers:
//!
//! - A trigger element owns an [`AnchorReporter`] and reports its live
//!   rectangle on mount and on every geometry change (resize, scroll,
//!   rotation). On unmount it reports "no rectangle", so the manager never
//!   keeps geometry for a trigger that is gone.
//! - Presented content owns a [`SizeReporter`] and reports its measured size
//!   on mount and on every change. On unmount it reports "no size", which
//!   puts the overlay back into the not-yet-measured state.
//!
//! Background taps on the barrier are routed through
//! [`OverlayManager::handle_background_tap`], which reports a [`TapOutcome`].

use kurbo::{Rect, Size};

use crate::geometry::CoordinateSpace;
use crate::overlay::{OverlayId, OverlayManager};

/// What a background tap did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapOutcome {
    /// The stack was empty.
    NoOverlay,
    /// A custom handler registered for the top overlay ran instead of the
    /// default behaviour.
    Handled(OverlayId),
    /// The top overlay was dismissed by its
    /// [`TapOutsideDismisses`](crate::overlay::DismissPolicy::TapOutsideDismisses) policy.
    Dismissed(OverlayId),
    /// The top overlay only dismisses programmatically; nothing happened.
    Ignored(OverlayId),
}

/// Reports a trigger element's rectangle for an anchored overlay.
///
/// Reports made in a coordinate space other than the manager's are dropped,
/// since they cannot be compared with the container frame.
#[derive(Clone, Copy, Debug)]
pub struct AnchorReporter {
    target: OverlayId,
    space: CoordinateSpace,
}

impl AnchorReporter {
    /// Creates a reporter for `target`, measuring in `space`.
    #[must_use]
    pub const fn new(target: OverlayId, space: CoordinateSpace) -> Self {
        Self { target, space }
    }

    /// Returns the overlay this reporter feeds.
    #[must_use]
    pub const fn target(&self) -> OverlayId {
        self.target
    }

    /// Reports the rectangle of a freshly mounted trigger.
    pub fn mounted<C>(&self, manager: &mut OverlayManager<C>, rect: Rect) {
        self.report(manager, Some(rect));
    }

    /// Reports a changed trigger rectangle.
    pub fn geometry_changed<C>(&self, manager: &mut OverlayManager<C>, rect: Rect) {
        self.report(manager, Some(rect));
    }

    /// Reports that the trigger was torn down.
    pub fn unmounted<C>(&self, manager: &mut OverlayManager<C>) {
        self.report(manager, None);
    }

    fn report<C>(&self, manager: &mut OverlayManager<C>, rect: Option<Rect>) {
        if self.space != manager.coordinate_space() {
            return;
        }
        manager.update_anchor(self.target, rect);
    }
}

/// Reports an overlay's measured content size.
#[derive(Clone, Copy, Debug)]
pub struct SizeReporter {
    target: OverlayId,
}

impl SizeReporter {
    /// Creates a reporter for `target`.
    #[must_use]
    pub const fn new(target: OverlayId) -> Self {
        Self { target }
    }

    /// Returns the overlay this reporter feeds.
    #[must_use]
    pub const fn target(&self) -> OverlayId {
        self.target
    }

    /// Reports the size of freshly mounted content.
    pub fn mounted<C>(&self, manager: &mut OverlayManager<C>, size: Size) {
        manager.update_size(self.target, Some(size));
    }

    /// Reports a changed content size.
    pub fn resized<C>(&self, manager: &mut OverlayManager<C>, size: Size) {
        manager.update_size(self.target, Some(size));
    }

    /// Reports that the content was torn down.
    pub fn unmounted<C>(&self, manager: &mut OverlayManager<C>) {
        manager.update_size(self.target, None);
    }
}
