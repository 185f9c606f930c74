// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State-change notification.
//!
//! Observers are called synchronously, in registration order, after the
//! stack has been updated and before the mutating call returns. Exactly one
//! [`StackEvent`] is delivered per observable change; calls that leave the
//! stack untouched deliver nothing.

use alloc::vec::Vec;

use super::id::OverlayId;
use super::stack::OverlayStack;

/// Why overlays were dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// [`dismiss_top`](super::OverlayManager::dismiss_top), including
    /// background-tap dismissal.
    Top,
    /// [`dismiss`](super::OverlayManager::dismiss).
    Id,
    /// [`dismiss_by_key`](super::OverlayManager::dismiss_by_key).
    Key,
    /// [`dismiss_all`](super::OverlayManager::dismiss_all).
    All,
}

/// A single observable change to the overlay stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackEvent {
    /// A new overlay was pushed on top.
    Presented {
        /// The new overlay.
        id: OverlayId,
    },
    /// Overlays sharing a key were removed and a new one pushed on top.
    Replaced {
        /// The overlays that were removed.
        removed: Vec<OverlayId>,
        /// The new overlay.
        id: OverlayId,
    },
    /// One or more overlays were removed.
    Dismissed {
        /// The removed overlays, bottom to top.
        ids: Vec<OverlayId>,
        /// Which operation removed them.
        reason: DismissReason,
    },
    /// An overlay's anchor rectangle was set or cleared.
    AnchorChanged {
        /// The overlay.
        id: OverlayId,
    },
    /// An overlay's measured size was set or cleared.
    SizeChanged {
        /// The overlay.
        id: OverlayId,
    },
}

/// Receives stack change notifications.
///
/// Implemented for every `FnMut(&OverlayStack<C>, &StackEvent)` closure.
pub trait StackObserver<C> {
    /// Called after the stack changed.
    fn on_change(&mut self, stack: &OverlayStack<C>, event: &StackEvent);
}

impl<C, F> StackObserver<C> for F
where
    F: FnMut(&OverlayStack<C>, &StackEvent),
{
    fn on_change(&mut self, stack: &OverlayStack<C>, event: &StackEvent) {
        self(stack, event);
    }
}
