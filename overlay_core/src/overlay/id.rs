// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay and subscription identity types.

use core::fmt;

/// A handle to an overlay presented by an [`OverlayManager`](super::OverlayManager).
///
/// Ids are allotted from a per-manager counter and never reused, so a handle
/// to a dismissed overlay simply stops matching anything.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId {
    pub(crate) serial: u64,
}

impl OverlayId {
    /// Returns the raw serial number (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn serial(self) -> u64 {
        self.serial
    }
}

impl fmt::Debug for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OverlayId({})", self.serial)
    }
}

/// Identifies an observer registered with
/// [`OverlayManager::subscribe`](super::OverlayManager::subscribe).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u32);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}
