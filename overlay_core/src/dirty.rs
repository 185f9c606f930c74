// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Geometry reports arrive far more often than the host renders, so the
//! [`OverlayStack`](crate::overlay::OverlayStack) records which entries had
//! their anchor or measured size changed (via [`understory_dirty`]) and lets
//! the host drain them once per pass.
//!
//! Both channels are local-only: overlays have no parent/child relationship,
//! so nothing propagates between entries.
//!
//! # Consumption
//!
//! Each [`OverlayManager::evaluate`](crate::overlay::OverlayManager::evaluate)
//! call drains both channels and surfaces the results as
//! [`OverlayChanges`](crate::overlay::OverlayChanges), which hosts
//! [consume](crate::host::OverlayHost::apply) to re-run layout only where
//! needed.

use understory_dirty::Channel;

/// Anchor rectangle changed or was cleared.
pub const ANCHOR: Channel = Channel::new(0);

/// Measured content size changed or was cleared.
pub const SIZE: Channel = Channel::new(1);
