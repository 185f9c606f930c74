// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for rendering integrations.
//!
//! The core never draws. A *host* (a retained UI toolkit, an immediate-mode
//! renderer, a terminal UI) provides the following pieces:
//!
//! - **Observation**: Subscribes a
//!   [`StackObserver`](crate::overlay::StackObserver) so it knows when to
//!   schedule a render pass.
//!
//! - **Geometry feedback**: Uses
//!   [`AnchorReporter`](crate::tracking::AnchorReporter) and
//!   [`SizeReporter`](crate::tracking::SizeReporter) to report trigger
//!   rectangles and measured content sizes, in the manager's
//!   [`CoordinateSpace`](crate::geometry::CoordinateSpace).
//!
//! - **Presenter**: Implements [`OverlayHost`] to apply
//!   [`OverlayChanges`] to its own tree: mount added overlays, tear down
//!   removed ones, and reposition those whose geometry changed.
//!
//! - **Input**: Routes taps on the barrier to
//!   [`OverlayManager::handle_background_tap`].

use crate::overlay::{OverlayChanges, OverlayManager};

/// Applies evaluated overlay changes to a host-native presentation tree.
///
/// Implementing this trait enables generic render loops and test doubles.
///
/// # Render pass pseudocode
///
/// ```rust,ignore
/// fn on_render(container: Size) {
///     // Evaluate: drain lifecycle and geometry changes
///     let changes = manager.evaluate();
///
///     // Present: mount, unmount, and reposition native views
///     host.apply(&manager, &changes);
///
///     // Layout: place measured overlays, keep the rest transparent
///     for (id, position) in manager.layout_all(container) {
///         host.place(id, position);
///     }
/// }
/// ```
pub trait OverlayHost<C> {
    /// Applies the given [`OverlayChanges`] to the backing tree, reading
    /// current entry state from `manager` as needed.
    fn apply(&mut self, manager: &OverlayManager<C>, changes: &OverlayChanges);
}
