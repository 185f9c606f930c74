// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change evaluation.
//!
//! Evaluation drains the stack's bookkeeping since the previous call:
//!
//! 1. **Lifecycle**: ids presented and dismissed, with ids that came and
//!    went between two evaluations dropped from both lists.
//! 2. **ANCHOR** / **SIZE**: drain dirty serials; dismissed overlays are
//!    filtered out.
//! 3. **Order**: whether the bottom-to-top order (and so the top entry)
//!    may have changed.
//!
//! Hosts use the result to re-run layout only for overlays that need it. A
//! container resize still invalidates every overlay; that is the host's call.

use alloc::vec::Vec;

use super::id::OverlayId;
use super::stack::OverlayStack;
use crate::dirty;

/// The set of changes produced by a single [`OverlayStack::evaluate`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayChanges {
    /// Overlays presented since the last evaluation, in presentation order.
    pub added: Vec<OverlayId>,
    /// Overlays dismissed since the last evaluation.
    pub removed: Vec<OverlayId>,
    /// Overlays whose anchor rectangle changed.
    pub anchors: Vec<OverlayId>,
    /// Overlays whose measured size changed.
    pub sizes: Vec<OverlayId>,
    /// Whether the stack order changed (an overlay was added or removed).
    pub order_changed: bool,
}

impl OverlayChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.anchors.clear();
        self.sizes.clear();
        self.order_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.order_changed
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.anchors.is_empty()
            && self.sizes.is_empty()
    }

    /// Returns whether `id` must have its position recomputed.
    #[must_use]
    pub fn needs_layout(&self, id: OverlayId) -> bool {
        self.added.contains(&id) || self.anchors.contains(&id) || self.sizes.contains(&id)
    }
}

impl<C> OverlayStack<C> {
    /// Drains pending changes.
    pub fn evaluate(&mut self) -> OverlayChanges {
        let mut changes = OverlayChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut OverlayChanges) {
        changes.clear();

        changes.added.append(&mut self.pending_added);
        changes.removed.append(&mut self.pending_removed);
        changes.order_changed = core::mem::take(&mut self.order_dirty);

        let anchors: Vec<u64> = self
            .dirty
            .drain(dirty::ANCHOR)
            .affected()
            .deterministic()
            .run()
            .collect();
        changes.anchors.extend(self.live_ids(&anchors));

        let sizes: Vec<u64> = self
            .dirty
            .drain(dirty::SIZE)
            .affected()
            .deterministic()
            .run()
            .collect();
        changes.sizes.extend(self.live_ids(&sizes));
    }

    fn live_ids<'a>(&'a self, serials: &'a [u64]) -> impl Iterator<Item = OverlayId> + 'a {
        serials
            .iter()
            .map(|&serial| OverlayId { serial })
            .filter(|&id| self.contains_id(id))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Rect, Size, Vec2};

    use super::*;
    use crate::overlay::entry::OverlayRequest;

    fn push(stack: &mut OverlayStack<()>) -> OverlayId {
        let id = stack.allot_id();
        stack.push(id, OverlayRequest::centered(Vec2::ZERO, ()));
        id
    }

    #[test]
    fn evaluate_reports_added_once() {
        let mut stack = OverlayStack::new();
        let a = push(&mut stack);

        let changes = stack.evaluate();
        assert_eq!(changes.added, vec![a]);
        assert!(changes.order_changed);
        assert!(changes.needs_layout(a));

        assert!(stack.evaluate().is_empty(), "second evaluate drains nothing");
    }

    #[test]
    fn evaluate_reports_removed() {
        let mut stack = OverlayStack::new();
        let a = push(&mut stack);
        let _ = stack.evaluate();

        stack.remove_ids(&[a]);
        let changes = stack.evaluate();
        assert_eq!(changes.removed, vec![a]);
        assert!(changes.added.is_empty());
        assert!(changes.order_changed);
    }

    #[test]
    fn transient_overlay_is_invisible_to_evaluate() {
        let mut stack = OverlayStack::new();
        let a = push(&mut stack);
        stack.remove_ids(&[a]);

        let changes = stack.evaluate();
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn geometry_channels_are_drained() {
        let mut stack = OverlayStack::new();
        let a = push(&mut stack);
        let b = push(&mut stack);
        let _ = stack.evaluate();

        stack.set_anchor(a, Some(Rect::new(0.0, 0.0, 4.0, 4.0)));
        stack.set_size(b, Some(Size::new(10.0, 10.0)));
        let changes = stack.evaluate();
        assert_eq!(changes.anchors, vec![a]);
        assert_eq!(changes.sizes, vec![b]);
        assert!(!changes.order_changed);
        assert!(changes.needs_layout(a) && changes.needs_layout(b));

        assert!(stack.evaluate().is_empty());
    }

    #[test]
    fn dismissed_overlays_drop_pending_geometry() {
        let mut stack = OverlayStack::new();
        let a = push(&mut stack);
        let _ = stack.evaluate();

        stack.set_size(a, Some(Size::new(10.0, 10.0)));
        stack.remove_ids(&[a]);
        let changes = stack.evaluate();
        assert!(changes.sizes.is_empty());
        assert_eq!(changes.removed, vec![a]);
    }
}
