// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered overlay storage with allocation, queries, and change bookkeeping.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker};

use super::entry::{Barrier, OverlayEntry, OverlayRequest};
use super::id::OverlayId;
use crate::dirty;

/// The ordered collection of active overlays.
///
/// Entries are kept bottom to top: insertion order is presentation order is
/// paint order, and the last entry is the only one eligible for input and
/// focus. The stack is read-only outside the crate; all mutation goes
/// through [`OverlayManager`](super::OverlayManager).
pub struct OverlayStack<C> {
    pub(crate) entries: Vec<OverlayEntry<C>>,

    // -- Allocation --
    pub(crate) next_serial: u64,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u64>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<OverlayId>,
    pub(crate) pending_removed: Vec<OverlayId>,
    pub(crate) order_dirty: bool,
}

impl<C> fmt::Debug for OverlayStack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayStack")
            .field("entries", &self.entries)
            .field("next_serial", &self.next_serial)
            .field("pending_added", &self.pending_added)
            .field("pending_removed", &self.pending_removed)
            .field("order_dirty", &self.order_dirty)
            .finish_non_exhaustive()
    }
}

impl<C> Default for OverlayStack<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> OverlayStack<C> {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_serial: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            order_dirty: false,
        }
    }

    // -- Queries --

    /// Returns the number of active overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no overlay is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the topmost overlay, the only one that receives input.
    #[must_use]
    pub fn top(&self) -> Option<&OverlayEntry<C>> {
        self.entries.last()
    }

    /// Returns the entries bottom to top.
    #[must_use]
    pub fn entries(&self) -> &[OverlayEntry<C>] {
        &self.entries
    }

    /// Iterates the entries bottom to top.
    pub fn iter(&self) -> core::slice::Iter<'_, OverlayEntry<C>> {
        self.entries.iter()
    }

    /// Returns the entry with the given id.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&OverlayEntry<C>> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the stack index (0 = bottom) of the entry with the given id.
    #[must_use]
    pub fn index_of(&self, id: OverlayId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Returns whether an entry with the given id is active.
    #[must_use]
    pub fn contains_id(&self, id: OverlayId) -> bool {
        self.index_of(id).is_some()
    }

    /// Returns whether any active entry carries `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key() == Some(key))
    }

    /// Returns the ids of entries carrying `key`, bottom to top.
    #[must_use]
    pub fn ids_for_key(&self, key: &str) -> Vec<OverlayId> {
        self.entries
            .iter()
            .filter(|e| e.key() == Some(key))
            .map(OverlayEntry::id)
            .collect()
    }

    /// Returns whether the entry with the given id is on top.
    #[must_use]
    pub fn is_top(&self, id: OverlayId) -> bool {
        self.top().is_some_and(|e| e.id == id)
    }

    /// Returns whether the top overlay blocks input to content beneath it.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        self.top().is_some_and(|e| e.barrier == Barrier::BlockAll)
    }

    // -- Mutation (crate-internal) --

    /// Allots the next id without storing anything.
    pub(crate) fn allot_id(&mut self) -> OverlayId {
        let serial = self.next_serial;
        // 64-bit serials cannot be exhausted by any realistic session.
        debug_assert!(serial != u64::MAX, "overlay id space exhausted");
        self.next_serial = serial.saturating_add(1);
        OverlayId { serial }
    }

    /// Appends a new entry on top.
    pub(crate) fn push(&mut self, id: OverlayId, request: OverlayRequest<C>) {
        debug_assert!(!self.contains_id(id), "duplicate {id:?}");
        let has_anchor = request.anchor_rect.is_some();
        self.entries.push(OverlayEntry::new(id, request));
        self.pending_added.push(id);
        self.order_dirty = true;
        if has_anchor {
            self.dirty.mark(id.serial, dirty::ANCHOR);
        }
    }

    /// Removes every entry whose id is in `ids`, returning how many were removed.
    pub(crate) fn remove_ids(&mut self, ids: &[OverlayId]) -> usize {
        let mut removed = Vec::new();
        self.entries.retain(|e| {
            let hit = ids.contains(&e.id);
            if hit {
                removed.push(e.id);
            }
            !hit
        });
        if removed.is_empty() {
            return 0;
        }

        for &id in &removed {
            self.dirty.remove_key(id.serial);
            // An entry added and removed between two evaluations was never
            // observed by the host, so it appears in neither list.
            if let Some(pos) = self.pending_added.iter().position(|&a| a == id) {
                self.pending_added.remove(pos);
            } else {
                self.pending_removed.push(id);
            }
        }
        self.order_dirty = true;
        removed.len()
    }

    /// Sets the anchor of `id`. Returns `false` if absent or unchanged.
    pub(crate) fn set_anchor(&mut self, id: OverlayId, rect: Option<Rect>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entry.anchor_rect == rect {
            return false;
        }
        entry.anchor_rect = rect;
        self.dirty.mark(id.serial, dirty::ANCHOR);
        true
    }

    /// Sets the measured size of `id`. Returns `false` if absent or unchanged.
    pub(crate) fn set_size(&mut self, id: OverlayId, size: Option<Size>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entry.measured_size == size {
            return false;
        }
        entry.measured_size = size;
        self.dirty.mark(id.serial, dirty::SIZE);
        true
    }
}

impl<'a, C> IntoIterator for &'a OverlayStack<C> {
    type Item = &'a OverlayEntry<C>;
    type IntoIter = core::slice::Iter<'a, OverlayEntry<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
