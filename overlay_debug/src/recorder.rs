// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording and replay.
//!
//! [`RecorderSink`] implements [`TraceSink`] and stores every event as an
//! owned [`RecordedEvent`]. A manager owns its sink, so the recorder keeps its
//! buffer behind a shared handle: clone the sink before installing it and
//! read the events from the clone afterwards.
//!
//! [`replay`] feeds recorded events into any other sink, e.g. a
//! [`PrettyPrintSink`](crate::pretty::PrettyPrintSink).

use std::cell::RefCell;
use std::rc::Rc;

use overlay_core::geometry::PresentationKind;
use overlay_core::overlay::{DismissReason, OverlayId};
use overlay_core::trace::{
    DismissEvent, GeometryEvent, LayoutEvent, PresentEvent, PresentOutcome, TapEvent, TraceSink,
};

/// An owned copy of a single trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A presentation request.
    Present {
        /// The allotted id, or `None` if ignored.
        id: Option<OverlayId>,
        /// The identifier key, if named.
        key: Option<String>,
        /// Centered or anchored.
        kind: PresentationKind,
        /// What the request resolved to.
        outcome: PresentOutcome,
    },
    /// A dismissal.
    Dismiss {
        /// Removed overlays, bottom to top.
        ids: Vec<OverlayId>,
        /// Which operation removed them.
        reason: DismissReason,
    },
    /// A geometry report that changed an entry.
    Geometry(GeometryEvent),
    /// A background tap.
    Tap(TapEvent),
    /// A resolved position.
    Layout(LayoutEvent),
}

/// A [`TraceSink`] that records events into a shared buffer.
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Removes and returns all recorded events.
    pub fn take(&self) -> Vec<RecordedEvent> {
        self.events.take()
    }

    fn push(&self, event: RecordedEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TraceSink for RecorderSink {
    fn on_present(&mut self, e: &PresentEvent<'_>) {
        self.push(RecordedEvent::Present {
            id: e.id,
            key: e.key.map(str::to_owned),
            kind: e.kind,
            outcome: e.outcome,
        });
    }

    fn on_dismiss(&mut self, e: &DismissEvent<'_>) {
        self.push(RecordedEvent::Dismiss {
            ids: e.ids.to_vec(),
            reason: e.reason,
        });
    }

    fn on_geometry(&mut self, e: &GeometryEvent) {
        self.push(RecordedEvent::Geometry(*e));
    }

    fn on_tap(&mut self, e: &TapEvent) {
        self.push(RecordedEvent::Tap(*e));
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        self.push(RecordedEvent::Layout(*e));
    }
}

/// Feeds recorded events, in order, into `sink`.
pub fn replay(events: &[RecordedEvent], sink: &mut dyn TraceSink) {
    for event in events {
        match event {
            RecordedEvent::Present {
                id,
                key,
                kind,
                outcome,
            } => sink.on_present(&PresentEvent {
                id: *id,
                key: key.as_deref(),
                kind: *kind,
                outcome: *outcome,
            }),
            RecordedEvent::Dismiss { ids, reason } => sink.on_dismiss(&DismissEvent {
                ids,
                reason: *reason,
            }),
            RecordedEvent::Geometry(e) => sink.on_geometry(e),
            RecordedEvent::Tap(e) => sink.on_tap(e),
            RecordedEvent::Layout(e) => sink.on_layout(e),
        }
    }
}
