// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for overlay stack activity.
//!
//! This module provides a [`TraceSink`] trait with one method per event
//! kind. All method bodies default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Unlike [`StackObserver`](crate::overlay::StackObserver), a sink also sees
//! requests that changed nothing, such as ignored duplicate presentations and
//! background taps that were swallowed.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`LayoutEvent`], emitted once per
//!   overlay by [`OverlayManager::layout_all`](crate::overlay::OverlayManager::layout_all).

use crate::geometry::PresentationKind;
use crate::overlay::{DismissReason, OverlayId};
use crate::tracking::TapOutcome;

#[cfg(feature = "trace-rich")]
use kurbo::{Point, Size};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What a presentation request resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentOutcome {
    /// A new overlay was pushed.
    Created,
    /// A duplicate named identifier was rejected.
    Ignored,
    /// `removed` overlays sharing the key were replaced by a new one.
    Replaced {
        /// How many overlays were removed.
        removed: usize,
    },
}

/// Which geometry report changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryField {
    /// The anchor rectangle.
    Anchor,
    /// The measured content size.
    Size,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for every presentation request, accepted or not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentEvent<'a> {
    /// The allotted id, or `None` if the request was ignored.
    pub id: Option<OverlayId>,
    /// The identifier key, if named.
    pub key: Option<&'a str>,
    /// Centered or anchored.
    pub kind: PresentationKind,
    /// What the request resolved to.
    pub outcome: PresentOutcome,
}

/// Emitted when overlays are removed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissEvent<'a> {
    /// Removed overlays, bottom to top.
    pub ids: &'a [OverlayId],
    /// Which operation removed them.
    pub reason: DismissReason,
}

/// Emitted when an anchor or size report changes an entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryEvent {
    /// The overlay.
    pub id: OverlayId,
    /// Which value changed.
    pub field: GeometryField,
    /// Whether the value was cleared (reported as absent).
    pub cleared: bool,
}

/// Emitted for every background tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapEvent {
    /// What the tap did.
    pub outcome: TapOutcome,
}

/// A resolved overlay position.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEvent {
    /// The overlay.
    pub id: OverlayId,
    /// Container size used for resolution.
    pub container: Size,
    /// Resolved content center, or `None` if not yet measured.
    pub position: Option<Point>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an [`OverlayManager`](crate::overlay::OverlayManager).
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for every presentation request.
    fn on_present(&mut self, e: &PresentEvent<'_>) {
        _ = e;
    }

    /// Called when overlays are dismissed.
    fn on_dismiss(&mut self, e: &DismissEvent<'_>) {
        _ = e;
    }

    /// Called when an anchor or size report changes an entry.
    fn on_geometry(&mut self, e: &GeometryEvent) {
        _ = e;
    }

    /// Called for every background tap.
    fn on_tap(&mut self, e: &TapEvent) {
        _ = e;
    }

    /// Called with a resolved overlay position (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PresentEvent`].
    #[inline]
    pub fn present(&mut self, e: &PresentEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_present(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DismissEvent`].
    #[inline]
    pub fn dismiss(&mut self, e: &DismissEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dismiss(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GeometryEvent`].
    #[inline]
    pub fn geometry(&mut self, e: &GeometryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_geometry(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TapEvent`].
    #[inline]
    pub fn tap(&mut self, e: &TapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_present() -> PresentEvent<'static> {
        PresentEvent {
            id: Some(OverlayId { serial: 3 }),
            key: Some("menu"),
            kind: PresentationKind::Anchored,
            outcome: PresentOutcome::Created,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_present(&sample_present());
        sink.on_dismiss(&DismissEvent {
            ids: &[OverlayId { serial: 3 }],
            reason: DismissReason::Top,
        });
        sink.on_tap(&TapEvent {
            outcome: TapOutcome::NoOverlay,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.present(&sample_present());
        tracer.geometry(&GeometryEvent {
            id: OverlayId { serial: 0 },
            field: GeometryField::Size,
            cleared: true,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            presented: Vec<Option<OverlayId>>,
        }
        impl TraceSink for RecordingSink {
            fn on_present(&mut self, e: &PresentEvent<'_>) {
                self.presented.push(e.id);
            }
        }

        let mut sink = RecordingSink {
            presented: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.present(&sample_present());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.presented, &[Some(OverlayId { serial: 3 })]);
    }
}
