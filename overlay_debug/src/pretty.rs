// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Write errors
//! are ignored; diagnostics never interfere with the stack.

use std::io::Write;

use overlay_core::geometry::PresentationKind;
use overlay_core::overlay::{DismissReason, OverlayId};
use overlay_core::trace::{
    DismissEvent, GeometryEvent, GeometryField, LayoutEvent, PresentEvent, PresentOutcome,
    TapEvent, TraceSink,
};
use overlay_core::tracking::TapOutcome;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn kind_name(kind: PresentationKind) -> &'static str {
    match kind {
        PresentationKind::Centered => "centered",
        PresentationKind::Anchored => "anchored",
    }
}

fn reason_name(reason: DismissReason) -> &'static str {
    match reason {
        DismissReason::Top => "top",
        DismissReason::Id => "id",
        DismissReason::Key => "key",
        DismissReason::All => "all",
    }
}

fn id_list(ids: &[OverlayId]) -> String {
    let serials: Vec<String> = ids.iter().map(|id| id.serial().to_string()).collect();
    format!("[{}]", serials.join(","))
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_present(&mut self, e: &PresentEvent<'_>) {
        let id = e.id.map_or_else(|| "-".to_owned(), |id| id.serial().to_string());
        let outcome = match e.outcome {
            PresentOutcome::Created => "created".to_owned(),
            PresentOutcome::Ignored => "ignored".to_owned(),
            PresentOutcome::Replaced { removed } => format!("replaced({removed})"),
        };
        let _ = writeln!(
            self.writer,
            "[present] id={id} key={} kind={} outcome={outcome}",
            e.key.unwrap_or("-"),
            kind_name(e.kind),
        );
    }

    fn on_dismiss(&mut self, e: &DismissEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[dismiss] reason={} ids={}",
            reason_name(e.reason),
            id_list(e.ids),
        );
    }

    fn on_geometry(&mut self, e: &GeometryEvent) {
        let field = match e.field {
            GeometryField::Anchor => "anchor",
            GeometryField::Size => "size",
        };
        let action = if e.cleared { "cleared" } else { "set" };
        let _ = writeln!(
            self.writer,
            "[geometry] id={} {field} {action}",
            e.id.serial(),
        );
    }

    fn on_tap(&mut self, e: &TapEvent) {
        let _ = match e.outcome {
            TapOutcome::NoOverlay => writeln!(self.writer, "[tap] no overlay"),
            TapOutcome::Handled(id) => writeln!(self.writer, "[tap] handled id={}", id.serial()),
            TapOutcome::Dismissed(id) => {
                writeln!(self.writer, "[tap] dismissed id={}", id.serial())
            }
            TapOutcome::Ignored(id) => writeln!(self.writer, "[tap] ignored id={}", id.serial()),
        };
    }

    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = match e.position {
            Some(p) => writeln!(
                self.writer,
                "[layout] id={} at ({:.1}, {:.1}) in {}x{}",
                e.id.serial(),
                p.x,
                p.y,
                e.container.width,
                e.container.height,
            ),
            None => writeln!(self.writer, "[layout] id={} unmeasured", e.id.serial()),
        };
    }
}
