// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] writes events captured by a
//! [`RecorderSink`](crate::recorder::RecorderSink) as a JSON array with one
//! object per event. Each object carries a `seq` index and an `event` name;
//! the remaining fields depend on the event.

use std::io::{self, Write};

use serde_json::{Value, json};

use overlay_core::overlay::OverlayId;
use overlay_core::trace::{GeometryField, PresentOutcome};
use overlay_core::tracking::TapOutcome;

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(seq, event)| to_value(seq, event))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &Value::Array(values))?;
    writeln!(writer)
}

fn to_value(seq: usize, event: &RecordedEvent) -> Value {
    match event {
        RecordedEvent::Present {
            id,
            key,
            kind,
            outcome,
        } => {
            let (outcome, removed) = match outcome {
                PresentOutcome::Created => ("created", 0),
                PresentOutcome::Ignored => ("ignored", 0),
                PresentOutcome::Replaced { removed } => ("replaced", *removed),
            };
            json!({
                "seq": seq,
                "event": "present",
                "id": id.map(OverlayId::serial),
                "key": key,
                "kind": format!("{kind:?}"),
                "outcome": outcome,
                "removed": removed,
            })
        }
        RecordedEvent::Dismiss { ids, reason } => json!({
            "seq": seq,
            "event": "dismiss",
            "ids": ids.iter().map(|id| id.serial()).collect::<Vec<_>>(),
            "reason": format!("{reason:?}"),
        }),
        RecordedEvent::Geometry(e) => json!({
            "seq": seq,
            "event": "geometry",
            "id": e.id.serial(),
            "field": match e.field {
                GeometryField::Anchor => "anchor",
                GeometryField::Size => "size",
            },
            "cleared": e.cleared,
        }),
        RecordedEvent::Tap(e) => {
            let (outcome, id) = match e.outcome {
                TapOutcome::NoOverlay => ("no_overlay", None),
                TapOutcome::Handled(id) => ("handled", Some(id.serial())),
                TapOutcome::Dismissed(id) => ("dismissed", Some(id.serial())),
                TapOutcome::Ignored(id) => ("ignored", Some(id.serial())),
            };
            json!({
                "seq": seq,
                "event": "tap",
                "outcome": outcome,
                "id": id,
            })
        }
        RecordedEvent::Layout(e) => json!({
            "seq": seq,
            "event": "layout",
            "id": e.id.serial(),
            "container": [e.container.width, e.container.height],
            "position": e.position.map(|p| [p.x, p.y]),
        }),
    }
}
