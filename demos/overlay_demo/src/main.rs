// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated host session that exercises the overlay stack and its
//! diagnostics pipeline.
//!
//! A toy host presents a menu anchored under a button, a confirmation
//! dialog, and a replacing toast. It feeds geometry back through the
//! reporters, routes background taps, and runs a render pass after each
//! step. Every trace event is recorded by a
//! [`RecorderSink`](overlay_debug::recorder::RecorderSink), replayed through a
//! [`PrettyPrintSink`](overlay_debug::pretty::PrettyPrintSink) and finally
//! exported as JSON.
//!
//! Usage: `overlay_demo [OUTPUT.json]`. Without an argument the JSON goes to
//! stdout.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use overlay_core::geometry::{
    HorizontalAlignment, OVERLAY_SPACE, Placement, Point, Rect, Size, Vec2,
};
use overlay_core::host::OverlayHost;
use overlay_core::overlay::{
    Barrier, DismissPolicy, Identifier, OverlayChanges, OverlayId, OverlayManager, OverlayRequest,
    OverlayStack, StackEvent,
};
use overlay_core::tracking::{AnchorReporter, SizeReporter};

use overlay_debug::pretty::PrettyPrintSink;
use overlay_debug::recorder::{RecorderSink, replay};

const CONTAINER: Size = Size::new(400.0, 800.0);

/// Content produced by the toy host: a label and the size it measures to.
#[derive(Clone, Copy, Debug)]
struct Label {
    text: &'static str,
    size: Size,
}

/// A "native view" the toy host keeps per mounted overlay.
#[derive(Debug)]
struct View {
    text: &'static str,
    position: Option<Point>,
}

/// Mirrors the overlay stack into a map of views.
#[derive(Debug, Default)]
struct ToyHost {
    views: BTreeMap<OverlayId, View>,
    sizes: BTreeMap<OverlayId, SizeReporter>,
    /// Reporters of unmounted content, told about the tear-down after apply.
    torn_down: Vec<SizeReporter>,
}

impl OverlayHost<Label> for ToyHost {
    fn apply(&mut self, manager: &OverlayManager<Label>, changes: &OverlayChanges) {
        for id in &changes.removed {
            self.views.remove(id);
            self.torn_down.extend(self.sizes.remove(id));
            println!("  host: unmount {id:?}");
        }
        for &id in &changes.added {
            if let Some(entry) = manager.get(id) {
                let text = entry.content().text;
                self.views.insert(
                    id,
                    View {
                        text,
                        position: None,
                    },
                );
                self.sizes.insert(id, SizeReporter::new(id));
                println!("  host: mount {id:?} \"{text}\"");
            }
        }
    }
}

impl ToyHost {
    /// Measures freshly mounted content and reports it back.
    fn measure(&self, manager: &mut OverlayManager<Label>) {
        for (id, reporter) in &self.sizes {
            if let Some(size) = manager.get(*id).map(|e| e.content().size) {
                reporter.mounted(manager, size);
            }
        }
    }

    /// One render pass: evaluate, apply, report tear-downs, measure, place.
    fn render(&mut self, manager: &mut OverlayManager<Label>) {
        let changes = manager.evaluate();
        if changes.is_empty() {
            return;
        }
        self.apply(manager, &changes);
        for reporter in self.torn_down.drain(..) {
            reporter.unmounted(manager);
        }
        self.measure(manager);
        for (id, position) in manager.layout_all(CONTAINER) {
            if let Some(view) = self.views.get_mut(&id) {
                view.position = position;
                match view.position {
                    Some(p) => println!("  host: place \"{}\" at ({}, {})", view.text, p.x, p.y),
                    None => println!("  host: \"{}\" stays transparent", view.text),
                }
            }
        }
        println!(
            "  host: {} view(s), input blocked: {}",
            self.views.len(),
            manager.blocks_input()
        );
    }
}

fn main() {
    let recorder = RecorderSink::new();
    let mut manager = OverlayManager::new();
    manager.set_trace_sink(Box::new(recorder.clone()));

    let renders_requested = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&renders_requested);
    manager.subscribe(move |_: &OverlayStack<Label>, event: &StackEvent| {
        counter.set(counter.get() + 1);
        println!("observer: {event:?}");
    });

    let mut host = ToyHost::default();

    println!("-- open menu under a button --");
    let button = Rect::new(150.0, 200.0, 250.0, 240.0);
    let menu = manager
        .present(
            OverlayRequest::anchored(
                Placement::bottom(8.0, HorizontalAlignment::Center),
                None,
                Label {
                    text: "menu",
                    size: Size::new(120.0, 38.0),
                },
            )
            .identifier(Identifier::unique("menu"))
            .dismiss_policy(DismissPolicy::TapOutsideDismisses)
            .backdrop_opacity(0.0),
        )
        .expect("menu is not on the stack yet");
    let trigger = AnchorReporter::new(menu, OVERLAY_SPACE);
    trigger.mounted(&mut manager, button);
    host.render(&mut manager);

    println!("-- open menu again (ignored) --");
    let again = manager.present(
        OverlayRequest::anchored(
            Placement::bottom(8.0, HorizontalAlignment::Center),
            Some(button),
            Label {
                text: "menu",
                size: Size::new(120.0, 38.0),
            },
        )
        .identifier(Identifier::unique("menu")),
    );
    println!("  second menu: {again:?}");

    println!("-- scroll the button --");
    trigger.geometry_changed(&mut manager, button + Vec2::new(0.0, -40.0));
    host.render(&mut manager);

    println!("-- tap outside --");
    println!("  tap: {:?}", manager.handle_background_tap());
    trigger.unmounted(&mut manager);
    host.render(&mut manager);

    println!("-- confirmation dialog with custom tap handler --");
    let dialog = manager
        .present(
            OverlayRequest::centered(
                Vec2::new(0.0, -20.0),
                Label {
                    text: "discard changes?",
                    size: Size::new(280.0, 160.0),
                },
            )
            .identifier(Identifier::unique("confirm"))
            .barrier(Barrier::BlockAll)
            .backdrop_opacity(0.4),
        )
        .expect("no confirmation is open");
    manager.register_tap_handler(dialog, |_, id| {
        println!("  handler: shaking {id:?} instead of closing");
    });
    host.render(&mut manager);
    println!("  tap: {:?}", manager.handle_background_tap());

    println!("-- toasts replace each other --");
    for text in ["saved", "synced"] {
        manager.present(
            OverlayRequest::centered(
                Vec2::new(0.0, 300.0),
                Label {
                    text,
                    size: Size::new(160.0, 40.0),
                },
            )
            .identifier(Identifier::replacing("toast"))
            .barrier(Barrier::Passthrough),
        );
    }
    host.render(&mut manager);

    println!("-- close everything --");
    manager.dismiss_by_key("toast");
    manager.dismiss(dialog);
    host.render(&mut manager);

    println!(
        "observer saw {} change(s); revision {}",
        renders_requested.get(),
        manager.revision()
    );

    // -- trace -------------------------------------------------------------
    let events = recorder.take();
    println!("-- trace ({} events) --", events.len());
    let mut pretty = PrettyPrintSink::with_writer(std::io::stdout());
    replay(&events, &mut pretty);

    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::create(&path).expect("failed to create trace output");
            let mut writer = BufWriter::new(file);
            overlay_debug::export::export(&events, &mut writer).expect("failed to write trace");
            println!("Wrote {path}");
        }
        None => {
            overlay_debug::export::export(&events, &mut std::io::stdout().lock())
                .expect("failed to write trace");
        }
    }
}
