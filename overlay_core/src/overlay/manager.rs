// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay manager: the sole mutator of the overlay stack.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

use super::entry::{Barrier, DismissPolicy, Identifier, OverlayEntry, OverlayRequest};
use super::evaluate::OverlayChanges;
use super::id::{OverlayId, SubscriptionId};
use super::observe::{DismissReason, StackEvent, StackObserver};
use super::resolve::{Resolution, resolve};
use super::stack::OverlayStack;
use crate::geometry::{CoordinateSpace, OVERLAY_SPACE, Placement};
use crate::trace::{
    DismissEvent, GeometryEvent, GeometryField, PresentEvent, PresentOutcome, TapEvent, TraceSink,
    Tracer,
};
use crate::tracking::TapOutcome;

/// A custom background-tap handler registered for one overlay.
///
/// Receives the manager and the id of the overlay it was registered for.
pub type TapHandler<C> = Box<dyn FnMut(&mut OverlayManager<C>, OverlayId)>;

/// Owns the overlay stack and every entry on it.
///
/// Callers only ever hold [`OverlayId`] handles. Every operation runs on the
/// owning thread, updates state in place, and notifies observers before it
/// returns. Operations that find nothing to do (dismissing an absent id,
/// reporting an unchanged anchor) are silent no-ops.
///
/// `C` is the content producer the host renders for each overlay, such as a
/// boxed view-building closure. The manager never inspects it.
pub struct OverlayManager<C> {
    stack: OverlayStack<C>,
    observers: Vec<(SubscriptionId, Box<dyn StackObserver<C>>)>,
    next_subscription: u32,
    tap_handlers: BTreeMap<OverlayId, TapHandler<C>>,
    /// The overlay whose handler is currently running, and whether it was
    /// unregistered during the call.
    running_tap: Option<(OverlayId, bool)>,
    trace_sink: Option<Box<dyn TraceSink>>,
    space: CoordinateSpace,
    revision: u64,
}

impl<C> fmt::Debug for OverlayManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayManager")
            .field("stack", &self.stack)
            .field("observers", &self.observers.len())
            .field("tap_handlers", &self.tap_handlers.keys())
            .field("space", &self.space)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<C> Default for OverlayManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> OverlayManager<C> {
    /// Creates an empty manager in [`OVERLAY_SPACE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_coordinate_space(OVERLAY_SPACE)
    }

    /// Creates an empty manager whose anchors and container share `space`.
    #[must_use]
    pub fn with_coordinate_space(space: CoordinateSpace) -> Self {
        Self {
            stack: OverlayStack::new(),
            observers: Vec::new(),
            next_subscription: 0,
            tap_handlers: BTreeMap::new(),
            running_tap: None,
            trace_sink: None,
            space,
            revision: 0,
        }
    }

    // -- Presentation --

    /// Presents an overlay centered in the container, shifted by `offset`.
    ///
    /// Returns `None` if `identifier` names a key already on the stack with
    /// [`OnDuplicate::Ignore`](super::OnDuplicate::Ignore).
    pub fn present_centered(
        &mut self,
        identifier: Identifier,
        dismiss_policy: DismissPolicy,
        barrier: Barrier,
        backdrop_opacity: f64,
        offset: Vec2,
        content: C,
    ) -> Option<OverlayId> {
        self.present(
            OverlayRequest::centered(offset, content)
                .identifier(identifier)
                .dismiss_policy(dismiss_policy)
                .barrier(barrier)
                .backdrop_opacity(backdrop_opacity),
        )
    }

    /// Presents an overlay placed against `anchor_rect`.
    ///
    /// `anchor_rect` may be `None` when the trigger has not been measured yet.
    /// Returns `None` under the same rule as
    /// [`present_centered`](Self::present_centered).
    pub fn present_anchored(
        &mut self,
        identifier: Identifier,
        anchor_rect: Option<Rect>,
        placement: Placement,
        dismiss_policy: DismissPolicy,
        barrier: Barrier,
        backdrop_opacity: f64,
        content: C,
    ) -> Option<OverlayId> {
        self.present(
            OverlayRequest::anchored(placement, anchor_rect, content)
                .identifier(identifier)
                .dismiss_policy(dismiss_policy)
                .barrier(barrier)
                .backdrop_opacity(backdrop_opacity),
        )
    }

    /// Presents an overlay described by `request`.
    ///
    /// The request's identifier is resolved against the current stack first:
    ///
    /// - [`Identifier::Auto`] always pushes a new overlay.
    /// - A named identifier with no entry carrying its key pushes a new
    ///   overlay tagged with the key.
    /// - A duplicate with [`OnDuplicate::Ignore`](super::OnDuplicate::Ignore)
    ///   returns `None` and leaves no trace.
    /// - A duplicate with [`OnDuplicate::Replace`](super::OnDuplicate::Replace)
    ///   removes every entry carrying the key and pushes the new overlay on
    ///   top, delivering a single [`StackEvent::Replaced`].
    pub fn present(&mut self, request: OverlayRequest<C>) -> Option<OverlayId> {
        let kind = request.presentation.kind();
        let resolution = resolve(&request.identifier, self.stack.entries());

        let removed = match resolution {
            Resolution::Ignore => {
                self.tracer().present(&PresentEvent {
                    id: None,
                    key: request.identifier.key(),
                    kind,
                    outcome: PresentOutcome::Ignored,
                });
                return None;
            }
            Resolution::Create => Vec::new(),
            Resolution::Replace { victims } => {
                self.stack.remove_ids(&victims);
                self.drop_tap_handlers(&victims);
                victims
            }
        };

        let id = self.stack.allot_id();
        let outcome = if removed.is_empty() {
            PresentOutcome::Created
        } else {
            PresentOutcome::Replaced {
                removed: removed.len(),
            }
        };
        self.tracer().present(&PresentEvent {
            id: Some(id),
            key: request.identifier.key(),
            kind,
            outcome,
        });
        self.stack.push(id, request);

        let event = if removed.is_empty() {
            StackEvent::Presented { id }
        } else {
            StackEvent::Replaced { removed, id }
        };
        self.notify(event);
        Some(id)
    }

    // -- Dismissal --

    /// Removes the topmost overlay. Does nothing on an empty stack.
    pub fn dismiss_top(&mut self) {
        if let Some(id) = self.stack.top().map(OverlayEntry::id) {
            self.remove(vec![id], DismissReason::Top);
        }
    }

    /// Removes the overlay with the given id, if present.
    pub fn dismiss(&mut self, id: OverlayId) {
        if self.stack.contains_id(id) {
            self.remove(vec![id], DismissReason::Id);
        }
    }

    /// Removes every overlay carrying `key`.
    pub fn dismiss_by_key(&mut self, key: &str) {
        let ids = self.stack.ids_for_key(key);
        if !ids.is_empty() {
            self.remove(ids, DismissReason::Key);
        }
    }

    /// Removes every overlay.
    pub fn dismiss_all(&mut self) {
        let ids: Vec<_> = self.stack.iter().map(OverlayEntry::id).collect();
        if !ids.is_empty() {
            self.remove(ids, DismissReason::All);
        }
    }

    // -- Geometry reports --

    /// Sets or clears the anchor rectangle of an overlay.
    ///
    /// Called whenever the trigger's geometry changes, and with `None` when
    /// the trigger is torn down. Unknown ids and unchanged values are ignored.
    pub fn update_anchor(&mut self, id: OverlayId, rect: Option<Rect>) {
        if self.stack.set_anchor(id, rect) {
            self.tracer().geometry(&GeometryEvent {
                id,
                field: GeometryField::Anchor,
                cleared: rect.is_none(),
            });
            self.notify(StackEvent::AnchorChanged { id });
        }
    }

    /// Sets or clears the measured content size of an overlay.
    ///
    /// `None` is reported when the content is torn down, so a stale size is
    /// never reused. Unknown ids and unchanged values are ignored.
    pub fn update_size(&mut self, id: OverlayId, size: Option<Size>) {
        if self.stack.set_size(id, size) {
            self.tracer().geometry(&GeometryEvent {
                id,
                field: GeometryField::Size,
                cleared: size.is_none(),
            });
            self.notify(StackEvent::SizeChanged { id });
        }
    }

    // -- Queries --

    /// Returns the stack for read-only inspection.
    #[must_use]
    pub fn stack(&self) -> &OverlayStack<C> {
        &self.stack
    }

    /// Returns whether any overlay carries `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.stack.contains(key)
    }

    /// Returns the topmost overlay.
    #[must_use]
    pub fn top(&self) -> Option<&OverlayEntry<C>> {
        self.stack.top()
    }

    /// Returns whether no overlay is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns the number of active overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns the overlay with the given id.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&OverlayEntry<C>> {
        self.stack.get(id)
    }

    /// Returns the active overlays, bottom to top.
    #[must_use]
    pub fn entries(&self) -> &[OverlayEntry<C>] {
        self.stack.entries()
    }

    /// Iterates the active overlays, bottom to top.
    pub fn iter(&self) -> core::slice::Iter<'_, OverlayEntry<C>> {
        self.stack.iter()
    }

    /// Returns whether the overlay with the given id is active.
    #[must_use]
    pub fn contains_id(&self, id: OverlayId) -> bool {
        self.stack.contains_id(id)
    }

    /// Returns the stack position of `id`, counted from the bottom.
    #[must_use]
    pub fn index_of(&self, id: OverlayId) -> Option<usize> {
        self.stack.index_of(id)
    }

    /// Returns whether `id` is the topmost overlay.
    #[must_use]
    pub fn is_top(&self, id: OverlayId) -> bool {
        self.stack.is_top(id)
    }

    /// Returns whether the top overlay blocks input beneath it.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        self.stack.blocks_input()
    }

    /// Returns the coordinate space anchors must be reported in.
    #[must_use]
    pub fn coordinate_space(&self) -> CoordinateSpace {
        self.space
    }

    /// Returns the number of notified changes so far.
    ///
    /// Hosts can compare revisions to skip redundant re-renders.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // -- Layout --

    /// Resolves the content center of one overlay in a container of the
    /// given size.
    ///
    /// Returns `None` if the overlay is absent or its content has not been
    /// measured yet.
    #[must_use]
    pub fn layout(&self, id: OverlayId, container: Size) -> Option<Point> {
        self.stack.get(id)?.position(container)
    }

    /// Resolves every overlay, bottom to top, for one render pass.
    ///
    /// Unmeasured overlays resolve to `None`; hosts keep them transparent.
    pub fn layout_all(&mut self, container: Size) -> Vec<(OverlayId, Option<Point>)> {
        let resolved: Vec<_> = self
            .stack
            .iter()
            .map(|e| (e.id(), e.position(container)))
            .collect();

        #[cfg(feature = "trace-rich")]
        {
            let mut tracer = self.tracer();
            for &(id, position) in &resolved {
                tracer.layout(&crate::trace::LayoutEvent {
                    id,
                    container,
                    position,
                });
            }
        }

        resolved
    }

    /// Drains anchor, size, and lifecycle changes since the last call.
    pub fn evaluate(&mut self) -> OverlayChanges {
        self.stack.evaluate()
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut OverlayChanges) {
        self.stack.evaluate_into(changes);
    }

    // -- Background taps --

    /// Registers a custom background-tap handler for overlay `id`.
    ///
    /// While `id` is on top, a background tap runs the handler instead of the
    /// default dismissal. Registering again for the same id replaces the
    /// previous handler. The handler is dropped when the overlay is
    /// dismissed; registrations for absent overlays are ignored.
    pub fn register_tap_handler(
        &mut self,
        id: OverlayId,
        handler: impl FnMut(&mut Self, OverlayId) + 'static,
    ) {
        if self.stack.contains_id(id) {
            self.tap_handlers.insert(id, Box::new(handler));
        }
    }

    /// Removes the custom background-tap handler for `id`, if any.
    ///
    /// A handler may unregister itself while it runs; it is then not
    /// restored afterwards.
    pub fn unregister_tap_handler(&mut self, id: OverlayId) {
        self.tap_handlers.remove(&id);
        if let Some((running, unregistered)) = &mut self.running_tap
            && *running == id
        {
            *unregistered = true;
        }
    }

    /// Returns whether a custom handler is registered for `id`.
    #[must_use]
    pub fn has_tap_handler(&self, id: OverlayId) -> bool {
        self.tap_handlers.contains_key(&id)
    }

    /// Handles a tap on the background barrier.
    ///
    /// Only the top overlay is considered. Its custom handler runs if one is
    /// registered; otherwise it is dismissed if its policy is
    /// [`DismissPolicy::TapOutsideDismisses`].
    pub fn handle_background_tap(&mut self) -> TapOutcome {
        let top = self.stack.top().map(|e| (e.id(), e.dismiss_policy()));
        let outcome = match top {
            None => TapOutcome::NoOverlay,
            Some((id, policy)) => {
                if let Some(mut handler) = self.tap_handlers.remove(&id) {
                    let outer = self.running_tap.replace((id, false));
                    handler(self, id);
                    let unregistered = core::mem::replace(&mut self.running_tap, outer)
                        .is_some_and(|(_, unregistered)| unregistered);
                    // The handler may have dismissed its overlay, unregistered
                    // itself, or registered a replacement for itself.
                    if !unregistered && self.stack.contains_id(id) {
                        self.tap_handlers.entry(id).or_insert(handler);
                    }
                    TapOutcome::Handled(id)
                } else if policy == DismissPolicy::TapOutsideDismisses {
                    self.dismiss_top();
                    TapOutcome::Dismissed(id)
                } else {
                    TapOutcome::Ignored(id)
                }
            }
        };
        self.tracer().tap(&TapEvent { outcome });
        outcome
    }

    // -- Observation --

    /// Registers an observer, called after every observable change.
    pub fn subscribe(&mut self, observer: impl StackObserver<C> + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(sub, _)| *sub != id);
    }

    // -- Tracing --

    /// Installs a trace sink, replacing any previous one.
    ///
    /// Events only reach the sink when the `trace` feature is enabled.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace_sink = Some(sink);
    }

    /// Removes and returns the trace sink.
    pub fn take_trace_sink(&mut self) -> Option<Box<dyn TraceSink>> {
        self.trace_sink.take()
    }

    // -- Internal helpers --

    fn tracer(&mut self) -> Tracer<'_> {
        match &mut self.trace_sink {
            Some(sink) => Tracer::new(&mut **sink),
            None => Tracer::none(),
        }
    }

    fn remove(&mut self, ids: Vec<OverlayId>, reason: DismissReason) {
        let removed = self.stack.remove_ids(&ids);
        debug_assert_eq!(removed, ids.len(), "dismissing absent overlays");
        self.drop_tap_handlers(&ids);
        self.tracer().dismiss(&DismissEvent { ids: &ids, reason });
        self.notify(StackEvent::Dismissed { ids, reason });
    }

    fn drop_tap_handlers(&mut self, ids: &[OverlayId]) {
        for id in ids {
            self.tap_handlers.remove(id);
        }
    }

    fn notify(&mut self, event: StackEvent) {
        self.revision += 1;
        for (_, observer) in &mut self.observers {
            observer.on_change(&self.stack, &event);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::*;
    use crate::geometry::HorizontalAlignment;

    type Manager = OverlayManager<&'static str>;

    fn centered(manager: &mut Manager, name: &'static str, identifier: Identifier) -> Option<OverlayId> {
        manager.present(OverlayRequest::centered(Vec2::ZERO, name).identifier(identifier))
    }

    fn ids(manager: &Manager) -> Vec<OverlayId> {
        manager.stack().iter().map(OverlayEntry::id).collect()
    }

    /// Subscribes a recorder and returns the shared event log.
    fn record(manager: &mut Manager) -> Rc<RefCell<Vec<StackEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        manager.subscribe(move |_: &OverlayStack<&'static str>, e: &StackEvent| {
            sink.borrow_mut().push(e.clone());
        });
        log
    }

    #[test]
    fn top_is_most_recent_accepted_presentation() {
        let mut manager = Manager::new();
        let mut accepted = Vec::new();
        for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
            let identifier = if i % 2 == 0 {
                Identifier::Auto
            } else {
                Identifier::unique("shared")
            };
            if let Some(id) = centered(&mut manager, name, identifier) {
                accepted.push(id);
            }
        }
        // "d" is a duplicate of "b" and is ignored.
        assert_eq!(accepted.len(), 3);
        assert_eq!(manager.top().map(OverlayEntry::id), accepted.last().copied());

        manager.dismiss(accepted[0]);
        assert_eq!(manager.len(), accepted.len() - 1);
    }

    #[test]
    fn dismiss_top_on_empty_stack_is_noop() {
        let mut manager = Manager::new();
        let log = record(&mut manager);
        manager.dismiss_top();
        manager.dismiss_top();
        assert!(manager.is_empty());
        assert!(log.borrow().is_empty());
        assert_eq!(manager.revision(), 0);
    }

    #[test]
    fn dismiss_all_forgets_every_id() {
        let mut manager = Manager::new();
        let a = centered(&mut manager, "a", Identifier::unique("a")).unwrap();
        let b = centered(&mut manager, "b", Identifier::Auto).unwrap();

        manager.dismiss_all();
        assert!(manager.is_empty());
        assert!(manager.top().is_none());
        assert!(manager.get(a).is_none() && manager.get(b).is_none());
        assert!(!manager.contains("a"));
        assert!(manager.layout(a, Size::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn unique_identifier_rejects_second_presentation() {
        let mut manager = Manager::new();
        let log = record(&mut manager);

        let first = centered(&mut manager, "first", Identifier::unique("k"));
        let second = centered(&mut manager, "second", Identifier::unique("k"));

        assert!(first.is_some());
        assert_eq!(second, None);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.top().map(OverlayEntry::id), first);
        assert_eq!(log.borrow().len(), 1, "ignored presentation is silent");
    }

    #[test]
    fn replacing_identifier_swaps_in_one_notification() {
        let mut manager = Manager::new();
        let first = centered(&mut manager, "first", Identifier::replacing("k")).unwrap();
        let log = record(&mut manager);

        let second = centered(&mut manager, "second", Identifier::replacing("k")).unwrap();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.top().map(OverlayEntry::id), Some(second));
        assert_ne!(first, second);
        assert_eq!(
            *log.borrow(),
            vec![StackEvent::Replaced {
                removed: vec![first],
                id: second,
            }]
        );
    }

    #[test]
    fn replacement_moves_to_top() {
        let mut manager = Manager::new();
        let old = centered(&mut manager, "menu", Identifier::replacing("menu")).unwrap();
        let other = centered(&mut manager, "toast", Identifier::Auto).unwrap();
        let new = centered(&mut manager, "menu", Identifier::replacing("menu")).unwrap();

        assert_eq!(ids(&manager), vec![other, new]);
        assert!(manager.get(old).is_none());
        assert!(!manager.contains_id(old));
        assert_eq!(manager.index_of(other), Some(0));
        assert_eq!(manager.index_of(new), Some(1));
        assert!(manager.is_top(new));
        assert_eq!(manager.entries().len(), manager.iter().count());
    }

    #[test]
    fn dismiss_by_key_removes_only_matching() {
        let mut manager = Manager::new();
        let a = centered(&mut manager, "a", Identifier::unique("menu")).unwrap();
        let b = centered(&mut manager, "b", Identifier::Auto).unwrap();
        let log = record(&mut manager);

        manager.dismiss_by_key("menu");
        manager.dismiss_by_key("missing");

        assert_eq!(ids(&manager), vec![b]);
        assert_eq!(
            *log.borrow(),
            vec![StackEvent::Dismissed {
                ids: vec![a],
                reason: DismissReason::Key,
            }]
        );
    }

    #[test]
    fn dismiss_unknown_id_is_silent() {
        let mut manager = Manager::new();
        let a = centered(&mut manager, "a", Identifier::Auto).unwrap();
        manager.dismiss(a);
        let log = record(&mut manager);

        manager.dismiss(a);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn end_to_end_centered_and_anchored() {
        let mut manager = Manager::new();
        let a = manager
            .present_centered(
                Identifier::Auto,
                DismissPolicy::Programmatic,
                Barrier::BlockAll,
                0.4,
                Vec2::ZERO,
                "a",
            )
            .unwrap();
        let b = manager
            .present_anchored(
                Identifier::Auto,
                Some(Rect::from_origin_size((150.0, 300.0), (100.0, 40.0))),
                Placement::top(8.0, HorizontalAlignment::Center),
                DismissPolicy::TapOutsideDismisses,
                Barrier::Passthrough,
                0.0,
                "b",
            )
            .unwrap();

        assert_eq!(ids(&manager), vec![a, b]);
        assert_eq!(manager.top().map(OverlayEntry::id), Some(b));

        manager.dismiss_top();
        assert_eq!(ids(&manager), vec![a]);

        manager.update_size(a, Some(Size::new(100.0, 50.0)));
        manager.update_size(a, None);
        assert_eq!(manager.get(a).unwrap().measured_size(), None);
    }

    #[test]
    fn geometry_updates_notify_only_on_change() {
        let mut manager = Manager::new();
        let a = manager
            .present(OverlayRequest::anchored(Placement::default(), None, "a"))
            .unwrap();
        let log = record(&mut manager);
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);

        manager.update_anchor(a, Some(rect));
        manager.update_anchor(a, Some(rect));
        manager.update_size(a, Some(Size::new(5.0, 5.0)));
        manager.update_anchor(OverlayId { serial: 42 }, Some(rect));

        assert_eq!(
            *log.borrow(),
            vec![
                StackEvent::AnchorChanged { id: a },
                StackEvent::SizeChanged { id: a },
            ]
        );
    }

    #[test]
    fn observers_see_updated_stack() {
        let mut manager = Manager::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        manager.subscribe(move |stack: &OverlayStack<&'static str>, _: &StackEvent| {
            sink.borrow_mut().push(stack.len());
        });

        centered(&mut manager, "a", Identifier::Auto);
        centered(&mut manager, "b", Identifier::Auto);
        manager.dismiss_all();

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }

    #[test]
    fn unsubscribed_observers_are_not_called() {
        let mut manager = Manager::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = manager.subscribe(move |_: &OverlayStack<&'static str>, _: &StackEvent| {
            *sink.borrow_mut() += 1;
        });

        centered(&mut manager, "a", Identifier::Auto);
        manager.unsubscribe(sub);
        centered(&mut manager, "b", Identifier::Auto);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(manager.revision(), 2);
    }

    #[test]
    fn layout_waits_for_measurement() {
        let mut manager = Manager::new();
        let id = centered(&mut manager, "a", Identifier::Auto).unwrap();
        let container = Size::new(400.0, 800.0);

        assert_eq!(manager.layout(id, container), None);
        manager.update_size(id, Some(Size::new(100.0, 50.0)));
        assert_eq!(manager.layout(id, container), Some(Point::new(200.0, 400.0)));
        assert_eq!(
            manager.layout_all(container),
            vec![(id, Some(Point::new(200.0, 400.0)))]
        );
    }

    #[test]
    fn anchored_without_anchor_lays_out_at_center() {
        let mut manager = Manager::new();
        let id = manager
            .present(OverlayRequest::anchored(
                Placement::top(8.0, HorizontalAlignment::Leading),
                None,
                "tip",
            ))
            .unwrap();
        manager.update_size(id, Some(Size::new(100.0, 50.0)));
        assert_eq!(
            manager.layout(id, Size::new(400.0, 800.0)),
            Some(Point::new(200.0, 400.0))
        );
    }

    #[test]
    fn background_tap_respects_dismiss_policy() {
        let mut manager = Manager::new();
        assert_eq!(manager.handle_background_tap(), TapOutcome::NoOverlay);

        let sticky = centered(&mut manager, "sticky", Identifier::Auto).unwrap();
        assert_eq!(manager.handle_background_tap(), TapOutcome::Ignored(sticky));
        assert_eq!(manager.len(), 1);

        let tappable = manager
            .present(
                OverlayRequest::centered(Vec2::ZERO, "menu")
                    .dismiss_policy(DismissPolicy::TapOutsideDismisses),
            )
            .unwrap();
        assert_eq!(
            manager.handle_background_tap(),
            TapOutcome::Dismissed(tappable)
        );
        assert_eq!(ids(&manager), vec![sticky]);
    }

    #[test]
    fn tap_handler_replaces_default_dismissal() {
        let mut manager = Manager::new();
        let id = manager
            .present(
                OverlayRequest::centered(Vec2::ZERO, "form")
                    .dismiss_policy(DismissPolicy::TapOutsideDismisses),
            )
            .unwrap();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        manager.register_tap_handler(id, move |_, _| *sink.borrow_mut() += 1);

        assert_eq!(manager.handle_background_tap(), TapOutcome::Handled(id));
        assert_eq!(manager.handle_background_tap(), TapOutcome::Handled(id));
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(manager.len(), 1, "custom handler suppresses dismissal");
    }

    #[test]
    fn last_registered_tap_handler_wins() {
        let mut manager = Manager::new();
        let id = centered(&mut manager, "a", Identifier::Auto).unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&hits);
        manager.register_tap_handler(id, move |_, _| first.borrow_mut().push("first"));
        let second = Rc::clone(&hits);
        manager.register_tap_handler(id, move |_, _| second.borrow_mut().push("second"));

        manager.handle_background_tap();
        assert_eq!(*hits.borrow(), vec!["second"]);
    }

    #[test]
    fn tap_handler_can_unregister_itself() {
        let mut manager = Manager::new();
        let id = manager
            .present(
                OverlayRequest::centered(Vec2::ZERO, "menu")
                    .dismiss_policy(DismissPolicy::TapOutsideDismisses),
            )
            .unwrap();
        manager.register_tap_handler(id, |m: &mut Manager, me| m.unregister_tap_handler(me));

        assert_eq!(manager.handle_background_tap(), TapOutcome::Handled(id));
        assert!(!manager.has_tap_handler(id));
        assert_eq!(manager.handle_background_tap(), TapOutcome::Dismissed(id));
        assert!(manager.is_empty());
    }

    #[test]
    fn tap_handler_can_swap_itself_for_another() {
        let mut manager = Manager::new();
        let id = centered(&mut manager, "a", Identifier::Auto).unwrap();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&hits);
        manager.register_tap_handler(id, move |m: &mut Manager, me| {
            log.borrow_mut().push("first");
            m.unregister_tap_handler(me);
            let log = Rc::clone(&log);
            m.register_tap_handler(me, move |_, _| log.borrow_mut().push("second"));
        });

        manager.handle_background_tap();
        manager.handle_background_tap();
        assert_eq!(*hits.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn tap_handler_can_dismiss_its_overlay() {
        let mut manager = Manager::new();
        let below = centered(&mut manager, "below", Identifier::Auto).unwrap();
        let id = centered(&mut manager, "confirm", Identifier::Auto).unwrap();
        manager.register_tap_handler(id, |m: &mut Manager, me| m.dismiss(me));

        assert_eq!(manager.handle_background_tap(), TapOutcome::Handled(id));
        assert_eq!(ids(&manager), vec![below]);
        assert!(!manager.has_tap_handler(id));
    }

    #[test]
    fn tap_handlers_are_dropped_with_their_overlay() {
        let mut manager = Manager::new();
        let id = centered(&mut manager, "a", Identifier::replacing("a")).unwrap();
        manager.register_tap_handler(id, |_, _| {});
        assert!(manager.has_tap_handler(id));

        let replacement = centered(&mut manager, "a", Identifier::replacing("a")).unwrap();
        assert!(!manager.has_tap_handler(id));
        assert!(!manager.has_tap_handler(replacement));

        manager.register_tap_handler(OverlayId { serial: 99 }, |_, _| {});
        assert!(!manager.has_tap_handler(OverlayId { serial: 99 }));
    }

    #[test]
    fn evaluate_tracks_presentations_and_geometry() {
        let mut manager = Manager::new();
        let a = centered(&mut manager, "a", Identifier::Auto).unwrap();
        let changes = manager.evaluate();
        assert_eq!(changes.added, vec![a]);

        manager.update_size(a, Some(Size::new(10.0, 10.0)));
        let mut buf = OverlayChanges::default();
        manager.evaluate_into(&mut buf);
        assert_eq!(buf.sizes, vec![a]);
        assert!(buf.added.is_empty());
    }

    #[test]
    fn blocks_input_tracks_top_barrier() {
        let mut manager = Manager::new();
        manager.present(OverlayRequest::centered(Vec2::ZERO, "modal"));
        assert!(manager.blocks_input());
        manager.present(
            OverlayRequest::centered(Vec2::ZERO, "hint").barrier(Barrier::Passthrough),
        );
        assert!(!manager.blocks_input());
        manager.dismiss_top();
        assert!(manager.blocks_input());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn trace_sink_sees_ignored_presentations() {
        struct Outcomes(Rc<RefCell<Vec<PresentOutcome>>>);
        impl TraceSink for Outcomes {
            fn on_present(&mut self, e: &PresentEvent<'_>) {
                self.0.borrow_mut().push(e.outcome);
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = Manager::new();
        manager.set_trace_sink(Box::new(Outcomes(Rc::clone(&log))));

        centered(&mut manager, "a", Identifier::unique("k"));
        centered(&mut manager, "b", Identifier::unique("k"));
        centered(&mut manager, "c", Identifier::replacing("k"));

        assert_eq!(
            *log.borrow(),
            vec![
                PresentOutcome::Created,
                PresentOutcome::Ignored,
                PresentOutcome::Replaced { removed: 1 },
            ]
        );
    }
}
