// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay entries, presentation requests, and their policy enums.

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect, Size, Vec2};

use super::id::OverlayId;
use crate::geometry::{Placement, Presentation};
use crate::layout::resolve_position;

/// What a tap on the background barrier does to an overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DismissPolicy {
    /// Only explicit dismiss calls remove the overlay.
    #[default]
    Programmatic,
    /// A background tap dismisses the overlay when it is on top.
    TapOutsideDismisses,
}

/// Whether input reaches content beneath an overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Barrier {
    /// Input beneath the overlay is blocked.
    #[default]
    BlockAll,
    /// Input passes through to content beneath.
    Passthrough,
}

/// What happens when a named identifier is already on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OnDuplicate {
    /// Keep the existing overlay and reject the new one.
    Ignore,
    /// Dismiss the existing overlay and present the new one on top.
    Replace,
}

/// How a presentation request is identified for duplicate resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Always presents a new overlay.
    #[default]
    Auto,
    /// Deduplicated by `key` according to `on_duplicate`.
    Named {
        /// Caller-chosen key, independent of the allotted [`OverlayId`].
        key: String,
        /// Duplicate policy.
        on_duplicate: OnDuplicate,
    },
}

impl Identifier {
    /// A named identifier that rejects duplicates.
    #[must_use]
    pub fn unique(key: impl Into<String>) -> Self {
        Self::Named {
            key: key.into(),
            on_duplicate: OnDuplicate::Ignore,
        }
    }

    /// A named identifier that replaces duplicates.
    #[must_use]
    pub fn replacing(key: impl Into<String>) -> Self {
        Self::Named {
            key: key.into(),
            on_duplicate: OnDuplicate::Replace,
        }
    }

    /// Returns the key, if named.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Auto => None,
            Self::Named { key, .. } => Some(key.as_str()),
        }
    }
}

/// One active overlay on the stack.
///
/// The manager owns every entry. Anchor and size are the only fields that
/// change after presentation, and only through
/// [`update_anchor`](super::OverlayManager::update_anchor) and
/// [`update_size`](super::OverlayManager::update_size).
pub struct OverlayEntry<C> {
    pub(crate) id: OverlayId,
    pub(crate) key: Option<String>,
    pub(crate) presentation: Presentation,
    pub(crate) dismiss_policy: DismissPolicy,
    pub(crate) barrier: Barrier,
    pub(crate) backdrop_opacity: f64,
    pub(crate) content: C,
    pub(crate) anchor_rect: Option<Rect>,
    pub(crate) measured_size: Option<Size>,
}

impl<C> fmt::Debug for OverlayEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayEntry")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("presentation", &self.presentation)
            .field("dismiss_policy", &self.dismiss_policy)
            .field("barrier", &self.barrier)
            .field("backdrop_opacity", &self.backdrop_opacity)
            .field("anchor_rect", &self.anchor_rect)
            .field("measured_size", &self.measured_size)
            .finish_non_exhaustive()
    }
}

impl<C> OverlayEntry<C> {
    pub(crate) fn new(id: OverlayId, request: OverlayRequest<C>) -> Self {
        let key = match request.identifier {
            Identifier::Auto => None,
            Identifier::Named { key, .. } => Some(key),
        };
        Self {
            id,
            key,
            presentation: request.presentation,
            dismiss_policy: request.dismiss_policy,
            barrier: request.barrier,
            backdrop_opacity: sanitize_opacity(request.backdrop_opacity),
            content: request.content,
            anchor_rect: request.anchor_rect,
            measured_size: None,
        }
    }

    /// Returns the overlay's id.
    #[must_use]
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Returns the identifier key, if presented with a named identifier.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns how the overlay is positioned.
    #[must_use]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Returns the background-tap policy.
    #[must_use]
    pub fn dismiss_policy(&self) -> DismissPolicy {
        self.dismiss_policy
    }

    /// Returns the input barrier.
    #[must_use]
    pub fn barrier(&self) -> Barrier {
        self.barrier
    }

    /// Returns the backdrop opacity, in `[0, 1]`.
    #[must_use]
    pub fn backdrop_opacity(&self) -> f64 {
        self.backdrop_opacity
    }

    /// Returns the content producer the host renders.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Returns the last reported anchor rectangle.
    #[must_use]
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.anchor_rect
    }

    /// Returns the last reported content size.
    #[must_use]
    pub fn measured_size(&self) -> Option<Size> {
        self.measured_size
    }

    /// Returns whether the content has been measured and can be placed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.measured_size.is_some()
    }

    /// Resolves the content center inside a container of the given size.
    ///
    /// Returns `None` until a size has been measured; hosts keep such
    /// overlays transparent so they do not visibly jump into place.
    #[must_use]
    pub fn position(&self, container: Size) -> Option<Point> {
        let content = self.measured_size?;
        Some(resolve_position(
            &self.presentation,
            container,
            content,
            self.anchor_rect,
        ))
    }
}

fn sanitize_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Parameters for presenting an overlay.
///
/// Defaults: [`Identifier::Auto`], [`DismissPolicy::Programmatic`],
/// [`Barrier::BlockAll`], backdrop opacity `0`.
pub struct OverlayRequest<C> {
    pub(crate) identifier: Identifier,
    pub(crate) presentation: Presentation,
    pub(crate) dismiss_policy: DismissPolicy,
    pub(crate) barrier: Barrier,
    pub(crate) backdrop_opacity: f64,
    pub(crate) anchor_rect: Option<Rect>,
    pub(crate) content: C,
}

impl<C> fmt::Debug for OverlayRequest<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayRequest")
            .field("identifier", &self.identifier)
            .field("presentation", &self.presentation)
            .field("dismiss_policy", &self.dismiss_policy)
            .field("barrier", &self.barrier)
            .field("backdrop_opacity", &self.backdrop_opacity)
            .field("anchor_rect", &self.anchor_rect)
            .finish_non_exhaustive()
    }
}

impl<C> OverlayRequest<C> {
    /// A request for an overlay centered in the container, shifted by `offset`.
    #[must_use]
    pub fn centered(offset: Vec2, content: C) -> Self {
        Self::with_presentation(Presentation::Centered { offset }, None, content)
    }

    /// A request for an overlay placed against `anchor`.
    ///
    /// `anchor` may be `None` when the trigger has not been measured yet; the
    /// overlay is then centered until a rectangle is reported.
    #[must_use]
    pub fn anchored(placement: Placement, anchor: Option<Rect>, content: C) -> Self {
        Self::with_presentation(Presentation::Anchored { placement }, anchor, content)
    }

    fn with_presentation(presentation: Presentation, anchor_rect: Option<Rect>, content: C) -> Self {
        Self {
            identifier: Identifier::Auto,
            presentation,
            dismiss_policy: DismissPolicy::default(),
            barrier: Barrier::default(),
            backdrop_opacity: 0.0,
            anchor_rect,
            content,
        }
    }

    /// Sets the identifier used for duplicate resolution.
    #[must_use]
    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = identifier;
        self
    }

    /// Sets the background-tap policy.
    #[must_use]
    pub fn dismiss_policy(mut self, policy: DismissPolicy) -> Self {
        self.dismiss_policy = policy;
        self
    }

    /// Sets the input barrier.
    #[must_use]
    pub fn barrier(mut self, barrier: Barrier) -> Self {
        self.barrier = barrier;
        self
    }

    /// Sets the backdrop opacity. Clamped into `[0, 1]` on presentation.
    #[must_use]
    pub fn backdrop_opacity(mut self, opacity: f64) -> Self {
        self.backdrop_opacity = opacity;
        self
    }
}
