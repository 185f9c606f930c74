// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay position resolution.
//!
//! [`resolve_position`] maps a [`Presentation`], the container size, the
//! measured content size, and the (optional) anchor rectangle to the point
//! the overlay content is centered on. It holds no state.
//!
//! # Anchored placement
//!
//! The horizontal center follows the placement's alignment and is clamped so
//! the overlay stays inside the container. When the content is wider than
//! the container the clamp range is empty and the unclamped value is used,
//! letting the overlay overflow instead of failing.
//!
//! Vertically, a top-edge overlay never rises above the container's top and a
//! bottom-edge overlay never drops below the container's bottom.
//!
//! An anchored overlay whose anchor has not been reported falls back to the
//! container center.

use kurbo::{Point, Rect, Size};

use crate::geometry::{Edge, HorizontalAlignment, Placement, Presentation};

/// Returns the center point for overlay content.
///
/// All inputs are in the shared overlay coordinate space.
#[must_use]
pub fn resolve_position(
    presentation: &Presentation,
    container: Size,
    content: Size,
    anchor: Option<Rect>,
) -> Point {
    match *presentation {
        Presentation::Centered { offset } => container_center(container) + offset,
        Presentation::Anchored { placement } => match anchor {
            Some(anchor) => anchored_position(&placement, container, content, anchor),
            None => container_center(container),
        },
    }
}

/// Returns the frame occupied by content of size `content` centered on `center`.
#[must_use]
pub fn overlay_frame(center: Point, content: Size) -> Rect {
    Rect::from_center_size(center, content)
}

fn container_center(container: Size) -> Point {
    Point::new(container.width / 2.0, container.height / 2.0)
}

fn anchored_position(placement: &Placement, container: Size, content: Size, anchor: Rect) -> Point {
    let half_w = content.width / 2.0;
    let half_h = content.height / 2.0;

    let raw_x = match placement.alignment {
        HorizontalAlignment::Leading => anchor.min_x() + half_w,
        HorizontalAlignment::Center => anchor.center().x,
        HorizontalAlignment::Trailing => anchor.max_x() - half_w,
    };
    let x = clamp_or_raw(raw_x, half_w, container.width - half_w);

    let spacing = placement.effective_spacing();
    let y = match placement.edge {
        Edge::Top => (anchor.min_y() - spacing - half_h).max(half_h),
        Edge::Bottom => (anchor.max_y() + spacing + half_h).min(container.height - half_h),
    };

    Point::new(x, y)
}

/// Clamps `value` into `[lo, hi]`, or returns it untouched when the range is empty.
fn clamp_or_raw(value: f64, lo: f64, hi: f64) -> f64 {
    if lo < hi { value.clamp(lo, hi) } else { value }
}
