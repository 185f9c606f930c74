// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement descriptors and the shared overlay coordinate space.
//!
//! Points, sizes, and rectangles are [`kurbo`] types. Every anchor rectangle
//! and container frame handed to the manager must be expressed in the same
//! [`CoordinateSpace`] so that they are directly comparable.

pub use kurbo::{Point, Rect, Size, Vec2};

/// A named coordinate space shared by anchor reporters and the overlay host.
///
/// Two reports are comparable only when they name the same space. The name
/// is never interpreted beyond equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateSpace(&'static str);

impl CoordinateSpace {
    /// Creates a coordinate space token with the given name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the space name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl core::fmt::Debug for CoordinateSpace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CoordinateSpace({:?})", self.0)
    }
}

/// The default coordinate space used by [`OverlayManager`](crate::overlay::OverlayManager).
pub const OVERLAY_SPACE: CoordinateSpace = CoordinateSpace::named("overlay");

/// Which side of the anchor an anchored overlay sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Above the anchor.
    Top,
    /// Below the anchor.
    #[default]
    Bottom,
}

/// Horizontal alignment of an anchored overlay relative to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Overlay's leading edge lines up with the anchor's leading edge.
    Leading,
    /// Overlay is centered on the anchor.
    #[default]
    Center,
    /// Overlay's trailing edge lines up with the anchor's trailing edge.
    Trailing,
}

/// Where an anchored overlay is placed relative to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    /// Side of the anchor.
    pub edge: Edge,
    /// Gap between anchor and overlay. Negative and NaN values act as zero.
    pub spacing: f64,
    /// Horizontal alignment against the anchor.
    pub alignment: HorizontalAlignment,
}

impl Placement {
    /// Places the overlay above the anchor.
    #[must_use]
    pub const fn top(spacing: f64, alignment: HorizontalAlignment) -> Self {
        Self {
            edge: Edge::Top,
            spacing,
            alignment,
        }
    }

    /// Places the overlay below the anchor.
    #[must_use]
    pub const fn bottom(spacing: f64, alignment: HorizontalAlignment) -> Self {
        Self {
            edge: Edge::Bottom,
            spacing,
            alignment,
        }
    }

    /// Returns the spacing used for layout, never negative.
    #[must_use]
    pub fn effective_spacing(&self) -> f64 {
        if self.spacing > 0.0 { self.spacing } else { 0.0 }
    }
}

/// How an overlay is positioned within its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Presentation {
    /// Centered in the container, shifted by `offset`.
    Centered {
        /// Displacement from the container center.
        offset: Vec2,
    },
    /// Positioned against an anchor rectangle.
    Anchored {
        /// Edge, spacing, and alignment against the anchor.
        placement: Placement,
    },
}

impl Presentation {
    /// Centered with no offset.
    pub const CENTERED: Self = Self::Centered { offset: Vec2::ZERO };

    /// Returns the kind of presentation without its parameters.
    #[must_use]
    pub const fn kind(&self) -> PresentationKind {
        match self {
            Self::Centered { .. } => PresentationKind::Centered,
            Self::Anchored { .. } => PresentationKind::Anchored,
        }
    }
}

/// Discriminant of [`Presentation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    /// See [`Presentation::Centered`].
    Centered,
    /// See [`Presentation::Anchored`].
    Anchored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_nan_spacing_act_as_zero() {
        assert_eq!(
            Placement::top(-4.0, HorizontalAlignment::Center).effective_spacing(),
            0.0
        );
        assert_eq!(
            Placement::bottom(f64::NAN, HorizontalAlignment::Leading).effective_spacing(),
            0.0
        );
        assert_eq!(
            Placement::bottom(6.0, HorizontalAlignment::Trailing).effective_spacing(),
            6.0
        );
    }

    #[test]
    fn coordinate_spaces_compare_by_name() {
        assert_eq!(OVERLAY_SPACE, CoordinateSpace::named("overlay"));
        assert_ne!(OVERLAY_SPACE, CoordinateSpace::named("window"));
    }
}
