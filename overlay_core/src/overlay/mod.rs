// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay stack data model.
//!
//! An *overlay* is a transient floating surface drawn above the host view.
//! Each overlay has:
//!
//! - An identity ([`OverlayId`]) allotted at presentation and never reused.
//! - An optional identifier key used for duplicate resolution
//!   ([`Identifier`]) and key-based dismissal.
//! - A [`Presentation`](crate::geometry::Presentation): centered, or anchored
//!   to a trigger rectangle.
//! - Interaction policy: [`DismissPolicy`], [`Barrier`], and a backdrop
//!   opacity.
//! - **Reported geometry** fed back by the host: the anchor rectangle and
//!   the measured content size.
//!
//! [`OverlayManager`] owns the [`OverlayStack`] and is its only mutator.
//! Entries are kept bottom to top; the last one is the only one that
//! receives input.
//!
//! # Change tracking
//!
//! Every observable change is delivered synchronously to subscribed
//! [`StackObserver`]s as a [`StackEvent`]. Independently, the stack records
//! presented/dismissed ids and dirty anchor/size channels (see
//! [`dirty`](crate::dirty)), which [`OverlayManager::evaluate`] drains into
//! [`OverlayChanges`].

mod entry;
mod evaluate;
mod id;
mod manager;
mod observe;
mod resolve;
mod stack;

pub use entry::{Barrier, DismissPolicy, Identifier, OnDuplicate, OverlayEntry, OverlayRequest};
pub use evaluate::OverlayChanges;
pub use id::{OverlayId, SubscriptionId};
pub use manager::{OverlayManager, TapHandler};
pub use observe::{DismissReason, StackEvent, StackObserver};
pub use resolve::{Resolution, resolve};
pub use stack::OverlayStack;
