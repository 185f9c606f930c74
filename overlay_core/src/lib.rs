// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay stack state and anchored layout resolution.
//!
//! `overlay_core` manages a stack of transient floating surfaces drawn above
//! a host view: centered modal-style surfaces and surfaces anchored to a
//! trigger element. It is `no_std` compatible (with `alloc`), never draws,
//! and leaves rendering, animation, and input dispatch to the host.
//!
//! # Architecture
//!
//! ```text
//!   present request
//!       │
//!       ▼
//!   resolve(identifier) ──► create / ignore / replace
//!       │
//!       ▼
//!   OverlayManager ──► StackEvent ──► observers (schedule render)
//!       ▲                                   │
//!       │                 ┌─────────────────┘
//!       │                 ▼
//!   AnchorReporter /   evaluate() ──► OverlayChanges ──► OverlayHost::apply()
//!   SizeReporter          │
//!       ▲                 ▼
//!       └──────────── layout_all() ──► resolve_position()
//! ```
//!
//! **[`overlay`]**: The stack model, identifier resolution, the
//! [`OverlayManager`](overlay::OverlayManager), and change evaluation.
//!
//! **[`layout`]**: The pure placement function that turns container size,
//! content size, and anchor rectangle into a center point.
//!
//! **[`geometry`]**: Placement descriptors and the shared coordinate space.
//!
//! **[`tracking`]**: Per-element helpers that report anchor rectangles and
//! content sizes back into the manager, and background-tap outcomes.
//!
//! **[`dirty`]**: Anchor and size dirty channels via `understory_dirty`.
//!
//! **[`host`]**: The [`OverlayHost`](host::OverlayHost) trait that
//! rendering integrations implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! stack instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Threading
//!
//! A manager is owned by one thread (typically the UI thread) and is not
//! meant to be shared. Every operation completes synchronously.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-overlay
//!   layout events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod overlay;
pub mod trace;
pub mod tracking;
