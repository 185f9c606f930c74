// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON recording for overlay stack diagnostics.
//!
//! This crate provides [`TraceSink`](overlay_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory recording, replayable into any
//!   other sink with [`recorder::replay`].
//! - [`export::export`]: writes a recording as a JSON array.

pub mod export;
pub mod pretty;
pub mod recorder;
