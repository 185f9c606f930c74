// Copyright 2026 the Overstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier resolution.
//!
//! Decides, before anything is stored, what a presentation request does to
//! the stack. Keeping the decision separate means the stack itself never
//! special-cases identifier kinds.

use alloc::vec::Vec;

use super::entry::{Identifier, OnDuplicate, OverlayEntry};
use super::id::OverlayId;

/// The outcome of resolving an [`Identifier`] against the current stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Present a new entry.
    Create,
    /// Reject the request; the stack is left untouched.
    Ignore,
    /// Remove `victims` and present a new entry, as one step.
    Replace {
        /// Entries carrying the same key, bottom to top.
        victims: Vec<OverlayId>,
    },
}

/// Resolves `identifier` against `entries` (bottom to top).
#[must_use]
pub fn resolve<C>(identifier: &Identifier, entries: &[OverlayEntry<C>]) -> Resolution {
    let Identifier::Named { key, on_duplicate } = identifier else {
        return Resolution::Create;
    };

    let mut matching = entries
        .iter()
        .filter(|e| e.key() == Some(key.as_str()))
        .map(OverlayEntry::id)
        .peekable();

    if matching.peek().is_none() {
        return Resolution::Create;
    }

    match on_duplicate {
        OnDuplicate::Ignore => Resolution::Ignore,
        OnDuplicate::Replace => Resolution::Replace {
            victims: matching.collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Vec2;

    use super::*;
    use crate::overlay::entry::OverlayRequest;

    fn entry(serial: u64, identifier: Identifier) -> OverlayEntry<()> {
        OverlayEntry::new(
            OverlayId { serial },
            OverlayRequest::centered(Vec2::ZERO, ()).identifier(identifier),
        )
    }

    #[test]
    fn auto_always_creates() {
        let stack = [entry(0, Identifier::Auto), entry(1, Identifier::Auto)];
        assert_eq!(resolve(&Identifier::Auto, &stack), Resolution::Create);
    }

    #[test]
    fn named_without_duplicate_creates() {
        let stack = [entry(0, Identifier::unique("a"))];
        assert_eq!(
            resolve(&Identifier::unique("b"), &stack),
            Resolution::Create
        );
        assert_eq!(
            resolve(&Identifier::replacing("b"), &stack),
            Resolution::Create
        );
    }

    #[test]
    fn ignore_rejects_duplicate() {
        let stack = [entry(0, Identifier::unique("a"))];
        assert_eq!(resolve(&Identifier::unique("a"), &stack), Resolution::Ignore);
    }

    #[test]
    fn replace_collects_every_duplicate() {
        // Resolution does not assume the stack is already deduplicated.
        let stack = [
            entry(0, Identifier::replacing("a")),
            entry(1, Identifier::Auto),
            entry(2, Identifier::replacing("a")),
        ];
        assert_eq!(
            resolve(&Identifier::replacing("a"), &stack),
            Resolution::Replace {
                victims: vec![OverlayId { serial: 0 }, OverlayId { serial: 2 }],
            }
        );
    }
}
