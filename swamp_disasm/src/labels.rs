// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chained label resolution for multi-target jump tables.
//!
//! In an enum-case jump table, only the first entry's delta is relative to the stream position
//! (the cursor immediately after that delta). Every later delta is relative to the target the
//! previous entry resolved to, which keeps clustered tables down to small deltas.
//!
//! [`LabelChain`] is the accumulator threaded through one table's entries. It is created fresh
//! for each instruction and consumed entry by entry:
//!
//! ```
//! use swamp_disasm::labels::LabelChain;
//! use swamp_disasm::operand::{LabelBase, Pc};
//!
//! let chain = LabelChain::new();
//! let (first, chain) = chain.resolve(4, Pc(0x10)).unwrap();
//! let (second, _) = chain.resolve(3, Pc(0x20)).unwrap();
//! assert_eq!(first.target, Pc(0x14));
//! assert_eq!(first.base, LabelBase::Position);
//! assert_eq!(second.target, Pc(0x17));
//! assert_eq!(second.base, LabelBase::PreviousTarget);
//! ```

use crate::operand::{Label, LabelBase, Pc};

/// State carried between the entries of one jump table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelChain {
    previous: Option<Label>,
}

impl LabelChain {
    /// Starts a chain with no previously resolved label.
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: None }
    }

    /// The most recently resolved label, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<Label> {
        self.previous
    }

    /// Returns the position the next delta resolves against.
    ///
    /// `position` is the cursor position immediately after the next entry's delta bytes; it is
    /// only used while the chain is empty.
    #[must_use]
    pub const fn base(&self, position: Pc) -> (Pc, LabelBase) {
        match self.previous {
            Some(prev) => (prev.target, LabelBase::PreviousTarget),
            None => (position, LabelBase::Position),
        }
    }

    /// Resolves `delta` and returns the label together with the advanced chain.
    ///
    /// Returns `None` if the target does not fit a program counter.
    #[must_use]
    pub const fn resolve(self, delta: u32, position: Pc) -> Option<(Label, Self)> {
        let (base_pc, base) = self.base(position);
        match Label::resolve(base_pc, delta, base) {
            Some(label) => Some((
                label,
                Self {
                    previous: Some(label),
                },
            )),
            None => None,
        }
    }
}
