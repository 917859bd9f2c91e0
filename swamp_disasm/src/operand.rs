// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic operand types carried by decoded instructions.

use core::fmt;

/// A VM register (or frame slot) identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(pub u32);

/// A struct field index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Field(pub u32);

/// A program counter: a byte offset within one function's instruction stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pc(pub u32);

impl Pc {
    /// Returns `self + delta`, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, delta: u32) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

/// Which position a label delta was resolved against.
///
/// This is diagnostic only; it never affects the resolved target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LabelBase {
    /// The cursor position immediately after the delta bytes.
    Position,
    /// The previous label's target within the same jump table.
    PreviousTarget,
}

/// A resolved jump target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    /// Absolute target program counter.
    pub target: Pc,
    /// How the target was resolved.
    pub base: LabelBase,
}

impl Label {
    /// Resolves `delta` against `base_pc`.
    ///
    /// Returns `None` if the target does not fit a program counter.
    #[must_use]
    pub const fn resolve(base_pc: Pc, delta: u32, base: LabelBase) -> Option<Self> {
        match base_pc.checked_add(delta) {
            Some(target) => Some(Self { target, base }),
            None => None,
        }
    }
}

/// One `(field, source)` pair of a struct update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldAssignment {
    /// Field being overwritten.
    pub field: Field,
    /// Register holding the new value.
    pub src: Register,
}

/// The source operand of a register copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CopySource {
    /// A single register.
    Register(Register),
    /// A contiguous range of frame slots.
    Range {
        /// First slot.
        start: Register,
        /// Number of slots (bytes) copied.
        size: u32,
    },
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Pc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[label @{}]", self.target)
    }
}

impl fmt::Display for FieldAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.field, self.src)
    }
}

impl fmt::Display for CopySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(r) => write!(f, "{r}"),
            Self::Range { start, size } => write!(f, "({start}:{size})"),
        }
    }
}
