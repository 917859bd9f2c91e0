// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing hooks for `swamp_disasm`.
//!
//! Tracing is optional and is designed to be `no_std` friendly.
//! The decoder only emits events requested by a sink's [`TraceMask`].
//!
//! To enable tracing, pass a [`TraceSink`] to [`disassemble_traced`]. With the `tracing` cargo
//! feature, [`TracingSink`] forwards events to the `tracing` ecosystem.

#[cfg(doc)]
use crate::disasm::disassemble_traced;

use crate::disasm::DisasmError;
use crate::opcode::Opcode;
use crate::operand::{Label, Pc};

/// A set of trace events requested by a [`TraceSink`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceMask(u32);

impl core::ops::BitOr for TraceMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for TraceMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TraceMask {
    /// No tracing.
    pub const NONE: Self = Self(0);
    /// Trace each decoded instruction.
    ///
    /// Enables:
    /// - [`TraceSink::instr`]
    pub const INSTR: Self = Self(1 << 0);
    /// Trace each resolved label.
    ///
    /// Enables:
    /// - [`TraceSink::label`]
    pub const LABEL: Self = Self(1 << 1);
    /// Trace the error that aborted a decode.
    ///
    /// Enables:
    /// - [`TraceSink::failure`]
    pub const FAILURE: Self = Self(1 << 2);
    /// Every event.
    pub const ALL: Self = Self(Self::INSTR.0 | Self::LABEL.0 | Self::FAILURE.0);

    /// Returns `true` if this mask includes all bits in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// A trace sink that can receive decode events.
pub trait TraceSink {
    /// Returns the set of events the sink wants.
    fn mask(&self) -> TraceMask {
        TraceMask::NONE
    }

    /// Called after each successfully decoded instruction.
    ///
    /// Called only if `mask()` includes [`TraceMask::INSTR`].
    ///
    /// - `pc`: program counter of the opcode byte
    /// - `opcode`: decoded opcode
    /// - `byte_len`: encoded length of the instruction, opcode byte included
    fn instr(&mut self, _pc: Pc, _opcode: Opcode, _byte_len: usize) {}

    /// Called for each label carried by a decoded instruction, in operand order.
    ///
    /// Called only if `mask()` includes [`TraceMask::LABEL`].
    ///
    /// - `pc`: program counter of the instruction carrying the label
    /// - `label`: the resolved label
    fn label(&mut self, _pc: Pc, _label: &Label) {}

    /// Called once when a decode aborts.
    ///
    /// Called only if `mask()` includes [`TraceMask::FAILURE`].
    fn failure(&mut self, _err: &DisasmError) {}
}

/// A [`TraceSink`] that emits `tracing` events.
///
/// Instructions are logged at `DEBUG`, labels at `TRACE` and failures at `WARN`.
#[cfg(feature = "tracing")]
#[derive(Copy, Clone, Debug)]
pub struct TracingSink {
    mask: TraceMask,
}

#[cfg(feature = "tracing")]
impl TracingSink {
    /// Creates a sink forwarding the events in `mask`.
    #[must_use]
    pub const fn new(mask: TraceMask) -> Self {
        Self { mask }
    }
}

#[cfg(feature = "tracing")]
impl Default for TracingSink {
    fn default() -> Self {
        Self::new(TraceMask::ALL)
    }
}

#[cfg(feature = "tracing")]
impl TraceSink for TracingSink {
    fn mask(&self) -> TraceMask {
        self.mask
    }

    fn instr(&mut self, pc: Pc, opcode: Opcode, byte_len: usize) {
        tracing::debug!(pc = pc.0, %opcode, byte_len, "decoded instruction");
    }

    fn label(&mut self, pc: Pc, label: &Label) {
        tracing::trace!(pc = pc.0, target = label.target.0, base = ?label.base, "resolved label");
    }

    fn failure(&mut self, err: &DisasmError) {
        tracing::warn!(error = %err, "decode failed");
    }
}
