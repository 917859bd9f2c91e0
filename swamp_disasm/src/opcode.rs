// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opcode byte values and the mnemonic name table.
//!
//! This module is a small wrapper around the generated opcode table.

include!("opcodes_gen.rs");

impl Opcode {
    /// Returns the opcode byte value.
    #[must_use]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Parses an opcode from its byte value.
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Self> {
        Self::from_u8(b)
    }

    /// Returns the display mnemonic (e.g. `brfa`).
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Returns `true` if this opcode ends a basic block (jumps, branches, dispatch, returns).
    #[must_use]
    pub const fn is_terminator(self) -> bool {
        self.info().is_terminator
    }
}

impl core::fmt::Display for Opcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
