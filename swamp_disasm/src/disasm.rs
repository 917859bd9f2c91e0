// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disassembler for Swamp instruction streams.
//!
//! This module provides:
//! - The decode driver ([`disassemble`], [`disassemble_with`], [`disassemble_traced`]).
//! - A structured view ([`Disassembly`], [`DecodedInstr`]) for tooling/tests.
//! - A stable, human-readable text format via [`core::fmt::Display`].
//!
//! Decoding is fail-fast: the first malformed instruction aborts the whole stream and no partial
//! listing is returned.

#![allow(clippy::module_name_repetitions, reason = "public API module")]

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::analysis::{self, InvalidJumpTarget};
use crate::bytecode::{BytecodeError, Instr, decode_instr};
use crate::codec_primitives::{current_pc, read_opcode_byte};
use crate::encoding::Encoding;
use crate::format::{DecodeError, Reader};
use crate::opcode::Opcode;
use crate::operand::Pc;
use crate::trace::{TraceMask, TraceSink};

/// A disassembly error.
///
/// Every variant that concerns an instruction carries the program counter of its opcode byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisasmError {
    /// The stream ended in the middle of an instruction.
    TruncatedStream {
        /// Program counter of the truncated instruction.
        pc: Pc,
        /// Offset at which the failed read started.
        offset: usize,
    },
    /// The opcode byte is not recognized.
    UnknownOpcode {
        /// The unrecognized opcode byte.
        opcode: u8,
        /// Program counter of the opcode byte.
        pc: Pc,
    },
    /// The opcode is recognized but has no operand layout to decode.
    UnimplementedOpcode {
        /// The opcode byte.
        opcode: u8,
        /// Program counter of the opcode byte.
        pc: Pc,
    },
    /// A label target does not fit a program counter.
    OutOfBounds {
        /// Program counter of the instruction carrying the label.
        pc: Pc,
    },
    /// The stream is too long to be addressed by 32-bit program counters.
    StreamTooLarge {
        /// Length of the rejected stream in bytes.
        len: usize,
    },
}

impl DisasmError {
    fn from_decode(e: DecodeError, pc: Pc) -> Self {
        match e {
            DecodeError::UnexpectedEof { offset } => Self::TruncatedStream { pc, offset },
            DecodeError::OutOfBounds => Self::OutOfBounds { pc },
        }
    }

    fn from_bytecode(e: BytecodeError, opcode: Opcode, pc: Pc) -> Self {
        match e {
            BytecodeError::Decode(e) => Self::from_decode(e, pc),
            BytecodeError::Unimplemented => Self::UnimplementedOpcode {
                opcode: opcode.byte(),
                pc,
            },
        }
    }

    /// Returns the program counter of the failing instruction, if there is one.
    #[must_use]
    pub fn pc(&self) -> Option<Pc> {
        match self {
            Self::TruncatedStream { pc, .. }
            | Self::UnknownOpcode { pc, .. }
            | Self::UnimplementedOpcode { pc, .. }
            | Self::OutOfBounds { pc } => Some(*pc),
            Self::StreamTooLarge { .. } => None,
        }
    }
}

impl fmt::Display for DisasmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedStream { pc, offset } => {
                write!(
                    f,
                    "truncated instruction at pc {pc}: input ends at offset {offset}"
                )
            }
            Self::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode 0x{opcode:02x} at pc {pc}")
            }
            Self::UnimplementedOpcode { opcode, pc } => {
                write!(f, "opcode 0x{opcode:02x} at pc {pc} has no operand layout")
            }
            Self::OutOfBounds { pc } => write!(f, "label target out of bounds at pc {pc}"),
            Self::StreamTooLarge { len } => {
                write!(
                    f,
                    "instruction stream of {len} bytes exceeds 32-bit program counters"
                )
            }
        }
    }
}

impl core::error::Error for DisasmError {}

/// One decoded instruction with its position in the stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedInstr {
    /// Program counter of the opcode byte.
    pub pc: Pc,
    /// The decoded opcode.
    pub opcode: Opcode,
    /// The decoded instruction.
    pub instr: Instr,
    /// Encoded length in bytes, opcode byte included.
    pub byte_len: usize,
}

impl fmt::Display for DecodedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pc, self.instr)
    }
}

/// Disassembles `bytes` using [`Encoding::COMPACT`].
///
/// # Errors
///
/// Returns the first [`DisasmError`] encountered; no partial listing is produced.
pub fn disassemble(bytes: &[u8]) -> Result<Disassembly, DisasmError> {
    disassemble_with(bytes, &Encoding::COMPACT)
}

/// Disassembles `bytes` using the given operand encoding.
///
/// # Errors
///
/// See [`disassemble`].
pub fn disassemble_with(bytes: &[u8], enc: &Encoding) -> Result<Disassembly, DisasmError> {
    disassemble_traced(bytes, enc, None)
}

/// Disassembles `bytes`, reporting decode events to `trace`.
///
/// A failing decode is reported to the sink (if it asks for [`TraceMask::FAILURE`]) before it is
/// returned.
///
/// # Errors
///
/// See [`disassemble`].
pub fn disassemble_traced(
    bytes: &[u8],
    enc: &Encoding,
    trace: Option<&mut dyn TraceSink>,
) -> Result<Disassembly, DisasmError> {
    let instrs = decode_instructions(bytes, enc, trace)?;
    Ok(Disassembly {
        instrs,
        byte_len: bytes.len(),
    })
}

/// Decodes a whole instruction stream.
///
/// Reaching the end of input between instructions ends the loop; reaching it inside one is a
/// [`DisasmError::TruncatedStream`].
pub(crate) fn decode_instructions(
    bytes: &[u8],
    enc: &Encoding,
    mut trace: Option<&mut dyn TraceSink>,
) -> Result<Vec<DecodedInstr>, DisasmError> {
    let mask = trace.as_deref().map_or(TraceMask::NONE, |t| t.mask());

    let result = decode_stream(bytes, enc, |di| {
        if let Some(t) = trace.as_deref_mut() {
            if mask.contains(TraceMask::INSTR) {
                t.instr(di.pc, di.opcode, di.byte_len);
            }
            if mask.contains(TraceMask::LABEL) {
                di.instr.visit_labels(|label| t.label(di.pc, label));
            }
        }
    });

    match (&result, trace) {
        (Err(e), Some(t)) if mask.contains(TraceMask::FAILURE) => t.failure(e),
        _ => {}
    }
    result
}

fn decode_stream(
    bytes: &[u8],
    enc: &Encoding,
    mut on_instr: impl FnMut(&DecodedInstr),
) -> Result<Vec<DecodedInstr>, DisasmError> {
    if u32::try_from(bytes.len()).is_err() {
        return Err(DisasmError::StreamTooLarge { len: bytes.len() });
    }

    let mut r = Reader::new(bytes);
    let mut out = Vec::new();
    while !r.is_exhausted() {
        let di = decode_one(&mut r, enc)?;
        on_instr(&di);
        out.push(di);
    }
    Ok(out)
}

fn decode_one(r: &mut Reader<'_>, enc: &Encoding) -> Result<DecodedInstr, DisasmError> {
    let start = r.offset();
    let pc = current_pc(r).map_err(|_| DisasmError::StreamTooLarge { len: r.len() })?;
    let byte = read_opcode_byte(r).map_err(|e| DisasmError::from_decode(e, pc))?;
    let opcode = Opcode::from_u8(byte).ok_or(DisasmError::UnknownOpcode { opcode: byte, pc })?;
    let instr =
        decode_instr(opcode, r, enc).map_err(|e| DisasmError::from_bytecode(e, opcode, pc))?;
    Ok(DecodedInstr {
        pc,
        opcode,
        instr,
        byte_len: r.offset() - start,
    })
}

/// Label indices for a disassembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    pcs: Vec<Pc>,
}

impl Labels {
    /// Returns the sorted label pcs.
    #[must_use]
    pub fn pcs(&self) -> &[Pc] {
        &self.pcs
    }

    /// Returns the label index for `pc` if it is labeled.
    #[must_use]
    pub fn label_index(&self, pc: Pc) -> Option<usize> {
        self.pcs.binary_search(&pc).ok()
    }
}

/// A successfully decoded instruction stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disassembly {
    instrs: Vec<DecodedInstr>,
    byte_len: usize,
}

impl Disassembly {
    /// Returns the decoded instructions in stream order.
    #[must_use]
    pub fn instrs(&self) -> &[DecodedInstr] {
        &self.instrs
    }

    /// Consumes the disassembly, returning the decoded instructions.
    #[must_use]
    pub fn into_instrs(self) -> Vec<DecodedInstr> {
        self.instrs
    }

    /// Returns the number of decoded instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    /// Returns `true` if the stream held no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// Returns the length of the decoded stream in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Renders each instruction as `<pc>: <mnemonic> <operands>`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.instrs.iter().map(ToString::to_string).collect()
    }

    /// Renders the whole listing on one line: `[0000: ... 0004: ...]`.
    #[must_use]
    pub fn inline(&self) -> String {
        let mut s = String::from("[");
        s.push_str(&self.lines().join(" "));
        s.push(']');
        s
    }

    /// Computes label indices.
    ///
    /// Labels are derived from every resolved jump target plus the stream entry (`pc=0`).
    #[must_use]
    pub fn labels(&self) -> Labels {
        let mut pcs = Vec::new();
        pcs.push(Pc(0));
        for di in &self.instrs {
            di.instr.visit_labels(|l| pcs.push(l.target));
        }
        pcs.sort_unstable();
        pcs.dedup();
        Labels { pcs }
    }

    /// Returns every label that does not land on an instruction boundary.
    #[must_use]
    pub fn invalid_jump_targets(&self) -> Vec<InvalidJumpTarget> {
        analysis::invalid_jump_targets(self.byte_len, &self.instrs)
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for di in &self.instrs {
            writeln!(f, "{di}")?;
        }
        Ok(())
    }
}
