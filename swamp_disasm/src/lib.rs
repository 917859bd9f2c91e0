// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `swamp_disasm`: a decoder and disassembler for Swamp register-VM instruction streams.
//!
//! A stream is the raw bytecode of one compiled function: no header and no length prefix. Each
//! instruction is a one-byte opcode followed by its operands. The decoder turns the stream into a
//! sequence of `(pc, instruction)` pairs and renders them as text.
//!
//! Operand widths are configured with [`encoding::Encoding`]; the default is one byte per
//! operand.
//!
//! ## Example
//!
//! ```
//! use swamp_disasm::disasm::disassemble_with;
//! use swamp_disasm::encoding::Encoding;
//!
//! // not 0,1 ; brfa 0 -> ret ; cpy 0,(2:1) ; ret
//! let bytes = [
//!     0x17, 0, 0, 0, 0, 1, 0, 0, 0,
//!     0x02, 0, 0, 0, 0, 0x0b, 0,
//!     0x27, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0,
//!     0x06,
//! ];
//! let listing = disassemble_with(&bytes, &Encoding::FRAME)?;
//! assert_eq!(
//!     listing.inline(),
//!     "[0000: not 0,1 0009: brfa 0 [label @001b] 0010: cpy 0,(2:1) 001b: ret]"
//! );
//! # Ok::<(), swamp_disasm::disasm::DisasmError>(())
//! ```

#![no_std]

extern crate alloc;

pub mod analysis;
pub mod bytecode;
pub(crate) mod codec_primitives;
pub mod disasm;
pub mod encoding;
pub mod format;
pub mod labels;
pub mod opcode;
pub mod operand;
pub mod trace;
