// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operand width configuration.
//!
//! The Swamp instruction set is emitted in two encodings that share opcode bytes, operand order,
//! and label rules, but differ in how wide each operand is:
//!
//! - [`Encoding::COMPACT`]: every operand is one byte. This is the default.
//! - [`Encoding::FRAME`]: registers are 32-bit frame offsets, field indices and label deltas are
//!   16-bit, and a register copy moves a sized slot range.
//!
//! Multi-byte operands are little-endian. The opcode byte and the enum-case tag byte are always a
//! single byte.

use core::fmt;
use core::str::FromStr;

use crate::format::{DecodeError, Reader};

/// Fixed width of an encoded unsigned operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    /// One byte.
    U8,
    /// Two bytes, little-endian.
    U16,
    /// Four bytes, little-endian.
    U32,
}

impl Width {
    /// Number of bytes an operand of this width occupies.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    pub(crate) fn read(self, r: &mut Reader<'_>) -> Result<u32, DecodeError> {
        Ok(match self {
            Self::U8 => u32::from(r.read_u8()?),
            Self::U16 => u32::from(r.read_u16_le()?),
            Self::U32 => r.read_u32_le()?,
        })
    }
}

/// Layout of the source operand of a register copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CopyEncoding {
    /// A single register.
    Register,
    /// A start slot (register width) followed by a size.
    Range {
        /// Width of the size field.
        size: Width,
    },
}

/// Operand widths used when decoding an instruction stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Encoding {
    /// Width of a register operand.
    pub register: Width,
    /// Width of a field index.
    pub field: Width,
    /// Width of a list count (and of the enum construction tag).
    pub count: Width,
    /// Width of an unsigned label delta.
    pub label_delta: Width,
    /// Layout of a register copy's source.
    pub copy: CopyEncoding,
}

impl Encoding {
    /// One byte per operand.
    pub const COMPACT: Self = Self {
        register: Width::U8,
        field: Width::U8,
        count: Width::U8,
        label_delta: Width::U8,
        copy: CopyEncoding::Register,
    };

    /// 32-bit frame slots, 16-bit fields and label deltas, sized copies.
    pub const FRAME: Self = Self {
        register: Width::U32,
        field: Width::U16,
        count: Width::U8,
        label_delta: Width::U16,
        copy: CopyEncoding::Range { size: Width::U16 },
    };
}

impl Default for Encoding {
    fn default() -> Self {
        Self::COMPACT
    }
}

/// An encoding name was not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEncoding;

impl fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown encoding (expected `compact` or `frame`)")
    }
}

impl core::error::Error for UnknownEncoding {}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(Self::COMPACT),
            "frame" => Ok(Self::FRAME),
            _ => Err(UnknownEncoding),
        }
    }
}
