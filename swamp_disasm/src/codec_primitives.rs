// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operand readers.
//!
//! These helpers centralize how each operand kind is read from a [`Reader`] under a given
//! [`Encoding`]. Decode routines should route through them so operand widths stay in one place.

use alloc::vec::Vec;

use crate::encoding::{CopyEncoding, Encoding};
use crate::format::{DecodeError, Reader};
use crate::operand::{CopySource, Field, Label, LabelBase, Pc, Register};

/// Returns the cursor position as a program counter.
pub(crate) fn current_pc(r: &Reader<'_>) -> Result<Pc, DecodeError> {
    u32::try_from(r.offset())
        .map(Pc)
        .map_err(|_| DecodeError::OutOfBounds)
}

pub(crate) fn read_opcode_byte(r: &mut Reader<'_>) -> Result<u8, DecodeError> {
    r.read_u8()
}

/// Reads a single byte regardless of encoding (enum-case tags).
pub(crate) fn read_raw_u8(r: &mut Reader<'_>) -> Result<u8, DecodeError> {
    r.read_u8()
}

pub(crate) fn read_reg(r: &mut Reader<'_>, enc: &Encoding) -> Result<Register, DecodeError> {
    enc.register.read(r).map(Register)
}

pub(crate) fn read_field(r: &mut Reader<'_>, enc: &Encoding) -> Result<Field, DecodeError> {
    enc.field.read(r).map(Field)
}

pub(crate) fn read_count(r: &mut Reader<'_>, enc: &Encoding) -> Result<usize, DecodeError> {
    let n = enc.count.read(r)?;
    usize::try_from(n).map_err(|_| DecodeError::OutOfBounds)
}

/// Bounds a count-driven preallocation by what the stream could possibly hold.
pub(crate) fn capacity_for(r: &Reader<'_>, count: usize) -> usize {
    count.min(r.remaining())
}

/// Reads `count` registers, preserving order.
pub(crate) fn read_regs(
    r: &mut Reader<'_>,
    enc: &Encoding,
    count: usize,
) -> Result<Vec<Register>, DecodeError> {
    let mut out = Vec::with_capacity(capacity_for(r, count));
    for _ in 0..count {
        out.push(read_reg(r, enc)?);
    }
    Ok(out)
}

/// Reads a count-prefixed register list.
pub(crate) fn read_reg_list(
    r: &mut Reader<'_>,
    enc: &Encoding,
) -> Result<Vec<Register>, DecodeError> {
    let n = read_count(r, enc)?;
    read_regs(r, enc, n)
}

/// Reads a label delta and returns it with the cursor position immediately after it.
pub(crate) fn read_label_delta(
    r: &mut Reader<'_>,
    enc: &Encoding,
) -> Result<(u32, Pc), DecodeError> {
    let delta = enc.label_delta.read(r)?;
    Ok((delta, current_pc(r)?))
}

/// Reads a single-target label, resolved against the position after its delta.
pub(crate) fn read_label(r: &mut Reader<'_>, enc: &Encoding) -> Result<Label, DecodeError> {
    let (delta, position) = read_label_delta(r, enc)?;
    Label::resolve(position, delta, LabelBase::Position).ok_or(DecodeError::OutOfBounds)
}

pub(crate) fn read_copy_source(
    r: &mut Reader<'_>,
    enc: &Encoding,
) -> Result<CopySource, DecodeError> {
    match enc.copy {
        CopyEncoding::Register => read_reg(r, enc).map(CopySource::Register),
        CopyEncoding::Range { size } => {
            let start = read_reg(r, enc)?;
            let size = size.read(r)?;
            Ok(CopySource::Range { start, size })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Width;
    use alloc::vec;

    #[test]
    fn register_list_preserves_order() {
        let mut r = Reader::new(&[3, 9, 4, 7]);
        let regs = read_reg_list(&mut r, &Encoding::COMPACT).unwrap();
        assert_eq!(regs, vec![Register(9), Register(4), Register(7)]);
        assert!(r.is_exhausted());
    }

    #[test]
    fn empty_register_list_is_valid() {
        let mut r = Reader::new(&[0]);
        let regs = read_reg_list(&mut r, &Encoding::COMPACT).unwrap();
        assert!(regs.is_empty());
        assert!(r.is_exhausted());
    }

    #[test]
    fn short_register_list_is_truncation() {
        let mut r = Reader::new(&[3, 9, 4]);
        assert_eq!(
            read_reg_list(&mut r, &Encoding::COMPACT),
            Err(DecodeError::UnexpectedEof { offset: 3 })
        );
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let enc = Encoding {
            count: Width::U32,
            ..Encoding::COMPACT
        };
        let mut r = Reader::new(&[0xff, 0xff, 0xff, 0x7f, 1]);
        assert!(matches!(
            read_reg_list(&mut r, &enc),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn label_base_is_position_after_delta() {
        // Two padding bytes, then a delta of 5 read at offset 2.
        let mut r = Reader::new(&[0, 0, 5]);
        r.read_u16_le().unwrap();
        let label = read_label(&mut r, &Encoding::COMPACT).unwrap();
        assert_eq!(label.target, Pc(3 + 5));
        assert_eq!(label.base, LabelBase::Position);
    }

    #[test]
    fn frame_label_delta_is_two_bytes() {
        let mut r = Reader::new(&[0x0b, 0x00]);
        let label = read_label(&mut r, &Encoding::FRAME).unwrap();
        assert_eq!(label.target, Pc(2 + 0x0b));
    }

    #[test]
    fn frame_copy_source_is_a_range() {
        let mut r = Reader::new(&[0x02, 0x00, 0x00, 0x00, 0x01, 0x00]);
        let src = read_copy_source(&mut r, &Encoding::FRAME).unwrap();
        assert_eq!(
            src,
            CopySource::Range {
                start: Register(2),
                size: 1
            }
        );
        assert!(r.is_exhausted());
    }
}
