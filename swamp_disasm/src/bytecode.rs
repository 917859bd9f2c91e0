// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The decoded instruction set and the per-opcode decode table.
//!
//! Each opcode maps to exactly one operand layout. A decode routine consumes precisely that
//! layout, in order, and produces one [`Instr`]. Reading a byte more or less than the layout
//! desynchronizes every later instruction in the stream, so the table is the single place
//! operand order is spelled out.

use alloc::vec::Vec;
use core::fmt;

use crate::codec_primitives::{
    capacity_for, read_copy_source, read_count, read_field, read_label, read_label_delta,
    read_raw_u8, read_reg, read_reg_list, read_regs,
};
use crate::encoding::Encoding;
use crate::format::{DecodeError, Reader};
use crate::labels::LabelChain;
use crate::opcode::Opcode;
use crate::operand::{CopySource, Field, FieldAssignment, Label, Register};

/// A decode routine failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BytecodeError {
    /// The operand bytes were malformed or truncated.
    Decode(DecodeError),
    /// The opcode is known but has no operand layout to decode.
    Unimplemented,
}

impl From<DecodeError> for BytecodeError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

/// Arithmetic and comparison operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`.
    Add,
    /// `a - b`.
    Sub,
    /// `a * b`.
    Mul,
    /// `a / b`.
    Div,
    /// `a * b` in fixed point.
    FixedMul,
    /// `a / b` in fixed point.
    FixedDiv,
    /// `a == b`.
    Equal,
    /// `a != b`.
    NotEqual,
    /// `a < b`.
    Less,
    /// `a <= b`.
    LessOrEqual,
    /// `a > b`.
    Greater,
    /// `a >= b`.
    GreaterOrEqual,
}

impl BinaryOp {
    /// The opcode this operator is encoded with.
    #[must_use]
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::Add => Opcode::Add,
            Self::Sub => Opcode::Sub,
            Self::Mul => Opcode::Mul,
            Self::Div => Opcode::Div,
            Self::FixedMul => Opcode::FixedMul,
            Self::FixedDiv => Opcode::FixedDiv,
            Self::Equal => Opcode::Equal,
            Self::NotEqual => Opcode::NotEqual,
            Self::Less => Opcode::Less,
            Self::LessOrEqual => Opcode::LessOrEqual,
            Self::Greater => Opcode::Greater,
            Self::GreaterOrEqual => Opcode::GreaterOrEqual,
        }
    }
}

/// Bitwise binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    /// `a & b`.
    And,
    /// `a | b`.
    Or,
    /// `a ^ b`.
    Xor,
}

impl BitwiseOp {
    /// The opcode this operator is encoded with.
    #[must_use]
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::And => Opcode::BitwiseAnd,
            Self::Or => Opcode::BitwiseOr,
            Self::Xor => Opcode::BitwiseXor,
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `~a`.
    BitwiseNot,
    /// `!a`.
    LogicalNot,
}

impl UnaryOp {
    /// The opcode this operator is encoded with.
    #[must_use]
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::BitwiseNot => Opcode::BitwiseNot,
            Self::LogicalNot => Opcode::LogicalNot,
        }
    }
}

/// One entry of an enum-case jump table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseJump {
    /// Enum variant tag this entry matches.
    pub tag: u8,
    /// Registers receiving the variant's payload.
    pub args: Vec<Register>,
    /// Where execution continues for this variant.
    pub label: Label,
}

/// A decoded instruction.
///
/// Tail calls (`tcl`) have no operand layout and are rejected by the decoder, so they have no
/// variant here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instr {
    /// `dst = a <op> b` (arithmetic or comparison).
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Destination register.
        dst: Register,
        /// Left operand.
        a: Register,
        /// Right operand.
        b: Register,
    },
    /// `dst = a <op> b` (bitwise).
    Bitwise {
        /// Operator.
        op: BitwiseOp,
        /// Destination register.
        dst: Register,
        /// Left operand.
        a: Register,
        /// Right operand.
        b: Register,
    },
    /// `dst = <op> src`.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Destination register.
        dst: Register,
        /// Operand.
        src: Register,
    },
    /// `dst = item :: list`.
    ListConj {
        /// Destination register.
        dst: Register,
        /// List being prepended to.
        list: Register,
        /// Item to prepend.
        item: Register,
    },
    /// `dst = a ++ b` (lists).
    ListAppend {
        /// Destination register.
        dst: Register,
        /// Left list.
        a: Register,
        /// Right list.
        b: Register,
    },
    /// `dst = a ++ b` (strings).
    StringAppend {
        /// Destination register.
        dst: Register,
        /// Left string.
        a: Register,
        /// Right string.
        b: Register,
    },
    /// `dst = { fields... }`.
    CreateStruct {
        /// Destination register.
        dst: Register,
        /// Field values in field order.
        fields: Vec<Register>,
    },
    /// `dst = [items...]`.
    CreateList {
        /// Destination register.
        dst: Register,
        /// Items in list order.
        items: Vec<Register>,
    },
    /// `dst = { src | field = value, ... }`.
    UpdateStruct {
        /// Destination register.
        dst: Register,
        /// Struct being copied.
        src: Register,
        /// Fields overwritten in the copy, in encoded order.
        assignments: Vec<FieldAssignment>,
    },
    /// `dst = src.f1.f2...`.
    GetStruct {
        /// Destination register.
        dst: Register,
        /// Struct being read.
        src: Register,
        /// Accessor chain, outermost field first.
        path: Vec<Field>,
    },
    /// `dst = Variant#tag(args...)`.
    CreateEnum {
        /// Destination register.
        dst: Register,
        /// Variant tag.
        tag: u32,
        /// Payload registers.
        args: Vec<Register>,
    },
    /// Dispatch on the tag of `src` through a chained jump table.
    EnumCase {
        /// Destination register.
        dst: Register,
        /// Enum value being matched.
        src: Register,
        /// Jump table entries in encoded order.
        jumps: Vec<CaseJump>,
    },
    /// `dst = src`.
    Copy {
        /// Destination register.
        dst: Register,
        /// Source register or slot range.
        src: CopySource,
    },
    /// `dst = func(args...)`.
    Call {
        /// Destination register.
        dst: Register,
        /// Register holding the callee.
        func: Register,
        /// Argument registers.
        args: Vec<Register>,
    },
    /// `dst = func(args...)` for an external function.
    CallExternal {
        /// Destination register.
        dst: Register,
        /// Register holding the external callee.
        func: Register,
        /// Argument registers.
        args: Vec<Register>,
    },
    /// `dst = func` partially applied to `args`.
    Curry {
        /// Destination register.
        dst: Register,
        /// Register holding the function.
        func: Register,
        /// Bound argument registers.
        args: Vec<Register>,
    },
    /// Return from the current function.
    Return,
    /// Unconditional jump.
    Jump {
        /// Jump target.
        label: Label,
    },
    /// Jump if `test` is false.
    BranchFalse {
        /// Register tested.
        test: Register,
        /// Jump target.
        label: Label,
    },
    /// Jump if `test` is true.
    BranchTrue {
        /// Register tested.
        test: Register,
        /// Jump target.
        label: Label,
    },
}

impl Instr {
    /// The opcode this instruction was decoded from.
    #[must_use]
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Binary { op, .. } => op.opcode(),
            Self::Bitwise { op, .. } => op.opcode(),
            Self::Unary { op, .. } => op.opcode(),
            Self::ListConj { .. } => Opcode::ListConj,
            Self::ListAppend { .. } => Opcode::ListAppend,
            Self::StringAppend { .. } => Opcode::StringAppend,
            Self::CreateStruct { .. } => Opcode::CreateStruct,
            Self::CreateList { .. } => Opcode::CreateList,
            Self::UpdateStruct { .. } => Opcode::UpdateStruct,
            Self::GetStruct { .. } => Opcode::StructGet,
            Self::CreateEnum { .. } => Opcode::CreateEnum,
            Self::EnumCase { .. } => Opcode::EnumCase,
            Self::Copy { .. } => Opcode::RegCopy,
            Self::Call { .. } => Opcode::Call,
            Self::CallExternal { .. } => Opcode::CallExternal,
            Self::Curry { .. } => Opcode::Curry,
            Self::Return => Opcode::Return,
            Self::Jump { .. } => Opcode::Jump,
            Self::BranchFalse { .. } => Opcode::BranchFalse,
            Self::BranchTrue { .. } => Opcode::BranchTrue,
        }
    }

    /// Returns `true` if this instruction ends a basic block.
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        self.opcode().is_terminator()
    }

    /// Returns every label carried by this instruction, in operand order.
    #[must_use]
    pub fn labels(&self) -> Vec<Label> {
        let mut out = Vec::new();
        self.visit_labels(|l| out.push(*l));
        out
    }

    /// Calls `f` for each label carried by this instruction, in operand order.
    pub fn visit_labels(&self, mut f: impl FnMut(&Label)) {
        match self {
            Self::Jump { label }
            | Self::BranchFalse { label, .. }
            | Self::BranchTrue { label, .. } => {
                f(label);
            }
            Self::EnumCase { jumps, .. } => {
                for jump in jumps {
                    f(&jump.label);
                }
            }
            _ => {}
        }
    }
}

/// Decodes the operands of `op` from `r`.
///
/// The opcode byte itself must already have been consumed.
pub(crate) fn decode_instr(
    op: Opcode,
    r: &mut Reader<'_>,
    enc: &Encoding,
) -> Result<Instr, BytecodeError> {
    let instr = match op {
        Opcode::Add => binary(BinaryOp::Add, r, enc)?,
        Opcode::Sub => binary(BinaryOp::Sub, r, enc)?,
        Opcode::Mul => binary(BinaryOp::Mul, r, enc)?,
        Opcode::Div => binary(BinaryOp::Div, r, enc)?,
        Opcode::FixedMul => binary(BinaryOp::FixedMul, r, enc)?,
        Opcode::FixedDiv => binary(BinaryOp::FixedDiv, r, enc)?,
        Opcode::Equal => binary(BinaryOp::Equal, r, enc)?,
        Opcode::NotEqual => binary(BinaryOp::NotEqual, r, enc)?,
        Opcode::Less => binary(BinaryOp::Less, r, enc)?,
        Opcode::LessOrEqual => binary(BinaryOp::LessOrEqual, r, enc)?,
        Opcode::Greater => binary(BinaryOp::Greater, r, enc)?,
        Opcode::GreaterOrEqual => binary(BinaryOp::GreaterOrEqual, r, enc)?,

        Opcode::BitwiseAnd => bitwise(BitwiseOp::And, r, enc)?,
        Opcode::BitwiseOr => bitwise(BitwiseOp::Or, r, enc)?,
        Opcode::BitwiseXor => bitwise(BitwiseOp::Xor, r, enc)?,
        Opcode::BitwiseNot => unary(UnaryOp::BitwiseNot, r, enc)?,
        Opcode::LogicalNot => unary(UnaryOp::LogicalNot, r, enc)?,

        Opcode::ListConj => Instr::ListConj {
            dst: read_reg(r, enc)?,
            list: read_reg(r, enc)?,
            item: read_reg(r, enc)?,
        },
        Opcode::ListAppend => Instr::ListAppend {
            dst: read_reg(r, enc)?,
            a: read_reg(r, enc)?,
            b: read_reg(r, enc)?,
        },
        Opcode::StringAppend => Instr::StringAppend {
            dst: read_reg(r, enc)?,
            a: read_reg(r, enc)?,
            b: read_reg(r, enc)?,
        },
        Opcode::CreateStruct => Instr::CreateStruct {
            dst: read_reg(r, enc)?,
            fields: read_reg_list(r, enc)?,
        },
        Opcode::CreateList => Instr::CreateList {
            dst: read_reg(r, enc)?,
            items: read_reg_list(r, enc)?,
        },
        Opcode::UpdateStruct => decode_update_struct(r, enc)?,
        Opcode::StructGet => decode_get_struct(r, enc)?,
        Opcode::CreateEnum => Instr::CreateEnum {
            dst: read_reg(r, enc)?,
            tag: enc.count.read(r)?,
            args: read_reg_list(r, enc)?,
        },
        Opcode::EnumCase => decode_enum_case(r, enc)?,
        Opcode::RegCopy => Instr::Copy {
            dst: read_reg(r, enc)?,
            src: read_copy_source(r, enc)?,
        },

        Opcode::Call => Instr::Call {
            dst: read_reg(r, enc)?,
            func: read_reg(r, enc)?,
            args: read_reg_list(r, enc)?,
        },
        Opcode::CallExternal => Instr::CallExternal {
            dst: read_reg(r, enc)?,
            func: read_reg(r, enc)?,
            args: read_reg_list(r, enc)?,
        },
        Opcode::Curry => Instr::Curry {
            dst: read_reg(r, enc)?,
            func: read_reg(r, enc)?,
            args: read_reg_list(r, enc)?,
        },
        // No operand layout; nothing past the opcode byte is read.
        Opcode::TailCall => return Err(BytecodeError::Unimplemented),
        Opcode::Return => Instr::Return,

        Opcode::Jump => Instr::Jump {
            label: read_label(r, enc)?,
        },
        Opcode::BranchFalse => Instr::BranchFalse {
            test: read_reg(r, enc)?,
            label: read_label(r, enc)?,
        },
        Opcode::BranchTrue => Instr::BranchTrue {
            test: read_reg(r, enc)?,
            label: read_label(r, enc)?,
        },
    };
    Ok(instr)
}

fn binary(op: BinaryOp, r: &mut Reader<'_>, enc: &Encoding) -> Result<Instr, DecodeError> {
    Ok(Instr::Binary {
        op,
        dst: read_reg(r, enc)?,
        a: read_reg(r, enc)?,
        b: read_reg(r, enc)?,
    })
}

fn bitwise(op: BitwiseOp, r: &mut Reader<'_>, enc: &Encoding) -> Result<Instr, DecodeError> {
    Ok(Instr::Bitwise {
        op,
        dst: read_reg(r, enc)?,
        a: read_reg(r, enc)?,
        b: read_reg(r, enc)?,
    })
}

fn unary(op: UnaryOp, r: &mut Reader<'_>, enc: &Encoding) -> Result<Instr, DecodeError> {
    Ok(Instr::Unary {
        op,
        dst: read_reg(r, enc)?,
        src: read_reg(r, enc)?,
    })
}

fn decode_update_struct(r: &mut Reader<'_>, enc: &Encoding) -> Result<Instr, DecodeError> {
    let dst = read_reg(r, enc)?;
    let src = read_reg(r, enc)?;
    let count = read_count(r, enc)?;
    let mut assignments = Vec::with_capacity(capacity_for(r, count));
    for _ in 0..count {
        assignments.push(FieldAssignment {
            field: read_field(r, enc)?,
            src: read_reg(r, enc)?,
        });
    }
    Ok(Instr::UpdateStruct {
        dst,
        src,
        assignments,
    })
}

fn decode_get_struct(r: &mut Reader<'_>, enc: &Encoding) -> Result<Instr, DecodeError> {
    let dst = read_reg(r, enc)?;
    let src = read_reg(r, enc)?;
    let count = read_count(r, enc)?;
    let mut path = Vec::with_capacity(capacity_for(r, count));
    for _ in 0..count {
        path.push(read_field(r, enc)?);
    }
    Ok(Instr::GetStruct { dst, src, path })
}

/// Decodes an enum-case jump table.
///
/// The [`LabelChain`] is folded through the entries: the first delta resolves against the
/// position after it, every later one against the previous entry's target.
fn decode_enum_case(r: &mut Reader<'_>, enc: &Encoding) -> Result<Instr, DecodeError> {
    let dst = read_reg(r, enc)?;
    let src = read_reg(r, enc)?;
    let count = read_count(r, enc)?;
    let init = (
        Vec::with_capacity(capacity_for(r, count)),
        LabelChain::new(),
    );
    let (jumps, _) = (0..count).try_fold(init, |(mut jumps, chain), _| {
        let tag = read_raw_u8(r)?;
        let argc = read_count(r, enc)?;
        let args = read_regs(r, enc, argc)?;
        let (delta, position) = read_label_delta(r, enc)?;
        let (label, chain) = chain
            .resolve(delta, position)
            .ok_or(DecodeError::OutOfBounds)?;
        jumps.push(CaseJump { tag, args, label });
        Ok::<_, DecodeError>((jumps, chain))
    })?;
    Ok(Instr::EnumCase { dst, src, jumps })
}

fn fmt_reg_list(f: &mut fmt::Formatter<'_>, regs: &[Register]) -> fmt::Result {
    write!(f, "[")?;
    for (i, r) in regs.iter().enumerate() {
        if i != 0 {
            write!(f, " ")?;
        }
        write!(f, "{r}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode().mnemonic())?;
        match self {
            Self::Binary { dst, a, b, .. }
            | Self::Bitwise { dst, a, b, .. }
            | Self::ListAppend { dst, a, b }
            | Self::StringAppend { dst, a, b } => write!(f, " {dst},{a},{b}"),
            Self::ListConj { dst, list, item } => write!(f, " {dst},{list},{item}"),
            Self::Unary { dst, src, .. } => write!(f, " {dst},{src}"),
            Self::CreateStruct { dst, fields: regs } | Self::CreateList { dst, items: regs } => {
                write!(f, " {dst} ")?;
                fmt_reg_list(f, regs)
            }
            Self::UpdateStruct {
                dst,
                src,
                assignments,
            } => {
                write!(f, " {dst},{src}")?;
                for a in assignments {
                    write!(f, " {a}")?;
                }
                Ok(())
            }
            Self::GetStruct { dst, src, path } if path.is_empty() => write!(f, " {dst},{src}"),
            Self::GetStruct { dst, src, path } => {
                write!(f, " {dst},(")?;
                for (i, field) in path.iter().enumerate() {
                    if i != 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, ":{src})")
            }
            Self::CreateEnum { dst, tag, args } => {
                write!(f, " {dst} #{tag} ")?;
                fmt_reg_list(f, args)
            }
            Self::EnumCase { dst, src, jumps } => {
                write!(f, " {dst},{src}")?;
                for jump in jumps {
                    write!(f, " #{} ", jump.tag)?;
                    fmt_reg_list(f, &jump.args)?;
                    write!(f, " {}", jump.label)?;
                }
                Ok(())
            }
            Self::Copy { dst, src } => write!(f, " {dst},{src}"),
            Self::Call { dst, func, args }
            | Self::CallExternal { dst, func, args }
            | Self::Curry { dst, func, args } => {
                write!(f, " {dst},{func} ")?;
                fmt_reg_list(f, args)
            }
            Self::Return => Ok(()),
            Self::Jump { label } => write!(f, " {label}"),
            Self::BranchFalse { test, label } | Self::BranchTrue { test, label } => {
                write!(f, " {test} {label}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::{LabelBase, Pc};
    use alloc::string::ToString;
    use alloc::vec;

    /// Decodes one instruction at the start of `bytes`; returns it with its byte length.
    fn decode_one(bytes: &[u8], enc: &Encoding) -> Result<(Instr, usize), BytecodeError> {
        let mut r = Reader::new(bytes);
        let op = Opcode::from_u8(r.read_u8()?).expect("known opcode");
        let instr = decode_instr(op, &mut r, enc)?;
        Ok((instr, r.offset()))
    }

    fn compact(bytes: &[u8]) -> (Instr, usize) {
        decode_one(bytes, &Encoding::COMPACT).unwrap()
    }

    #[test]
    fn binary_ops_read_three_registers() {
        let (instr, len) = compact(&[Opcode::Sub as u8, 4, 5, 6]);
        assert_eq!(len, 4);
        assert_eq!(
            instr,
            Instr::Binary {
                op: BinaryOp::Sub,
                dst: Register(4),
                a: Register(5),
                b: Register(6),
            }
        );
        assert_eq!(instr.to_string(), "sub 4,5,6");
    }

    #[test]
    fn bitwise_and_unary_ops() {
        let (instr, len) = compact(&[Opcode::BitwiseXor as u8, 1, 2, 3]);
        assert_eq!(len, 4);
        assert_eq!(instr.to_string(), "bxor 1,2,3");

        let (instr, len) = compact(&[Opcode::BitwiseNot as u8, 7, 8]);
        assert_eq!(len, 3);
        assert_eq!(
            instr,
            Instr::Unary {
                op: UnaryOp::BitwiseNot,
                dst: Register(7),
                src: Register(8),
            }
        );
    }

    #[test]
    fn list_conj_reads_list_before_item() {
        let (instr, _) = compact(&[Opcode::ListConj as u8, 0, 1, 2]);
        assert_eq!(
            instr,
            Instr::ListConj {
                dst: Register(0),
                list: Register(1),
                item: Register(2),
            }
        );
        assert_eq!(instr.to_string(), "conj 0,1,2");
    }

    #[test]
    fn appends_and_creates() {
        assert_eq!(
            compact(&[Opcode::StringAppend as u8, 3, 1, 2]).0.to_string(),
            "sap 3,1,2"
        );
        let (instr, len) = compact(&[Opcode::CreateList as u8, 9, 3, 4, 5, 6]);
        assert_eq!(len, 6);
        assert_eq!(
            instr,
            Instr::CreateList {
                dst: Register(9),
                items: vec![Register(4), Register(5), Register(6)],
            }
        );
        assert_eq!(instr.to_string(), "crl 9 [4 5 6]");

        let (instr, len) = compact(&[Opcode::CreateStruct as u8, 2, 0]);
        assert_eq!(len, 3);
        assert_eq!(instr.to_string(), "crs 2 []");
    }

    #[test]
    fn update_struct_reads_field_source_pairs() {
        let (instr, len) = compact(&[Opcode::UpdateStruct as u8, 0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(len, 8);
        assert_eq!(
            instr,
            Instr::UpdateStruct {
                dst: Register(0),
                src: Register(1),
                assignments: vec![
                    FieldAssignment {
                        field: Field(3),
                        src: Register(4),
                    },
                    FieldAssignment {
                        field: Field(5),
                        src: Register(6),
                    },
                ],
            }
        );
        assert_eq!(instr.to_string(), "upd 0,1 (3:4) (5:6)");
    }

    #[test]
    fn get_struct_reads_accessor_chain() {
        let (instr, len) = compact(&[Opcode::StructGet as u8, 0, 1, 1, 2]);
        assert_eq!(len, 5);
        assert_eq!(instr.to_string(), "get 0,(2:1)");

        let (instr, len) = compact(&[Opcode::StructGet as u8, 0, 1, 3, 2, 0, 4]);
        assert_eq!(len, 7);
        assert_eq!(
            instr,
            Instr::GetStruct {
                dst: Register(0),
                src: Register(1),
                path: vec![Field(2), Field(0), Field(4)],
            }
        );
        assert_eq!(instr.to_string(), "get 0,(2.0.4:1)");
    }

    #[test]
    fn get_struct_without_path_renders_source_register() {
        let (instr, len) = compact(&[Opcode::StructGet as u8, 0, 1, 0]);
        assert_eq!(len, 4);
        assert_eq!(
            instr,
            Instr::GetStruct {
                dst: Register(0),
                src: Register(1),
                path: vec![],
            }
        );
        assert_eq!(instr.to_string(), "get 0,1");
    }

    #[test]
    fn create_enum_reads_tag_then_args() {
        let (instr, len) = compact(&[Opcode::CreateEnum as u8, 5, 2, 1, 7]);
        assert_eq!(len, 5);
        assert_eq!(
            instr,
            Instr::CreateEnum {
                dst: Register(5),
                tag: 2,
                args: vec![Register(7)],
            }
        );
        assert_eq!(instr.to_string(), "enum 5 #2 [7]");
    }

    #[test]
    fn enum_case_chains_labels() {
        // case dst=0 src=1, two entries.
        let bytes = [
            Opcode::EnumCase as u8,
            0,
            1,
            2,
            // entry 0: tag 0, no args, delta 3 (read at offset 6, position after = 7)
            0,
            0,
            3,
            // entry 1: tag 1, one arg (r4), delta 2 from previous target
            1,
            1,
            4,
            2,
        ];
        let (instr, len) = compact(&bytes);
        assert_eq!(len, bytes.len());
        let Instr::EnumCase { dst, src, jumps } = &instr else {
            panic!("expected enum case, got {instr:?}");
        };
        assert_eq!((*dst, *src), (Register(0), Register(1)));
        assert_eq!(jumps.len(), 2);
        assert_eq!(jumps[0].tag, 0);
        assert!(jumps[0].args.is_empty());
        assert_eq!(jumps[0].label.target, Pc(7 + 3));
        assert_eq!(jumps[0].label.base, LabelBase::Position);
        assert_eq!(jumps[1].tag, 1);
        assert_eq!(jumps[1].args, vec![Register(4)]);
        assert_eq!(jumps[1].label.target, Pc(10 + 2));
        assert_eq!(jumps[1].label.base, LabelBase::PreviousTarget);
        assert_eq!(
            instr.to_string(),
            "case 0,1 #0 [] [label @000a] #1 [4] [label @000c]"
        );
    }

    #[test]
    fn enum_case_with_no_entries() {
        let (instr, len) = compact(&[Opcode::EnumCase as u8, 0, 1, 0]);
        assert_eq!(len, 4);
        assert_eq!(instr.to_string(), "case 0,1");
    }

    #[test]
    fn copy_register_and_range() {
        let (instr, len) = compact(&[Opcode::RegCopy as u8, 0, 1]);
        assert_eq!(len, 3);
        assert_eq!(instr.to_string(), "cpy 0,1");

        let bytes = [
            Opcode::RegCopy as u8,
            0x00,
            0x00,
            0x00,
            0x00,
            0x02,
            0x00,
            0x00,
            0x00,
            0x01,
            0x00,
        ];
        let (instr, len) = decode_one(&bytes, &Encoding::FRAME).unwrap();
        assert_eq!(len, bytes.len());
        assert_eq!(instr.to_string(), "cpy 0,(2:1)");
    }

    #[test]
    fn call_family_reads_function_then_args() {
        for (op, name) in [
            (Opcode::Call, "call"),
            (Opcode::CallExternal, "callx"),
            (Opcode::Curry, "curry"),
        ] {
            let (instr, len) = compact(&[op as u8, 0, 9, 2, 1, 2]);
            assert_eq!(len, 6);
            assert_eq!(instr.opcode(), op);
            assert_eq!(instr.to_string(), alloc::format!("{name} 0,9 [1 2]"));
        }
    }

    #[test]
    fn jumps_and_branches_resolve_after_delta() {
        let (instr, len) = compact(&[Opcode::Jump as u8, 4]);
        assert_eq!(len, 2);
        assert_eq!(instr.to_string(), "jmp [label @0006]");

        let (instr, len) = compact(&[Opcode::BranchTrue as u8, 3, 0]);
        assert_eq!(len, 3);
        assert_eq!(instr.to_string(), "brtr 3 [label @0003]");
        assert!(instr.is_terminator());
    }

    #[test]
    fn return_has_no_operands() {
        let (instr, len) = compact(&[Opcode::Return as u8, 0xEE]);
        assert_eq!(len, 1);
        assert_eq!(instr, Instr::Return);
        assert_eq!(instr.to_string(), "ret");
    }

    #[test]
    fn tail_call_is_unimplemented_and_reads_nothing() {
        let mut r = Reader::new(&[1, 2, 3]);
        assert_eq!(
            decode_instr(Opcode::TailCall, &mut r, &Encoding::COMPACT),
            Err(BytecodeError::Unimplemented)
        );
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn truncated_operands_are_errors() {
        assert_eq!(
            decode_one(&[Opcode::Add as u8, 1, 2], &Encoding::COMPACT),
            Err(BytecodeError::Decode(DecodeError::UnexpectedEof { offset: 3 }))
        );
        assert_eq!(
            decode_one(&[Opcode::EnumCase as u8, 0, 1, 2, 0, 0, 3, 1], &Encoding::COMPACT),
            Err(BytecodeError::Decode(DecodeError::UnexpectedEof { offset: 8 }))
        );
    }

    #[test]
    fn visit_labels_in_operand_order() {
        let bytes = [Opcode::EnumCase as u8, 0, 1, 2, 0, 0, 3, 1, 0, 2];
        let (instr, _) = compact(&bytes);
        let mut targets = vec![];
        instr.visit_labels(|l| targets.push(l.target));
        assert_eq!(targets, vec![Pc(10), Pc(12)]);

        let mut count = 0;
        Instr::Return.visit_labels(|_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn labels_are_case_targets_in_operand_order() {
        // Entry deltas 3 then 2: targets 10 then 12, the second chained off the first.
        let bytes = [Opcode::EnumCase as u8, 0, 1, 2, 0, 0, 3, 1, 0, 2];
        let (instr, _) = compact(&bytes);
        assert_eq!(
            instr.labels(),
            vec![
                Label {
                    target: Pc(10),
                    base: LabelBase::Position,
                },
                Label {
                    target: Pc(12),
                    base: LabelBase::PreviousTarget,
                },
            ]
        );
        assert!(Instr::Return.labels().is_empty());

        let (jump, _) = compact(&[Opcode::BranchFalse as u8, 7, 1]);
        assert_eq!(jump.labels().len(), 1);
        assert_eq!(jump.labels()[0].target, Pc(4));
    }
}
