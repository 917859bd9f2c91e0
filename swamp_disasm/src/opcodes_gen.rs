// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// @generated by swamp_disasm_codegen. Do not edit by hand.

/// Opcode byte values for the Swamp instruction set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    /// Unconditional jump to a label.
    Jump = 0x01,
    /// Jump to a label if the test register is false.
    BranchFalse = 0x02,
    /// Jump to a label if the test register is true.
    BranchTrue = 0x03,
    /// Call the function held in a register.
    Call = 0x04,
    /// Tail call (operand layout not specified).
    TailCall = 0x05,
    /// Return from the current function.
    Return = 0x06,
    /// Call an external (host) function held in a register.
    CallExternal = 0x07,
    /// Partially apply a function to arguments.
    Curry = 0x08,
    /// Dispatch on an enum tag through a chained jump table.
    EnumCase = 0x09,
    /// `dst = a + b`.
    Add = 0x0A,
    /// `dst = a - b`.
    Sub = 0x0B,
    /// `dst = a * b`.
    Mul = 0x0C,
    /// `dst = a / b`.
    Div = 0x0D,
    /// `dst = a * b` (fixed point).
    FixedMul = 0x0E,
    /// `dst = a / b` (fixed point).
    FixedDiv = 0x0F,
    /// `dst = (a == b)`.
    Equal = 0x10,
    /// `dst = (a != b)`.
    NotEqual = 0x11,
    /// `dst = (a < b)`.
    Less = 0x12,
    /// `dst = (a <= b)`.
    LessOrEqual = 0x13,
    /// `dst = (a > b)`.
    Greater = 0x14,
    /// `dst = (a >= b)`.
    GreaterOrEqual = 0x15,
    /// `dst = ~a`.
    BitwiseNot = 0x16,
    /// `dst = !a`.
    LogicalNot = 0x17,
    /// `dst = a & b`.
    BitwiseAnd = 0x18,
    /// `dst = a | b`.
    BitwiseOr = 0x19,
    /// `dst = a ^ b`.
    BitwiseXor = 0x1A,
    /// Prepend an item to a list.
    ListConj = 0x1B,
    /// Concatenate two lists.
    ListAppend = 0x1C,
    /// Concatenate two strings.
    StringAppend = 0x1D,
    /// Create a struct from field registers.
    CreateStruct = 0x1E,
    /// Create a list from item registers.
    CreateList = 0x1F,
    /// Copy a struct, overwriting selected fields.
    UpdateStruct = 0x20,
    /// Read a field through an accessor chain.
    StructGet = 0x21,
    /// Construct an enum variant.
    CreateEnum = 0x22,
    /// Copy a register (or frame slot range).
    RegCopy = 0x27,
}

/// Per-opcode metadata used by decode and disasm.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Stable, parseable opcode name.
    pub mnemonic: &'static str,
    /// Whether this opcode terminates the current basic block.
    pub is_terminator: bool,
}

impl Opcode {
    /// Every opcode, in byte order.
    pub const ALL: &'static [Self] = &[
        Self::Jump,
        Self::BranchFalse,
        Self::BranchTrue,
        Self::Call,
        Self::TailCall,
        Self::Return,
        Self::CallExternal,
        Self::Curry,
        Self::EnumCase,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::FixedMul,
        Self::FixedDiv,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::LessOrEqual,
        Self::Greater,
        Self::GreaterOrEqual,
        Self::BitwiseNot,
        Self::LogicalNot,
        Self::BitwiseAnd,
        Self::BitwiseOr,
        Self::BitwiseXor,
        Self::ListConj,
        Self::ListAppend,
        Self::StringAppend,
        Self::CreateStruct,
        Self::CreateList,
        Self::UpdateStruct,
        Self::StructGet,
        Self::CreateEnum,
        Self::RegCopy,
    ];

    /// Parses an opcode from its byte value.
    #[must_use]
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            0x01 => Some(Self::Jump),
            0x02 => Some(Self::BranchFalse),
            0x03 => Some(Self::BranchTrue),
            0x04 => Some(Self::Call),
            0x05 => Some(Self::TailCall),
            0x06 => Some(Self::Return),
            0x07 => Some(Self::CallExternal),
            0x08 => Some(Self::Curry),
            0x09 => Some(Self::EnumCase),
            0x0A => Some(Self::Add),
            0x0B => Some(Self::Sub),
            0x0C => Some(Self::Mul),
            0x0D => Some(Self::Div),
            0x0E => Some(Self::FixedMul),
            0x0F => Some(Self::FixedDiv),
            0x10 => Some(Self::Equal),
            0x11 => Some(Self::NotEqual),
            0x12 => Some(Self::Less),
            0x13 => Some(Self::LessOrEqual),
            0x14 => Some(Self::Greater),
            0x15 => Some(Self::GreaterOrEqual),
            0x16 => Some(Self::BitwiseNot),
            0x17 => Some(Self::LogicalNot),
            0x18 => Some(Self::BitwiseAnd),
            0x19 => Some(Self::BitwiseOr),
            0x1A => Some(Self::BitwiseXor),
            0x1B => Some(Self::ListConj),
            0x1C => Some(Self::ListAppend),
            0x1D => Some(Self::StringAppend),
            0x1E => Some(Self::CreateStruct),
            0x1F => Some(Self::CreateList),
            0x20 => Some(Self::UpdateStruct),
            0x21 => Some(Self::StructGet),
            0x22 => Some(Self::CreateEnum),
            0x27 => Some(Self::RegCopy),
            _ => None,
        }
    }

    /// Returns the metadata for this opcode.
    #[must_use]
    pub const fn info(self) -> OpcodeInfo {
        match self {
            Self::Jump => OpcodeInfo {
                mnemonic: "jmp",
                is_terminator: true,
            },
            Self::BranchFalse => OpcodeInfo {
                mnemonic: "brfa",
                is_terminator: true,
            },
            Self::BranchTrue => OpcodeInfo {
                mnemonic: "brtr",
                is_terminator: true,
            },
            Self::Call => OpcodeInfo {
                mnemonic: "call",
                is_terminator: false,
            },
            Self::TailCall => OpcodeInfo {
                mnemonic: "tcl",
                is_terminator: true,
            },
            Self::Return => OpcodeInfo {
                mnemonic: "ret",
                is_terminator: true,
            },
            Self::CallExternal => OpcodeInfo {
                mnemonic: "callx",
                is_terminator: false,
            },
            Self::Curry => OpcodeInfo {
                mnemonic: "curry",
                is_terminator: false,
            },
            Self::EnumCase => OpcodeInfo {
                mnemonic: "case",
                is_terminator: true,
            },
            Self::Add => OpcodeInfo {
                mnemonic: "add",
                is_terminator: false,
            },
            Self::Sub => OpcodeInfo {
                mnemonic: "sub",
                is_terminator: false,
            },
            Self::Mul => OpcodeInfo {
                mnemonic: "mul",
                is_terminator: false,
            },
            Self::Div => OpcodeInfo {
                mnemonic: "div",
                is_terminator: false,
            },
            Self::FixedMul => OpcodeInfo {
                mnemonic: "fxmul",
                is_terminator: false,
            },
            Self::FixedDiv => OpcodeInfo {
                mnemonic: "fxdiv",
                is_terminator: false,
            },
            Self::Equal => OpcodeInfo {
                mnemonic: "cpeq",
                is_terminator: false,
            },
            Self::NotEqual => OpcodeInfo {
                mnemonic: "cpne",
                is_terminator: false,
            },
            Self::Less => OpcodeInfo {
                mnemonic: "cplt",
                is_terminator: false,
            },
            Self::LessOrEqual => OpcodeInfo {
                mnemonic: "cple",
                is_terminator: false,
            },
            Self::Greater => OpcodeInfo {
                mnemonic: "cpgt",
                is_terminator: false,
            },
            Self::GreaterOrEqual => OpcodeInfo {
                mnemonic: "cpge",
                is_terminator: false,
            },
            Self::BitwiseNot => OpcodeInfo {
                mnemonic: "bnot",
                is_terminator: false,
            },
            Self::LogicalNot => OpcodeInfo {
                mnemonic: "not",
                is_terminator: false,
            },
            Self::BitwiseAnd => OpcodeInfo {
                mnemonic: "band",
                is_terminator: false,
            },
            Self::BitwiseOr => OpcodeInfo {
                mnemonic: "bor",
                is_terminator: false,
            },
            Self::BitwiseXor => OpcodeInfo {
                mnemonic: "bxor",
                is_terminator: false,
            },
            Self::ListConj => OpcodeInfo {
                mnemonic: "conj",
                is_terminator: false,
            },
            Self::ListAppend => OpcodeInfo {
                mnemonic: "lap",
                is_terminator: false,
            },
            Self::StringAppend => OpcodeInfo {
                mnemonic: "sap",
                is_terminator: false,
            },
            Self::CreateStruct => OpcodeInfo {
                mnemonic: "crs",
                is_terminator: false,
            },
            Self::CreateList => OpcodeInfo {
                mnemonic: "crl",
                is_terminator: false,
            },
            Self::UpdateStruct => OpcodeInfo {
                mnemonic: "upd",
                is_terminator: false,
            },
            Self::StructGet => OpcodeInfo {
                mnemonic: "get",
                is_terminator: false,
            },
            Self::CreateEnum => OpcodeInfo {
                mnemonic: "enum",
                is_terminator: false,
            },
            Self::RegCopy => OpcodeInfo {
                mnemonic: "cpy",
                is_terminator: false,
            },
        }
    }
}
