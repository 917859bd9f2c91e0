// Copyright 2026 the Swamp Disasm Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Jump-target checks over a decoded instruction stream.
//!
//! The decoder resolves labels without validating them. These checks are for tooling that wants
//! to know whether every label lands on an instruction boundary.

use alloc::vec;
use alloc::vec::Vec;

use crate::disasm::DecodedInstr;
use crate::operand::Pc;

/// A label whose target is not a valid instruction boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidJumpTarget {
    /// Program counter of the instruction carrying the label.
    pub src_pc: Pc,
    /// The resolved target.
    pub target_pc: Pc,
    /// `true` if the target lies past the end of the stream; `false` if it lands inside an
    /// instruction.
    pub out_of_range: bool,
}

/// Marks every decoded instruction start, plus the end of the stream.
fn compute_boundaries(byte_len: usize, decoded: &[DecodedInstr]) -> Vec<bool> {
    let mut b = vec![false; byte_len + 1];
    for di in decoded {
        if let Some(slot) = usize::try_from(di.pc.0).ok().and_then(|o| b.get_mut(o)) {
            *slot = true;
        }
    }
    b[byte_len] = true;
    b
}

/// Returns every label in `decoded` that does not land on an instruction boundary.
///
/// A target equal to `byte_len` (falling off the end) counts as a boundary. Results are in
/// stream order, then operand order.
pub(crate) fn invalid_jump_targets(
    byte_len: usize,
    decoded: &[DecodedInstr],
) -> Vec<InvalidJumpTarget> {
    let boundaries = compute_boundaries(byte_len, decoded);
    let mut out = Vec::new();
    for di in decoded {
        di.instr.visit_labels(|label| {
            let target = label.target;
            let slot = usize::try_from(target.0)
                .ok()
                .and_then(|t| boundaries.get(t));
            match slot {
                Some(true) => {}
                Some(false) => out.push(InvalidJumpTarget {
                    src_pc: di.pc,
                    target_pc: target,
                    out_of_range: false,
                }),
                None => out.push(InvalidJumpTarget {
                    src_pc: di.pc,
                    target_pc: target,
                    out_of_range: true,
                }),
            }
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::disassemble;
    use crate::opcode::Opcode;

    #[test]
    fn valid_targets_report_nothing() {
        // 0000: jmp -> 0002; 0002: ret
        let d = disassemble(&[Opcode::Jump as u8, 0, Opcode::Return as u8]).unwrap();
        assert!(d.invalid_jump_targets().is_empty());
    }

    #[test]
    fn end_of_stream_is_a_boundary() {
        // 0000: brtr 1 -> 0004 (end); 0003: ret
        let d = disassemble(&[Opcode::BranchTrue as u8, 1, 1, Opcode::Return as u8]).unwrap();
        assert!(d.invalid_jump_targets().is_empty());
    }

    #[test]
    fn misaligned_and_out_of_range_targets() {
        // 0000: jmp -> 0003 (inside the add); 0002: add 0,1,2; 0006: jmp -> 0010 (past end)
        let bytes = [
            Opcode::Jump as u8,
            1,
            Opcode::Add as u8,
            0,
            1,
            2,
            Opcode::Jump as u8,
            8,
        ];
        let d = disassemble(&bytes).unwrap();
        assert_eq!(
            d.invalid_jump_targets(),
            vec![
                InvalidJumpTarget {
                    src_pc: Pc(0),
                    target_pc: Pc(3),
                    out_of_range: false,
                },
                InvalidJumpTarget {
                    src_pc: Pc(6),
                    target_pc: Pc(16),
                    out_of_range: true,
                },
            ]
        );
    }
}
