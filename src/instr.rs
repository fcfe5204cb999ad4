//! Decoder + executor (C7): per-opcode decode, and the arithmetic, logic,
//! branch, load, store, jump and CSR semantics of RV32IM plus the three
//! machine-mode SYSTEM instructions this simulator supports.
//!
//! Every instruction is a pair of free functions wrapped in an `Instr<E>`:
//! an `executer` that mutates hart state through the `Eei` trait, and a
//! `formatter` that renders the trace line once the instruction has
//! retired. Decoding is table-driven (`crate::decode::Decoder`): each
//! variant below registers the bitmasks that identify it.

pub mod rv32i;
pub mod rv32m;
pub mod zicsr;

use crate::decode::{Decoder, MaskWithValue};
use crate::eei::Eei;
use crate::exception::Exception;
use crate::utils::mask;

/// General-purpose register values as they stood immediately before the
/// instruction executed, used by formatters to reconstruct operands that
/// may have since been overwritten (notably when `rd == rs1`).
pub type RegSnapshot = [u32; 32];

/// A decoded, directly-callable instruction.
///
/// `formatter` is called after `executer` has run and the hart loop has
/// applied any default PC advance, so it sees final state; `regs_before`
/// and `pc_before` give it the pre-execution values it cannot otherwise
/// recover.
#[derive(Clone, Copy)]
pub struct Instr<E: Eei> {
    pub executer: fn(&mut E, u32) -> Result<(), Exception>,
    pub formatter: fn(&E, u32, u32, &RegSnapshot) -> String,
    /// True only for `ecall`: spec.md §4.8 suppresses the trace line for
    /// any instruction that traps, except this one.
    pub always_trace: bool,
}

pub(crate) fn by_opcode(opcode: u32) -> Vec<MaskWithValue> {
    vec![MaskWithValue {
        mask: mask(7u32),
        value: opcode,
    }]
}

pub(crate) fn by_opcode_funct3(opcode: u32, funct3: u32) -> Vec<MaskWithValue> {
    let mut v = by_opcode(opcode);
    v.push(MaskWithValue {
        mask: 0x7000,
        value: funct3 << 12,
    });
    v
}

pub(crate) fn by_opcode_funct3_funct7(opcode: u32, funct3: u32, funct7: u32) -> Vec<MaskWithValue> {
    let mut v = by_opcode_funct3(opcode, funct3);
    v.push(MaskWithValue {
        mask: 0xfe00_0000,
        value: funct7 << 25,
    });
    v
}

pub(crate) fn by_opcode_funct3_imm12(opcode: u32, funct3: u32, imm12: u32) -> Vec<MaskWithValue> {
    let mut v = by_opcode_funct3(opcode, funct3);
    v.push(MaskWithValue {
        mask: 0xfff0_0000,
        value: imm12 << 20,
    });
    v
}

/// Build the decoder holding every instruction this simulator implements.
pub fn build_decoder<E: Eei>() -> Decoder<Instr<E>> {
    let mut decoder = Decoder::new();
    rv32i::register(&mut decoder);
    rv32m::register(&mut decoder);
    zicsr::register(&mut decoder);
    decoder
}
