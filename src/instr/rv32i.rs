//! RV32I base integer instructions.

use crate::decode::Decoder;
use crate::eei::Eei;
use crate::exception::Exception;
use crate::instr_type::{
    decode_btype, decode_itype, decode_jtype, decode_rtype, decode_stype, decode_utype, Itype,
    Rtype, SBtype, UJtype,
};
use crate::opcodes::*;
use crate::trace::{bare_line, line, reg_name};
use crate::utils::{interpret_u32_as_signed, sign_extend};

use super::{by_opcode, by_opcode_funct3, by_opcode_funct3_funct7, Instr, RegSnapshot};

pub fn register<E: Eei>(decoder: &mut Decoder<Instr<E>>) {
    decoder.push_instruction(by_opcode(OP_LUI), lui());
    decoder.push_instruction(by_opcode(OP_AUIPC), auipc());
    decoder.push_instruction(by_opcode(OP_JAL), jal());
    decoder.push_instruction(by_opcode_funct3(OP_JALR, 0), jalr());

    decoder.push_instruction(by_opcode_funct3(OP_BRANCH, 0), beq());
    decoder.push_instruction(by_opcode_funct3(OP_BRANCH, 1), bne());
    decoder.push_instruction(by_opcode_funct3(OP_BRANCH, 4), blt());
    decoder.push_instruction(by_opcode_funct3(OP_BRANCH, 5), bge());
    decoder.push_instruction(by_opcode_funct3(OP_BRANCH, 6), bltu());
    decoder.push_instruction(by_opcode_funct3(OP_BRANCH, 7), bgeu());

    decoder.push_instruction(by_opcode_funct3(OP_LOAD, 0), lb());
    decoder.push_instruction(by_opcode_funct3(OP_LOAD, 1), lh());
    decoder.push_instruction(by_opcode_funct3(OP_LOAD, 2), lw());
    decoder.push_instruction(by_opcode_funct3(OP_LOAD, 4), lbu());
    decoder.push_instruction(by_opcode_funct3(OP_LOAD, 5), lhu());

    decoder.push_instruction(by_opcode_funct3(OP_STORE, 0), sb());
    decoder.push_instruction(by_opcode_funct3(OP_STORE, 1), sh());
    decoder.push_instruction(by_opcode_funct3(OP_STORE, 2), sw());

    decoder.push_instruction(by_opcode_funct3(OP_IMM, 0), addi());
    decoder.push_instruction(by_opcode_funct3_funct7(OP_IMM, 1, FUNCT7_BASE), slli());
    decoder.push_instruction(by_opcode_funct3(OP_IMM, 2), slti());
    decoder.push_instruction(by_opcode_funct3(OP_IMM, 3), sltiu());
    decoder.push_instruction(by_opcode_funct3(OP_IMM, 4), xori());
    decoder.push_instruction(by_opcode_funct3_funct7(OP_IMM, 5, FUNCT7_BASE), srli());
    decoder.push_instruction(by_opcode_funct3_funct7(OP_IMM, 5, FUNCT7_ALT), srai());
    decoder.push_instruction(by_opcode_funct3(OP_IMM, 6), ori());
    decoder.push_instruction(by_opcode_funct3(OP_IMM, 7), andi());

    decoder.push_instruction(by_opcode_funct3_funct7(OP, 0, FUNCT7_BASE), add());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 1, FUNCT7_BASE), sll());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 2, FUNCT7_BASE), slt());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 3, FUNCT7_BASE), sltu());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 4, FUNCT7_BASE), xor());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 5, FUNCT7_BASE), srl());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 6, FUNCT7_BASE), or());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 7, FUNCT7_BASE), and());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 0, FUNCT7_ALT), sub());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 5, FUNCT7_ALT), sra());
}

// ---- U-type: lui, auipc ----

pub fn lui<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let UJtype { rd, imm } = decode_utype(instr);
        eei.set_x(rd, imm << 12);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
        let UJtype { rd, imm } = decode_utype(instr);
        line(
            pc_before,
            "lui",
            &format!("{},0x{:x}", reg_name(rd), imm),
            &format!("{}=0x{:08x}", reg_name(rd), eei.x(rd)),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

pub fn auipc<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let UJtype { rd, imm } = decode_utype(instr);
        let value = eei.pc().wrapping_add(imm << 12);
        eei.set_x(rd, value);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
        let UJtype { rd, imm } = decode_utype(instr);
        line(
            pc_before,
            "auipc",
            &format!("{},0x{:x}", reg_name(rd), imm),
            &format!("{}=pc+0x{:x}=0x{:08x}", reg_name(rd), imm << 12, eei.x(rd)),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

// ---- jal, jalr ----

pub fn jal<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let UJtype { rd, imm } = decode_jtype(instr);
        let offset = interpret_u32_as_signed(sign_extend(imm, 20));
        eei.set_x(rd, eei.pc().wrapping_add(4));
        eei.set_pc(eei.pc().wrapping_add(offset as u32));
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
        let UJtype { rd, imm } = decode_jtype(instr);
        line(
            pc_before,
            "jal",
            &format!("{},0x{:x}", reg_name(rd), imm),
            &format!("pc=0x{:08x},{}=0x{:08x}", eei.pc(), reg_name(rd), eei.x(rd)),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

pub fn jalr<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let Itype { rs1, imm, rd } = decode_itype(instr);
        let offset = interpret_u32_as_signed(sign_extend(imm, 11));
        let target = eei.x(rs1).wrapping_add(offset as u32) & !1;
        eei.set_x(rd, eei.pc().wrapping_add(4));
        eei.set_pc(target);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
        let Itype { rs1, imm, rd } = decode_itype(instr);
        let v1 = regs[rs1 as usize];
        let imm_se = sign_extend(imm, 11);
        line(
            pc_before,
            "jalr",
            &format!("{},{},0x{:x}", reg_name(rd), reg_name(rs1), imm),
            &format!(
                "pc=0x{:08x}+0x{:08x},{}=0x{:08x}",
                v1,
                imm_se,
                reg_name(rd),
                eei.x(rd)
            ),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

// ---- branches ----

macro_rules! branch {
    ($name:ident, $mnemonic:expr, $symbol:expr, $cmp:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let SBtype { rs1, rs2, imm } = decode_btype(instr);
                let v1 = eei.x(rs1);
                let v2 = eei.x(rs2);
                let cmp: fn(u32, u32) -> bool = $cmp;
                if cmp(v1, v2) {
                    let offset = interpret_u32_as_signed(sign_extend(imm, 12));
                    eei.set_pc(eei.pc().wrapping_add(offset as u32));
                }
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
                let SBtype { rs1, rs2, imm } = decode_btype(instr);
                let v1 = regs[rs1 as usize];
                let v2 = regs[rs2 as usize];
                let cmp: fn(u32, u32) -> bool = $cmp;
                let taken = cmp(v1, v2);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},{},0x{:x}", reg_name(rs1), reg_name(rs2), imm),
                    &format!(
                        "(0x{:08x}{}0x{:08x})={}->pc=0x{:08x}",
                        v1, $symbol, v2, taken as u32, eei.pc()
                    ),
                )
            }
            Instr {
                executer,
                formatter,
                always_trace: false,
            }
        }
    };
}

fn signed_lt(a: u32, b: u32) -> bool {
    interpret_u32_as_signed(a) < interpret_u32_as_signed(b)
}
fn signed_ge(a: u32, b: u32) -> bool {
    interpret_u32_as_signed(a) >= interpret_u32_as_signed(b)
}

fn unsigned_ge(a: u32, b: u32) -> bool {
    a >= b
}

branch!(beq, "beq", "==", (|a, b| a == b));
branch!(bne, "bne", "!=", (|a, b| a != b));
branch!(blt, "blt", "<", signed_lt);
branch!(bge, "bge", ">=", signed_ge);
branch!(bltu, "bltu", "<u", (|a, b| a < b));
branch!(bgeu, "bgeu", ">=u", unsigned_ge);

// ---- loads ----

fn load_address<E: Eei>(eei: &E, instr: u32) -> (u8, u8, u16, u32) {
    let Itype { rs1, imm, rd } = decode_itype(instr);
    let offset = interpret_u32_as_signed(sign_extend(imm, 11));
    let addr = eei.x(rs1).wrapping_add(offset as u32);
    (rd, rs1, imm, addr)
}

macro_rules! load_instr {
    ($name:ident, $mnemonic:expr, $width:expr, $extend:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let (rd, _rs1, _imm, addr) = load_address(eei, instr);
                let raw = eei.load(addr, $width)?;
                let extend: fn(u32) -> u32 = $extend;
                eei.set_x(rd, extend(raw));
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let offset = interpret_u32_as_signed(sign_extend(imm, 11));
                let addr = regs[rs1 as usize].wrapping_add(offset as u32);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},0x{:x}({})", reg_name(rd), imm, reg_name(rs1)),
                    &format!("{}=mem[0x{:08x}]=0x{:08x}", reg_name(rd), addr, eei.x(rd)),
                )
            }
            Instr {
                executer,
                formatter,
                always_trace: false,
            }
        }
    };
}

fn sext8(v: u32) -> u32 {
    sign_extend(v as u8, 7)
}
fn sext16(v: u32) -> u32 {
    sign_extend(v as u16, 15)
}
fn zext(v: u32) -> u32 {
    v
}

load_instr!(lb, "lb", 1, sext8);
load_instr!(lh, "lh", 2, sext16);
load_instr!(lw, "lw", 4, zext);
load_instr!(lbu, "lbu", 1, zext);
load_instr!(lhu, "lhu", 2, zext);

fn width_mask(width: u32) -> u32 {
    match width {
        1 => 0xff,
        2 => 0xffff,
        _ => 0xffff_ffff,
    }
}

// ---- stores ----

macro_rules! store_instr {
    ($name:ident, $mnemonic:expr, $width:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let SBtype { rs1, rs2, imm } = decode_stype(instr);
                let offset = interpret_u32_as_signed(sign_extend(imm, 11));
                let addr = eei.x(rs1).wrapping_add(offset as u32);
                let value = eei.x(rs2);
                eei.store(addr, value, $width)
            }
            fn formatter<E: Eei>(_eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
                let SBtype { rs1, rs2, imm } = decode_stype(instr);
                let offset = interpret_u32_as_signed(sign_extend(imm, 11));
                let addr = regs[rs1 as usize].wrapping_add(offset as u32);
                let value = regs[rs2 as usize] & width_mask($width);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},0x{:x}({})", reg_name(rs2), imm, reg_name(rs1)),
                    &format!("mem[0x{:08x}]=0x{:08x}", addr, value),
                )
            }
            Instr {
                executer,
                formatter,
                always_trace: false,
            }
        }
    };
}

store_instr!(sb, "sb", 1);
store_instr!(sh, "sh", 2);
store_instr!(sw, "sw", 4);

// ---- OP-IMM ----

macro_rules! reg_imm_instr {
    ($name:ident, $mnemonic:expr, $op_symbol:expr, $compute:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let v1 = eei.x(rs1);
                let imm_se = sign_extend(imm, 11);
                let compute: fn(u32, u32) -> u32 = $compute;
                eei.set_x(rd, compute(v1, imm_se));
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let v1 = regs[rs1 as usize];
                let imm_se = sign_extend(imm, 11);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},{},0x{:x}", reg_name(rd), reg_name(rs1), imm),
                    &format!(
                        "{}=0x{:08x}{}0x{:08x}=0x{:08x}",
                        reg_name(rd),
                        v1,
                        $op_symbol,
                        imm_se,
                        eei.x(rd)
                    ),
                )
            }
            Instr {
                executer,
                formatter,
                always_trace: false,
            }
        }
    };
}

reg_imm_instr!(addi, "addi", "+", (|a: u32, b: u32| a.wrapping_add(b)));
reg_imm_instr!(xori, "xori", "^", (|a: u32, b: u32| a ^ b));
reg_imm_instr!(ori, "ori", "|", (|a: u32, b: u32| a | b));
reg_imm_instr!(andi, "andi", "&", (|a: u32, b: u32| a & b));

pub fn slti<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let Itype { rs1, imm, rd } = decode_itype(instr);
        let v1 = interpret_u32_as_signed(eei.x(rs1));
        let imm_se = interpret_u32_as_signed(sign_extend(imm, 11));
        eei.set_x(rd, (v1 < imm_se) as u32);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
        let Itype { rs1, imm, rd } = decode_itype(instr);
        let v1 = regs[rs1 as usize];
        let imm_se = sign_extend(imm, 11);
        line(
            pc_before,
            "slti",
            &format!("{},{},0x{:x}", reg_name(rd), reg_name(rs1), imm),
            &format!(
                "{}=(0x{:08x}<0x{:08x})=0x{:08x}",
                reg_name(rd),
                v1,
                imm_se,
                eei.x(rd)
            ),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

pub fn sltiu<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let Itype { rs1, imm, rd } = decode_itype(instr);
        let v1 = eei.x(rs1);
        let imm_se = sign_extend(imm, 11);
        eei.set_x(rd, (v1 < imm_se) as u32);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
        let Itype { rs1, imm, rd } = decode_itype(instr);
        let v1 = regs[rs1 as usize];
        let imm_se = sign_extend(imm, 11);
        line(
            pc_before,
            "sltiu",
            &format!("{},{},0x{:x}", reg_name(rd), reg_name(rs1), imm),
            &format!(
                "{}=(0x{:08x}<0x{:08x})=0x{:08x}",
                reg_name(rd),
                v1,
                imm_se,
                eei.x(rd)
            ),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

macro_rules! shift_imm_instr {
    ($name:ident, $mnemonic:expr, $op_symbol:expr, $compute:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let v1 = eei.x(rs1);
                let shamt = (imm as u32) & 0x1f;
                let compute: fn(u32, u32) -> u32 = $compute;
                eei.set_x(rd, compute(v1, shamt));
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let v1 = regs[rs1 as usize];
                let shamt = (imm as u32) & 0x1f;
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},{},0x{:x}", reg_name(rd), reg_name(rs1), shamt),
                    &format!(
                        "{}=0x{:08x}{}0x{:x}=0x{:08x}",
                        reg_name(rd),
                        v1,
                        $op_symbol,
                        shamt,
                        eei.x(rd)
                    ),
                )
            }
            Instr {
                executer,
                formatter,
                always_trace: false,
            }
        }
    };
}

shift_imm_instr!(slli, "slli", "<<", (|a: u32, s: u32| a << s));
shift_imm_instr!(srli, "srli", ">>", (|a: u32, s: u32| a >> s));
shift_imm_instr!(srai, "srai", ">>>", (|a: u32, s: u32| {
    ((a as i32) >> s) as u32
}));

// ---- OP ----

macro_rules! reg_reg_instr {
    ($name:ident, $mnemonic:expr, $op_symbol:expr, $compute:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let Rtype { rs1, rs2, rd } = decode_rtype(instr);
                let v1 = eei.x(rs1);
                let v2 = eei.x(rs2);
                let compute: fn(u32, u32) -> u32 = $compute;
                eei.set_x(rd, compute(v1, v2));
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
                let Rtype { rs1, rs2, rd } = decode_rtype(instr);
                let v1 = regs[rs1 as usize];
                let v2 = regs[rs2 as usize];
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},{},{}", reg_name(rd), reg_name(rs1), reg_name(rs2)),
                    &format!(
                        "{}=0x{:08x}{}0x{:08x}=0x{:08x}",
                        reg_name(rd),
                        v1,
                        $op_symbol,
                        v2,
                        eei.x(rd)
                    ),
                )
            }
            Instr {
                executer,
                formatter,
                always_trace: false,
            }
        }
    };
}

reg_reg_instr!(add, "add", "+", (|a: u32, b: u32| a.wrapping_add(b)));
reg_reg_instr!(sub, "sub", "-", (|a: u32, b: u32| a.wrapping_sub(b)));
reg_reg_instr!(xor, "xor", "^", (|a: u32, b: u32| a ^ b));
reg_reg_instr!(or, "or", "|", (|a: u32, b: u32| a | b));
reg_reg_instr!(and, "and", "&", (|a: u32, b: u32| a & b));
reg_reg_instr!(sll, "sll", "<<", (|a: u32, b: u32| a << (b & 0x1f)));
reg_reg_instr!(srl, "srl", ">>", (|a: u32, b: u32| a >> (b & 0x1f)));
reg_reg_instr!(sra, "sra", ">>>", (|a: u32, b: u32| {
    ((a as i32) >> (b & 0x1f)) as u32
}));

pub fn slt<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let Rtype { rs1, rs2, rd } = decode_rtype(instr);
        let v1 = interpret_u32_as_signed(eei.x(rs1));
        let v2 = interpret_u32_as_signed(eei.x(rs2));
        eei.set_x(rd, (v1 < v2) as u32);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
        let Rtype { rs1, rs2, rd } = decode_rtype(instr);
        line(
            pc_before,
            "slt",
            &format!("{},{},{}", reg_name(rd), reg_name(rs1), reg_name(rs2)),
            &format!(
                "{}=(0x{:08x}<0x{:08x})=0x{:08x}",
                reg_name(rd),
                regs[rs1 as usize],
                regs[rs2 as usize],
                eei.x(rd)
            ),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

pub fn sltu<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
        let Rtype { rs1, rs2, rd } = decode_rtype(instr);
        let v1 = eei.x(rs1);
        let v2 = eei.x(rs2);
        eei.set_x(rd, (v1 < v2) as u32);
        Ok(())
    }
    fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &RegSnapshot) -> String {
        let Rtype { rs1, rs2, rd } = decode_rtype(instr);
        line(
            pc_before,
            "sltu",
            &format!("{},{},{}", reg_name(rd), reg_name(rs1), reg_name(rs2)),
            &format!(
                "{}=(0x{:08x}<0x{:08x})=0x{:08x}",
                reg_name(rd),
                regs[rs1 as usize],
                regs[rs2 as usize],
                eei.x(rd)
            ),
        )
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eei::Eei;
    use crate::platform::Platform;

    fn write_instr(platform: &mut Platform, addr: u32, instr: u32) {
        for i in 0..4 {
            let byte = ((instr >> (8 * i)) & 0xff) as u8;
            platform.poke_ram(addr + i as u32, byte);
        }
    }

    #[test]
    fn addi_negative_one() {
        let mut platform = Platform::new();
        write_instr(&mut platform, 0x8000_0000, 0xfff0_0293); // addi t0, zero, -1
        let outcome = platform.step();
        assert_eq!(platform.x(5), 0xffff_ffff);
        assert_eq!(platform.pc(), 0x8000_0004);
        let line = outcome.trace_line.expect("addi should trace");
        assert!(line.starts_with("0x80000000:addi    t0,zero,0xfff"));
    }

    #[test]
    fn lui_then_addi_builds_constant() {
        let mut platform = Platform::new();
        // lui a0, 0x12345
        write_instr(&mut platform, 0x8000_0000, 0x1234_5537);
        // addi a0, a0, 0x678
        write_instr(&mut platform, 0x8000_0004, 0x6785_0513);
        platform.step();
        platform.step();
        assert_eq!(platform.x(10), 0x1234_5678);
    }

    #[test]
    fn branch_not_taken_falls_through() {
        let mut platform = Platform::new();
        // addi x1, x0, 1
        write_instr(&mut platform, 0x8000_0000, 0x0010_0093);
        // beq x0, x1, -4 (not taken, since x0 != x1)
        write_instr(&mut platform, 0x8000_0004, 0xfe10_0ee3);
        platform.step();
        platform.step();
        assert_eq!(platform.pc(), 0x8000_0008);
    }
}
