//! Zicsr (CSR read/modify/write) plus the three SYSTEM instructions this
//! simulator recognises: `ecall`, `ebreak`, `mret`.
//!
//! `csrrs`/`csrrc` skip the write when their source register is `x0`, and
//! `csrrsi`/`csrrci` skip it when the immediate is zero — required so a
//! plain CSR read never has a side effect, even though every CSR here is
//! just storage with no write-triggered behaviour of its own.

use crate::decode::Decoder;
use crate::eei::Eei;
use crate::exception::Exception;
use crate::instr_type::{decode_itype, Itype};
use crate::opcodes::OP_SYSTEM;
use crate::trace::{bare_line, line, reg_name};

use super::{by_opcode_funct3, by_opcode_funct3_imm12, Instr, RegSnapshot};

const ECALL_IMM: u32 = 0x000;
const EBREAK_IMM: u32 = 0x001;
const MRET_IMM: u32 = 0x302;

pub fn register<E: Eei>(decoder: &mut Decoder<Instr<E>>) {
    decoder.push_instruction(by_opcode_funct3_imm12(OP_SYSTEM, 0, ECALL_IMM), ecall());
    decoder.push_instruction(by_opcode_funct3_imm12(OP_SYSTEM, 0, EBREAK_IMM), ebreak());
    decoder.push_instruction(by_opcode_funct3_imm12(OP_SYSTEM, 0, MRET_IMM), mret());

    decoder.push_instruction(by_opcode_funct3(OP_SYSTEM, 1), csrrw());
    decoder.push_instruction(by_opcode_funct3(OP_SYSTEM, 2), csrrs());
    decoder.push_instruction(by_opcode_funct3(OP_SYSTEM, 3), csrrc());
    decoder.push_instruction(by_opcode_funct3(OP_SYSTEM, 5), csrrwi());
    decoder.push_instruction(by_opcode_funct3(OP_SYSTEM, 6), csrrsi());
    decoder.push_instruction(by_opcode_funct3(OP_SYSTEM, 7), csrrci());
}

pub fn ecall<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(_eei: &mut E, _instr: u32) -> Result<(), Exception> {
        Err(Exception::EnvironmentCallFromMMode)
    }
    fn formatter<E: Eei>(_eei: &E, _instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
        bare_line(pc_before, "ecall")
    }
    Instr {
        executer,
        formatter,
        always_trace: true,
    }
}

pub fn ebreak<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, _instr: u32) -> Result<(), Exception> {
        eei.request_halt();
        Ok(())
    }
    fn formatter<E: Eei>(_eei: &E, _instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
        bare_line(pc_before, "ebreak")
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

pub fn mret<E: Eei>() -> Instr<E> {
    fn executer<E: Eei>(eei: &mut E, _instr: u32) -> Result<(), Exception> {
        eei.mret();
        Ok(())
    }
    fn formatter<E: Eei>(_eei: &E, _instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
        bare_line(pc_before, "mret")
    }
    Instr {
        executer,
        formatter,
        always_trace: false,
    }
}

macro_rules! csr_reg_instr {
    ($name:ident, $mnemonic:expr, $combine:expr, $skip_write_on_zero_source:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let csr = imm;
                let source = eei.x(rs1);
                let old = eei.read_csr(csr);
                eei.set_x(rd, old);
                let skip_write_on_zero: bool = $skip_write_on_zero_source;
                if !(skip_write_on_zero && rs1 == 0) {
                    let combine: fn(u32, u32) -> u32 = $combine;
                    eei.write_csr(csr, combine(old, source));
                }
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},{},0x{:x}", reg_name(rd), reg_name(rs1), imm),
                    &format!("{}=0x{:08x}", reg_name(rd), eei.x(rd)),
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

csr_reg_instr!(csrrw, "csrrw", (|_old: u32, new: u32| new), false);
csr_reg_instr!(csrrs, "csrrs", (|old: u32, bits: u32| old | bits), true);
csr_reg_instr!(csrrc, "csrrc", (|old: u32, bits: u32| old & !bits), true);

macro_rules! csr_imm_instr {
    ($name:ident, $mnemonic:expr, $combine:expr, $skip_write_on_zero_imm:expr) => {
        pub fn $name<E: Eei>() -> Instr<E> {
            fn executer<E: Eei>(eei: &mut E, instr: u32) -> Result<(), Exception> {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                let csr = imm;
                let zimm = rs1 as u32;
                let old = eei.read_csr(csr);
                eei.set_x(rd, old);
                let skip_write_on_zero: bool = $skip_write_on_zero_imm;
                if !(skip_write_on_zero && zimm == 0) {
                    let combine: fn(u32, u32) -> u32 = $combine;
                    eei.write_csr(csr, combine(old, zimm));
                }
                Ok(())
            }
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, _regs: &RegSnapshot) -> String {
                let Itype { rs1, imm, rd } = decode_itype(instr);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},0x{:x},0x{:x}", reg_name(rd), rs1, imm),
                    &format!("{}=0x{:08x}", reg_name(rd), eei.x(rd)),
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

csr_imm_instr!(csrrwi, "csrrwi", (|_old: u32, zimm: u32| zimm), false);
csr_imm_instr!(csrrsi, "csrrsi", (|old: u32, zimm: u32| old | zimm), true);
csr_imm_instr!(csrrci, "csrrci", (|old: u32, zimm: u32| old & !zimm), true);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csr::MSTATUS;
    use crate::eei::Eei;
    use crate::platform::Platform;

    fn write_instr(platform: &mut Platform, addr: u32, instr: u32) {
        for i in 0..4 {
            let byte = ((instr >> (8 * i)) & 0xff) as u8;
            platform.poke_ram(addr + i as u32, byte);
        }
    }

    #[test]
    fn csrrwi_writes_then_csrrs_reads_back() {
        let mut platform = Platform::new();
        // csrrwi a0, mstatus(0x300), 8   -> imm=0x300, zimm=8, rd=a0(10)
        write_instr(&mut platform, 0x8000_0000, 0x3004_5573);
        platform.step();
        assert_eq!(platform.peek_csr(MSTATUS), 8);
    }

    #[test]
    fn ecall_traps_and_still_traces() {
        let mut platform = Platform::new();
        write_instr(&mut platform, 0x8000_0000, 0x0000_0073); // ecall
        let outcome = platform.step();
        assert!(outcome.trace_line.is_some());
    }
}
