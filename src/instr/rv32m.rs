//! RV32M multiply/divide extension.
//!
//! Division by zero and the `INT_MIN / -1` overflow case do not trap in
//! RISC-V; both produce defined sentinel results instead (spec.md §4.7).
//! `wrapping_div`/`wrapping_rem` alone would panic on a zero divisor, so
//! every divide/remainder executer below branches on the divisor first.

use crate::decode::Decoder;
use crate::eei::Eei;
use crate::exception::Exception;
use crate::instr_type::{decode_rtype, Rtype};
use crate::opcodes::{FUNCT7_MULDIV, OP};
use crate::trace::{line, reg_name};
use crate::utils::interpret_u32_as_signed;

use super::{by_opcode_funct3_funct7, Instr};

pub fn register<E: Eei>(decoder: &mut Decoder<Instr<E>>) {
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 0, FUNCT7_MULDIV), mul());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 1, FUNCT7_MULDIV), mulh());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 2, FUNCT7_MULDIV), mulhsu());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 3, FUNCT7_MULDIV), mulhu());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 4, FUNCT7_MULDIV), div());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 5, FUNCT7_MULDIV), divu());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 6, FUNCT7_MULDIV), rem());
    decoder.push_instruction(by_opcode_funct3_funct7(OP, 7, FUNCT7_MULDIV), remu());
}

macro_rules! muldiv_instr {
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
            fn formatter<E: Eei>(eei: &E, instr: u32, pc_before: u32, regs: &super::RegSnapshot) -> String {
                let Rtype { rs1, rs2, rd } = decode_rtype(instr);
                line(
                    pc_before,
                    $mnemonic,
                    &format!("{},{},{}", reg_name(rd), reg_name(rs1), reg_name(rs2)),
                    &format!(
                        "{}=0x{:08x}{}0x{:08x}=0x{:08x}",
                        reg_name(rd),
                        regs[rs1 as usize],
                        $op_symbol,
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
    };
}

muldiv_instr!(mul, "mul", "*", (|a: u32, b: u32| a.wrapping_mul(b)));

muldiv_instr!(mulh, "mulh", "*h", (|a: u32, b: u32| {
    let product = interpret_u32_as_signed(a) as i64 * interpret_u32_as_signed(b) as i64;
    (product >> 32) as u32
}));

muldiv_instr!(mulhsu, "mulhsu", "*hsu", (|a: u32, b: u32| {
    let product = interpret_u32_as_signed(a) as i64 * b as i64;
    (product >> 32) as u32
}));

muldiv_instr!(mulhu, "mulhu", "*hu", (|a: u32, b: u32| {
    let product = a as u64 * b as u64;
    (product >> 32) as u32
}));

muldiv_instr!(div, "div", "/", (|a: u32, b: u32| {
    let dividend = interpret_u32_as_signed(a);
    let divisor = interpret_u32_as_signed(b);
    if divisor == 0 {
        0xffff_ffff
    } else {
        dividend.wrapping_div(divisor) as u32
    }
}));

muldiv_instr!(divu, "divu", "/u", (|a: u32, b: u32| {
    if b == 0 {
        0xffff_ffff
    } else {
        a / b
    }
}));

muldiv_instr!(rem, "rem", "%", (|a: u32, b: u32| {
    let dividend = interpret_u32_as_signed(a);
    let divisor = interpret_u32_as_signed(b);
    if divisor == 0 {
        a
    } else {
        dividend.wrapping_rem(divisor) as u32
    }
}));

muldiv_instr!(remu, "remu", "%u", (|a: u32, b: u32| {
    if b == 0 {
        a
    } else {
        a % b
    }
}));

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
    fn div_by_zero_yields_all_ones() {
        let mut platform = Platform::new();
        // addi a0, zero, 5
        write_instr(&mut platform, 0x8000_0000, 0x0050_0513);
        // div a1, a0, zero  (funct7=0000001, rs2=0, rs1=10, funct3=100, rd=11, opcode=0110011)
        write_instr(&mut platform, 0x8000_0004, 0x0205_45b3);
        platform.step();
        platform.step();
        assert_eq!(platform.x(11), 0xffff_ffff);
    }

    #[test]
    fn remu_by_zero_returns_dividend() {
        let mut platform = Platform::new();
        // addi a0, zero, 7
        write_instr(&mut platform, 0x8000_0000, 0x0070_0513);
        // remu a1, a0, zero
        write_instr(&mut platform, 0x8000_0004, 0x0205_75b3);
        platform.step();
        platform.step();
        assert_eq!(platform.x(11), 7);
    }

    #[test]
    fn mulhu_high_bits() {
        let mut platform = Platform::new();
        // lui a0, 0xfffff  (a0 = 0xfffff000)
        write_instr(&mut platform, 0x8000_0000, 0xfffff537);
        // lui a1, 0xfffff  (a1 = 0xfffff000)
        write_instr(&mut platform, 0x8000_0004, 0xfffff5b7);
        // mulhu a2, a0, a1
        write_instr(&mut platform, 0x8000_0008, 0x02b53633);
        platform.step();
        platform.step();
        platform.step();
        let a0 = 0xffff_f000u64;
        let expected = ((a0 * a0) >> 32) as u32;
        assert_eq!(platform.x(12), expected);
    }
}
