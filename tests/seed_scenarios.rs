//! End-to-end fixtures for the hart-loop scenarios this machine is meant
//! to satisfy. Each test drives `Platform::step` directly rather than
//! going through the CLI, since the loop body is the thing under test.

use riscvemu::csr::{
    MCAUSE, MIE, MIE_MTIE_BIT, MSTATUS, MSTATUS_MIE_BIT, MTVEC,
};
use riscvemu::eei::Eei;
use riscvemu::exception::MACHINE_TIMER_INTERRUPT_CAUSE;
use riscvemu::platform::Platform;

fn write_instr(platform: &mut Platform, addr: u32, instr: u32) {
    for i in 0..4 {
        let byte = ((instr >> (8 * i)) & 0xff) as u8;
        platform.poke_ram(addr + i as u32, byte);
    }
}

/// Scenario 1: `addi t0, zero, -1` sign-extends and retires cleanly.
#[test]
fn addi_negative_one_sets_all_ones_and_advances_pc() {
    let mut platform = Platform::new();
    write_instr(&mut platform, 0x8000_0000, 0xfff0_0293);
    let result = platform.step();
    assert_eq!(platform.x(5), 0xffff_ffff);
    assert_eq!(platform.pc(), 0x8000_0004);
    let line = result.trace_line.expect("addi traces");
    assert!(line.starts_with("0x80000000:addi    t0,zero,0xfff"));
}

/// Scenario 3: division/remainder edge cases around `INT_MIN` and a zero
/// divisor.
#[test]
fn division_edge_cases_match_the_defined_sentinels() {
    let mut platform = Platform::new();
    // lui a0, 0x80000          -> a0 = 0x8000_0000
    write_instr(&mut platform, 0x8000_0000, 0x8000_0537);
    // addi a1, zero, -1        -> a1 = 0xFFFF_FFFF
    write_instr(&mut platform, 0x8000_0004, 0xfff0_0593);
    // div a2, a0, a1           -> INT_MIN / -1 wraps back to INT_MIN
    write_instr(&mut platform, 0x8000_0008, 0x02b5_4633);
    // divu a3, a0, zero        -> unsigned divide by zero
    write_instr(&mut platform, 0x8000_000c, 0x0205_56b3);
    // rem a4, a0, zero         -> remainder by zero returns the dividend
    write_instr(&mut platform, 0x8000_0010, 0x0205_6733);

    for _ in 0..5 {
        platform.step();
    }

    assert_eq!(platform.x(12), 0x8000_0000);
    assert_eq!(platform.x(13), 0xffff_ffff);
    assert_eq!(platform.x(14), 0x8000_0000);
}

/// Scenario 5: an unconditional branch-to-self loops forever while `mtime`
/// keeps pace with the number of retired instructions.
#[test]
fn self_branch_loops_while_mtime_tracks_retired_instructions() {
    let mut platform = Platform::new();
    // beq x0, x0, -4
    write_instr(&mut platform, 0x8000_0000, 0xfe00_0ee3);

    for n in 1..=20u64 {
        let result = platform.step();
        assert_eq!(platform.pc(), 0x8000_0000);
        assert_eq!(platform.peek_mtime(), n);
        assert!(!result.halted);
    }
}

/// Scenario 6: with the timer interrupt armed and `mtimecmp = 5`, the step
/// that retires the 5th instruction also takes the interrupt.
#[test]
fn timer_interrupt_fires_on_the_comparator_match() {
    let mut platform = Platform::new();
    platform.write_csr(MTVEC, 0x8000_0100);
    platform.write_csr(MSTATUS, 1 << MSTATUS_MIE_BIT);
    platform.write_csr(MIE, 1 << MIE_MTIE_BIT);
    platform
        .store(
            riscvemu::bus::CLINT_BASE + riscvemu::clint::MTIMECMP_LO,
            5,
            4,
        )
        .unwrap();
    platform
        .store(
            riscvemu::bus::CLINT_BASE + riscvemu::clint::MTIMECMP_HI,
            0,
            4,
        )
        .unwrap();
    // beq x0, x0, -4: retires every step without ever trapping on its own.
    write_instr(&mut platform, 0x8000_0000, 0xfe00_0ee3);

    for _ in 0..4 {
        let result = platform.step();
        assert_eq!(platform.pc(), 0x8000_0000);
        assert!(result.trace_line.is_some());
    }

    let result = platform.step();
    assert_eq!(platform.pc(), 0x8000_0100);
    assert_eq!(platform.peek_csr(MCAUSE), MACHINE_TIMER_INTERRUPT_CAUSE);
    assert!(result.trace_line.is_some());
}
