//! Hart state and the fetch-decode-execute-trap loop (C9).
//!
//! `Platform` owns every piece of mutable state — registers, `pc`, CSRs, the
//! bus, and the trap controller — and is the single concrete implementor of
//! `Eei`. `step()` is the loop body from spec.md §4.9: check halt, fetch,
//! decode, execute, default-advance `pc`, tick the timer, poll for the
//! timer interrupt, and force `x[0]` back to zero.

use crate::bus::Bus;
use crate::csr::CsrFile;
use crate::decode::{self, Decoder};
use crate::eei::Eei;
use crate::exception::Exception;
use crate::instr::{build_decoder, Instr, RegSnapshot};
use crate::trap::TrapController;

/// Outcome of one `step()` call.
pub struct StepResult {
    /// The trace line for the instruction that just retired, if any. `None`
    /// when the instruction trapped (and wasn't `ecall`), or when the step
    /// halted without retiring an instruction.
    pub trace_line: Option<String>,
    /// True once the hart has reached a halt condition (spec.md §6): an
    /// `ebreak` just retired, the fetched word was all zero, or `pc == 0`
    /// at the top of this step. The caller should stop calling `step`.
    pub halted: bool,
}

pub struct Platform {
    registers: [u32; 32],
    pc: u32,
    csrs: CsrFile,
    bus: Bus,
    trap: TrapController,
    decoder: Decoder<Instr<Platform>>,
    pending_tval: u32,
    halt_requested: bool,
    halted: bool,
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            registers: [0; 32],
            pc: crate::bus::RAM_BASE,
            csrs: CsrFile::new(),
            bus: Bus::new(),
            trap: TrapController::new(),
            decoder: build_decoder(),
            pending_tval: 0,
            halt_requested: false,
            halted: false,
        }
    }
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one byte directly into RAM at an absolute address, used by the
    /// program loader.
    pub fn poke_ram(&mut self, addr: u32, byte: u8) {
        self.bus.write_byte_raw(addr, byte);
    }

    /// Read one byte directly out of RAM at an absolute address, for tests
    /// and loader round-trip checks.
    pub fn peek_ram(&self, addr: u32) -> u8 {
        self.bus.read_byte_raw(addr)
    }

    /// Read a CSR without the `&mut self` receiver `Eei::read_csr` requires,
    /// for introspection from tests and the CLI.
    pub fn peek_csr(&self, csr: u16) -> u32 {
        self.csrs.read(csr)
    }

    /// Did the instruction retired by the most recent `step()` call trap?
    /// Used by `--exceptions-are-errors` to bail out of the hart loop
    /// instead of trusting the guest's trap handler.
    pub fn trap_occurred(&self) -> bool {
        self.trap.trap_occurred()
    }

    /// The CLINT's free-running cycle counter, for tests and diagnostics.
    pub fn peek_mtime(&self) -> u64 {
        self.bus.clint.mtime()
    }

    /// Bytes currently buffered on the UART output stream, draining them.
    pub fn drain_uart_output(&mut self) -> String {
        self.bus.uart.drain_output()
    }

    /// Queue bytes for the UART to deliver on subsequent reads.
    pub fn feed_uart_input(&mut self, bytes: impl IntoIterator<Item = u8>) {
        self.bus.uart.extend_input(bytes);
    }

    fn raise(&mut self, ex: Exception, pc: u32, tval: u32) {
        if let Some(new_pc) = self.trap.raise_exception(&mut self.csrs, pc, ex, tval) {
            self.pc = new_pc;
        }
    }

    /// Run one fetch-decode-execute-trap cycle.
    pub fn step(&mut self) -> StepResult {
        if self.halted || self.pc == 0 {
            if self.pc == 0 && !self.halted {
                log::error!("halted: pc is zero (unhandled trap — mtvec not configured)");
            }
            self.halted = true;
            return StepResult {
                trace_line: None,
                halted: true,
            };
        }

        let pc_before = self.pc;
        let regs_before: RegSnapshot = self.registers;
        self.trap.begin_instruction();
        self.pending_tval = 0;

        let mut trace_line = None;

        if pc_before % 4 != 0 {
            self.raise(Exception::InstructionAccessFault, pc_before, pc_before);
        } else {
            match self.bus.fetch(pc_before) {
                Err(_) => {
                    self.raise(Exception::InstructionAccessFault, pc_before, pc_before);
                }
                Ok(0) => {
                    self.halted = true;
                    return StepResult {
                        trace_line: None,
                        halted: true,
                    };
                }
                Ok(word) => match self.decoder.get_exec(word) {
                    Err(decode::DecoderError::NoMatch(_)) => {
                        self.raise(Exception::IllegalInstruction, pc_before, word);
                    }
                    Ok(instr) => {
                        let outcome = (instr.executer)(self, word);
                        if let Err(ex) = outcome {
                            let tval = self.pending_tval;
                            self.raise(ex, pc_before, tval);
                        } else if self.pc == pc_before {
                            self.pc = pc_before.wrapping_add(4);
                        }
                        if !self.trap.trap_occurred() || instr.always_trace {
                            trace_line =
                                Some((instr.formatter)(self, word, pc_before, &regs_before));
                        }
                    }
                },
            }
        }

        self.registers[0] = 0;
        self.bus.clint.tick();
        self.csrs.set_mip_mtip(self.bus.clint.interrupt_pending());
        if self.csrs.mstatus_mie() && self.csrs.mie_mtie() && self.csrs.mip_mtip() {
            if let Some(new_pc) = self.trap.raise_timer_interrupt(&mut self.csrs, self.pc) {
                self.pc = new_pc;
            }
        }

        let halted = self.halt_requested;
        self.halted = halted;
        StepResult { trace_line, halted }
    }
}

impl Eei for Platform {
    fn pc(&self) -> u32 {
        self.pc
    }

    fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    fn increment_pc(&mut self) {
        self.pc = self.pc.wrapping_add(4);
    }

    fn x(&self, reg: u8) -> u32 {
        if reg == 0 {
            0
        } else {
            self.registers[reg as usize]
        }
    }

    fn set_x(&mut self, reg: u8, value: u32) {
        if reg != 0 {
            self.registers[reg as usize] = value;
        }
    }

    fn load(&mut self, addr: u32, width: u32) -> Result<u32, Exception> {
        self.bus.load(addr, width).map_err(|e| {
            self.pending_tval = addr;
            e
        })
    }

    fn store(&mut self, addr: u32, value: u32, width: u32) -> Result<(), Exception> {
        self.bus.store(addr, value, width).map_err(|e| {
            self.pending_tval = addr;
            e
        })
    }

    fn read_csr(&mut self, csr: u16) -> u32 {
        self.csrs.read(csr)
    }

    fn write_csr(&mut self, csr: u16, value: u32) {
        self.csrs.write(csr, value);
    }

    fn mret(&mut self) {
        self.pc = self.trap.mret(&self.csrs);
    }

    fn request_halt(&mut self) {
        self.halt_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csr::{MIE, MIE_MTIE_BIT, MSTATUS, MSTATUS_MIE_BIT, MTVEC};

    fn write_instr(platform: &mut Platform, addr: u32, instr: u32) {
        for i in 0..4 {
            let byte = ((instr >> (8 * i)) & 0xff) as u8;
            platform.poke_ram(addr + i as u32, byte);
        }
    }

    #[test]
    fn all_zero_word_halts_without_trace() {
        let mut platform = Platform::new();
        let result = platform.step();
        assert!(result.halted);
        assert!(result.trace_line.is_none());
    }

    #[test]
    fn ebreak_halts_after_emitting_its_own_line() {
        let mut platform = Platform::new();
        write_instr(&mut platform, 0x8000_0000, 0x0010_0073); // ebreak
        let result = platform.step();
        assert!(result.halted);
        assert_eq!(result.trace_line.as_deref(), Some("0x80000000:ebreak"));
    }

    #[test]
    fn illegal_instruction_traps_and_redirects_to_mtvec() {
        let mut platform = Platform::new();
        platform.write_csr(MTVEC, 0x8000_0100);
        // 0xffffffff decodes to no registered pattern.
        write_instr(&mut platform, 0x8000_0000, 0xffff_ffff);
        let result = platform.step();
        assert!(result.trace_line.is_none());
        assert_eq!(platform.pc(), 0x8000_0100);
        assert_eq!(platform.peek_csr(crate::csr::MCAUSE), 0x02);
    }

    #[test]
    fn unhandled_trap_with_zero_mtvec_halts_next_step() {
        let mut platform = Platform::new();
        write_instr(&mut platform, 0x8000_0000, 0xffff_ffff);
        platform.step();
        assert_eq!(platform.pc(), 0);
        let result = platform.step();
        assert!(result.halted);
    }

    #[test]
    fn timer_interrupt_fires_once_enabled_and_pending() {
        let mut platform = Platform::new();
        platform.write_csr(MTVEC, 0x8000_0200);
        platform.write_csr(MSTATUS, 1 << MSTATUS_MIE_BIT);
        platform.write_csr(MIE, 1 << MIE_MTIE_BIT);
        platform.write_csr(crate::csr::MIP, 0);
        // Program mtimecmp to 1 so the very first tick trips it.
        platform
            .store(crate::bus::CLINT_BASE + crate::clint::MTIMECMP_LO, 1, 4)
            .unwrap();
        platform
            .store(crate::bus::CLINT_BASE + crate::clint::MTIMECMP_HI, 0, 4)
            .unwrap();
        // addi x0, x0, 0 (nop) at reset pc.
        write_instr(&mut platform, 0x8000_0000, 0x0000_0013);
        platform.step();
        assert_eq!(platform.pc(), 0x8000_0200);
        assert_eq!(
            platform.peek_csr(crate::csr::MCAUSE),
            crate::exception::MACHINE_TIMER_INTERRUPT_CAUSE
        );
    }

    #[test]
    fn fetch_outside_ram_traps_instead_of_executing_device_bits() {
        let mut platform = Platform::new();
        platform.write_csr(MTVEC, 0x8000_0100);
        platform.set_pc(crate::bus::CLINT_BASE);
        let result = platform.step();
        assert!(result.trace_line.is_none());
        assert_eq!(platform.pc(), 0x8000_0100);
        assert_eq!(
            platform.peek_csr(crate::csr::MCAUSE),
            crate::exception::Exception::InstructionAccessFault.cause()
        );
    }
}
