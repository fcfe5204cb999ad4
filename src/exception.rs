//! Architectural exceptions and the machine timer interrupt.
//!
//! These are the cause values of a trap (spec.md §4.5): a synchronous
//! exception raised mid-instruction by the decoder/executor/bus, or the
//! one asynchronous interrupt source this machine models.

/// Synchronous traps raised during instruction decode/execute, or by the
/// bus on an out-of-range or misaligned access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exception {
    InstructionAccessFault,
    IllegalInstruction,
    EnvironmentCallFromMMode,
    LoadAccessFault,
    StoreAccessFault,
}

impl Exception {
    /// The `mcause` value for this exception (spec.md §4.5).
    pub fn cause(self) -> u32 {
        match self {
            Exception::InstructionAccessFault => 0x01,
            Exception::IllegalInstruction => 0x02,
            Exception::LoadAccessFault => 0x05,
            Exception::StoreAccessFault => 0x07,
            Exception::EnvironmentCallFromMMode => 0x0b,
        }
    }
}

/// `mcause` for the machine timer interrupt (spec.md §4.5): the high bit
/// marks it asynchronous.
pub const MACHINE_TIMER_INTERRUPT_CAUSE: u32 = 0x8000_0007;
