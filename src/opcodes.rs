//! Major opcode values (instruction bits [6:0]) for the RV32IM
//! instructions implemented by this simulator.

pub const OP_LUI: u32 = 0x37;
pub const OP_AUIPC: u32 = 0x17;
pub const OP_JAL: u32 = 0x6f;
pub const OP_JALR: u32 = 0x67;
pub const OP_BRANCH: u32 = 0x63;
pub const OP_LOAD: u32 = 0x03;
pub const OP_STORE: u32 = 0x23;
pub const OP_IMM: u32 = 0x13;
pub const OP: u32 = 0x33;
pub const OP_SYSTEM: u32 = 0x73;

/// funct7 value selecting the M-extension within the OP (0x33) group.
pub const FUNCT7_MULDIV: u32 = 0x01;
/// funct7 value selecting sub/sra within the OP (0x33) group.
pub const FUNCT7_ALT: u32 = 0x20;
pub const FUNCT7_BASE: u32 = 0x00;
