//! Host-level failures (spec.md §7): conditions that stop the CLI before or
//! around the simulation loop rather than being delivered to the guest as a
//! trap. Distinct from `crate::exception::Exception`, which models
//! architectural faults the guest program is expected to handle.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("could not open program image {path}: {source}")]
    ProgramImageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create trace output {path}: {source}")]
    TraceOutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open input stream {path}: {source}")]
    InputStreamUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create terminal mirror {path}: {source}")]
    TerminalMirrorUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unhandled exception (mcause=0x{cause:08x}) at pc=0x{pc:08x}")]
    UnhandledException { cause: u32, pc: u32 },
}
