use clap::Parser;
use clap_num::maybe_hex;
use riscvemu::csr::MCAUSE;
use riscvemu::host_error::HostError;
use riscvemu::loader::load_program;
use riscvemu::platform::Platform;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

/// Simulate a single-hart RV32IM hart and emit a deterministic trace.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
struct Args {
    /// Path to the textual hex program image.
    program: PathBuf,

    /// Path to write the trace output to, one line per retired instruction.
    trace_out: PathBuf,

    /// Optional byte stream fed to the UART as guest input.
    input: Option<PathBuf>,

    /// Surface an unhandled architectural exception as a host-level error
    /// instead of driving it into the guest trap handler. Useful for
    /// conformance testing against seed scenarios.
    #[arg(short, long)]
    exceptions_are_errors: bool,

    /// Stop after this many retired steps (use 0x prefix for hexadecimal).
    /// Guards against runaway loops, since the halt sentinels depend on
    /// guest cooperation.
    #[arg(short, long, value_parser=maybe_hex::<u64>)]
    max_steps: Option<u64>,
}

fn run(args: Args) -> Result<(), HostError> {
    let program_text =
        fs::read_to_string(&args.program).map_err(|source| HostError::ProgramImageUnreadable {
            path: args.program.clone(),
            source,
        })?;

    let trace_file = fs::File::create(&args.trace_out).map_err(|source| {
        HostError::TraceOutputUnwritable {
            path: args.trace_out.clone(),
            source,
        }
    })?;
    let mut trace_writer = BufWriter::new(trace_file);

    let terminal_path = PathBuf::from("terminal.out");
    let terminal_file = fs::File::create(&terminal_path).map_err(|source| {
        HostError::TerminalMirrorUnwritable {
            path: terminal_path.clone(),
            source,
        }
    })?;
    let mut terminal_writer = BufWriter::new(terminal_file);

    let mut platform = Platform::new();
    load_program(&mut platform, &program_text);

    if let Some(input_path) = &args.input {
        let bytes = fs::read(input_path).map_err(|source| HostError::InputStreamUnreadable {
            path: input_path.clone(),
            source,
        })?;
        platform.feed_uart_input(bytes);
    }

    // The hart loop runs on its own thread and hands UART output to a
    // dedicated printer thread, since a guest could legitimately block a
    // real terminal's stdout buffering without blocking the simulation.
    let (uart_tx, uart_rx) = mpsc::channel::<String>();
    let uart_host_handle = thread::spawn(move || {
        let mut stdout = io::stdout();
        while let Ok(chunk) = uart_rx.recv() {
            print!("{chunk}");
            let _ = stdout.flush();
        }
    });

    let mut steps: u64 = 0;
    let mut unhandled_exception = None;
    loop {
        if let Some(limit) = args.max_steps {
            if steps >= limit {
                log::warn!("stopping after reaching --max-steps={limit}");
                break;
            }
        }

        let result = platform.step();
        steps += 1;

        if let Some(line) = &result.trace_line {
            writeln!(trace_writer, "{line}").expect("trace output write failed");
        }

        let uart_chunk = platform.drain_uart_output();
        if !uart_chunk.is_empty() {
            terminal_writer
                .write_all(uart_chunk.as_bytes())
                .expect("terminal mirror write failed");
            let _ = uart_tx.send(uart_chunk);
        }

        if args.exceptions_are_errors && platform.trap_occurred() {
            unhandled_exception = Some(HostError::UnhandledException {
                cause: platform.peek_csr(MCAUSE),
                pc: platform.peek_csr(riscvemu::csr::MEPC),
            });
            break;
        }

        if result.halted {
            log::info!("halted after {steps} steps");
            break;
        }
    }

    trace_writer.flush().expect("trace output flush failed");
    terminal_writer.flush().expect("terminal mirror flush failed");
    drop(uart_tx);
    let _ = uart_host_handle.join();

    match unhandled_exception {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
