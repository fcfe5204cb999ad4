//! Character device (C4): a byte-at-a-time UART at a single MMIO address.
//!
//! Reads drain a pre-loaded input stream; once exhausted, the device
//! injects a single `0x0A` and then an endless run of `0xFFFF_FFFF`, so a
//! guest program polling stdin-style terminates rather than spinning
//! (spec.md §4.3). Writes are buffered in an output queue that the hart
//! loop drains to the primary output sink and the `terminal.out` mirror.

use std::collections::VecDeque;

use queues::{IsQueue, Queue};

#[derive(Debug)]
pub struct Uart {
    input: VecDeque<u8>,
    eof_signaled: bool,
    output: Queue<char>,
}

impl Default for Uart {
    fn default() -> Self {
        Self {
            input: VecDeque::new(),
            eof_signaled: false,
            output: Queue::new(),
        }
    }
}

impl Uart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an input stream to be consumed byte-by-byte by guest reads.
    pub fn with_input(input: impl IntoIterator<Item = u8>) -> Self {
        Self {
            input: input.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue additional bytes behind whatever input is already pending.
    /// Once the stream has signalled EOF to the guest, further bytes queued
    /// here are not seen — the sentinel sequence only fires once.
    pub fn extend_input(&mut self, bytes: impl IntoIterator<Item = u8>) {
        self.input.extend(bytes);
    }

    /// A load from `UART_BASE`: the next input byte, zero-extended, or the
    /// end-of-input sentinel sequence.
    pub fn load(&mut self) -> u32 {
        match self.input.pop_front() {
            Some(byte) => byte as u32,
            None if !self.eof_signaled => {
                self.eof_signaled = true;
                0x0a
            }
            None => 0xffff_ffff,
        }
    }

    /// A store to `UART_BASE`: the low byte is emitted to the output
    /// stream.
    pub fn store(&mut self, data: u32) {
        let byte = (data & 0xff) as u8;
        self.output
            .add(byte as char)
            .expect("uart output queue push never fails");
    }

    /// Drain every byte written to the output stream since the last drain.
    pub fn drain_output(&mut self) -> String {
        let mut out = String::new();
        while let Ok(ch) = self.output.remove() {
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_input_bytes_then_newline_then_eof_sentinel() {
        let mut uart = Uart::with_input([b'h', b'i']);
        assert_eq!(uart.load(), b'h' as u32);
        assert_eq!(uart.load(), b'i' as u32);
        assert_eq!(uart.load(), 0x0a);
        assert_eq!(uart.load(), 0xffff_ffff);
        assert_eq!(uart.load(), 0xffff_ffff);
    }

    #[test]
    fn store_emits_low_byte_to_output_stream() {
        let mut uart = Uart::new();
        uart.store(0x1234_0041);
        assert_eq!(uart.drain_output(), "A");
    }
}
