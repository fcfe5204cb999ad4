//! Textual program-image loader (spec.md §6).
//!
//! A line beginning with `@` introduces a new current load address,
//! written in hex without a `0x` prefix. Lines between address directives
//! are whitespace-separated two-hex-digit byte tokens; each stores one byte
//! at the current address and advances it by one. Empty lines, and any
//! bytes that would precede the first `@` directive, are ignored. A
//! malformed token is logged and skipped rather than aborting the load
//! (spec.md §7: the loader never aborts mid-file).

use crate::bus::{RAM_BASE, RAM_SIZE};
use crate::platform::Platform;

/// Parse `text` and poke every decoded byte into `platform`'s RAM.
pub fn load_program(platform: &mut Platform, text: &str) {
    let mut addr: Option<u32> = None;

    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(hex_addr) = line.strip_prefix('@') {
            match u32::from_str_radix(hex_addr.trim(), 16) {
                Ok(parsed) => addr = Some(parsed),
                Err(_) => {
                    log::warn!(
                        "loader: line {}: malformed address directive {:?}, skipping",
                        line_number + 1,
                        line
                    );
                }
            }
            continue;
        }

        let Some(current) = addr.as_mut() else {
            log::warn!(
                "loader: line {}: byte tokens before the first @ directive, skipping",
                line_number + 1
            );
            continue;
        };

        for token in line.split_whitespace() {
            match u8::from_str_radix(token, 16) {
                Ok(byte) => {
                    if *current < RAM_BASE || *current >= RAM_BASE + RAM_SIZE {
                        log::warn!(
                            "loader: line {}: address 0x{:08x} is outside RAM, skipping",
                            line_number + 1,
                            *current
                        );
                    } else {
                        platform.poke_ram(*current, byte);
                    }
                    *current = current.wrapping_add(1);
                }
                Err(_) => {
                    log::warn!(
                        "loader: line {}: malformed byte token {:?}, skipping",
                        line_number + 1,
                        token
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::RAM_BASE;

    #[test]
    fn loads_bytes_at_directed_address_and_advances() {
        let mut platform = Platform::new();
        load_program(&mut platform, "@80000000\n01 02 03\n");
        assert_eq!(platform.peek_ram(RAM_BASE), 0x01);
        assert_eq!(platform.peek_ram(RAM_BASE + 1), 0x02);
        assert_eq!(platform.peek_ram(RAM_BASE + 2), 0x03);
    }

    #[test]
    fn a_new_directive_moves_the_write_cursor() {
        let mut platform = Platform::new();
        load_program(&mut platform, "@80000000\nff\n@80000010\nee\n");
        assert_eq!(platform.peek_ram(RAM_BASE), 0xff);
        assert_eq!(platform.peek_ram(RAM_BASE + 0x10), 0xee);
    }

    #[test]
    fn malformed_token_is_skipped_not_fatal() {
        let mut platform = Platform::new();
        load_program(&mut platform, "@80000000\nzz 01\n");
        assert_eq!(platform.peek_ram(RAM_BASE), 0x01);
    }

    #[test]
    fn bytes_before_first_directive_are_ignored() {
        let mut platform = Platform::new();
        load_program(&mut platform, "01 02\n@80000000\n03\n");
        assert_eq!(platform.peek_ram(RAM_BASE), 0x03);
    }

    #[test]
    fn directive_outside_ram_is_skipped_not_fatal() {
        let mut platform = Platform::new();
        load_program(&mut platform, "@00000000\nff\n@80000000\n01\n");
        assert_eq!(platform.peek_ram(RAM_BASE), 0x01);
    }

    #[test]
    fn a_run_that_walks_off_the_end_of_ram_is_truncated_not_fatal() {
        use crate::bus::RAM_SIZE;
        let mut platform = Platform::new();
        let near_end = RAM_BASE + RAM_SIZE - 1;
        load_program(
            &mut platform,
            &format!("@{:x}\naa bb\n", near_end),
        );
        assert_eq!(platform.peek_ram(near_end), 0xaa);
    }
}
