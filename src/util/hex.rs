//! Offset and hex dump formatting for CLI output.

use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Format a byte offset as "decimal (0xhex)".
pub fn format_offset(offset: u64) -> String {
    format!("{} (0x{:x})", offset, offset)
}

/// Format a byte offset in whole KiB, as the scan report prints page starts.
pub fn format_kib(offset: u64) -> String {
    format!("{}K", offset / 1024)
}

/// Produce a hex dump of `data`, labelling lines from `base_offset`.
///
/// ```text
/// 00004000  00 00 00 00 00 00 00 01  ff ff ff ff 00 00 00 02  |................|
/// ```
///
/// A short final line is padded so the ASCII column stays aligned.
pub fn hex_dump(data: &[u8], base_offset: u64) -> String {
    let mut out = String::with_capacity(data.len() / BYTES_PER_LINE * 80 + 80);

    for (i, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:08x}  ", base_offset + (i * BYTES_PER_LINE) as u64);

        for col in 0..BYTES_PER_LINE {
            if col == BYTES_PER_LINE / 2 {
                out.push(' ');
            }
            match chunk.get(col) {
                Some(b) => {
                    let _ = write!(out, "{:02x} ", b);
                }
                None => out.push_str("   "),
            }
        }

        out.push_str(" |");
        for col in 0..BYTES_PER_LINE {
            out.push(match chunk.get(col) {
                Some(b) if b.is_ascii_graphic() || *b == b' ' => *b as char,
                Some(_) => '.',
                None => ' ',
            });
        }
        out.push('|');
    }

    out
}
