use std::io::Write;

use crate::cli::{open_tablespace, wprintln};
use crate::util::hex::hex_dump;
use crate::ScanError;

/// Length dumped in absolute offset mode when `--length` is not given.
const DEFAULT_OFFSET_DUMP_LEN: usize = 256;

/// Options for the dump subcommand.
pub struct DumpOptions {
    /// Path to the tablespace file.
    pub file: String,
    /// Page to dump in page mode (default 0).
    pub page: Option<u64>,
    /// Absolute byte offset; switches to offset mode.
    pub offset: Option<u64>,
    /// Number of bytes to dump.
    pub length: Option<usize>,
    /// Page size override; auto-detected when `None`.
    pub page_size: Option<u32>,
}

/// Hex dump one page, or an absolute byte range with `--offset`.
///
/// In page mode `--length` is capped at the page size. In offset mode the
/// whole range must lie inside the file; a range running past the end fails
/// with an out-of-bounds error rather than being shortened.
pub fn execute(opts: &DumpOptions, writer: &mut dyn Write) -> Result<(), ScanError> {
    let ts = open_tablespace(&opts.file, opts.page_size)?;

    if let Some(abs_offset) = opts.offset {
        let length = opts.length.unwrap_or(DEFAULT_OFFSET_DUMP_LEN);
        let data = ts.source().bytes(abs_offset, length)?;
        wprintln!(
            writer,
            "Hex dump of {} at offset {} ({} bytes):",
            opts.file,
            abs_offset,
            data.len()
        )?;
        wprintln!(writer)?;
        wprintln!(writer, "{}", hex_dump(data, abs_offset))?;
        return Ok(());
    }

    let page_num = opts.page.unwrap_or(0);
    let page_data = ts.page_bytes(page_num)?;
    let dump_len = opts.length.unwrap_or(page_data.len()).min(page_data.len());

    wprintln!(
        writer,
        "Hex dump of {} page {} ({} bytes):",
        opts.file,
        page_num,
        dump_len
    )?;
    wprintln!(writer)?;
    wprintln!(
        writer,
        "{}",
        hex_dump(&page_data[..dump_len], ts.page_offset(page_num))
    )?;

    Ok(())
}
