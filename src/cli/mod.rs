//! CLI subcommand implementations for the `ibdscan` binary.
//!
//! Argument parsing uses clap derive macros. The top-level [`app::Cli`] struct
//! and [`app::Commands`] enum live in [`app`] and are shared between `main.rs`
//! and `build.rs` (for man page and completion generation) via `include!()`.
//!
//! Each subcommand module has an `Options` struct and a
//! `pub fn execute(opts, writer) -> Result<(), ScanError>` entry point. The
//! `writer: &mut dyn Write` parameter lets tests capture output and lets the
//! global `--output` flag redirect it to a file.
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `ibdscan scan` | [`scan`] | Decode every page and print its header fields |
//! | `ibdscan dump` | [`dump`] | Hex dump of a page or an absolute byte range |

pub mod app;
pub mod dump;
pub mod scan;

/// Write a line to the given writer, converting io::Error to ScanError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::ScanError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::ScanError::Io(e.to_string()))
    };
}

pub(crate) use wprintln;

use crate::innodb::tablespace::{PageSize, Tablespace};
use crate::ScanError;
use indicatif::{ProgressBar, ProgressStyle};

/// Open a tablespace, using the page size override when one is given.
pub(crate) fn open_tablespace(path: &str, page_size: Option<u32>) -> Result<Tablespace, ScanError> {
    match page_size {
        Some(ps) => Tablespace::open_with_page_size(path, PageSize::new(ps)?),
        None => Tablespace::open(path),
    }
}

/// Create a styled progress bar for iterating over pages.
pub(crate) fn create_progress_bar(count: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(count);
    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{eta}})",
            unit
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}
