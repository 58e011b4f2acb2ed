//! InnoDB tablespace page decoder.
//!
//! The `innodb-pagescan` crate (library name `pagescan`) classifies the pages
//! of an InnoDB tablespace file (`.ibd`) by their 2-byte type tag and decodes
//! the fixed-offset header fields that describe B+Tree topology: page number,
//! sibling links, tree level, record count, index id, and row format.
//!
//! # CLI Reference
//!
//! The `ibdscan` binary (default `cli` feature) walks a tablespace and prints
//! the decoded fields of every page.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`ibdscan scan`](cli::app::Commands::Scan) | Decode and print the header of every page |
//! | [`ibdscan dump`](cli::app::Commands::Dump) | Hex dump of one page or an absolute byte range |
//!
//! Both accept `--color <auto|always|never>` and `--output <file>`. Set
//! `RUST_LOG=debug` to see per-page dispatch on stderr.
//!
//! # Library API
//!
//! ```no_run
//! use pagescan::innodb::decode::Page;
//! use pagescan::innodb::tablespace::Tablespace;
//!
//! let ts = Tablespace::open("table.ibd").unwrap();
//! for (page_num, page) in ts.pages() {
//!     match page {
//!         Ok(Page::Index(fil, idx)) => {
//!             println!("{}: level {} ({} records)", fil.page_number, idx.level, idx.n_recs)
//!         }
//!         Ok(Page::Generic(fil)) => println!("{}: {}", page_num, fil.page_type),
//!         Err(e) => eprintln!("page {}: {}", page_num, e),
//!     }
//! }
//! ```
//!
//! Decoding works on any [`PageSource`](innodb::source::PageSource), so an
//! in-memory buffer is enough:
//!
//! ```
//! use pagescan::innodb::decode::{page_at, Page};
//! use pagescan::innodb::tablespace::PageSize;
//!
//! let buf = vec![0u8; 16384];
//! let page = page_at(buf.as_slice(), 0, PageSize::default()).unwrap();
//! assert!(matches!(page, Page::Generic(_)));
//! ```
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`innodb::view`] | Bounds-checked big-endian reads over one page |
//! | [`innodb::page_types`] | Page type tag catalog |
//! | [`innodb::page`] | FIL header fields present on every page |
//! | [`innodb::index`] | INDEX page header (level, record count, index id) |
//! | [`innodb::row_format`] | REDUNDANT / COMPACT detection |
//! | [`innodb::decode`] | The [`Page`](innodb::decode::Page) union and its factory |
//! | [`innodb::record`] | Record status and system record location |
//! | [`innodb::source`] | Random-access byte sources (slices, mmap) |
//! | [`innodb::tablespace`] | Page size configuration, page counting, iteration |
//! | [`innodb::constants`] | Page layout offsets |

#[cfg(feature = "cli")]
pub mod cli;
pub mod innodb;
pub mod util;

use thiserror::Error;

/// Errors returned by `pagescan` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// An I/O error occurred (file open, stat, mmap, or write failure).
    #[error("I/O error: {0}")]
    Io(String),

    /// A read or page extent reached past the end of the available bytes.
    #[error("Out of bounds: {width} bytes at offset {offset} exceeds length {len}")]
    OutOfBounds {
        /// Requested start offset.
        offset: u64,
        /// Requested width in bytes.
        width: u64,
        /// Length of the view or source that was read.
        len: u64,
    },

    /// An invalid argument was supplied (unsupported page size, page number out of range).
    #[error("Invalid argument: {0}")]
    Argument(String),
}
