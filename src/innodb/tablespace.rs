//! InnoDB tablespace access.
//!
//! Provides [`Tablespace`], the entry point for decoding every page of a
//! `.ibd` file or an in-memory image. Page size is configuration: it is either
//! supplied as a [`PageSize`] or auto-detected from the FSP flags on page 0
//! (4K, 8K, 16K, 32K, and 64K pages are supported).
//!
//! Files are memory-mapped read-only when the `cli` feature is enabled and
//! read into memory otherwise. Either way pages are handed to
//! [`page_at`](crate::innodb::decode::page_at) as independent, disjoint
//! extents, so they can be decoded in any order or in parallel.

use std::fmt;

use byteorder::{BigEndian, ByteOrder};
use log::{debug, warn};
use serde::Serialize;

use crate::innodb::constants::*;
use crate::innodb::decode::{page_at, Page};
use crate::innodb::source::PageSource;
use crate::ScanError;

/// Validated page size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageSize(u32);

impl PageSize {
    /// All page sizes InnoDB can be configured with.
    pub const SUPPORTED: [u32; 5] = [
        SIZE_PAGE_4K,
        SIZE_PAGE_8K,
        SIZE_PAGE_16K,
        SIZE_PAGE_32K,
        SIZE_PAGE_64K,
    ];

    /// Create a page size, rejecting values InnoDB does not support.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::tablespace::PageSize;
    ///
    /// assert_eq!(PageSize::new(8192).unwrap().get(), 8192);
    /// assert!(PageSize::new(1000).is_err());
    /// assert_eq!(PageSize::default().get(), 16384);
    /// ```
    pub fn new(bytes: u32) -> Result<Self, ScanError> {
        if Self::SUPPORTED.contains(&bytes) {
            Ok(PageSize(bytes))
        } else {
            Err(ScanError::Argument(format!(
                "Unsupported page size {} (expected one of 4096, 8192, 16384, 32768, 65536)",
                bytes
            )))
        }
    }

    /// Page size in bytes.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Page size as a `u64`, for file offset arithmetic.
    pub fn as_u64(self) -> u64 {
        self.0 as u64
    }

    /// Page size as a `usize`, for slicing.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Decode the page size from FSP header flags.
    ///
    /// `ssize == 0` means the default 16K; otherwise the size is
    /// `1 << (ssize + 9)`. Returns `None` for sizes InnoDB cannot use.
    pub fn from_fsp_flags(flags: u32) -> Option<Self> {
        let ssize = (flags & FSP_FLAGS_MASK_PAGE_SSIZE) >> FSP_FLAGS_POS_PAGE_SSIZE;
        if ssize == 0 {
            return Some(PageSize::default());
        }
        PageSize::new(1u32 << (ssize + 9)).ok()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(SIZE_PAGE_DEFAULT)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Detect the page size from the FSP flags stored on page 0.
///
/// Falls back to 16K when the source is too short to hold the flags or the
/// flags encode an unsupported size.
pub fn detect_page_size<S: PageSource + ?Sized>(source: &S) -> PageSize {
    let flags = match source.bytes(FSP_SPACE_FLAGS as u64, 4) {
        Ok(b) => BigEndian::read_u32(b),
        Err(_) => return PageSize::default(),
    };
    match PageSize::from_fsp_flags(flags) {
        Some(ps) => ps,
        None => {
            warn!(
                "FSP flags 0x{:08x} encode an unsupported page size, assuming {}",
                flags, SIZE_PAGE_DEFAULT
            );
            PageSize::default()
        }
    }
}

/// An open tablespace file or in-memory tablespace image.
pub struct Tablespace {
    source: Box<dyn PageSource + Send + Sync>,
    file_size: u64,
    page_size: PageSize,
    page_count: u64,
}

impl Tablespace {
    /// Open a tablespace file and auto-detect the page size.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ScanError> {
        Self::from_source(open_source(path.as_ref())?, None)
    }

    /// Open a tablespace file with a specific page size (bypass auto-detection).
    pub fn open_with_page_size<P: AsRef<std::path::Path>>(
        path: P,
        page_size: PageSize,
    ) -> Result<Self, ScanError> {
        Self::from_source(open_source(path.as_ref())?, Some(page_size))
    }

    /// Create a tablespace from an in-memory byte buffer with auto-detected page size.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::tablespace::Tablespace;
    ///
    /// let ts = Tablespace::from_bytes(vec![0u8; 3 * 16384]).unwrap();
    /// assert_eq!(ts.page_size().get(), 16384);
    /// assert_eq!(ts.page_count(), 3);
    /// ```
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ScanError> {
        Self::from_source(Box::new(data), None)
    }

    /// Create a tablespace from an in-memory byte buffer with a specific page size.
    pub fn from_bytes_with_page_size(data: Vec<u8>, page_size: PageSize) -> Result<Self, ScanError> {
        Self::from_source(Box::new(data), Some(page_size))
    }

    /// Wrap any page source. `None` auto-detects the page size from page 0.
    pub fn from_source(
        source: Box<dyn PageSource + Send + Sync>,
        forced_page_size: Option<PageSize>,
    ) -> Result<Self, ScanError> {
        let file_size = source.len();
        let page_size = match forced_page_size {
            Some(ps) => ps,
            None => detect_page_size(&*source),
        };

        let page_count = file_size / page_size.as_u64();
        let remainder = file_size % page_size.as_u64();
        if remainder != 0 {
            warn!(
                "Tablespace size {} is not a multiple of page size {}; ignoring {} trailing bytes",
                file_size, page_size, remainder
            );
        }
        debug!(
            "tablespace: {} bytes, page size {}, {} pages",
            file_size, page_size, page_count
        );

        Ok(Tablespace {
            source,
            file_size,
            page_size,
            page_count,
        })
    }

    /// Returns the detected or configured page size.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the number of whole pages in the tablespace.
    pub fn page_count(&self) -> u64 {
        self.page_count
    }

    /// Returns the size of the underlying file or buffer in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Byte offset at which page `page_num` starts.
    pub fn page_offset(&self, page_num: u64) -> u64 {
        page_num * self.page_size.as_u64()
    }

    /// The underlying byte source.
    pub fn source(&self) -> &dyn PageSource {
        &*self.source
    }

    fn check_page_num(&self, page_num: u64) -> Result<(), ScanError> {
        if page_num >= self.page_count {
            return Err(ScanError::Argument(format!(
                "Page {} out of range (tablespace has {} pages)",
                page_num, self.page_count
            )));
        }
        Ok(())
    }

    /// Decode a single page by page number.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pagescan::innodb::tablespace::Tablespace;
    ///
    /// let ts = Tablespace::open("table.ibd").unwrap();
    /// let page = ts.page(3).unwrap();
    /// println!("Page 3 type: {}", page.page_type());
    /// ```
    pub fn page(&self, page_num: u64) -> Result<Page, ScanError> {
        self.check_page_num(page_num)?;
        page_at(&*self.source, self.page_offset(page_num), self.page_size)
    }

    /// Borrow the raw bytes of a single page.
    pub fn page_bytes(&self, page_num: u64) -> Result<&[u8], ScanError> {
        self.check_page_num(page_num)?;
        self.source
            .bytes(self.page_offset(page_num), self.page_size.as_usize())
    }

    /// Iterate over every page in order.
    ///
    /// A page that fails to decode yields an `Err` for that page only; the
    /// iterator keeps going with the next page.
    pub fn pages(&self) -> impl Iterator<Item = (u64, Result<Page, ScanError>)> + '_ {
        (0..self.page_count).map(move |page_num| (page_num, self.decode_logged(page_num)))
    }

    /// Decode every page in parallel on the rayon pool.
    ///
    /// Each worker reads a disjoint page extent of the read-only source.
    /// Results are returned in page-number order.
    #[cfg(feature = "cli")]
    pub fn par_pages(&self) -> Vec<(u64, Result<Page, ScanError>)> {
        use rayon::prelude::*;

        (0..self.page_count)
            .into_par_iter()
            .map(|page_num| (page_num, self.decode_logged(page_num)))
            .collect()
    }

    /// Decode one page during iteration, logging a failure before returning it.
    fn decode_logged(&self, page_num: u64) -> Result<Page, ScanError> {
        let page = self.page(page_num);
        if let Err(e) = &page {
            warn!(
                "page {} at offset {}: {}",
                page_num,
                self.page_offset(page_num),
                e
            );
        }
        page
    }
}

/// Memory-map a tablespace file read-only.
///
/// The mapped file must not be truncated by another process while the mapping
/// is alive; `.ibd` files should not be analysed while MySQL is writing them.
#[cfg(feature = "cli")]
fn open_source(path: &std::path::Path) -> Result<Box<dyn PageSource + Send + Sync>, ScanError> {
    let file = std::fs::File::open(path)
        .map_err(|e| ScanError::Io(format!("Cannot open {}: {}", path.display(), e)))?;

    let mmap = unsafe {
        memmap2::Mmap::map(&file)
            .map_err(|e| ScanError::Io(format!("Cannot mmap {}: {}", path.display(), e)))?
    };

    Ok(Box::new(mmap))
}

#[cfg(not(feature = "cli"))]
fn open_source(path: &std::path::Path) -> Result<Box<dyn PageSource + Send + Sync>, ScanError> {
    let data = std::fs::read(path)
        .map_err(|e| ScanError::Io(format!("Cannot read {}: {}", path.display(), e)))?;
    Ok(Box::new(data))
}
