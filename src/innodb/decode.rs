//! Page dispatch.
//!
//! [`page_at`] is the single place where a page's type tag decides how the
//! rest of the page is read. The result is a [`Page`]: a closed union over
//! the page shapes this crate understands. INDEX pages carry their
//! [`IndexHeader`]; every other type, including unrecognized tags, is a
//! [`Page::Generic`] with only the FIL header populated.

use log::debug;
use serde::Serialize;

use crate::innodb::index::IndexHeader;
use crate::innodb::page::FilHeader;
use crate::innodb::page_types::PageType;
use crate::innodb::source::PageSource;
use crate::innodb::tablespace::PageSize;
use crate::innodb::view::ByteView;
use crate::ScanError;

/// A decoded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    /// Any non-INDEX page.
    Generic(FilHeader),
    /// A B+Tree INDEX page.
    Index(FilHeader, IndexHeader),
}

impl Page {
    /// The FIL header fields, present on every variant.
    pub fn header(&self) -> &FilHeader {
        match self {
            Page::Generic(fil) | Page::Index(fil, _) => fil,
        }
    }

    /// Shorthand for `header().page_type`.
    pub fn page_type(&self) -> PageType {
        self.header().page_type
    }

    /// The INDEX header, if this is an INDEX page.
    pub fn index_header(&self) -> Option<&IndexHeader> {
        match self {
            Page::Index(_, idx) => Some(idx),
            Page::Generic(_) => None,
        }
    }
}

/// Decode the page covered by `view`.
///
/// The view should span exactly one page; reads never leave it.
pub fn decode_page(view: &ByteView<'_>) -> Result<Page, ScanError> {
    let fil = FilHeader::decode(view)?;
    match fil.page_type {
        PageType::Index => Ok(Page::Index(fil, IndexHeader::decode(view)?)),
        _ => Ok(Page::Generic(fil)),
    }
}

/// Decode the page that starts at byte `offset` of `source`.
///
/// Borrows exactly `page_size` bytes from the source. Fails with
/// [`ScanError::OutOfBounds`] if that extent does not fit inside the source.
///
/// # Examples
///
/// ```
/// use pagescan::innodb::constants::*;
/// use pagescan::innodb::decode::{page_at, Page};
/// use pagescan::innodb::tablespace::PageSize;
/// use byteorder::{BigEndian, ByteOrder};
///
/// let ps = PageSize::new(4096).unwrap();
/// let mut buf = vec![0u8; 2 * 4096];
/// BigEndian::write_u32(&mut buf[4096 + FIL_PAGE_OFFSET..], 1);
/// BigEndian::write_u16(&mut buf[4096 + FIL_PAGE_TYPE..], 17855);
/// BigEndian::write_u16(&mut buf[4096 + PAGE_N_RECS..], 12);
///
/// match page_at(buf.as_slice(), 4096, ps).unwrap() {
///     Page::Index(fil, idx) => {
///         assert_eq!(fil.page_number, 1);
///         assert_eq!(idx.n_recs, 12);
///     }
///     Page::Generic(_) => unreachable!(),
/// }
///
/// // A page that would run past the end of the buffer is rejected
/// assert!(page_at(buf.as_slice(), 4097, ps).is_err());
/// ```
pub fn page_at<S: PageSource + ?Sized>(
    source: &S,
    offset: u64,
    page_size: PageSize,
) -> Result<Page, ScanError> {
    let bytes = source.bytes(offset, page_size.as_usize())?;
    let page = decode_page(&ByteView::new(bytes))?;
    debug!(
        "page at offset {}: number {} type {}",
        offset,
        page.header().page_number,
        page.page_type()
    );
    Ok(page)
}
