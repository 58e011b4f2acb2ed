//! Universal page header parsing.
//!
//! Every InnoDB page begins with a 38-byte FIL header. [`FilHeader`] decodes
//! the four fields of it that are needed to place a page in its B+Tree level
//! list: the page number, the previous and next sibling page numbers, and the
//! page type tag.

use serde::Serialize;

use crate::innodb::constants::*;
use crate::innodb::page_types::PageType;
use crate::innodb::view::ByteView;
use crate::ScanError;

/// Fields of the FIL header present on every page, regardless of type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilHeader {
    /// Page number within the tablespace. Bytes 4-7.
    pub page_number: u32,
    /// Previous page in the doubly-linked list. Bytes 8-11.
    /// FIL_NULL (0xFFFFFFFF) if there is no previous sibling.
    pub prev_page: u32,
    /// Next page in the doubly-linked list. Bytes 12-15.
    /// FIL_NULL (0xFFFFFFFF) if there is no next sibling.
    pub next_page: u32,
    /// Page type. Bytes 24-25.
    pub page_type: PageType,
}

impl FilHeader {
    /// Decode the FIL header fields from a page view.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::page::FilHeader;
    /// use pagescan::innodb::page_types::PageType;
    /// use pagescan::innodb::view::ByteView;
    /// use byteorder::{BigEndian, ByteOrder};
    ///
    /// let mut page = vec![0u8; 64];
    /// BigEndian::write_u32(&mut page[4..], 3);
    /// BigEndian::write_u32(&mut page[8..], 0xFFFF_FFFF);
    /// BigEndian::write_u32(&mut page[12..], 4);
    /// BigEndian::write_u16(&mut page[24..], 9);
    ///
    /// let hdr = FilHeader::decode(&ByteView::new(&page)).unwrap();
    /// assert_eq!(hdr.page_number, 3);
    /// assert!(!hdr.has_prev());
    /// assert_eq!(hdr.next_page, 4);
    /// assert_eq!(hdr.page_type, PageType::Xdes);
    /// ```
    pub fn decode(view: &ByteView<'_>) -> Result<Self, ScanError> {
        Ok(FilHeader {
            page_number: view.read_u32(FIL_PAGE_OFFSET)?,
            prev_page: view.read_u32(FIL_PAGE_PREV)?,
            next_page: view.read_u32(FIL_PAGE_NEXT)?,
            page_type: PageType::from_u16(view.read_u16(FIL_PAGE_TYPE)?),
        })
    }

    /// Returns true unless prev_page is FIL_NULL.
    pub fn has_prev(&self) -> bool {
        self.prev_page != FIL_NULL
    }

    /// Returns true unless next_page is FIL_NULL.
    pub fn has_next(&self) -> bool {
        self.next_page != FIL_NULL
    }

    /// Previous sibling page number, or `None` for FIL_NULL.
    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then_some(self.prev_page)
    }

    /// Next sibling page number, or `None` for FIL_NULL.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then_some(self.next_page)
    }
}
