//! INDEX page header parsing.
//!
//! INDEX pages (page type 17855 / `FIL_PAGE_INDEX`) are the B+Tree nodes that
//! store table data and secondary index entries. Their page header starts at
//! `FIL_PAGE_DATA` (byte 38), right after the FIL header. [`IndexHeader`]
//! decodes the fields that describe the page's place in the tree.
//!
//! The index id is read as the full 8-byte `PAGE_INDEX_ID` field.

use serde::Serialize;

use crate::innodb::constants::*;
use crate::innodb::row_format::RowFormat;
use crate::innodb::view::ByteView;
use crate::ScanError;

/// Parsed INDEX page header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexHeader {
    /// Level in the B+Tree (0 = leaf).
    pub level: u16,
    /// Number of user records on the page, excluding infimum and supremum.
    pub n_recs: u16,
    /// Index ID the page belongs to.
    pub index_id: u64,
    /// Record heap size (PAGE_N_HEAP with the format flag masked out).
    pub n_heap: u16,
    /// Row format derived from bit 15 of PAGE_N_HEAP.
    pub row_format: RowFormat,
}

impl IndexHeader {
    /// Decode the INDEX page header from a page view.
    ///
    /// Only meaningful for pages whose FIL header type is INDEX; the
    /// [`Page`](crate::innodb::decode::Page) factory takes care of that.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::index::IndexHeader;
    /// use pagescan::innodb::constants::*;
    /// use pagescan::innodb::row_format::RowFormat;
    /// use pagescan::innodb::view::ByteView;
    /// use byteorder::{BigEndian, ByteOrder};
    ///
    /// let mut page = vec![0u8; 256];
    /// BigEndian::write_u16(&mut page[PAGE_N_HEAP..], 0x8003); // compact + 3 heap records
    /// BigEndian::write_u16(&mut page[PAGE_N_RECS..], 1);
    /// BigEndian::write_u16(&mut page[PAGE_LEVEL..], 0);
    /// BigEndian::write_u64(&mut page[PAGE_INDEX_ID..], 100);
    ///
    /// let hdr = IndexHeader::decode(&ByteView::new(&page)).unwrap();
    /// assert_eq!(hdr.row_format, RowFormat::Compact);
    /// assert_eq!(hdr.n_heap, 3);
    /// assert_eq!(hdr.n_recs, 1);
    /// assert!(hdr.is_leaf());
    /// assert_eq!(hdr.index_id, 100);
    /// ```
    pub fn decode(view: &ByteView<'_>) -> Result<Self, ScanError> {
        let n_heap_raw = view.read_u16(PAGE_N_HEAP)?;

        Ok(IndexHeader {
            level: view.read_u16(PAGE_LEVEL)?,
            n_recs: view.read_u16(PAGE_N_RECS)?,
            index_id: view.read_u64(PAGE_INDEX_ID)?,
            n_heap: n_heap_raw & !PAGE_N_HEAP_COMPACT_FLAG,
            row_format: RowFormat::from_flag_word(n_heap_raw),
        })
    }

    /// Returns true if this is a leaf-level page.
    pub fn is_leaf(&self) -> bool {
        self.level == 0
    }
}
