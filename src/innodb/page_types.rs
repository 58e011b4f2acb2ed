//! InnoDB page type catalog.
//!
//! Maps the 2-byte page type field (bytes 24-25 of the FIL header) to a
//! [`PageType`]. The mapping is total: tags outside the known set become
//! [`PageType::Unknown`] carrying the raw value, so a scan over a tablespace
//! never stops on a page type it has not been taught about.
//!
//! Values are from `fil0fil.h` in the MySQL source.

use serde::Serialize;
use std::fmt;

/// Known InnoDB page types, plus `Unknown` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PageType {
    /// Freshly allocated, type field not initialized (FIL_PAGE_TYPE_ALLOCATED = 0)
    Allocated,
    /// Undo log page (FIL_PAGE_UNDO_LOG = 2)
    UndoLog,
    /// File segment inode (FIL_PAGE_INODE = 3)
    Inode,
    /// Insert buffer free list (FIL_PAGE_IBUF_FREE_LIST = 4)
    IbufFreeList,
    /// Insert buffer bitmap (FIL_PAGE_IBUF_BITMAP = 5)
    IbufBitmap,
    /// System internal page (FIL_PAGE_TYPE_SYS = 6)
    Sys,
    /// Transaction system header (FIL_PAGE_TYPE_TRX_SYS = 7)
    TrxSys,
    /// File space header, page 0 of each tablespace (FIL_PAGE_TYPE_FSP_HDR = 8)
    FspHdr,
    /// Extent descriptor (FIL_PAGE_TYPE_XDES = 9)
    Xdes,
    /// Uncompressed BLOB page (FIL_PAGE_TYPE_BLOB = 10)
    Blob,
    /// Subsequent compressed BLOB page (FIL_PAGE_TYPE_ZBLOB2 = 12)
    ZBlob2,
    /// B+Tree index page for table and index data (FIL_PAGE_INDEX = 17855)
    Index,
    /// Any tag not listed above. Holds the raw value read from the page.
    Unknown(u16),
}

impl PageType {
    /// Classify a page type tag read from the FIL header.
    ///
    /// Never fails: unrecognized values map to `Unknown(tag)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::page_types::PageType;
    ///
    /// assert_eq!(PageType::from_u16(17855), PageType::Index);
    /// assert_eq!(PageType::from_u16(8), PageType::FspHdr);
    /// assert_eq!(PageType::from_u16(9999), PageType::Unknown(9999));
    /// ```
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => PageType::Allocated,
            2 => PageType::UndoLog,
            3 => PageType::Inode,
            4 => PageType::IbufFreeList,
            5 => PageType::IbufBitmap,
            6 => PageType::Sys,
            7 => PageType::TrxSys,
            8 => PageType::FspHdr,
            9 => PageType::Xdes,
            10 => PageType::Blob,
            12 => PageType::ZBlob2,
            17855 => PageType::Index,
            other => PageType::Unknown(other),
        }
    }

    /// Returns the raw u16 value of this page type.
    pub fn as_u16(self) -> u16 {
        match self {
            PageType::Allocated => 0,
            PageType::UndoLog => 2,
            PageType::Inode => 3,
            PageType::IbufFreeList => 4,
            PageType::IbufBitmap => 5,
            PageType::Sys => 6,
            PageType::TrxSys => 7,
            PageType::FspHdr => 8,
            PageType::Xdes => 9,
            PageType::Blob => 10,
            PageType::ZBlob2 => 12,
            PageType::Index => 17855,
            PageType::Unknown(tag) => tag,
        }
    }

    /// Returns true for tags outside the known set.
    pub fn is_unknown(self) -> bool {
        matches!(self, PageType::Unknown(_))
    }

    /// Returns (name, description) for this page type.
    fn metadata(self) -> (&'static str, &'static str) {
        match self {
            PageType::Allocated => ("ALLOCATED", "Freshly allocated"),
            PageType::UndoLog => ("UNDO_LOG", "Undo log"),
            PageType::Inode => ("INODE", "File segment inode"),
            PageType::IbufFreeList => ("IBUF_FREE_LIST", "Insert buffer free list"),
            PageType::IbufBitmap => ("IBUF_BITMAP", "Insert buffer bitmap"),
            PageType::Sys => ("SYS", "System internal"),
            PageType::TrxSys => ("TRX_SYS", "Transaction system header"),
            PageType::FspHdr => ("FSP_HDR", "File space header"),
            PageType::Xdes => ("XDES", "Extent descriptor"),
            PageType::Blob => ("BLOB", "Uncompressed BLOB"),
            PageType::ZBlob2 => ("ZBLOB2", "Subsequent compressed BLOB"),
            PageType::Index => ("INDEX", "B+Tree index"),
            PageType::Unknown(_) => ("UNKNOWN", "Unrecognized page type"),
        }
    }

    /// Returns the name of this page type as used in MySQL source.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::page_types::PageType;
    ///
    /// assert_eq!(PageType::Index.name(), "INDEX");
    /// assert_eq!(PageType::IbufBitmap.name(), "IBUF_BITMAP");
    /// assert_eq!(PageType::Unknown(13).name(), "UNKNOWN");
    /// ```
    pub fn name(self) -> &'static str {
        self.metadata().0
    }

    /// Returns a human-readable description of this page type.
    pub fn description(self) -> &'static str {
        self.metadata().1
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageType::Unknown(tag) => write!(f, "UNKNOWN({})", tag),
            known => write!(f, "{}", known.name()),
        }
    }
}
