//! Record-level structure of INDEX pages.
//!
//! User records on an INDEX page form a singly-linked list that starts at the
//! infimum system record and ends at the supremum. Where those two records
//! live, and how a record points at its successor, depends on the page's
//! [`RowFormat`]:
//!
//! | | infimum origin | supremum origin | next pointer |
//! |---|---|---|---|
//! | COMPACT | 99 | 112 | signed offset relative to the record origin |
//! | REDUNDANT | 101 | 116 | absolute offset within the page |
//!
//! In both formats the next pointer is the 2 bytes just before the record
//! origin. [`SystemRecords::locate`] resolves the system records and the first
//! user record; walking the rest of the chain is left to callers.

use serde::Serialize;

use crate::innodb::constants::*;
use crate::innodb::row_format::RowFormat;
use crate::innodb::view::ByteView;
use crate::ScanError;

/// Record status, the low 3 bits of a compact record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordType {
    /// Ordinary user record (leaf page).
    Conventional,
    /// Node pointer record (non-leaf page).
    NodePointer,
    /// Infimum system record.
    Infimum,
    /// Supremum system record.
    Supremum,
}

impl RecordType {
    /// Convert a status value to a `RecordType`.
    ///
    /// Only the lowest 3 bits of `status` are used; 4 through 7 are not
    /// assigned and yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::record::RecordType;
    ///
    /// assert_eq!(RecordType::from_status(0), Some(RecordType::Conventional));
    /// assert_eq!(RecordType::from_status(3), Some(RecordType::Supremum));
    /// assert_eq!(RecordType::from_status(0x0A), Some(RecordType::Infimum));
    /// assert_eq!(RecordType::from_status(5), None);
    /// ```
    pub fn from_status(status: u8) -> Option<Self> {
        match status & 0x07 {
            0 => Some(RecordType::Conventional),
            1 => Some(RecordType::NodePointer),
            2 => Some(RecordType::Infimum),
            3 => Some(RecordType::Supremum),
            _ => None,
        }
    }

    /// Returns the MySQL source-style name (e.g. `"REC_STATUS_ORDINARY"`).
    pub fn name(self) -> &'static str {
        match self {
            RecordType::Conventional => "REC_STATUS_ORDINARY",
            RecordType::NodePointer => "REC_STATUS_NODE_PTR",
            RecordType::Infimum => "REC_STATUS_INFIMUM",
            RecordType::Supremum => "REC_STATUS_SUPREMUM",
        }
    }
}

/// Locations of the system records and the head of the user record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemRecords {
    /// Row format the offsets were resolved for.
    pub row_format: RowFormat,
    /// Page offset of the infimum record origin.
    pub infimum: usize,
    /// Page offset of the supremum record origin.
    pub supremum: usize,
    /// Page offset of the record the infimum points to. Equal to
    /// `supremum` on a page with no user records.
    pub first_record: usize,
}

impl SystemRecords {
    /// Resolve the system records of an INDEX page.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::record::SystemRecords;
    /// use pagescan::innodb::row_format::RowFormat;
    /// use pagescan::innodb::view::ByteView;
    /// use byteorder::{BigEndian, ByteOrder};
    ///
    /// // Empty compact page: infimum (99) points straight at supremum (112).
    /// let mut page = vec![0u8; 16384];
    /// BigEndian::write_i16(&mut page[97..], 13);
    ///
    /// let sys = SystemRecords::locate(&ByteView::new(&page), RowFormat::Compact).unwrap();
    /// assert_eq!(sys.infimum, 99);
    /// assert_eq!(sys.supremum, 112);
    /// assert!(sys.is_empty());
    /// ```
    pub fn locate(view: &ByteView<'_>, row_format: RowFormat) -> Result<Self, ScanError> {
        let (infimum, supremum) = match row_format {
            RowFormat::Compact => (PAGE_NEW_INFIMUM, PAGE_NEW_SUPREMUM),
            RowFormat::Redundant => (PAGE_OLD_INFIMUM, PAGE_OLD_SUPREMUM),
        };
        let next_field = infimum - REC_NEXT;

        let first_record = match row_format {
            RowFormat::Compact => {
                let rel = view.read_i16(next_field)? as i64;
                (infimum as i64 + rel).rem_euclid(view.len().max(1) as i64) as usize
            }
            RowFormat::Redundant => view.read_u16(next_field)? as usize,
        };

        // The pointer target must be a readable record origin inside the page.
        view.at(first_record, 1)?;

        Ok(SystemRecords {
            row_format,
            infimum,
            supremum,
            first_record,
        })
    }

    /// Returns true if the infimum links directly to the supremum.
    pub fn is_empty(&self) -> bool {
        self.first_record == self.supremum
    }
}
