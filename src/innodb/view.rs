//! Bounds-checked access to the bytes of a single page.
//!
//! A [`ByteView`] borrows exactly one page's extent from a caller-owned
//! buffer. Every read checks `offset + width` against the view length and
//! fails with [`ScanError::OutOfBounds`] instead of reaching into the bytes
//! of a neighbouring page. Multi-byte integers are big-endian and unsigned.

use byteorder::{BigEndian, ByteOrder};

use crate::ScanError;

/// Read-only window over one page.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Wrap a byte slice. The slice length is the view's extent.
    pub fn new(data: &'a [u8]) -> Self {
        ByteView { data }
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the view covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `width` bytes starting at `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::view::ByteView;
    /// use pagescan::ScanError;
    ///
    /// let data = [1u8, 2, 3, 4];
    /// let view = ByteView::new(&data);
    /// assert_eq!(view.at(1, 2).unwrap(), &[2, 3]);
    /// assert!(matches!(view.at(3, 2), Err(ScanError::OutOfBounds { .. })));
    /// ```
    pub fn at(&self, offset: usize, width: usize) -> Result<&'a [u8], ScanError> {
        let end = offset
            .checked_add(width)
            .filter(|&end| end <= self.data.len())
            .ok_or(ScanError::OutOfBounds {
                offset: offset as u64,
                width: width as u64,
                len: self.data.len() as u64,
            })?;
        Ok(&self.data[offset..end])
    }

    /// Read a big-endian `u16` at `offset`.
    pub fn read_u16(&self, offset: usize) -> Result<u16, ScanError> {
        Ok(BigEndian::read_u16(self.at(offset, 2)?))
    }

    /// Read a big-endian `u32` at `offset`.
    pub fn read_u32(&self, offset: usize) -> Result<u32, ScanError> {
        Ok(BigEndian::read_u32(self.at(offset, 4)?))
    }

    /// Read a big-endian `u64` at `offset`.
    pub fn read_u64(&self, offset: usize) -> Result<u64, ScanError> {
        Ok(BigEndian::read_u64(self.at(offset, 8)?))
    }

    /// Read a big-endian `i16` at `offset` (relative record pointers).
    pub fn read_i16(&self, offset: usize) -> Result<i16, ScanError> {
        Ok(BigEndian::read_i16(self.at(offset, 2)?))
    }
}
