//! Random-access byte sources that pages are decoded from.
//!
//! A [`PageSource`] hands out borrowed byte ranges by absolute offset. It is
//! implemented for in-memory slices and vectors, and (with the `cli` feature)
//! for a read-only `memmap2::Mmap` of a tablespace file. Sources have no
//! cursor: every request names its own offset and length, so one source can
//! serve many concurrent decodes.

use crate::ScanError;

/// Read-only, random-access storage holding one or more pages.
pub trait PageSource: Sync {
    /// Total number of bytes available.
    fn len(&self) -> u64;

    /// Returns true if the source holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// Fails with [`ScanError::OutOfBounds`] if the range ends past
    /// [`len`](PageSource::len).
    fn bytes(&self, offset: u64, len: usize) -> Result<&[u8], ScanError>;
}

/// Shared bounds check for slice-backed sources.
fn slice_range(data: &[u8], offset: u64, len: usize) -> Result<&[u8], ScanError> {
    let out_of_bounds = || ScanError::OutOfBounds {
        offset,
        width: len as u64,
        len: data.len() as u64,
    };
    let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(out_of_bounds)?;
    Ok(&data[start..end])
}

impl PageSource for [u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn bytes(&self, offset: u64, len: usize) -> Result<&[u8], ScanError> {
        slice_range(self, offset, len)
    }
}

impl PageSource for Vec<u8> {
    fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    fn bytes(&self, offset: u64, len: usize) -> Result<&[u8], ScanError> {
        slice_range(self, offset, len)
    }
}

#[cfg(feature = "cli")]
impl PageSource for memmap2::Mmap {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn bytes(&self, offset: u64, len: usize) -> Result<&[u8], ScanError> {
        slice_range(self, offset, len)
    }
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn bytes(&self, offset: u64, len: usize) -> Result<&[u8], ScanError> {
        (**self).bytes(offset, len)
    }
}
