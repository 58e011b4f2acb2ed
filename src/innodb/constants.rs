/// InnoDB page layout constants.
///
/// Offsets are absolute, measured from the first byte of a page. Values match
/// the MySQL/InnoDB source headers:
/// - fil0fil.h (FIL header)
/// - page0page.h (index page header, system records)
/// - fsp0fsp.h (FSP header flags)
// Page sizes
pub const SIZE_PAGE_DEFAULT: u32 = 16384;
pub const SIZE_PAGE_4K: u32 = 4096;
pub const SIZE_PAGE_8K: u32 = 8192;
pub const SIZE_PAGE_16K: u32 = 16384;
pub const SIZE_PAGE_32K: u32 = 32768;
pub const SIZE_PAGE_64K: u32 = 65536;

// FIL Header (38 bytes total)
pub const SIZE_FIL_HEAD: usize = 38;
pub const FIL_PAGE_OFFSET: usize = 4; // 4 bytes - page number
pub const FIL_PAGE_PREV: usize = 8; // 4 bytes - previous page
pub const FIL_PAGE_NEXT: usize = 12; // 4 bytes - next page
pub const FIL_PAGE_TYPE: usize = 24; // 2 bytes - page type

// Start of page data (immediately after FIL header)
pub const FIL_PAGE_DATA: usize = 38;

// FSP header flags on page 0 (FIL_PAGE_DATA + 16)
pub const FSP_SPACE_FLAGS: usize = FIL_PAGE_DATA + 16; // 4 bytes
pub const FSP_FLAGS_POS_PAGE_SSIZE: u32 = 6;
pub const FSP_FLAGS_MASK_PAGE_SSIZE: u32 = 0xF << FSP_FLAGS_POS_PAGE_SSIZE;

// Index page header, absolute offsets (PAGE_HEADER = FIL_PAGE_DATA)
pub const PAGE_N_HEAP: usize = FIL_PAGE_DATA + 4; // 2 bytes - bit 15 = compact flag
pub const PAGE_N_RECS: usize = FIL_PAGE_DATA + 16; // 2 bytes - number of user records
pub const PAGE_LEVEL: usize = FIL_PAGE_DATA + 26; // 2 bytes - level in B+tree (0 = leaf)
pub const PAGE_INDEX_ID: usize = FIL_PAGE_DATA + 28; // 8 bytes - index id

/// Bit 15 of PAGE_N_HEAP: set for COMPACT pages, clear for REDUNDANT.
pub const PAGE_N_HEAP_COMPACT_FLAG: u16 = 0x8000;

// Record extra bytes
pub const REC_N_OLD_EXTRA_BYTES: usize = 6;
pub const REC_N_NEW_EXTRA_BYTES: usize = 5;
/// Distance from a record origin back to its next-record field.
pub const REC_NEXT: usize = 2;

// PAGE_DATA = PAGE_HEADER + 36 + 2 * FSEG_HEADER_SIZE = 38 + 36 + 20
pub const PAGE_DATA_OFFSET: usize = 94;

pub const PAGE_NEW_INFIMUM: usize = PAGE_DATA_OFFSET + REC_N_NEW_EXTRA_BYTES; // 99
pub const PAGE_NEW_SUPREMUM: usize = PAGE_DATA_OFFSET + 2 * REC_N_NEW_EXTRA_BYTES + 8; // 112
pub const PAGE_OLD_INFIMUM: usize = PAGE_DATA_OFFSET + 1 + REC_N_OLD_EXTRA_BYTES; // 101
pub const PAGE_OLD_SUPREMUM: usize = PAGE_DATA_OFFSET + 2 + 2 * REC_N_OLD_EXTRA_BYTES + 8; // 116

// Special page number values
pub const FIL_NULL: u32 = 0xFFFFFFFF; // "null" page reference (4294967295)
