//! Integration tests for pagescan.
//!
//! These tests construct synthetic InnoDB tablespace files (.ibd) and run the
//! full open/decode pipeline against them.

use byteorder::{BigEndian, ByteOrder};
use std::io::Write;
use tempfile::NamedTempFile;

use pagescan::innodb::constants::*;
use pagescan::innodb::decode::{page_at, Page};
use pagescan::innodb::page_types::PageType;
use pagescan::innodb::record::SystemRecords;
use pagescan::innodb::row_format::RowFormat;
use pagescan::innodb::tablespace::{PageSize, Tablespace};
use pagescan::innodb::view::ByteView;
use pagescan::ScanError;

const PAGE_SIZE: u32 = 16384;
const PS: usize = PAGE_SIZE as usize;

/// Field values for one synthetic page, covering every offset the decoder reads.
#[derive(Clone, Copy)]
struct PageFields {
    page_number: u32,
    prev: u32,
    next: u32,
    page_type: u16,
    n_heap: u16,
    n_recs: u16,
    level: u16,
    index_id: u64,
}

impl PageFields {
    fn index(page_number: u32, prev: u32, next: u32) -> Self {
        PageFields {
            page_number,
            prev,
            next,
            page_type: 17855,
            n_heap: 0x8002,
            n_recs: 0,
            level: 0,
            index_id: 42,
        }
    }

    fn build(&self) -> Vec<u8> {
        let mut page = vec![0u8; PS];
        BigEndian::write_u32(&mut page[FIL_PAGE_OFFSET..], self.page_number);
        BigEndian::write_u32(&mut page[FIL_PAGE_PREV..], self.prev);
        BigEndian::write_u32(&mut page[FIL_PAGE_NEXT..], self.next);
        BigEndian::write_u16(&mut page[FIL_PAGE_TYPE..], self.page_type);
        BigEndian::write_u16(&mut page[PAGE_N_HEAP..], self.n_heap);
        BigEndian::write_u16(&mut page[PAGE_N_RECS..], self.n_recs);
        BigEndian::write_u16(&mut page[PAGE_LEVEL..], self.level);
        BigEndian::write_u64(&mut page[PAGE_INDEX_ID..], self.index_id);
        page
    }
}

/// Build a minimal FSP_HDR page (page 0) with the default page size flags.
fn build_fsp_hdr_page() -> Vec<u8> {
    let mut page = vec![0u8; PS];
    BigEndian::write_u32(&mut page[FIL_PAGE_OFFSET..], 0);
    BigEndian::write_u32(&mut page[FIL_PAGE_PREV..], FIL_NULL);
    BigEndian::write_u32(&mut page[FIL_PAGE_NEXT..], FIL_NULL);
    BigEndian::write_u16(&mut page[FIL_PAGE_TYPE..], 8); // FSP_HDR
    BigEndian::write_u32(&mut page[FSP_SPACE_FLAGS..], 0); // flags=0 => default 16K
    page
}

/// Write a multi-page synthetic tablespace to a temp file.
fn write_tablespace(pages: &[Vec<u8>]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("create temp file");
    for page in pages {
        tmp.write_all(page).expect("write page");
    }
    tmp.flush().expect("flush");
    tmp
}

// ---------- Single page decode ----------

#[test]
fn test_leaf_index_page_fields() {
    let buf = PageFields {
        page_number: 7,
        prev: 0xFFFFFFFF,
        next: 42,
        page_type: 17855,
        n_heap: 0x8007,
        n_recs: 5,
        level: 0,
        index_id: 0x99,
    }
    .build();

    let page = page_at(buf.as_slice(), 0, PageSize::default()).expect("decode");
    match page {
        Page::Index(fil, idx) => {
            assert_eq!(fil.page_number, 7);
            assert_eq!(fil.prev_page, 0xFFFFFFFF);
            assert_eq!(fil.next_page, 42);
            assert_eq!(idx.level, 0);
            assert_eq!(idx.n_recs, 5);
            assert_eq!(idx.index_id, 0x99);
            assert_eq!(idx.row_format, RowFormat::Compact);
        }
        Page::Generic(fil) => panic!("expected INDEX page, got {:?}", fil),
    }
}

#[test]
fn test_sys_page_has_no_index_fields() {
    let fields = PageFields {
        page_type: 6,
        ..PageFields::index(7, FIL_NULL, 42)
    };
    let buf = fields.build();
    let page = page_at(buf.as_slice(), 0, PageSize::default()).expect("decode");
    let Page::Generic(fil) = page else {
        panic!("expected generic page, got {:?}", page);
    };
    assert_eq!(fil.page_type, PageType::Sys);
    assert_eq!(fil.page_number, 7);
    assert_eq!(fil.prev_page, FIL_NULL);
    assert_eq!(fil.next_page, 42);
}

#[test]
fn test_layout_fields_recovered_exactly() {
    let cases = [
        PageFields {
            page_number: 0x0102_0304,
            prev: 0x0A0B_0C0D,
            next: 0xFFFF_FFFE,
            page_type: 17855,
            n_heap: 0x0123,
            n_recs: 0xFFFF,
            level: 0x7FFF,
            index_id: 0xDEAD_BEEF_0000_0001,
        },
        PageFields {
            page_number: 1,
            prev: 0,
            next: 2,
            page_type: 17855,
            n_heap: 0xFFFF,
            n_recs: 1,
            level: 3,
            index_id: 1 << 40,
        },
    ];

    for fields in cases {
        let buf = fields.build();
        let page = page_at(buf.as_slice(), 0, PageSize::default()).unwrap();
        let fil = page.header();
        let idx = page.index_header().expect("INDEX header");
        assert_eq!(fil.page_number, fields.page_number);
        assert_eq!(fil.prev_page, fields.prev);
        assert_eq!(fil.next_page, fields.next);
        assert_eq!(fil.page_type.as_u16(), fields.page_type);
        assert_eq!(idx.row_format, RowFormat::from_flag_word(fields.n_heap));
        assert_eq!(idx.n_heap, fields.n_heap & 0x7FFF);
        assert_eq!(idx.n_recs, fields.n_recs);
        assert_eq!(idx.level, fields.level);
        assert_eq!(idx.index_id, fields.index_id);
    }
}

#[test]
fn test_extent_past_end_of_source() {
    let buf = vec![0u8; PS + 100];
    let err = page_at(buf.as_slice(), 200, PageSize::default()).unwrap_err();
    assert_eq!(
        err,
        ScanError::OutOfBounds {
            offset: 200,
            width: PS as u64,
            len: (PS + 100) as u64,
        }
    );
    assert!(page_at(buf.as_slice(), 100, PageSize::default()).is_ok());
}

// ---------- Tablespace on disk ----------

#[test]
fn test_open_tablespace_detects_page_size() {
    let pages = vec![
        build_fsp_hdr_page(),
        PageFields::index(1, FIL_NULL, 2).build(),
        PageFields::index(2, 1, FIL_NULL).build(),
        vec![0u8; PS],
    ];
    let tmp = write_tablespace(&pages);
    let ts = Tablespace::open(tmp.path()).expect("open tablespace");

    assert_eq!(ts.page_size().get(), PAGE_SIZE);
    assert_eq!(ts.page_count(), 4);
    assert_eq!(ts.file_size(), 4 * PS as u64);
}

#[test]
fn test_iterate_sibling_chain() {
    let pages = vec![
        build_fsp_hdr_page(),
        PageFields::index(1, FIL_NULL, 2).build(),
        PageFields::index(2, 1, 3).build(),
        PageFields::index(3, 2, FIL_NULL).build(),
    ];
    let tmp = write_tablespace(&pages);
    let ts = Tablespace::open(tmp.path()).expect("open tablespace");

    let mut next = ts.page(1).unwrap().header().next();
    let mut chain = vec![1];
    while let Some(n) = next {
        chain.push(n);
        next = ts.page(n as u64).unwrap().header().next();
    }
    assert_eq!(chain, vec![1, 2, 3]);
    assert_eq!(ts.page(3).unwrap().header().prev(), Some(2));
}

#[test]
fn test_unknown_page_type_does_not_stop_scan() {
    let unknown = PageFields {
        page_type: 40000,
        ..PageFields::index(2, FIL_NULL, FIL_NULL)
    };
    let pages = vec![
        build_fsp_hdr_page(),
        PageFields::index(1, FIL_NULL, FIL_NULL).build(),
        unknown.build(),
        PageFields::index(3, FIL_NULL, FIL_NULL).build(),
    ];
    let tmp = write_tablespace(&pages);
    let ts = Tablespace::open(tmp.path()).expect("open tablespace");

    let decoded: Vec<_> = ts.pages().map(|(_, p)| p.expect("decode")).collect();
    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded[2].page_type(), PageType::Unknown(40000));
    assert_eq!(decoded[2].header().page_number, 2);
    assert!(matches!(decoded[3], Page::Index(..)));
}

#[cfg(feature = "cli")]
#[test]
fn test_parallel_decode_matches_sequential() {
    let mut pages = vec![build_fsp_hdr_page()];
    for n in 1..64u32 {
        let fields = PageFields {
            n_recs: n as u16,
            ..PageFields::index(n, n - 1, n + 1)
        };
        pages.push(fields.build());
    }
    let tmp = write_tablespace(&pages);
    let ts = Tablespace::open(tmp.path()).expect("open tablespace");

    let sequential: Vec<_> = ts.pages().collect();
    let parallel = ts.par_pages();
    assert_eq!(parallel, sequential);
    assert_eq!(
        parallel[63].1.as_ref().unwrap().index_header().unwrap().n_recs,
        63
    );
}

#[test]
fn test_open_missing_file() {
    let err = Tablespace::open("/nonexistent/path/t.ibd").err().expect("error");
    assert!(matches!(err, ScanError::Io(_)));
}

#[test]
fn test_8k_tablespace_with_forced_page_size() {
    let mut data = vec![0u8; 3 * 8192];
    for n in 0..3usize {
        let page = &mut data[n * 8192..(n + 1) * 8192];
        BigEndian::write_u32(&mut page[FIL_PAGE_OFFSET..], n as u32);
        BigEndian::write_u16(&mut page[FIL_PAGE_TYPE..], 17855);
        BigEndian::write_u16(&mut page[PAGE_LEVEL..], n as u16);
    }
    let tmp = write_tablespace(&[data]);
    let ts = Tablespace::open_with_page_size(tmp.path(), PageSize::new(8192).unwrap())
        .expect("open tablespace");
    assert_eq!(ts.page_count(), 3);
    let levels: Vec<u16> = ts
        .pages()
        .map(|(_, p)| p.unwrap().index_header().unwrap().level)
        .collect();
    assert_eq!(levels, vec![0, 1, 2]);
}

// ---------- Record layer ----------

#[test]
fn test_locate_system_records_on_decoded_page() {
    let mut buf = PageFields::index(4, FIL_NULL, FIL_NULL).build();
    BigEndian::write_i16(
        &mut buf[PAGE_NEW_INFIMUM - 2..],
        (PAGE_NEW_SUPREMUM - PAGE_NEW_INFIMUM) as i16,
    );
    let view = ByteView::new(&buf);
    let page = page_at(buf.as_slice(), 0, PageSize::default()).unwrap();
    let idx = page.index_header().unwrap();
    let sys = SystemRecords::locate(&view, idx.row_format).unwrap();
    assert_eq!(sys.row_format, RowFormat::Compact);
    assert!(sys.is_empty());
}
