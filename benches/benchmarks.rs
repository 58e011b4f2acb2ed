//! Criterion benchmarks for pagescan core operations.
//!
//! Benchmarks cover:
//! - FIL header decoding (FilHeader::decode)
//! - Full page decoding (page_at) for INDEX and generic pages
//! - Whole-tablespace scans, sequential and (with `cli`) parallel

use byteorder::{BigEndian, ByteOrder};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use pagescan::innodb::constants::*;
use pagescan::innodb::decode::page_at;
use pagescan::innodb::page::FilHeader;
use pagescan::innodb::tablespace::{PageSize, Tablespace};
use pagescan::innodb::view::ByteView;

const PS: usize = 16384;

fn build_index_page(page_num: u32) -> Vec<u8> {
    let mut page = vec![0u8; PS];
    BigEndian::write_u32(&mut page[FIL_PAGE_OFFSET..], page_num);
    BigEndian::write_u32(&mut page[FIL_PAGE_PREV..], page_num.wrapping_sub(1));
    BigEndian::write_u32(&mut page[FIL_PAGE_NEXT..], page_num + 1);
    BigEndian::write_u16(&mut page[FIL_PAGE_TYPE..], 17855);
    BigEndian::write_u16(&mut page[PAGE_N_HEAP..], 0x8002);
    BigEndian::write_u16(&mut page[PAGE_N_RECS..], 100);
    BigEndian::write_u64(&mut page[PAGE_INDEX_ID..], 42);
    page
}

/// Page 0 is FSP_HDR, the rest are linked leaf INDEX pages.
fn build_synthetic_tablespace(num_pages: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(num_pages as usize * PS);
    let mut fsp = vec![0u8; PS];
    BigEndian::write_u32(&mut fsp[FIL_PAGE_PREV..], FIL_NULL);
    BigEndian::write_u32(&mut fsp[FIL_PAGE_NEXT..], FIL_NULL);
    BigEndian::write_u16(&mut fsp[FIL_PAGE_TYPE..], 8);
    data.extend_from_slice(&fsp);
    for n in 1..num_pages {
        data.extend_from_slice(&build_index_page(n));
    }
    data
}

fn bench_fil_header_decode(c: &mut Criterion) {
    let page = build_index_page(7);
    c.bench_function("fil_header_decode", |b| {
        b.iter(|| FilHeader::decode(black_box(&ByteView::new(&page))))
    });
}

fn bench_page_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_decode");
    let index = build_index_page(7);
    let mut generic = build_index_page(7);
    BigEndian::write_u16(&mut generic[FIL_PAGE_TYPE..], 6);

    group.bench_function("index", |b| {
        b.iter(|| page_at(black_box(index.as_slice()), 0, PageSize::default()))
    });
    group.bench_function("generic", |b| {
        b.iter(|| page_at(black_box(generic.as_slice()), 0, PageSize::default()))
    });
    group.finish();
}

fn bench_tablespace_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("tablespace_scan");

    for &num_pages in &[16u32, 256, 1024] {
        let data = build_synthetic_tablespace(num_pages);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", num_pages),
            &data,
            |b, data| {
                b.iter(|| {
                    let ts = Tablespace::from_bytes(data.clone()).unwrap();
                    ts.pages().filter(|(_, p)| p.is_ok()).count()
                })
            },
        );

        #[cfg(feature = "cli")]
        group.bench_with_input(BenchmarkId::new("parallel", num_pages), &data, |b, data| {
            b.iter(|| {
                let ts = Tablespace::from_bytes(data.clone()).unwrap();
                ts.par_pages().len()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fil_header_decode,
    bench_page_decode,
    bench_tablespace_scan
);
criterion_main!(benches);
