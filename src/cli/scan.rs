use std::collections::HashMap;
use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{create_progress_bar, open_tablespace, wprintln};
use crate::innodb::constants::FIL_NULL;
use crate::innodb::decode::Page;
use crate::innodb::index::IndexHeader;
use crate::innodb::page::FilHeader;
use crate::innodb::page_types::PageType;
use crate::innodb::tablespace::Tablespace;
use crate::util::hex::{format_kib, format_offset};
use crate::ScanError;

/// Options for the scan subcommand.
pub struct ScanOptions {
    /// Path to the tablespace file.
    pub file: String,
    /// Decode only this page.
    pub page: Option<u64>,
    /// Skip ALLOCATED pages.
    pub no_empty: bool,
    /// Append a page type frequency table.
    pub summary: bool,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Page size override; auto-detected when `None`.
    pub page_size: Option<u32>,
}

/// JSON-serializable page info.
#[derive(Serialize)]
struct PageJson {
    page_number: u64,
    byte_start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<FilHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<IndexHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Decode every page of a tablespace and print its header fields.
///
/// For each page prints the page number, type, and previous/next sibling
/// links; INDEX pages additionally show the B+Tree level, user record count,
/// index id, and row format. Siblings equal to FIL_NULL print as `None`.
///
/// Pages are decoded in parallel on the rayon pool and printed in order. A
/// page that fails to decode is reported with its byte offset and the scan
/// moves on to the next page. In **single-page mode** (`-p N`) only that page
/// is decoded and an out-of-range page number is an error.
///
/// `--no-empty` skips ALLOCATED pages, `--summary` appends a page type
/// frequency table, and `--json` emits a JSON array instead of text.
pub fn execute(opts: &ScanOptions, writer: &mut dyn Write) -> Result<(), ScanError> {
    let ts = open_tablespace(&opts.file, opts.page_size)?;

    let results = match opts.page {
        Some(page_num) => vec![(page_num, Ok(ts.page(page_num)?))],
        None => ts.par_pages(),
    };

    if opts.json {
        return execute_json(opts, &ts, &results, writer);
    }

    if opts.page.is_none() {
        wprintln!(
            writer,
            "Pages in {} ({} pages, page size {}):",
            opts.file,
            ts.page_count(),
            ts.page_size()
        )?;
        wprintln!(writer, "{}", "-".repeat(50))?;
    }

    let pb = if opts.page.is_none() {
        Some(create_progress_bar(results.len() as u64, "pages"))
    } else {
        None
    };

    let mut type_counts: HashMap<PageType, u64> = HashMap::new();
    let mut failed = 0u64;

    for (page_num, result) in &results {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        let offset = ts.page_offset(*page_num);
        match result {
            Ok(page) => {
                *type_counts.entry(page.page_type()).or_insert(0) += 1;
                if opts.no_empty && page.page_type() == PageType::Allocated {
                    continue;
                }
                print_page(writer, *page_num, offset, page)?;
            }
            Err(e) => {
                failed += 1;
                wprintln!(
                    writer,
                    "{} {} at offset {}: {}",
                    "Page".red(),
                    page_num,
                    format_offset(offset),
                    e
                )?;
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if opts.summary {
        print_summary(writer, &type_counts, failed)?;
    }

    Ok(())
}

/// Execute scan in JSON output mode.
fn execute_json(
    opts: &ScanOptions,
    ts: &Tablespace,
    results: &[(u64, Result<Page, ScanError>)],
    writer: &mut dyn Write,
) -> Result<(), ScanError> {
    let mut pages = Vec::with_capacity(results.len());

    for (page_num, result) in results {
        let byte_start = ts.page_offset(*page_num);
        let entry = match result {
            Ok(page) => {
                if opts.no_empty && page.page_type() == PageType::Allocated {
                    continue;
                }
                PageJson {
                    page_number: *page_num,
                    byte_start,
                    page_type_name: Some(page.page_type().to_string()),
                    header: Some(*page.header()),
                    index: page.index_header().copied(),
                    error: None,
                }
            }
            Err(e) => PageJson {
                page_number: *page_num,
                byte_start,
                page_type_name: None,
                header: None,
                index: None,
                error: Some(e.to_string()),
            },
        };
        pages.push(entry);
    }

    let json = serde_json::to_string_pretty(&pages)
        .map_err(|e| ScanError::Io(format!("JSON serialization error: {}", e)))?;
    wprintln!(writer, "{}", json)?;
    Ok(())
}

fn sibling(page: u32) -> String {
    if page == FIL_NULL {
        "None".to_string()
    } else {
        page.to_string()
    }
}

/// Print the decoded fields of a single page.
fn print_page(writer: &mut dyn Write, page_num: u64, offset: u64, page: &Page) -> Result<(), ScanError> {
    let fil = page.header();
    wprintln!(
        writer,
        "{}",
        format!("Reading page {} at offset {}", page_num, format_kib(offset)).bold()
    )?;
    wprintln!(writer, "\tNumber {}", fil.page_number)?;
    match page {
        Page::Index(_, _) => wprintln!(writer, "\tType {}", fil.page_type.to_string().cyan())?,
        Page::Generic(_) => wprintln!(writer, "\tType {}", fil.page_type)?,
    }
    wprintln!(writer, "\tPrevious {}", sibling(fil.prev_page))?;
    wprintln!(writer, "\tNext {}", sibling(fil.next_page))?;

    if let Page::Index(_, idx) = page {
        wprintln!(writer, "\tLevel {}", idx.level)?;
        wprintln!(writer, "\t# Records {}", idx.n_recs)?;
        wprintln!(writer, "\tIndex Id {}", idx.index_id)?;
        wprintln!(writer, "\tRow format {}", idx.row_format)?;
    }
    Ok(())
}

/// Print the page type frequency table, most common first.
fn print_summary(
    writer: &mut dyn Write,
    type_counts: &HashMap<PageType, u64>,
    failed: u64,
) -> Result<(), ScanError> {
    wprintln!(writer)?;
    wprintln!(writer, "{}", "Page Type Summary".bold())?;
    let mut sorted: Vec<_> = type_counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then(a.0.as_u16().cmp(&b.0.as_u16())));
    for (pt, count) in sorted {
        let label = if *count == 1 { "page" } else { "pages" };
        wprintln!(
            writer,
            "  {:20} {:>6} {:6} {}",
            pt.to_string(),
            count,
            label,
            pt.description()
        )?;
    }
    if failed > 0 {
        let label = format!("{:20}", "UNREADABLE");
        wprintln!(writer, "  {} {:>6} {:6} decode failed", label.red(), failed, "pages")?;
    }
    Ok(())
}
