//! InnoDB page format decoding.
//!
//! Pages are read through a [`view::ByteView`] scoped to exactly one page.
//! [`decode::page_at`] reads the universal [`page::FilHeader`], classifies the
//! type tag with [`page_types::PageType`], and for INDEX pages also decodes the
//! [`index::IndexHeader`]. The result is a [`decode::Page`] value that callers
//! match on.
//!
//! Start with [`tablespace::Tablespace`] to open a `.ibd` file.

pub mod constants;
pub mod decode;
pub mod index;
pub mod page;
pub mod page_types;
pub mod record;
pub mod row_format;
pub mod source;
pub mod tablespace;
pub mod view;
