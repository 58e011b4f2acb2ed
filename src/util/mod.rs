//! Shared utilities (offset and hex dump formatting).

pub mod hex;
