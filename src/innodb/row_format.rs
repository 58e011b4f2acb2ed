//! Row format detection for INDEX pages.
//!
//! Bit 15 of the PAGE_N_HEAP field is the only signal used: set means the
//! page stores COMPACT records, clear means REDUNDANT. The remaining 15 bits
//! are the heap record count and do not take part in the decision.

use serde::Serialize;
use std::fmt;

use crate::innodb::constants::PAGE_N_HEAP_COMPACT_FLAG;

/// On-disk record encoding of an INDEX page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RowFormat {
    /// Pre-5.0 layout with 6-byte record headers and absolute next pointers.
    Redundant,
    /// 5-byte record headers, null bitmap, relative next pointers.
    Compact,
}

impl RowFormat {
    /// Classify the row format from the raw PAGE_N_HEAP word.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagescan::innodb::row_format::RowFormat;
    ///
    /// assert_eq!(RowFormat::from_flag_word(0x0000), RowFormat::Redundant);
    /// assert_eq!(RowFormat::from_flag_word(0x8000), RowFormat::Compact);
    /// assert_eq!(RowFormat::from_flag_word(0x7FFF), RowFormat::Redundant);
    /// assert_eq!(RowFormat::from_flag_word(0xFFFF), RowFormat::Compact);
    /// ```
    pub fn from_flag_word(word: u16) -> Self {
        if word & PAGE_N_HEAP_COMPACT_FLAG == 0 {
            RowFormat::Redundant
        } else {
            RowFormat::Compact
        }
    }

    /// Returns the MySQL name of this row format.
    pub fn name(self) -> &'static str {
        match self {
            RowFormat::Redundant => "REDUNDANT",
            RowFormat::Compact => "COMPACT",
        }
    }
}

impl fmt::Display for RowFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_bit_15_matters() {
        for low in [0u16, 1, 2, 0x0100, 0x4000, 0x7FFF] {
            assert_eq!(RowFormat::from_flag_word(low), RowFormat::Redundant);
            assert_eq!(RowFormat::from_flag_word(low | 0x8000), RowFormat::Compact);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(RowFormat::Compact.to_string(), "COMPACT");
        assert_eq!(RowFormat::Redundant.to_string(), "REDUNDANT");
    }
}
