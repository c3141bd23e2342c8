use std::fmt;

use thiserror::Error;

use crate::range::PageRange;

/// Which bound of a page reference fell outside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// A single page of a selection
    Page,
    /// The first page of a range
    Start,
    /// The last page of a range
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Page => f.write_str("page"),
            Bound::Start => f.write_str("range start"),
            Bound::End => f.write_str("range end"),
        }
    }
}

/// Validation failures. All of these are raised before any document is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("No valid pages found in selection")]
    EmptySelection,

    #[error("{bound} {value} is outside 1-{total_pages}")]
    OutOfRange {
        value: u32,
        total_pages: u32,
        bound: Bound,
    },

    #[error("Range start {start} is greater than end {end}")]
    InvertedRange { start: u32, end: u32 },

    #[error("Ranges {first} and {second} overlap")]
    OverlappingRanges { first: PageRange, second: PageRange },

    #[error("Pages per chunk must be at least 1")]
    ZeroChunkSize,

    #[error("Selection expands to more than {limit} pages")]
    SelectionTooLarge { limit: usize },

    #[error("Rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(i32),
}

/// Failures reported by a document backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Page index {index} does not exist (document has {page_count} pages)")]
    PageIndex { index: u32, page_count: u32 },

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF operation failed: {0}")]
    Operation(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageRangeError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
