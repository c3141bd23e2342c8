//! Page range parsing, validation and application
//!
//! Turns user-entered page text such as `"1-3, 5, 8-10"` into validated page
//! ranges and selections, then maps them onto document operations:
//! - `split`: one sub-document per range, or equal chunks
//! - `transform`: rotate (or otherwise change) only the selected pages
//!
//! Documents are reached through the [`PaginatedDocument`] trait; [`PdfDocument`]
//! implements it with lopdf and [`MemoryDocument`] keeps pages in memory.

pub mod command;
pub mod document;
pub mod error;
pub mod pdf;
pub mod range;
pub mod split;
pub mod transform;
pub mod validate;
pub mod validation;

pub use command::{execute, NamingConfig, PageCommand, ProcessMetrics, ProcessResult};
pub use document::{MemoryDocument, PaginatedDocument};
pub use error::{Bound, DocumentError, PageRangeError, RangeError};
pub use pdf::PdfDocument;
pub use range::{parse_ranges, parse_selection, PageRange, PageSelection};
pub use split::{apply_to_document, extract_selection, generate_equal_split};
pub use transform::{apply_selective_transform, rotate_pages, Rotation};
pub use validate::{validate_ranges, validate_selection};

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, PageRangeError> {
    Ok(PdfDocument::load(bytes)?.page_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::create_test_pdf;

    #[test]
    fn test_get_page_count() {
        assert_eq!(get_page_count(&create_test_pdf(4, None)).unwrap(), 4);
    }

    #[test]
    fn test_get_page_count_rejects_garbage() {
        assert!(get_page_count(b"%PDF-1.7 but nothing else").is_err());
    }
}
