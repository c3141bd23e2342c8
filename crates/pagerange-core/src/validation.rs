//! PDF file checks and summary
//!
//! Cheap predicates for accepting a file (by name or magic bytes)
//! plus a summary built from a full parse.

use serde::Serialize;

use crate::document::PaginatedDocument;
use crate::error::{DocumentError, PageRangeError};
use crate::pdf::PdfDocument;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Summary of a PDF, as shown before choosing pages
#[derive(Debug, Clone, Serialize)]
pub struct PdfSummary {
    /// Number of pages in the document
    pub page_count: u32,
    /// PDF version string (e.g., "1.7")
    pub version: String,
    /// Whether the document is encrypted
    pub encrypted: bool,
    /// File size in bytes
    pub size_bytes: usize,
    /// Effective rotation of each page in degrees, in page order
    pub rotations: Vec<u16>,
}

/// `true` when the file name ends in `.pdf` (any case).
pub fn has_pdf_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case("pdf"))
}

/// `true` when the bytes start with the `%PDF-` header.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.len() >= 8 && bytes.starts_with(PDF_MAGIC)
}

/// Version from the `%PDF-1.7` header line.
fn header_version(bytes: &[u8]) -> String {
    bytes
        .get(PDF_MAGIC.len()..PDF_MAGIC.len() + 3)
        .and_then(|v| std::str::from_utf8(v).ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "1.4".to_string())
}

/// Parse a PDF and summarize it.
pub fn inspect_pdf(bytes: &[u8]) -> Result<PdfSummary, PageRangeError> {
    if !looks_like_pdf(bytes) {
        return Err(DocumentError::Parse("missing %PDF- header".into()).into());
    }

    let doc = PdfDocument::load(bytes)?;
    let page_count = doc.page_count();
    if page_count == 0 {
        return Err(DocumentError::Parse("PDF has no pages".into()).into());
    }

    let rotations = (0..page_count)
        .map(|index| doc.rotation(index).map(|r| r.degrees()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PdfSummary {
        page_count,
        version: header_version(bytes),
        encrypted: doc.is_encrypted(),
        size_bytes: bytes.len(),
        rotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::create_test_pdf;

    #[test]
    fn test_extension_checks() {
        assert!(has_pdf_extension("report.pdf"));
        assert!(has_pdf_extension("REPORT.PDF"));
        assert!(has_pdf_extension("archive.tar.pdf"));
        assert!(!has_pdf_extension("report.pdf.exe"));
        assert!(!has_pdf_extension("pdf"));
        assert!(!has_pdf_extension(".pdf"));
    }

    #[test]
    fn test_magic_bytes() {
        assert!(looks_like_pdf(b"%PDF-1.7\n"));
        assert!(!looks_like_pdf(b"%PDF-"));
        assert!(!looks_like_pdf(b"GIF89a......"));
    }

    #[test]
    fn test_inspect_reports_pages_and_rotation() {
        let summary = inspect_pdf(&create_test_pdf(3, Some(180))).unwrap();
        assert_eq!(summary.page_count, 3);
        assert_eq!(summary.version, "1.7");
        assert!(!summary.encrypted);
        assert_eq!(summary.rotations, vec![180, 180, 180]);
    }

    #[test]
    fn test_inspect_rejects_non_pdf() {
        assert!(inspect_pdf(b"plain text file").is_err());
    }
}
