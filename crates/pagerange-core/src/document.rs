//! Document capability used by the split and transform operations
//!
//! The engine never inspects page content. Anything that can report a page
//! count, copy pages into a new document and read/write a page's rotation can
//! be split and rotated.

use crate::error::DocumentError;
use crate::transform::Rotation;

/// A paginated document. Page indices are 0-based throughout this trait.
pub trait PaginatedDocument: Sized {
    fn page_count(&self) -> u32;

    /// Build a new document containing exactly the pages at `indices`.
    ///
    /// `indices` are strictly increasing; pages keep their original relative order.
    fn extract_pages(&self, indices: &[u32]) -> Result<Self, DocumentError>;

    fn rotation(&self, index: u32) -> Result<Rotation, DocumentError>;

    fn set_rotation(&mut self, index: u32, rotation: Rotation) -> Result<(), DocumentError>;
}

/// A page of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPage {
    pub label: String,
    pub rotation: Rotation,
}

/// Document held entirely in memory as a list of labelled pages.
///
/// Useful for driving the engine without a file format, and for tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryDocument {
    pub pages: Vec<MemoryPage>,
}

impl MemoryDocument {
    /// Document with `count` unrotated pages labelled `"1"`, `"2"`, ...
    pub fn with_pages(count: u32) -> Self {
        Self {
            pages: (1..=count)
                .map(|n| MemoryPage {
                    label: n.to_string(),
                    rotation: Rotation::default(),
                })
                .collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.label.as_str()).collect()
    }

    fn page(&self, index: u32) -> Result<&MemoryPage, DocumentError> {
        self.pages
            .get(index as usize)
            .ok_or(DocumentError::PageIndex {
                index,
                page_count: self.page_count(),
            })
    }
}

impl PaginatedDocument for MemoryDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_pages(&self, indices: &[u32]) -> Result<Self, DocumentError> {
        let pages = indices
            .iter()
            .map(|&index| self.page(index).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pages })
    }

    fn rotation(&self, index: u32) -> Result<Rotation, DocumentError> {
        Ok(self.page(index)?.rotation)
    }

    fn set_rotation(&mut self, index: u32, rotation: Rotation) -> Result<(), DocumentError> {
        let page_count = self.page_count();
        let page = self
            .pages
            .get_mut(index as usize)
            .ok_or(DocumentError::PageIndex { index, page_count })?;
        page.rotation = rotation;
        Ok(())
    }
}
