//! lopdf-backed [`PaginatedDocument`]
//!
//! Page extraction uses whitelisting: clone the document, delete every page
//! that is not kept, then drop objects nothing references any more.

use std::collections::BTreeSet;

use lopdf::{Document, Object, ObjectId};

use crate::document::PaginatedDocument;
use crate::error::DocumentError;
use crate::transform::Rotation;

/// Page tree depth after which rotation inheritance stops looking upward.
const MAX_INHERIT_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct PdfDocument {
    doc: Document,
}

impl PdfDocument {
    /// Parse a PDF held in memory.
    pub fn load(bytes: &[u8]) -> Result<Self, DocumentError> {
        let doc = Document::load_mem(bytes).map_err(|e| DocumentError::Parse(e.to_string()))?;
        tracing::debug!(pages = doc.get_pages().len(), "loaded PDF");
        Ok(Self { doc })
    }

    /// Compress and serialize the document.
    pub fn save(&mut self) -> Result<Vec<u8>, DocumentError> {
        self.doc.compress();

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| DocumentError::Operation(format!("Save failed: {}", e)))?;
        Ok(buffer)
    }

    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Borrow the underlying lopdf document.
    pub fn inner(&self) -> &Document {
        &self.doc
    }

    fn page_id(&self, index: u32) -> Result<ObjectId, DocumentError> {
        self.doc
            .get_pages()
            .get(&(index + 1))
            .copied()
            .ok_or(DocumentError::PageIndex {
                index,
                page_count: self.page_count(),
            })
    }

    /// Read `/Rotate` from the page, falling back to its ancestors in the page tree.
    ///
    /// The value may be an indirect reference to an integer object.
    fn inherited_rotate(&self, page_id: ObjectId) -> Option<i64> {
        let mut current = page_id;
        for _ in 0..MAX_INHERIT_DEPTH {
            let dict = self.doc.get_object(current).ok()?.as_dict().ok()?;
            if let Ok(rotate) = dict.get(b"Rotate") {
                let value = match rotate {
                    Object::Reference(id) => self.doc.get_object(*id).ok()?,
                    direct => direct,
                };
                return match value.as_i64() {
                    Ok(angle) => Some(angle),
                    Err(_) => {
                        tracing::warn!(?page_id, "ignoring /Rotate that is not an integer");
                        None
                    }
                };
            }
            current = dict.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }
}

impl PaginatedDocument for PdfDocument {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn extract_pages(&self, indices: &[u32]) -> Result<Self, DocumentError> {
        let page_count = self.page_count();
        if let Some(&index) = indices.iter().find(|&&index| index >= page_count) {
            return Err(DocumentError::PageIndex { index, page_count });
        }

        let keep: BTreeSet<u32> = indices.iter().map(|index| index + 1).collect();
        let mut doc = self.doc.clone();

        // Delete in reverse so earlier page numbers stay stable
        for page_num in (1..=page_count).rev().filter(|p| !keep.contains(p)) {
            doc.delete_pages(&[page_num]);
        }
        doc.prune_objects();

        tracing::debug!(
            kept = keep.len(),
            from = page_count,
            "extracted pages into new document"
        );
        Ok(Self { doc })
    }

    fn rotation(&self, index: u32) -> Result<Rotation, DocumentError> {
        let page_id = self.page_id(index)?;
        let Some(angle) = self.inherited_rotate(page_id) else {
            return Ok(Rotation::default());
        };

        match i32::try_from(angle).ok().map(Rotation::new) {
            Some(Ok(rotation)) => Ok(rotation),
            Some(Err(_)) => {
                tracing::warn!(index, angle, "ignoring /Rotate that is not a multiple of 90");
                Ok(Rotation::default())
            }
            None => {
                tracing::warn!(index, angle, "ignoring /Rotate outside the i32 range");
                Ok(Rotation::default())
            }
        }
    }

    fn set_rotation(&mut self, index: u32, rotation: Rotation) -> Result<(), DocumentError> {
        let page_id = self.page_id(index)?;
        match self.doc.objects.get_mut(&page_id) {
            Some(Object::Dictionary(ref mut page)) => {
                page.set("Rotate", Object::Integer(rotation.degrees() as i64));
                Ok(())
            }
            _ => Err(DocumentError::Operation(format!(
                "Page {} is not a dictionary",
                index + 1
            ))),
        }
    }
}
