//! Selective per-page transforms
//!
//! A transform runs against a staged copy of the document and is committed only
//! when every selected page succeeded, so a failure never leaves a document
//! half-rotated.

use std::fmt;

use crate::document::PaginatedDocument;
use crate::error::{DocumentError, PageRangeError, RangeError};
use crate::range::PageSelection;
use crate::validate::validate_selection;

/// Page rotation, always one of 0, 90, 180 or 270 degrees clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Rotation(u16);

impl Rotation {
    /// Accepts any multiple of 90, including negative values (`-90` is `270`).
    pub fn new(degrees: i32) -> Result<Self, RangeError> {
        if degrees % 90 != 0 {
            return Err(RangeError::InvalidRotation(degrees));
        }
        Ok(Self(degrees.rem_euclid(360) as u16))
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Add `delta` to this rotation, wrapping at 360.
    pub fn compose(self, delta: Rotation) -> Rotation {
        Rotation((self.0 + delta.0) % 360)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Apply `transform` to exactly the pages in `selection` (1-indexed).
///
/// `transform` receives the document and a 0-indexed page index. The selection
/// is validated against the page count before anything runs.
pub fn apply_selective_transform<D, F>(
    doc: &mut D,
    selection: &PageSelection,
    mut transform: F,
) -> Result<(), PageRangeError>
where
    D: PaginatedDocument + Clone,
    F: FnMut(&mut D, u32) -> Result<(), DocumentError>,
{
    validate_selection(selection, doc.page_count())?;

    let mut staged = doc.clone();
    for index in selection.indices() {
        transform(&mut staged, index)?;
    }
    *doc = staged;

    Ok(())
}

/// Rotate the selected pages by `delta`, adding to any rotation they already have.
pub fn rotate_pages<D>(
    doc: &mut D,
    selection: &PageSelection,
    delta: Rotation,
) -> Result<(), PageRangeError>
where
    D: PaginatedDocument + Clone,
{
    apply_selective_transform(doc, selection, |doc, index| {
        let current = doc.rotation(index)?;
        doc.set_rotation(index, current.compose(delta))
    })
}
