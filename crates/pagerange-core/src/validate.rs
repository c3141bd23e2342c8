//! Bounds and overlap checks against a document's page count
//!
//! Both checks stop at the first violation in input order so that the same
//! input always produces the same error.

use crate::error::{Bound, RangeError};
use crate::range::{PageRange, PageSelection};

/// Check that every selected page lies within `1..=total_pages`.
pub fn validate_selection(selection: &PageSelection, total_pages: u32) -> Result<(), RangeError> {
    if selection.is_empty() {
        return Err(RangeError::EmptySelection);
    }

    for &page in selection.pages() {
        if page < 1 || page > total_pages {
            return Err(RangeError::OutOfRange {
                value: page,
                total_pages,
                bound: Bound::Page,
            });
        }
    }

    Ok(())
}

/// Check that each range is in bounds and that no two ranges share a page.
///
/// For each range in order: inverted ranges are rejected first, then the start
/// bound, then the end bound, then overlap with every earlier range.
pub fn validate_ranges(ranges: &[PageRange], total_pages: u32) -> Result<(), RangeError> {
    if ranges.is_empty() {
        return Err(RangeError::EmptySelection);
    }

    for (j, range) in ranges.iter().enumerate() {
        if range.start > range.end {
            return Err(RangeError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.start < 1 || range.start > total_pages {
            return Err(RangeError::OutOfRange {
                value: range.start,
                total_pages,
                bound: Bound::Start,
            });
        }
        if range.end > total_pages {
            return Err(RangeError::OutOfRange {
                value: range.end,
                total_pages,
                bound: Bound::End,
            });
        }

        // O(n^2), range lists are typed by hand
        if let Some(earlier) = ranges[..j].iter().find(|earlier| earlier.overlaps(range)) {
            return Err(RangeError::OverlappingRanges {
                first: *earlier,
                second: *range,
            });
        }
    }

    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Any two ranges sharing a page are reported as overlapping
        #[test]
        fn shared_page_is_overlap(a in 1u32..=50, b in 1u32..=50, c in 1u32..=50, d in 1u32..=50) {
            let first = PageRange::new(a.min(b), a.max(b));
            let second = PageRange::new(c.min(d), c.max(d));
            let shares_page = (first.start..=first.end).any(|p| second.contains(p));
            let result = validate_ranges(&[first, second], 50);
            if shares_page {
                prop_assert_eq!(result, Err(RangeError::OverlappingRanges { first, second }));
            } else {
                prop_assert_eq!(result, Ok(()));
            }
        }
    }
}
