//! Split a document into one sub-document per page range

use crate::document::PaginatedDocument;
use crate::error::{PageRangeError, RangeError};
use crate::range::{PageRange, PageSelection};
use crate::validate::{validate_ranges, validate_selection};

/// Partition `1..=total_pages` into consecutive chunks of `pages_per_chunk` pages.
///
/// The last chunk holds whatever remains.
///
/// # Examples
/// ```
/// use pagerange_core::split::generate_equal_split;
/// use pagerange_core::PageRange;
///
/// let ranges = generate_equal_split(10, 3).unwrap();
/// assert_eq!(
///     ranges,
///     vec![
///         PageRange::new(1, 3),
///         PageRange::new(4, 6),
///         PageRange::new(7, 9),
///         PageRange::new(10, 10),
///     ]
/// );
/// ```
pub fn generate_equal_split(
    total_pages: u32,
    pages_per_chunk: u32,
) -> Result<Vec<PageRange>, RangeError> {
    if pages_per_chunk == 0 {
        return Err(RangeError::ZeroChunkSize);
    }

    let mut ranges = Vec::with_capacity(total_pages.div_ceil(pages_per_chunk) as usize);
    let mut start = 1u32;
    while start <= total_pages {
        let end = start.saturating_add(pages_per_chunk - 1).min(total_pages);
        ranges.push(PageRange::new(start, end));
        match end.checked_add(1) {
            Some(next) => start = next,
            None => break,
        }
    }

    Ok(ranges)
}

/// 0-indexed page lists for each range, in the same order as `ranges`.
///
/// Only call on ranges that passed [`validate_ranges`]: expansion is then
/// bounded by the page count.
pub(crate) fn page_index_lists(ranges: &[PageRange]) -> Vec<Vec<u32>> {
    ranges.iter().map(|range| range.indices().collect()).collect()
}

/// Produce one sub-document per range, in range order.
///
/// All ranges are validated before the first page is copied.
pub fn apply_to_document<D: PaginatedDocument>(
    doc: &D,
    ranges: &[PageRange],
) -> Result<Vec<D>, PageRangeError> {
    validate_ranges(ranges, doc.page_count())?;

    page_index_lists(ranges)
        .iter()
        .map(|indices| doc.extract_pages(indices).map_err(PageRangeError::from))
        .collect()
}

/// Copy the selected pages into a single new document, in page order.
pub fn extract_selection<D: PaginatedDocument>(
    doc: &D,
    selection: &PageSelection,
) -> Result<D, PageRangeError> {
    validate_selection(selection, doc.page_count())?;
    Ok(doc.extract_pages(&selection.indices())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equal_split_with_remainder() {
        assert_eq!(
            generate_equal_split(10, 3).unwrap(),
            vec![
                PageRange::new(1, 3),
                PageRange::new(4, 6),
                PageRange::new(7, 9),
                PageRange::new(10, 10),
            ]
        );
    }

    #[test]
    fn test_equal_split_even() {
        assert_eq!(
            generate_equal_split(6, 2).unwrap(),
            vec![PageRange::new(1, 2), PageRange::new(3, 4), PageRange::new(5, 6)]
        );
    }

    #[test]
    fn test_equal_split_chunk_larger_than_document() {
        assert_eq!(generate_equal_split(4, 10).unwrap(), vec![PageRange::new(1, 4)]);
        assert_eq!(generate_equal_split(4, 4).unwrap(), vec![PageRange::new(1, 4)]);
    }

    #[test]
    fn test_equal_split_every_page() {
        assert_eq!(
            generate_equal_split(3, 1).unwrap(),
            vec![PageRange::single(1), PageRange::single(2), PageRange::single(3)]
        );
    }

    #[test]
    fn test_equal_split_zero_chunk_fails() {
        assert_eq!(generate_equal_split(5, 0), Err(RangeError::ZeroChunkSize));
    }

    #[test]
    fn test_equal_split_empty_document() {
        assert_eq!(generate_equal_split(0, 3).unwrap(), Vec::<PageRange>::new());
    }

    #[test]
    fn test_page_index_lists_are_zero_based() {
        let lists = page_index_lists(&[PageRange::new(3, 5), PageRange::single(1)]);
        assert_eq!(lists, vec![vec![2, 3, 4], vec![0]]);
    }

    #[test]
    fn test_apply_preserves_range_order() {
        let doc = MemoryDocument::with_pages(10);
        let parts =
            apply_to_document(&doc, &[PageRange::new(6, 10), PageRange::new(1, 2)]).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].labels(), vec!["6", "7", "8", "9", "10"]);
        assert_eq!(parts[1].labels(), vec!["1", "2"]);
    }

    #[test]
    fn test_extract_selection_single_document() {
        let doc = MemoryDocument::with_pages(8);
        let selection = PageSelection::from_pages([8, 2, 5]);
        let extracted = extract_selection(&doc, &selection).unwrap();
        assert_eq!(extracted.labels(), vec!["2", "5", "8"]);
    }

    #[test]
    fn test_extract_selection_out_of_range() {
        let doc = MemoryDocument::with_pages(3);
        let selection = PageSelection::from_pages([4]);
        assert!(matches!(
            extract_selection(&doc, &selection),
            Err(PageRangeError::Range(RangeError::OutOfRange { value: 4, .. }))
        ));
    }

    #[test]
    fn test_apply_rejects_overlap_before_copying() {
        let doc = MemoryDocument::with_pages(10);
        let result = apply_to_document(&doc, &[PageRange::new(1, 5), PageRange::new(4, 8)]);
        assert!(matches!(
            result,
            Err(PageRangeError::Range(RangeError::OverlappingRanges { .. }))
        ));
    }

    #[test]
    fn test_apply_rejects_huge_range_before_expanding() {
        let doc = MemoryDocument::with_pages(3);
        let result = apply_to_document(&doc, &[PageRange::new(1, u32::MAX)]);
        assert!(matches!(
            result,
            Err(PageRangeError::Range(RangeError::OutOfRange {
                value: u32::MAX,
                total_pages: 3,
                ..
            }))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::document::MemoryDocument;
    use proptest::prelude::*;

    proptest! {
        /// Property: Equal split covers every page exactly once
        #[test]
        fn equal_split_is_total(total in 1u32..500, per_chunk in 1u32..600) {
            let ranges = generate_equal_split(total, per_chunk).unwrap();
            let pages: Vec<u32> = ranges.iter().flat_map(|r| r.start..=r.end).collect();
            let expected: Vec<u32> = (1..=total).collect();
            prop_assert_eq!(pages, expected);
            prop_assert!(validate_ranges(&ranges, total).is_ok());
            for range in &ranges[..ranges.len() - 1] {
                prop_assert_eq!(range.len(), per_chunk);
            }
        }

        /// Property: Sub-documents come back in input order
        #[test]
        fn output_order_matches_input(total in 1u32..60, per_chunk in 1u32..10, seed in any::<u64>()) {
            let mut ranges = generate_equal_split(total, per_chunk).unwrap();
            let len = ranges.len();
            ranges.rotate_left((seed as usize) % len);

            let doc = MemoryDocument::with_pages(total);
            let parts = apply_to_document(&doc, &ranges).unwrap();
            prop_assert_eq!(parts.len(), ranges.len());
            for (part, range) in parts.iter().zip(&ranges) {
                let first = range.start.to_string();
                prop_assert_eq!(part.labels()[0], first.as_str());
                prop_assert_eq!(part.page_count(), range.len());
            }
        }
    }
}
