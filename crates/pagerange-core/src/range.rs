//! Page range and page selection values
//!
//! Parses user-entered page lists such as `"1-3, 5, 8-10"`. Tokens are
//! comma-separated; each is a single page (`5`) or an inclusive span (`1-3`).
//! Tokens that cannot be read are skipped rather than failing the whole input.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::RangeError;

/// Upper bound on the number of pages a single selection may expand to.
pub const MAX_SELECTION_PAGES: usize = 100_000;

/// Inclusive, 1-indexed page interval.
///
/// Fields are unchecked until passed through [`crate::validate::validate_ranges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn single(page: u32) -> Self {
        Self::new(page, page)
    }

    /// Number of pages covered, zero for an inverted range.
    pub fn len(&self) -> u32 {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, page: u32) -> bool {
        self.start <= page && page <= self.end
    }

    /// Two ranges overlap when they share at least one page.
    pub fn overlaps(&self, other: &PageRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// 0-indexed page indices covered by this range.
    ///
    /// Only meaningful for a validated range (`start >= 1`).
    pub fn indices(&self) -> RangeInclusive<u32> {
        self.start.saturating_sub(1)..=self.end.saturating_sub(1)
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Sorted set of distinct 1-indexed page numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PageSelection {
    pages: Vec<u32>,
}

impl PageSelection {
    /// Build a selection from arbitrary page numbers, dropping duplicates and sorting.
    pub fn from_pages<I: IntoIterator<Item = u32>>(pages: I) -> Self {
        let set: BTreeSet<u32> = pages.into_iter().collect();
        Self {
            pages: set.into_iter().collect(),
        }
    }

    /// Every page of a document with `total_pages` pages.
    pub fn all(total_pages: u32) -> Self {
        Self {
            pages: (1..=total_pages).collect(),
        }
    }

    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// 0-indexed page indices, ascending.
    pub fn indices(&self) -> Vec<u32> {
        self.pages.iter().filter_map(|p| p.checked_sub(1)).collect()
    }

    /// Collapse the selection into maximal contiguous ranges.
    pub fn to_ranges(&self) -> Vec<PageRange> {
        let mut ranges: Vec<PageRange> = Vec::new();
        for &page in &self.pages {
            match ranges.last_mut() {
                Some(last) if last.end.checked_add(1) == Some(page) => last.end = page,
                _ => ranges.push(PageRange::single(page)),
            }
        }
        ranges
    }
}

impl fmt::Display for PageSelection {
    /// Canonical form, e.g. `1, 3, 5-7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.to_ranges().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

enum Token {
    Page(u32),
    Span(u32, u32),
}

fn parse_token(part: &str) -> Option<Token> {
    match part.split_once('-') {
        Some((start, end)) => {
            let start = start.trim().parse().ok()?;
            let end = end.trim().parse().ok()?;
            Some(Token::Span(start, end))
        }
        None => part.parse().ok().map(Token::Page),
    }
}

fn tokens(input: &str) -> impl Iterator<Item = Token> + '_ {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(parse_token)
}

/// Parse a page list like `"1-3, 5, 8-10"` into a sorted, deduplicated selection.
///
/// Unreadable tokens and inverted spans (`5-3`) are skipped. Page `0` is kept
/// so that validation can report it.
///
/// # Examples
/// ```
/// use pagerange_core::range::parse_selection;
///
/// let selection = parse_selection("1, 3, 5-7").unwrap();
/// assert_eq!(selection.pages(), &[1, 3, 5, 6, 7]);
/// assert_eq!(selection.to_string(), "1, 3, 5-7");
/// ```
pub fn parse_selection(input: &str) -> Result<PageSelection, RangeError> {
    let mut pages = BTreeSet::new();

    for token in tokens(input) {
        let (start, end) = match token {
            Token::Page(page) => (page, page),
            Token::Span(start, end) if start <= end => (start, end),
            Token::Span(..) => continue,
        };

        if (end - start) as usize >= MAX_SELECTION_PAGES {
            return Err(RangeError::SelectionTooLarge {
                limit: MAX_SELECTION_PAGES,
            });
        }
        pages.extend(start..=end);
        if pages.len() > MAX_SELECTION_PAGES {
            return Err(RangeError::SelectionTooLarge {
                limit: MAX_SELECTION_PAGES,
            });
        }
    }

    if pages.is_empty() {
        return Err(RangeError::EmptySelection);
    }

    Ok(PageSelection {
        pages: pages.into_iter().collect(),
    })
}

/// Parse a range list like `"1-5, 6-10"`, keeping each range as written and in order.
///
/// Uses the same leniency as [`parse_selection`]: unreadable tokens and
/// inverted spans are skipped.
pub fn parse_ranges(input: &str) -> Result<Vec<PageRange>, RangeError> {
    let ranges: Vec<PageRange> = tokens(input)
        .filter_map(|token| match token {
            Token::Page(page) => Some(PageRange::single(page)),
            Token::Span(start, end) if start <= end => Some(PageRange::new(start, end)),
            Token::Span(..) => None,
        })
        .collect();

    if ranges.is_empty() {
        return Err(RangeError::EmptySelection);
    }

    Ok(ranges)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Result is always sorted and free of duplicates
        #[test]
        fn result_is_strictly_increasing(range in "[0-9, -]{0,40}") {
            if let Ok(selection) = parse_selection(&range) {
                for pair in selection.pages().windows(2) {
                    prop_assert!(pair[0] < pair[1], "{:?} not strictly increasing", selection);
                }
            }
        }

        /// Property: Reparsing the canonical form gives the same selection
        #[test]
        fn parsing_is_stable(range in "[0-9, -]{0,40}") {
            if let Ok(first) = parse_selection(&range) {
                let second = parse_selection(&first.to_string()).unwrap();
                prop_assert_eq!(first, second);
            }
        }

        /// Property: Order of tokens in input doesn't affect output
        #[test]
        fn order_independent(a in 1u32..=50, b in 1u32..=50, c in 1u32..=50) {
            let r1 = parse_selection(&format!("{}, {}, {}", a, b, c)).unwrap();
            let r2 = parse_selection(&format!("{}, {}, {}", c, a, b)).unwrap();
            prop_assert_eq!(r1, r2);
        }

        /// Property: Full span produces every page
        #[test]
        fn full_span_produces_all(total in 1u32..200) {
            let selection = parse_selection(&format!("1-{}", total)).unwrap();
            prop_assert_eq!(selection, PageSelection::all(total));
        }
    }
}
