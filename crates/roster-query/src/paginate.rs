//! Paginate stage.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of pages for `total` rows; at least 1 even when empty.
pub fn total_pages(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

/// Index range of a 1-based `page`, cut to `total`.
///
/// A page past the end yields an empty range rather than panicking; the
/// caller is expected to have clamped `page` already.
pub fn page_range(page: usize, page_size: NonZeroUsize, total: usize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(total);
    let end = page.saturating_mul(size).min(total);
    start..end
}

/// "Showing X - Y of N" footer data. Bounds are 1-based and inclusive;
/// an empty result reports `0 - 0 of 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl PageSummary {
    pub fn new(range: &Range<usize>, total: usize) -> Self {
        if range.is_empty() {
            Self {
                first: 0,
                last: 0,
                total,
            }
        } else {
            Self {
                first: range.start + 1,
                last: range.end,
                total,
            }
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} - {} of {}", self.first, self.last, self.total)
    }
}
