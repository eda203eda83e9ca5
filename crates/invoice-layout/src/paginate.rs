//! Page break calculation
//!
//! Pure functions that decide how many pages a document needs and which rows
//! land on each page. The closing page carries the summary block and may
//! legally hold no rows at all: when the item count sits just above the
//! compact single-page threshold, a trailing row-less page exists solely to
//! host the summary.

use std::ops::Range;

use crate::{LayoutConfig, LayoutError, Result};

/// Number of pages needed to lay out `item_count` rows under `config`.
///
/// Deterministic and monotonically non-decreasing in `item_count`.
pub fn compute_total_pages(item_count: usize, config: &LayoutConfig) -> Result<usize> {
    config.validate()?;

    if item_count <= config.compact_rows {
        return Ok(1);
    }
    if item_count <= config.first_page_rows {
        // Rows fit on the first page but the summary no longer does;
        // a trailing summary-only page is appended.
        return Ok(2);
    }
    if item_count <= config.first_page_rows + config.last_page_rows {
        return Ok(2);
    }

    let remaining = item_count - config.first_page_rows;
    let mut middle = remaining / config.middle_page_rows;
    if remaining % config.middle_page_rows > config.last_page_rows {
        middle += 1;
    }
    Ok(2 + middle)
}

/// Half-open row range `[start, end)` for one page of a document.
///
/// `total_pages` must come from [`compute_total_pages`] for the same
/// `(item_count, config)` pair. The range of the closing page may be empty.
pub fn item_range_for_page(
    page_number: usize,
    item_count: usize,
    total_pages: usize,
    config: &LayoutConfig,
) -> Result<Range<usize>> {
    config.validate()?;
    if page_number == 0 || page_number > total_pages {
        return Err(LayoutError::PageOutOfRange {
            requested: page_number,
            total: total_pages,
        });
    }

    if page_number == 1 {
        let capacity = if total_pages == 1 {
            config.compact_rows
        } else {
            config.first_page_rows
        };
        return Ok(0..item_count.min(capacity));
    }

    let start = config.first_page_rows + (page_number - 2) * config.middle_page_rows;
    let start = start.min(item_count);
    if page_number == total_pages {
        Ok(start..item_count)
    } else {
        Ok(start..(start + config.middle_page_rows).min(item_count))
    }
}

/// One page of a paginated document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    /// First row index on this page (0-based, absolute)
    pub start: usize,
    /// One past the last row index on this page
    pub end: usize,
    /// Whether this page carries the header block
    pub is_first: bool,
    /// Whether this page carries the summary block
    pub is_last: bool,
}

impl Page {
    pub fn item_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn row_count(&self) -> usize {
        self.end - self.start
    }

    /// True for a row-less summary-only page
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered page descriptors for an `(item_count, config)` pair.
///
/// Page ranges are contiguous, non-overlapping, and cover exactly
/// `[0, item_count)`. Recompute by calling [`PaginatedDocument::new`] again
/// whenever the item list or the configuration changes; pages are never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedDocument {
    item_count: usize,
    pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn new(item_count: usize, config: &LayoutConfig) -> Result<Self> {
        let total = compute_total_pages(item_count, config)?;
        let mut pages = Vec::with_capacity(total);
        for number in 1..=total {
            let range = item_range_for_page(number, item_count, total, config)?;
            pages.push(Page {
                number,
                start: range.start,
                end: range.end,
                is_first: number == 1,
                is_last: number == total,
            });
        }
        Ok(Self { item_count, pages })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by its 1-based number
    pub fn page(&self, number: usize) -> Result<&Page> {
        number
            .checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .ok_or(LayoutError::PageOutOfRange {
                requested: number,
                total: self.pages.len(),
            })
    }
}
