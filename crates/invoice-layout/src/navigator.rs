//! Interactive preview paging
//!
//! Tracks which page of a paginated document is currently shown. `next` and
//! `previous` clamp silently at the document boundaries; `jump` rejects
//! out-of-range targets. Rebinding to a freshly paginated document resets the
//! position to page 1.

use crate::{LayoutError, PaginatedDocument, Result};

#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    pub fn new(document: &PaginatedDocument) -> Self {
        Self {
            current: 1,
            total: document.total_pages(),
        }
    }

    /// 1-based page currently shown
    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total
    }

    /// Advance one page, staying on the last page at the end
    pub fn next(&mut self) -> usize {
        if self.current < self.total {
            self.current += 1;
        }
        self.current
    }

    /// Go back one page, staying on page 1 at the start
    pub fn previous(&mut self) -> usize {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }

    /// Jump directly to `page_number`
    pub fn jump(&mut self, page_number: usize) -> Result<()> {
        if page_number == 0 || page_number > self.total {
            return Err(LayoutError::PageOutOfRange {
                requested: page_number,
                total: self.total,
            });
        }
        self.current = page_number;
        Ok(())
    }

    /// Point at a newly paginated document, back on page 1
    pub fn rebind(&mut self, document: &PaginatedDocument) {
        self.current = 1;
        self.total = document.total_pages();
    }
}
