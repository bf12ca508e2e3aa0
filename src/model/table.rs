//! Record tables with pagination and free-text filtering
//!
//! Rows are never reordered or removed by paging or filtering. Each row
//! carries one derived visibility flag: the AND of the page window (when the
//! table has been paginated) and the filter match (when a query was applied).
//! The flag is recomputed whenever either predicate changes.

use super::record::RecordRef;

/// Default number of rows per page
pub const PAGE_SIZE: usize = 50;

/// `ceil(rows / page_size)`; zero rows means zero pages
pub fn total_pages(rows: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    rows.div_ceil(page_size)
}

/// Half-open row index range `[start, end)` covered by one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Window for a 1-based page. Page 0 yields an empty window; pages past
    /// the end yield windows that match no rows.
    pub fn for_page(page: usize, page_size: usize) -> Self {
        if page == 0 {
            return Self { start: 0, end: 0 };
        }
        let start = (page - 1).saturating_mul(page_size);
        Self {
            start,
            end: start.saturating_add(page_size),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Navigation strip rendered below a paginated table
///
/// Regenerated on every paginate call; the targets are the page numbers
/// captured at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: usize,
    pub total_pages: usize,
    /// Target page of the Previous control, present only if `current > 1`
    pub previous: Option<usize>,
    /// Target page of the Next control, present only if `current < total_pages`
    pub next: Option<usize>,
}

impl PaginationControls {
    pub fn build(current: usize, total_pages: usize) -> Self {
        Self {
            current,
            total_pages,
            previous: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total_pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageState {
    page: usize,
    page_size: usize,
}

/// One data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub record: RecordRef,
    pub cells: Vec<String>,
    visible: bool,
}

impl Row {
    pub fn new(record: RecordRef, cells: Vec<String>) -> Self {
        Self {
            record,
            cells,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn matches(&self, query: &str) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.to_lowercase().contains(query))
    }
}

/// A table of records: header plus ordered data rows
#[derive(Debug, Clone)]
pub struct Table {
    pub id: String,
    pub title: String,
    pub headers: Vec<String>,
    rows: Vec<Row>,
    paging: Option<PageState>,
    query: Option<String>,
    controls: Option<PaginationControls>,
}

impl Table {
    pub fn new(id: impl Into<String>, title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            headers,
            rows: Vec::new(),
            paging: None,
            query: None,
            controls: None,
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.replace_rows(rows);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Swap in a fresh set of rows, keeping page and filter predicates
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.refresh_visibility();
    }

    /// Show the rows of `page` and regenerate the controls strip
    ///
    /// The page number is not clamped. Total pages are recomputed from the
    /// current row count on every call.
    pub fn paginate(&mut self, page: usize, page_size: usize) -> &PaginationControls {
        self.paging = Some(PageState { page, page_size });
        self.refresh_visibility();
        let total = total_pages(self.rows.len(), page_size);
        self.controls.insert(PaginationControls::build(page, total))
    }

    /// Apply a free-text query; returns the number of matching rows
    pub fn filter(&mut self, query: &str) -> usize {
        let query = query.to_lowercase();
        let matching = self.rows.iter().filter(|r| r.matches(&query)).count();
        self.query = Some(query);
        self.refresh_visibility();
        matching
    }

    pub fn current_page(&self) -> Option<usize> {
        self.paging.map(|p| p.page)
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Controls strip, present once the table has been paginated
    pub fn controls(&self) -> Option<&PaginationControls> {
        self.controls.as_ref()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().filter(|(_, r)| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    fn refresh_visibility(&mut self) {
        let window = self
            .paging
            .map(|p| PageWindow::for_page(p.page, p.page_size));
        let query = self.query.as_deref();
        for (index, row) in self.rows.iter_mut().enumerate() {
            let page_ok = window.map_or(true, |w| w.contains(index));
            let filter_ok = query.map_or(true, |q| row.matches(q));
            row.visible = page_ok && filter_ok;
        }
    }
}
