use serde::Serialize;

/// Default number of results per page on the explore grid
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One page of a result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
}

/// Slice a result list into a 1-based page
///
/// A page of 0 is treated as the first page and a page size of 0 as 1.
/// Pages past the end come back empty with the totals intact.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_results = items.len();
    let total_pages = total_results.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        total_pages,
        total_results,
    }
}
