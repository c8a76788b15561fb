//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified.
    pub default_page: u64,
    /// The maximum number of items per page.
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 10,
        }
    }
}

/// One page of a list of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page, at most [PaginationConfig::page_size] of them.
    pub items: Vec<T>,
    /// The 1-based number of this page.
    pub page: u64,
    /// How many pages there are. Always at least one, even for no items.
    pub page_count: u64,
    /// How many items there are across all pages.
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    /// Whether there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Take page `page` of `items`.
///
/// Page numbers start at 1. A page number past the last page gives the last
/// page and zero gives the first.
pub fn paginate<T>(items: Vec<T>, page: u64, config: &PaginationConfig) -> Page<T> {
    let page_size = config.page_size.max(1);
    let total_items = items.len();
    let page_count = (total_items as u64).div_ceil(page_size).max(1);
    let page = page.clamp(1, page_count);

    let start = ((page - 1) * page_size) as usize;
    let items = items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Page {
        items,
        page,
        page_count,
        total_items,
    }
}
