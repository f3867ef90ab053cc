//! Filtered and paginated views over an in-memory item collection.

use std::fmt;
use std::str::FromStr;

use itemdesk_core::item::{Item, ItemStatus};

/// Number of items shown per page.
pub const PAGE_SIZE: usize = 5;

/// Status selector of the filter control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ItemStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ItemStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = itemdesk_core::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Case-insensitive substring match on name or description. A missing
/// description is treated as empty.
pub fn matches_search(item: &Item, term: &str) -> bool {
    let needle = term.to_lowercase();
    item.name.to_lowercase().contains(&needle)
        || item
            .description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&needle)
}

/// Items matching both the search term and the status filter, in input order.
pub fn filter_items(items: &[Item], term: &str, filter: StatusFilter) -> Vec<Item> {
    items
        .iter()
        .filter(|item| matches_search(item, term) && filter.matches(item.status))
        .cloned()
        .collect()
}

/// Number of pages needed for `total_items` (0 when there are none).
pub fn total_pages(total_items: usize) -> usize {
    total_items.div_ceil(PAGE_SIZE)
}

/// One page of a filtered collection plus the numbers the pager displays.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub items: &'a [Item],
    /// 1-based page number.
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based position of the first visible item, 0 when the page is empty.
    pub start_item: usize,
    /// 1-based position of the last visible item.
    pub end_item: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Slice page `page` (1-based) out of `items`. Out-of-range pages are
/// clamped into `1..=max(total_pages, 1)`.
pub fn paginate(items: &[Item], page: usize) -> PageView<'_> {
    let total_items = items.len();
    let total_pages = total_pages(total_items);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * PAGE_SIZE).min(total_items);
    let end = (current_page * PAGE_SIZE).min(total_items);
    let visible = &items[start..end];

    PageView {
        items: visible,
        current_page,
        total_pages,
        start_item: if visible.is_empty() { 0 } else { start + 1 },
        end_item: end,
        total_items,
        has_prev: current_page > 1,
        has_next: total_items > 0 && current_page < total_pages,
    }
}
