use std::collections::BTreeSet;

/// One entry of the pager's page-number list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page metadata for a sequence of `total_items`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    /// 1-based, always within `1..=total_pages`
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// At least 1, even when there are no items
    pub total_pages: usize,
    /// 1-based inclusive item range on the current page, `(0, 0)` when empty
    pub display_range: (usize, usize),
}

impl Pagination {
    /// Computes page metadata, clamping `requested_page` into range.
    ///
    /// A zero `page_size` is a caller bug; release builds treat it as 1.
    #[must_use]
    pub fn new(
        total_items: usize,
        page_size: usize,
        requested_page: usize,
    ) -> Self {
        debug_assert!(page_size >= 1, "page size must be at least 1");
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let current_page = requested_page.clamp(1, total_pages);
        let display_range = if total_items == 0 {
            (0, 0)
        } else {
            (
                (current_page - 1) * page_size + 1,
                current_page.saturating_mul(page_size).min(total_items),
            )
        };
        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            display_range,
        }
    }

    /// Half-open index range of the current page's items
    #[must_use]
    pub const fn item_range(&self) -> std::ops::Range<usize> {
        if self.total_items == 0 {
            return 0..0;
        }
        (self.display_range.0 - 1)..self.display_range.1
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    #[must_use]
    pub fn window(&self) -> Vec<PageMarker> {
        page_window(self.current_page, self.total_pages)
    }

    /// "Showing X to Y of Z"
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {}",
            self.display_range.0, self.display_range.1, self.total_items
        )
    }
}

/// One page of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub pagination: Pagination,
}

/// Slices `items` to the requested 1-based page. Out-of-range pages are
/// clamped, never rejected.
#[must_use]
pub fn paginate<T>(
    items: &[T],
    page_size: usize,
    current_page: usize,
) -> Page<'_, T> {
    let pagination = Pagination::new(items.len(), page_size, current_page);
    Page {
        items: items.get(pagination.item_range()).unwrap_or_default(),
        pagination,
    }
}

/// Page numbers to show in a pager: the first and last page, the current
/// page and its immediate neighbours, with every gap collapsed into a
/// single [`PageMarker::Ellipsis`].
#[must_use]
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    let total_pages = total_pages.max(1);
    let current_page = current_page.clamp(1, total_pages);

    let pages: BTreeSet<usize> = [
        1,
        current_page.saturating_sub(1),
        current_page,
        current_page.saturating_add(1),
        total_pages,
    ]
    .into_iter()
    .filter(|page| (1..=total_pages).contains(page))
    .collect();

    let mut window = Vec::with_capacity(pages.len() * 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        if previous.is_some_and(|prev| page > prev + 1) {
            window.push(PageMarker::Ellipsis);
        }
        window.push(PageMarker::Page(page));
        previous = Some(page);
    }
    window
}
