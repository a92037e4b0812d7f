//! Page windowing and the page-button model for the pagination bar.
//!
//! Pages are 1-based everywhere. A catalog of any size, including an empty
//! one, has at least one page.

pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const MAX_PAGE_BUTTONS: usize = 5;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// `items[(page-1)*page_size .. page*page_size]`, truncated at the end of
/// the list. Pages past the end give an empty slice.
pub fn visible_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Inclusive range of numbered buttons around `page`. The window shifts
/// near either boundary instead of shrinking.
pub fn page_window(page: usize, total_pages: usize) -> (usize, usize) {
    let total = total_pages.max(1);
    let page = clamp_page(page, total);
    let span = MAX_PAGE_BUTTONS - 1;

    let mut start = page.saturating_sub(2).max(1);
    let end = (start + span).min(total);
    if end - start < span {
        start = end.saturating_sub(span).max(1);
    }
    (start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page { number: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub current: usize,
    pub total_pages: usize,
    pub buttons: Vec<PageButton>,
}

impl PaginationBar {
    pub fn new(page: usize, total_pages: usize) -> Self {
        let total = total_pages.max(1);
        let current = clamp_page(page, total);
        let (start, end) = page_window(current, total);

        let mut buttons = Vec::with_capacity(MAX_PAGE_BUTTONS + 4);
        let numbered = |number: usize| PageButton::Page {
            number,
            active: number == current,
        };

        if start > 1 {
            buttons.push(numbered(1));
        }
        if start > 2 {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.extend((start..=end).map(numbered));
        if end + 1 < total {
            buttons.push(PageButton::Ellipsis);
        }
        if end < total {
            buttons.push(numbered(total));
        }

        Self {
            current,
            total_pages: total,
            buttons,
        }
    }

    /// A single page renders no controls at all.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn previous_enabled(&self) -> bool {
        self.current > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn previous_target(&self) -> Option<usize> {
        self.previous_enabled().then(|| self.current - 1)
    }

    pub fn next_target(&self) -> Option<usize> {
        self.next_enabled().then(|| self.current + 1)
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.buttons
            .iter()
            .filter_map(|button| match button {
                PageButton::Page { number, .. } => Some(*number),
                PageButton::Ellipsis => None,
            })
            .collect()
    }

    pub fn ellipsis_count(&self) -> usize {
        self.buttons
            .iter()
            .filter(|button| matches!(button, PageButton::Ellipsis))
            .count()
    }
}

/// The bar to render, or `None` when there is only one page.
pub fn pagination_bar(page: usize, total_pages: usize) -> Option<PaginationBar> {
    Some(PaginationBar::new(page, total_pages)).filter(PaginationBar::is_visible)
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
