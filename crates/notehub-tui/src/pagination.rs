// ABOUTME: Page selector model for the notes list
// ABOUTME: Pure mapping from (current page, page count) to selectable pages and page-change events

use std::ops::RangeInclusive;

/// Pages shown on each side of the current page before collapsing into a gap
const WINDOW: u32 = 2;

/// One cell of the rendered selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    count: u32,
}

impl Pagination {
    pub fn new(current: u32, count: u32) -> Self {
        let count = count.max(1);
        Self {
            current: current.clamp(1, count),
            count,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// A single page needs no selector
    pub fn is_visible(&self) -> bool {
        self.count > 1
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.count
    }

    /// First and last page, the window around the current page, and gaps between
    pub fn items(&self) -> Vec<PageItem> {
        let low = self.current.saturating_sub(WINDOW).max(1);
        let high = self.current.saturating_add(WINDOW).min(self.count);

        let mut shown: Vec<u32> = vec![1];
        shown.extend(low..=high);
        shown.push(self.count);
        shown.sort_unstable();
        shown.dedup();

        let mut items = Vec::with_capacity(shown.len() + 2);
        let mut prev = 0;
        for page in shown {
            if page > prev + 1 {
                // A gap of exactly one page is cheaper to show than to elide
                if page == prev + 2 {
                    items.push(PageItem::Page(prev + 1));
                } else {
                    items.push(PageItem::Gap);
                }
            }
            items.push(PageItem::Page(page));
            prev = page;
        }
        items
    }

    /// Page-change event for choosing `page`, if it is valid and different
    pub fn select(&self, page: u32) -> Option<u32> {
        (self.pages().contains(&page) && page != self.current).then_some(page)
    }

    pub fn next(&self) -> Option<u32> {
        self.select(self.current.saturating_add(1))
    }

    pub fn prev(&self) -> Option<u32> {
        self.select(self.current.saturating_sub(1))
    }

    pub fn first(&self) -> Option<u32> {
        self.select(1)
    }

    pub fn last(&self) -> Option<u32> {
        self.select(self.count)
    }
}
