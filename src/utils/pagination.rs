use serde::Serialize;
use std::num::IntErrorKind;

/// Posts shown per list page.
pub const POSTS_PER_PAGE: u64 = 3;

/// Position of one page within a result set of `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl PageWindow {
    /// Resolve a raw `page` query value against `count` items.
    ///
    /// A missing or non-integer value serves the first page. An integer outside
    /// `1..=num_pages` serves the last page. There is always at least one page.
    pub fn resolve(raw: Option<&str>, count: u64, per_page: u64) -> Self {
        let num_pages = if count == 0 {
            1
        } else {
            count.div_ceil(per_page)
        };

        let number = match raw.map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) if n >= 1 && (n as u64) <= num_pages => n as u64,
            Some(Ok(_)) => num_pages,
            // Still an integer, just one no page can reach.
            Some(Err(e))
                if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
            {
                num_pages
            }
            _ => 1,
        };

        Self {
            number,
            num_pages,
            count,
            per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
            previous_page_number: self.has_previous().then(|| self.number - 1),
            next_page_number: self.has_next().then(|| self.number + 1),
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
    pub items: Vec<T>,
}
