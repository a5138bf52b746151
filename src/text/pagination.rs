//! Splitting a token sequence into fixed-capacity pages

use std::ops::Range;

/// Reader grid dimensions, derived from the terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub words_per_line: usize,
    pub lines_per_page: usize,
}

impl Geometry {
    pub fn new(words_per_line: usize, lines_per_page: usize) -> Self {
        Self { words_per_line: words_per_line.max(1), lines_per_page: lines_per_page.max(1) }
    }

    /// Tokens that fit on one page
    pub fn capacity(&self) -> usize {
        self.words_per_line * self.lines_per_page
    }
}

/// Partition `token_count` tokens into contiguous pages of `capacity` tokens.
/// The last page holds the remainder.
pub fn paginate(token_count: usize, capacity: usize) -> Vec<Range<usize>> {
    let capacity = capacity.max(1);
    (0..token_count).step_by(capacity).map(|start| start..(start + capacity).min(token_count)).collect()
}

/// Page list memoized on the inputs that determine it
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    /// `(token_count, capacity)` the pages were computed for
    key: Option<(usize, usize)>,
    pages: Vec<Range<usize>>,
}

impl Pagination {
    /// Recompute pages if the token count or capacity changed.
    /// Returns true if the page list was rebuilt.
    pub fn refresh(&mut self, token_count: usize, capacity: usize) -> bool {
        let key = (token_count, capacity.max(1));
        if self.key == Some(key) {
            return false;
        }
        self.pages = paginate(token_count, capacity);
        self.key = Some(key);
        true
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<Range<usize>> {
        self.pages.get(index).cloned()
    }
}
