//! FAQ accordion: at most one answer open at a time.

/// Icon class of a closed item.
pub const CHEVRON_DOWN: &str = "fa-chevron-down";

/// Icon class of an open item.
pub const CHEVRON_UP: &str = "fa-chevron-up";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    /// An accordion of `len` items, all closed.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    /// An item was clicked: an open item closes, a closed item opens and
    /// every other item closes. Out-of-range clicks are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.open = if self.open == Some(index) { None } else { Some(index) };
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    #[must_use]
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Chevron class for an item.
    #[must_use]
    pub fn chevron(&self, index: usize) -> &'static str {
        if self.is_open(index) { CHEVRON_UP } else { CHEVRON_DOWN }
    }
}
