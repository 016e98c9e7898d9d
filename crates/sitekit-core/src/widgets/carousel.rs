//! Testimonial carousel.

use std::time::Duration;

/// Delay between automatic slide changes.
pub const AUTO_ROTATE_INTERVAL: Duration = Duration::from_millis(5000);

/// A slide change the page has to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
}

/// Index of the visible slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// A carousel showing its first slide, or `None` without slides.
    #[must_use]
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, current: 0 })
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Jumps to a slide (a dot was clicked).
    ///
    /// Re-selecting the current slide still yields a change so the page
    /// replays the fade-in.
    pub fn go_to(&mut self, index: usize) -> Option<SlideChange> {
        if index >= self.len {
            return None;
        }
        let change = SlideChange {
            from: self.current,
            to: index,
        };
        self.current = index;
        Some(change)
    }

    /// Automatic rotation to the next slide, wrapping around.
    pub fn advance(&mut self) -> SlideChange {
        let next = (self.current + 1) % self.len;
        let change = SlideChange {
            from: self.current,
            to: next,
        };
        self.current = next;
        change
    }
}
