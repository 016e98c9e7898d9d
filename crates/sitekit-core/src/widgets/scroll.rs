//! Scroll-driven behavior: compact header, back-to-top button, anchor
//! offsets and reveal-on-scroll settings.

/// Scroll offset past which the header turns compact.
pub const HEADER_COMPACT_OFFSET: f64 = 50.0;

/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_OFFSET: f64 = 500.0;

/// Gap kept between the fixed header and an anchor target.
pub const ANCHOR_GAP: f64 = 20.0;

/// Classes whose elements are revealed when scrolled into view.
pub const REVEAL_SELECTOR: &str = ".fade-in, .slide-left, .slide-right";

/// Class added to a revealed element.
pub const REVEAL_CLASS: &str = "visible";

/// Visible fraction that counts as "in view".
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Shrinks the viewport bottom so elements reveal slightly later.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Header appearance for a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStyle {
    pub scrolled: bool,
    pub height_px: u32,
}

impl HeaderStyle {
    /// Inline `height` value.
    #[must_use]
    pub fn height(&self) -> String {
        format!("{}px", self.height_px)
    }
}

#[must_use]
pub fn header_style(scroll_y: f64) -> HeaderStyle {
    if scroll_y > HEADER_COMPACT_OFFSET {
        HeaderStyle {
            scrolled: true,
            height_px: 70,
        }
    } else {
        HeaderStyle {
            scrolled: false,
            height_px: 80,
        }
    }
}

#[must_use]
pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_OFFSET
}

/// In-page links (`#section`) scroll smoothly; a bare `#` does not.
#[must_use]
pub fn is_scroll_anchor(href: &str) -> bool {
    href.starts_with('#') && href != "#"
}

/// Document offset to scroll to so the target clears the fixed header.
#[must_use]
pub fn anchor_scroll_target(target_top: f64, page_y_offset: f64, header_height: f64) -> f64 {
    target_top + page_y_offset - header_height - ANCHOR_GAP
}
