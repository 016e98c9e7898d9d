//! State models for the page's decorative widgets.
//!
//! Each model is plain data with the decision logic of one widget; the
//! browser adapter wires it to DOM events.

pub mod accordion;
pub mod carousel;
pub mod chart;
pub mod menu;
pub mod scroll;

pub use accordion::Accordion;
pub use carousel::{AUTO_ROTATE_INTERVAL, Carousel, SlideChange};
pub use chart::chart_reveal_schedule;
pub use menu::MenuState;
pub use scroll::{HeaderStyle, anchor_scroll_target, back_to_top_visible, header_style, is_scroll_anchor};
