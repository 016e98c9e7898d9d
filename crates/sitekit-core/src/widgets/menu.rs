//! Mobile navigation toggle.

/// Class toggled on both the menu button and the nav list.
pub const ACTIVE_CLASS: &str = "active";

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// The toggle button was clicked.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// A navigation link was followed.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// A click landed somewhere in the document.
    ///
    /// Clicks outside both the toggle and the menu close it.
    pub fn document_click(&mut self, in_toggle: bool, in_menu: bool) {
        if !in_toggle && !in_menu {
            self.open = false;
        }
    }
}
