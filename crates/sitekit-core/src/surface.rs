//! Presentation seams.
//!
//! The controller decides *what* the page shows; a surface decides *how*.
//! The browser adapter implements these traits over `web-sys`, tests use
//! the in-memory surfaces from [`crate::memory`].

use crate::field::FieldId;
use crate::notify::{Notification, NotificationId};

/// Marker class added to an errored field.
pub const ERROR_CLASS: &str = "error";

/// Inline border color of an errored field.
pub const ERROR_BORDER_COLOR: &str = "#EF4444";

/// Inline background color of an errored field.
pub const ERROR_BACKGROUND_COLOR: &str = "#FEF2F2";

/// Visual validity marking of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoration {
    #[default]
    Clean,
    Errored,
}

impl Decoration {
    /// Decoration matching a rule outcome.
    #[must_use]
    pub const fn from_valid(valid: bool) -> Self {
        if valid { Decoration::Clean } else { Decoration::Errored }
    }

    #[must_use]
    pub const fn is_errored(self) -> bool {
        matches!(self, Decoration::Errored)
    }

    /// Inline `border-color`; empty clears the override.
    #[must_use]
    pub const fn border_color(self) -> &'static str {
        match self {
            Decoration::Clean => "",
            Decoration::Errored => ERROR_BORDER_COLOR,
        }
    }

    /// Inline `background-color`; empty clears the override.
    #[must_use]
    pub const fn background_color(self) -> &'static str {
        match self {
            Decoration::Clean => "",
            Decoration::Errored => ERROR_BACKGROUND_COLOR,
        }
    }
}

/// The form as the controller sees it.
///
/// Every method must tolerate a field or control that is missing from the
/// page: lookups return `None`, mutations become no-ops.
pub trait FormSurface {
    /// Current raw value of a field, `None` if the page has no such field.
    fn value(&self, field: FieldId) -> Option<String>;

    /// Applies or clears the error decoration.
    fn decorate(&mut self, field: FieldId, decoration: Decoration);

    /// Decoration currently shown on the field.
    fn decoration(&self, field: FieldId) -> Decoration;

    /// Clears every field value.
    fn reset(&mut self);

    /// Current label of the submit control.
    fn submit_label(&self) -> Option<String>;

    /// Relabels the submit control and sets its disabled state.
    fn set_submit(&mut self, label: &str, disabled: bool);
}

/// Where toasts are rendered.
///
/// `start_exit` and `unmount` may be called for a notification that is no
/// longer present; both must then do nothing.
pub trait NotificationSurface {
    /// Inserts a notification, styled by its kind.
    fn mount(&mut self, notification: &Notification);

    /// Starts the slide-out transition.
    fn start_exit(&mut self, id: NotificationId);

    /// Removes the notification immediately.
    fn unmount(&mut self, id: NotificationId);
}
