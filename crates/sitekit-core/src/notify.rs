//! Transient toast notifications.
//!
//! At most one notification is visible. Showing a new one removes the
//! current one immediately, without its exit transition. Each notification
//! lives for [`DISPLAY_DURATION`], slides out for [`EXIT_DURATION`], then
//! disappears, unless the visitor closes it first.
//!
//! The notification id doubles as an invalidation token: timers carry the
//! id they were scheduled for, and a timer whose id is no longer the active
//! one does nothing. Replacing or dismissing a toast therefore cancels its
//! pending timers without having to reach into the host's clock.

use crate::surface::NotificationSurface;
use crate::timer::{Scheduled, Timer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// How long a notification stays fully visible.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(5000);

/// Length of the slide-out transition before removal.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

/// Identifies one shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Success or error styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Class added next to `notification`.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    #[must_use]
    pub const fn background_color(self) -> &'static str {
        match self {
            NotificationKind::Success => "#10B981",
            NotificationKind::Error => "#EF4444",
        }
    }

    #[must_use]
    pub const fn text_color(self) -> &'static str {
        "white"
    }
}

/// A toast as handed to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveToast {
    id: NotificationId,
    exiting: bool,
}

/// Owns the single active notification.
#[derive(Debug, Default)]
pub struct NotificationPresenter {
    next_id: u64,
    active: Option<ActiveToast>,
}

impl NotificationPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any visible notification with a new one.
    ///
    /// Returns the timer that starts its exit transition.
    pub fn show<N>(&mut self, surface: &mut N, kind: NotificationKind, message: impl Into<String>) -> Scheduled
    where
        N: NotificationSurface + ?Sized,
    {
        if let Some(previous) = self.active.take() {
            debug!(id = previous.id.get(), "replacing visible notification");
            surface.unmount(previous.id);
        }

        self.next_id += 1;
        let notification = Notification {
            id: NotificationId(self.next_id),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        };

        surface.mount(&notification);
        self.active = Some(ActiveToast {
            id: notification.id,
            exiting: false,
        });

        Scheduled::after(DISPLAY_DURATION, Timer::NotificationExit(notification.id))
    }

    /// Closes a notification from its close control.
    ///
    /// Returns false if that notification is already gone.
    pub fn dismiss<N>(&mut self, surface: &mut N, id: NotificationId) -> bool
    where
        N: NotificationSurface + ?Sized,
    {
        if !self.is_active(id) {
            return false;
        }
        self.active = None;
        surface.unmount(id);
        true
    }

    /// Advances the lifecycle of the notification a timer belongs to.
    ///
    /// Timers for replaced or dismissed notifications are ignored, as are
    /// timers that are not notification timers.
    pub fn handle_timer<N>(&mut self, surface: &mut N, timer: Timer) -> Option<Scheduled>
    where
        N: NotificationSurface + ?Sized,
    {
        match timer {
            Timer::NotificationExit(id) if self.is_active(id) => {
                if let Some(active) = self.active.as_mut() {
                    active.exiting = true;
                }
                surface.start_exit(id);
                Some(Scheduled::after(EXIT_DURATION, Timer::NotificationRemove(id)))
            }
            Timer::NotificationRemove(id) if self.is_active(id) => {
                self.active = None;
                surface.unmount(id);
                None
            }
            stale => {
                trace!(?stale, "ignoring timer for inactive notification");
                None
            }
        }
    }

    /// Id of the visible notification, if any.
    #[must_use]
    pub fn active(&self) -> Option<NotificationId> {
        self.active.map(|a| a.id)
    }

    /// Returns true once the visible notification started sliding out.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.active.is_some_and(|a| a.exiting)
    }

    fn is_active(&self, id: NotificationId) -> bool {
        self.active.is_some_and(|a| a.id == id)
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::NotificationId;

    pub(crate) fn id(n: u64) -> NotificationId {
        NotificationId(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryToasts;
    use crate::timer::TimerQueue;

    fn drive(queue: &mut TimerQueue, presenter: &mut NotificationPresenter, toasts: &mut MemoryToasts, by: Duration) {
        queue.advance_with(by, |timer| presenter.handle_timer(toasts, timer).into_iter().collect());
    }

    #[test]
    fn show_twice_leaves_one_with_second_message() {
        let mut presenter = NotificationPresenter::new();
        let mut toasts = MemoryToasts::default();

        presenter.show(&mut toasts, NotificationKind::Error, "first");
        presenter.show(&mut toasts, NotificationKind::Success, "second");

        assert_eq!(toasts.len(), 1);
        let visible = toasts.visible().next().unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.kind, NotificationKind::Success);
    }

    #[test]
    fn auto_dismiss_after_display_and_exit() {
        let mut presenter = NotificationPresenter::new();
        let mut toasts = MemoryToasts::default();
        let mut queue = TimerQueue::new();

        queue.schedule(presenter.show(&mut toasts, NotificationKind::Success, "saved"));

        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_millis(4999));
        assert_eq!(toasts.len(), 1);
        assert!(!presenter.is_exiting());

        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_millis(1));
        assert!(presenter.is_exiting());
        assert!(toasts.is_exiting(presenter.active().unwrap()));

        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_millis(300));
        assert!(toasts.is_empty());
        assert_eq!(presenter.active(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn manual_dismiss_makes_pending_timers_no_ops() {
        let mut presenter = NotificationPresenter::new();
        let mut toasts = MemoryToasts::default();
        let mut queue = TimerQueue::new();

        queue.schedule(presenter.show(&mut toasts, NotificationKind::Error, "oops"));
        let id = presenter.active().unwrap();

        assert!(presenter.dismiss(&mut toasts, id));
        assert!(!presenter.dismiss(&mut toasts, id));

        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_secs(10));
        assert!(toasts.is_empty());
        assert_eq!(toasts.unmount_count(), 1);
    }

    #[test]
    fn replaced_notification_timers_do_not_touch_the_new_one() {
        let mut presenter = NotificationPresenter::new();
        let mut toasts = MemoryToasts::default();
        let mut queue = TimerQueue::new();

        queue.schedule(presenter.show(&mut toasts, NotificationKind::Error, "first"));
        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_millis(3000));
        queue.schedule(presenter.show(&mut toasts, NotificationKind::Error, "second"));

        // The first toast's exit timer fires at 5000ms; the second survives it.
        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_millis(2500));
        assert_eq!(toasts.len(), 1);
        assert!(!presenter.is_exiting());

        drive(&mut queue, &mut presenter, &mut toasts, Duration::from_millis(2800));
        assert!(toasts.is_empty());
    }

    #[test]
    fn kind_styling() {
        assert_eq!(NotificationKind::Success.css_class(), "success");
        assert_eq!(NotificationKind::Success.background_color(), "#10B981");
        assert_eq!(NotificationKind::Error.background_color(), "#EF4444");
    }
}
