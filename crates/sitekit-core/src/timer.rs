//! Scheduled callbacks as values.
//!
//! Controllers never own a clock. They return [`Scheduled`] timers and the
//! host arranges for each [`Timer`] to be handed back after its delay. In
//! the browser that is `setTimeout`; headless hosts and tests use
//! [`TimerQueue`], a virtual clock.

use crate::form::SubmitTicket;
use crate::notify::NotificationId;
use std::collections::BTreeMap;
use std::time::Duration;

/// A callback the controller asked to receive later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// The simulated network round-trip of a submission finished.
    SubmitComplete(SubmitTicket),
    /// A notification's display window elapsed.
    NotificationExit(NotificationId),
    /// A notification's exit transition finished.
    NotificationRemove(NotificationId),
}

/// A timer together with its delay from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub timer: Timer,
}

impl Scheduled {
    #[must_use]
    pub const fn after(delay: Duration, timer: Timer) -> Self {
        Self { delay, timer }
    }
}

/// Virtual-time timer queue.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    horizon: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), Timer>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, scheduled: Scheduled) {
        self.seq += 1;
        self.pending
            .insert((self.now + scheduled.delay, self.seq), scheduled.timer);
    }

    pub fn schedule_all(&mut self, scheduled: impl IntoIterator<Item = Scheduled>) {
        for s in scheduled {
            self.schedule(s);
        }
    }

    /// Lets `by` more time pass; timers within it become poppable.
    pub fn advance(&mut self, by: Duration) {
        self.horizon += by;
    }

    /// Pops the earliest timer that is due, moving the clock to it.
    ///
    /// Once nothing more is due the clock moves to the horizon.
    pub fn pop_due(&mut self) -> Option<Timer> {
        let due = self
            .pending
            .first_key_value()
            .is_some_and(|((at, _), _)| *at <= self.horizon);

        if !due {
            self.now = self.horizon;
            return None;
        }

        let ((at, _), timer) = self.pending.pop_first()?;
        self.now = at;
        Some(timer)
    }

    /// Advances by `by`, feeding every due timer to `fire` and scheduling
    /// whatever it returns, until nothing within the window is left.
    pub fn advance_with<F>(&mut self, by: Duration, mut fire: F)
    where
        F: FnMut(Timer) -> Vec<Scheduled>,
    {
        self.advance(by);
        while let Some(timer) = self.pop_due() {
            let follow_ups = fire(timer);
            self.schedule_all(follow_ups);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
