//! The contact-form controller.
//!
//! `ContactForm` owns all mutable state of one form instance: the submission
//! in flight and the notification presenter. It reads values and renders
//! decorations only through a [`FormSurface`], and toasts only through a
//! [`NotificationSurface`].

use crate::field::FieldId;
use crate::notify::{NotificationId, NotificationKind, NotificationPresenter};
use crate::surface::{Decoration, FormSurface, NotificationSurface};
use crate::timer::{Scheduled, Timer};
use crate::validation::{FieldError, ValidationResult};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Simulated network round-trip of a submission.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Submit label while a submission is in flight.
pub const SENDING_LABEL: &str = "Sending...";

/// Toast shown once a submission completes.
pub const SUCCESS_MESSAGE: &str =
    "Thank you for your message! We will get back to you within 24 hours.";

/// Identifies one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmitTicket(u64);

#[derive(Debug)]
struct InFlight {
    ticket: SubmitTicket,
    original_label: String,
}

/// What a submit attempt did.
#[derive(Debug)]
pub enum Submission {
    /// A submission is already in flight; nothing changed.
    Ignored,
    /// At least one field failed. The first failure was shown as a toast.
    Rejected {
        validation: ValidationResult,
        timers: Vec<Scheduled>,
    },
    /// Every field passed; the submit control is disabled until the
    /// returned `SubmitComplete` timer fires.
    Sending {
        ticket: SubmitTicket,
        timers: Vec<Scheduled>,
    },
}

impl Submission {
    /// Timers the host has to schedule.
    #[must_use]
    pub fn into_timers(self) -> Vec<Scheduled> {
        match self {
            Submission::Ignored => Vec::new(),
            Submission::Rejected { timers, .. } | Submission::Sending { timers, .. } => timers,
        }
    }
}

/// Controller for a single contact form on a page.
#[derive(Debug, Default)]
pub struct ContactForm {
    next_ticket: u64,
    in_flight: Option<InFlight>,
    notifications: NotificationPresenter,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates one field by its DOM identifier and updates its decoration.
    ///
    /// Identifiers outside the contact-form field set are always valid.
    pub fn validate_field<F>(&self, form: &mut F, field_id: &str) -> bool
    where
        F: FormSurface + ?Sized,
    {
        match FieldId::from_str(field_id) {
            Ok(field) => check_field(form, field),
            Err(_) => true,
        }
    }

    /// Focus left a field.
    pub fn on_blur<F>(&self, form: &mut F, field_id: &str) -> bool
    where
        F: FormSurface + ?Sized,
    {
        self.validate_field(form, field_id)
    }

    /// A field's value changed.
    ///
    /// Pristine fields are left alone; a field already marked as errored is
    /// re-validated so the marking clears as soon as the input is fixed.
    /// Returns `None` when no validation ran.
    pub fn on_input<F>(&self, form: &mut F, field_id: &str) -> Option<bool>
    where
        F: FormSurface + ?Sized,
    {
        let field = FieldId::from_str(field_id).ok()?;
        form.decoration(field)
            .is_errored()
            .then(|| check_field(form, field))
    }

    /// Validates every field in declaration order, decorating each one.
    pub fn validate_form<F>(&self, form: &mut F) -> ValidationResult
    where
        F: FormSurface + ?Sized,
    {
        let errors = FieldId::ALL
            .into_iter()
            .filter(|field| !check_field(form, *field))
            .map(FieldError::for_field)
            .collect();

        ValidationResult::from_errors(errors)
    }

    /// Handles a submit attempt.
    ///
    /// The browser's own submission is always suppressed by the host; this
    /// only decides between rejecting with a toast and starting the
    /// simulated send.
    pub fn submit<F, N>(&mut self, form: &mut F, toasts: &mut N) -> Submission
    where
        F: FormSurface + ?Sized,
        N: NotificationSurface + ?Sized,
    {
        if self.in_flight.is_some() {
            debug!("submit ignored while a submission is in flight");
            return Submission::Ignored;
        }

        let validation = self.validate_form(form);
        if let Some(message) = validation.first_message() {
            debug!(failed = validation.errors.len(), "contact form rejected");
            let exit = self
                .notifications
                .show(toasts, NotificationKind::Error, message);
            return Submission::Rejected {
                validation,
                timers: vec![exit],
            };
        }

        self.next_ticket += 1;
        let ticket = SubmitTicket(self.next_ticket);
        let original_label = form.submit_label().unwrap_or_default();
        form.set_submit(SENDING_LABEL, true);
        self.in_flight = Some(InFlight {
            ticket,
            original_label,
        });

        info!("contact form accepted, sending");
        Submission::Sending {
            ticket,
            timers: vec![Scheduled::after(SUBMIT_DELAY, Timer::SubmitComplete(ticket))],
        }
    }

    /// Hands a previously scheduled timer back to the controller.
    ///
    /// Returns follow-up timers to schedule.
    pub fn fire<F, N>(&mut self, form: &mut F, toasts: &mut N, timer: Timer) -> Vec<Scheduled>
    where
        F: FormSurface + ?Sized,
        N: NotificationSurface + ?Sized,
    {
        match timer {
            Timer::SubmitComplete(ticket) => self.complete(form, toasts, ticket),
            other => self
                .notifications
                .handle_timer(toasts, other)
                .into_iter()
                .collect(),
        }
    }

    /// The visitor clicked the close control of a notification.
    pub fn dismiss_notification<N>(&mut self, toasts: &mut N, id: NotificationId) -> bool
    where
        N: NotificationSurface + ?Sized,
    {
        self.notifications.dismiss(toasts, id)
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationPresenter {
        &self.notifications
    }

    fn complete<F, N>(&mut self, form: &mut F, toasts: &mut N, ticket: SubmitTicket) -> Vec<Scheduled>
    where
        F: FormSurface + ?Sized,
        N: NotificationSurface + ?Sized,
    {
        let Some(in_flight) = self.in_flight.take_if(|f| f.ticket == ticket) else {
            debug!(?ticket, "stale submission timer");
            return Vec::new();
        };

        let exit = self
            .notifications
            .show(toasts, NotificationKind::Success, SUCCESS_MESSAGE);
        form.reset();
        form.set_submit(&in_flight.original_label, false);
        info!("contact form submission completed");

        vec![exit]
    }
}

/// Applies a field's rule to its current value and decorates it.
///
/// A field missing from the page reads as empty; its decoration is then a
/// no-op on the surface.
fn check_field<F>(form: &mut F, field: FieldId) -> bool
where
    F: FormSurface + ?Sized,
{
    let value = form.value(field).unwrap_or_default();
    let valid = field.accepts(&value);
    form.decorate(field, Decoration::from_valid(valid));
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryForm, MemoryToasts};
    use crate::timer::TimerQueue;

    fn filled_form() -> MemoryForm {
        let mut form = MemoryForm::new("Send Message");
        form.set_value(FieldId::Name, "Priya Raman");
        form.set_value(FieldId::Email, "priya@example.com");
        form.set_value(FieldId::Phone, "123-456-7890");
        form.set_value(FieldId::Service, "wealth-advisory");
        form.set_value(FieldId::Message, "Please call me about portfolio reviews.");
        form
    }

    #[test]
    fn validate_field_decorates_and_clears() {
        let controller = ContactForm::new();
        let mut form = MemoryForm::new("Send");

        form.set_value(FieldId::Name, "A");
        assert!(!controller.validate_field(&mut form, "name"));
        assert_eq!(form.decoration(FieldId::Name), Decoration::Errored);

        form.set_value(FieldId::Name, "Al");
        assert!(controller.validate_field(&mut form, "name"));
        assert_eq!(form.decoration(FieldId::Name), Decoration::Clean);
    }

    #[test]
    fn unknown_field_is_valid() {
        let controller = ContactForm::new();
        let mut form = MemoryForm::new("Send");
        assert!(controller.validate_field(&mut form, "company"));
        assert!(controller.on_input(&mut form, "company").is_none());
    }

    #[test]
    fn input_only_revalidates_errored_fields() {
        let controller = ContactForm::new();
        let mut form = MemoryForm::new("Send");

        form.set_value(FieldId::Email, "pri");
        assert_eq!(controller.on_input(&mut form, "email"), None);
        assert_eq!(form.decoration(FieldId::Email), Decoration::Clean);

        assert!(!controller.on_blur(&mut form, "email"));
        form.set_value(FieldId::Email, "priya@example.com");
        assert_eq!(controller.on_input(&mut form, "email"), Some(true));
        assert_eq!(form.decoration(FieldId::Email), Decoration::Clean);
    }

    #[test]
    fn rejected_submit_shows_first_error_only() {
        let mut controller = ContactForm::new();
        let mut form = filled_form();
        let mut toasts = MemoryToasts::default();
        form.set_value(FieldId::Phone, "12345");
        form.set_value(FieldId::Message, "hi");

        let submission = controller.submit(&mut form, &mut toasts);
        let Submission::Rejected { validation, .. } = submission else {
            panic!("expected rejection");
        };

        assert_eq!(validation.errors.len(), 2);
        assert_eq!(toasts.len(), 1);
        let toast = toasts.visible().next().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Please enter a valid phone number");
        assert!(form.decoration(FieldId::Phone).is_errored());
        assert!(form.decoration(FieldId::Message).is_errored());
        assert!(!form.decoration(FieldId::Name).is_errored());
        assert!(!form.is_submit_disabled());
    }

    #[test]
    fn accepted_submit_round_trip() {
        let mut controller = ContactForm::new();
        let mut form = filled_form();
        let mut toasts = MemoryToasts::default();
        let mut queue = TimerQueue::new();

        let submission = controller.submit(&mut form, &mut toasts);
        assert!(matches!(submission, Submission::Sending { .. }));
        queue.schedule_all(submission.into_timers());

        assert!(form.is_submit_disabled());
        assert_eq!(form.submit_label().as_deref(), Some(SENDING_LABEL));
        assert!(toasts.is_empty());

        queue.advance_with(Duration::from_millis(1499), |t| {
            controller.fire(&mut form, &mut toasts, t)
        });
        assert!(controller.is_submitting());
        assert!(toasts.is_empty());

        queue.advance_with(Duration::from_millis(1), |t| {
            controller.fire(&mut form, &mut toasts, t)
        });
        assert!(!controller.is_submitting());
        assert_eq!(toasts.visible().next().unwrap().message, SUCCESS_MESSAGE);
        assert_eq!(form.value(FieldId::Name).as_deref(), Some(""));
        assert_eq!(form.submit_label().as_deref(), Some("Send Message"));
        assert!(!form.is_submit_disabled());
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let mut controller = ContactForm::new();
        let mut form = filled_form();
        let mut toasts = MemoryToasts::default();

        let first = controller.submit(&mut form, &mut toasts);
        assert!(matches!(first, Submission::Sending { .. }));
        assert!(matches!(controller.submit(&mut form, &mut toasts), Submission::Ignored));
    }

    #[test]
    fn stale_ticket_is_a_no_op() {
        let mut controller = ContactForm::new();
        let mut form = filled_form();
        let mut toasts = MemoryToasts::default();

        let Submission::Sending { ticket, .. } = controller.submit(&mut form, &mut toasts) else {
            panic!("expected sending");
        };
        assert!(!controller.fire(&mut form, &mut toasts, Timer::SubmitComplete(ticket)).is_empty());
        assert!(controller.fire(&mut form, &mut toasts, Timer::SubmitComplete(ticket)).is_empty());
        assert_eq!(toasts.mount_count(), 1);
    }

    #[test]
    fn missing_field_reads_as_empty() {
        let controller = ContactForm::new();
        let mut form = filled_form();
        form.remove_field(FieldId::Service);

        let result = controller.validate_form(&mut form);
        assert!(!result.overall_valid);
        assert_eq!(result.first_message(), Some("Please select a service"));
    }
}
