//! End-to-end behaviour of the contact form against in-memory surfaces.

use sitekit_core::memory::{MemoryForm, MemoryToasts};
use sitekit_core::notify::{DISPLAY_DURATION, EXIT_DURATION};
use sitekit_core::{
    ContactForm, Decoration, FieldId, FormSurface, FormValues, NotificationKind, SENDING_LABEL,
    SUBMIT_DELAY, SUCCESS_MESSAGE, Submission, TimerQueue, validate_values,
};
use std::time::Duration;

struct Page {
    form: MemoryForm,
    toasts: MemoryToasts,
    controller: ContactForm,
    clock: TimerQueue,
}

impl Page {
    fn new() -> Self {
        Self {
            form: MemoryForm::new("Send Message"),
            toasts: MemoryToasts::default(),
            controller: ContactForm::new(),
            clock: TimerQueue::new(),
        }
    }

    fn fill(&mut self, values: &FormValues) {
        for field in FieldId::ALL {
            self.form.set_value(field, values.get(field));
        }
    }

    fn submit(&mut self) -> Submission {
        self.controller.submit(&mut self.form, &mut self.toasts)
    }

    fn wait(&mut self, by: Duration) {
        let Page {
            form,
            toasts,
            controller,
            clock,
        } = self;
        clock.advance_with(by, |timer| controller.fire(form, toasts, timer));
    }
}

fn valid_values() -> FormValues {
    FormValues::default()
        .with(FieldId::Name, "Arjun Mehta")
        .with(FieldId::Email, "arjun@example.in")
        .with(FieldId::Phone, "+1 234 567 8901")
        .with(FieldId::Service, "retirement-planning")
        .with(FieldId::Message, "Looking for advice on a balanced portfolio.")
}

#[test]
fn short_names_fail_and_long_names_pass() {
    let mut page = Page::new();
    for name in ["", " ", "A", " B "] {
        page.form.set_value(FieldId::Name, name);
        assert!(!page.controller.validate_field(&mut page.form, "name"), "{name:?}");
        assert_eq!(page.form.decoration(FieldId::Name), Decoration::Errored);
    }
    for name in ["Al", "  Arjun  "] {
        page.form.set_value(FieldId::Name, name);
        assert!(page.controller.validate_field(&mut page.form, "name"), "{name:?}");
        assert_eq!(page.form.decoration(FieldId::Name), Decoration::Clean);
    }
}

#[test]
fn valid_form_validates_clean() {
    let mut page = Page::new();
    page.fill(&valid_values());

    let result = page.controller.validate_form(&mut page.form);
    assert!(result.overall_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result, validate_values(&valid_values()));
}

#[test]
fn name_error_comes_first_regardless_of_others() {
    let mut page = Page::new();
    let values = FormValues {
        name: "A".into(),
        email: "broken".into(),
        message: "".into(),
        ..valid_values()
    };
    page.fill(&values);

    let Submission::Rejected { validation, .. } = page.submit() else {
        panic!("expected rejection");
    };
    assert_eq!(validation.first_message(), Some("Please enter a valid name"));

    let toast = page.toasts.visible().next().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);
    assert_eq!(toast.message, "Please enter a valid name");
}

#[test]
fn fixing_fields_clears_prior_decoration_on_resubmit() {
    let mut page = Page::new();
    page.fill(&FormValues::default());
    page.submit();
    assert!(FieldId::ALL.iter().all(|f| page.form.decoration(*f).is_errored()));

    page.fill(&valid_values());
    assert!(matches!(page.submit(), Submission::Sending { .. }));
    assert!(FieldId::ALL.iter().all(|f| !page.form.decoration(*f).is_errored()));
}

#[test]
fn valid_submission_sends_then_resets() {
    let mut page = Page::new();
    page.fill(&valid_values());

    let timers = page.submit().into_timers();
    page.clock.schedule_all(timers);

    assert!(page.form.is_submit_disabled());
    assert_eq!(page.form.submit_label().as_deref(), Some(SENDING_LABEL));

    page.wait(SUBMIT_DELAY);

    let toast = page.toasts.visible().next().unwrap();
    assert_eq!(toast.kind, NotificationKind::Success);
    assert_eq!(toast.message, SUCCESS_MESSAGE);
    for field in FieldId::ALL {
        assert_eq!(page.form.value(field).as_deref(), Some(""));
    }
    assert!(!page.form.is_submit_disabled());
    assert_eq!(page.form.submit_label().as_deref(), Some("Send Message"));

    page.wait(DISPLAY_DURATION + EXIT_DURATION);
    assert!(page.toasts.is_empty());
}

#[test]
fn error_toast_is_replaced_by_success_toast() {
    let mut page = Page::new();
    let timers = page.submit().into_timers();
    page.clock.schedule_all(timers);
    assert_eq!(page.toasts.len(), 1);

    page.wait(Duration::from_millis(1000));
    page.fill(&valid_values());
    let timers = page.submit().into_timers();
    page.clock.schedule_all(timers);
    page.wait(SUBMIT_DELAY);

    assert_eq!(page.toasts.len(), 1);
    assert_eq!(page.toasts.visible().next().unwrap().message, SUCCESS_MESSAGE);

    // The error toast's exit timer (t=5000ms) must not touch the success toast.
    page.wait(Duration::from_millis(2600));
    assert!(!page.controller.notifications().is_exiting());
    assert_eq!(page.toasts.len(), 1);
}
