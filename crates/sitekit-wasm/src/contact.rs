//! Binds a [`ContactForm`] controller to `#contactForm`.
//!
//! The controller, the form and the toasts live together behind one
//! `Rc<RefCell<_>>`. Every event handler and timer borrows it for the
//! duration of one controller call and schedules the returned timers after
//! the borrow ends.

use crate::dom::{self, CloseHandler, DomForm, DomToasts};
use crate::error::{Result, WasmError};
use crate::{log, timers};
use sitekit_core::{ContactForm, NotificationId, Scheduled, Submission, Timer};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement};

/// Form controls that get blur/input validation.
const CONTROL_SELECTOR: &str = "input, select, textarea";

struct ContactState {
    controller: ContactForm,
    form: DomForm,
    toasts: DomToasts,
}

impl ContactState {
    fn submit(&mut self) -> Vec<Scheduled> {
        match self.controller.submit(&mut self.form, &mut self.toasts) {
            Submission::Rejected { validation, timers } => {
                log::debug(&format!(
                    "contact form rejected: {} field(s) invalid",
                    validation.errors.len()
                ));
                timers
            }
            other => other.into_timers(),
        }
    }

    fn fire(&mut self, timer: Timer) -> Vec<Scheduled> {
        self.controller.fire(&mut self.form, &mut self.toasts, timer)
    }

    fn dismiss(&mut self, id: NotificationId) {
        self.controller.dismiss_notification(&mut self.toasts, id);
    }
}

/// A contact form attached to the page.
#[derive(Clone)]
pub struct ContactBinding {
    state: Rc<RefCell<ContactState>>,
}

impl ContactBinding {
    /// Attaches to `#contactForm`. Returns `Ok(None)` on pages without one.
    pub fn attach(document: &Document) -> Result<Option<Self>> {
        let Some(form) = DomForm::find(document) else {
            return Ok(None);
        };

        let state = Rc::new_cyclic(|weak: &Weak<RefCell<ContactState>>| {
            let weak = weak.clone();
            let on_close: CloseHandler = Rc::new(move |id| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().dismiss(id);
                }
            });
            RefCell::new(ContactState {
                controller: ContactForm::new(),
                toasts: DomToasts::new(document, on_close),
                form,
            })
        });

        let binding = Self { state };
        binding.listen_submit()?;
        binding.listen_controls()?;
        Ok(Some(binding))
    }

    /// Runs a submit attempt as if the visitor pressed the submit control.
    pub fn submit(&self) {
        let timers = self.state.borrow_mut().submit();
        self.schedule(timers);
    }

    /// Validates one field by id, decorating it.
    pub fn validate_field(&self, field_id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let ContactState {
            controller, form, ..
        } = &mut *state;
        controller.validate_field(form, field_id)
    }

    /// Returns true while a simulated send is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state.borrow().controller.is_submitting()
    }

    /// Number of notifications currently shown.
    pub fn notification_count(&self) -> usize {
        self.state.borrow().toasts.len()
    }

    fn schedule(&self, timers: Vec<Scheduled>) {
        for scheduled in timers {
            let weak = Rc::downgrade(&self.state);
            let result = timers::set_timeout(scheduled.delay, move || {
                if let Some(state) = weak.upgrade() {
                    let follow_ups = state.borrow_mut().fire(scheduled.timer);
                    ContactBinding { state }.schedule(follow_ups);
                }
            });
            if let Err(err) = result {
                log::warn(&err.to_string());
            }
        }
    }

    fn listen_submit(&self) -> Result<()> {
        let binding = self.clone();
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            binding.submit();
        });
        let form = self.state.borrow().form.element().clone();
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
            .map_err(|e| WasmError::dom_with_cause("cannot listen for submit", &e))?;
        on_submit.forget();
        Ok(())
    }

    fn listen_controls(&self) -> Result<()> {
        let form = self.state.borrow().form.element().clone();
        let controls = form
            .query_selector_all(CONTROL_SELECTOR)
            .map_err(|e| WasmError::dom_with_cause("cannot list form controls", &e))?;

        for control in (0..controls.length()).filter_map(|i| controls.get(i)) {
            let Ok(control) = control.dyn_into::<HtmlElement>() else {
                continue;
            };
            let id = control.id();

            let weak = Rc::downgrade(&self.state);
            let field_id = id.clone();
            let on_blur = Closure::<dyn FnMut()>::new(move || {
                if let Some(state) = weak.upgrade() {
                    let mut state = state.borrow_mut();
                    let ContactState {
                        controller, form, ..
                    } = &mut *state;
                    controller.on_blur(form, &field_id);
                }
            });

            let weak = Rc::downgrade(&self.state);
            let on_input = Closure::<dyn FnMut()>::new(move || {
                if let Some(state) = weak.upgrade() {
                    let mut state = state.borrow_mut();
                    let ContactState {
                        controller, form, ..
                    } = &mut *state;
                    controller.on_input(form, &id);
                }
            });

            control
                .add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())
                .and_then(|()| {
                    control.add_event_listener_with_callback(
                        "input",
                        on_input.as_ref().unchecked_ref(),
                    )
                })
                .map_err(|e| WasmError::dom_with_cause("cannot listen on form control", &e))?;
            on_blur.forget();
            on_input.forget();
        }
        Ok(())
    }
}

/// Attaches the contact form of the current document, if there is one.
pub fn init() -> Result<Option<ContactBinding>> {
    let document = dom::document()?;
    ContactBinding::attach(&document)
}
