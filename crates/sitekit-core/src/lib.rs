//! # sitekit-core
//!
//! Interaction logic for the Saiteja Asset Management marketing site,
//! independent of any rendering surface.
//!
//! ## Architecture
//!
//! - **Rules**: pure predicates over raw field values ([`rules`])
//! - **FieldId / validate_values**: the fixed contact-form field set and
//!   whole-form validation ([`field`], [`validation`])
//! - **ContactForm**: the per-page controller that decorates fields, gates
//!   submission and drives notifications ([`form`])
//! - **NotificationPresenter**: at most one transient toast at a time
//!   ([`notify`])
//! - **Timer / TimerQueue**: scheduled callbacks as plain values, with the
//!   owning id acting as the invalidation token ([`timer`])
//! - **Surfaces**: the traits a host (DOM, tests) implements to render
//!   decorations and toasts ([`surface`], [`memory`])
//! - **Widgets**: menu, scroll, accordion, carousel and chart state
//!   ([`widgets`])
//!
//! The controller never touches a document directly. A host reads events,
//! calls into [`ContactForm`], and schedules the returned [`Scheduled`]
//! timers with whatever clock it owns (`setTimeout` in the browser,
//! [`TimerQueue`] in tests).
//!
//! ## Example
//!
//! ```
//! use sitekit_core::memory::{MemoryForm, MemoryToasts};
//! use sitekit_core::{ContactForm, FieldId, Submission};
//!
//! let mut form = MemoryForm::new("Send Message");
//! form.set_value(FieldId::Name, "A");
//!
//! let mut toasts = MemoryToasts::default();
//! let mut controller = ContactForm::new();
//!
//! match controller.submit(&mut form, &mut toasts) {
//!     Submission::Rejected { validation, .. } => {
//!         assert_eq!(validation.first_message(), Some("Please enter a valid name"));
//!     }
//!     other => panic!("unexpected submission: {other:?}"),
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod field;
pub mod form;
pub mod memory;
pub mod notify;
pub mod rules;
pub mod surface;
pub mod timer;
pub mod validation;
pub mod widgets;

pub use error::FieldParseError;
pub use field::FieldId;
pub use form::{ContactForm, Submission, SubmitTicket, SENDING_LABEL, SUBMIT_DELAY, SUCCESS_MESSAGE};
pub use notify::{Notification, NotificationId, NotificationKind, NotificationPresenter};
pub use surface::{Decoration, FormSurface, NotificationSurface};
pub use timer::{Scheduled, Timer, TimerQueue};
pub use validation::{FieldError, FormValues, ValidationResult, validate_values};
