//! Error types for the core crate.
//!
//! Validation itself never fails; invalid input is a [`ValidationResult`]
//! value, not an error. The only fallible operation is mapping a DOM
//! identifier onto the fixed field set.
//!
//! [`ValidationResult`]: crate::validation::ValidationResult

use thiserror::Error;

/// A DOM identifier that does not name one of the contact-form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contact form field '{0}'")]
pub struct FieldParseError(pub String);
