//! The fixed set of contact-form fields.

use crate::error::FieldParseError;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A contact-form field, in declaration order.
///
/// The declaration order matters: whole-form validation reports failures
/// in this order and the error toast shows the first of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Service,
    Message,
}

impl FieldId {
    /// All fields in declaration order.
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Service,
        FieldId::Message,
    ];

    /// The element id used in the page markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Service => "service",
            FieldId::Message => "message",
        }
    }

    /// Message shown to the visitor when this field fails validation.
    #[must_use]
    pub const fn error_message(self) -> &'static str {
        match self {
            FieldId::Name => "Please enter a valid name",
            FieldId::Email => "Please enter a valid email address",
            FieldId::Phone => "Please enter a valid phone number",
            FieldId::Service => "Please select a service",
            FieldId::Message => "Please enter a message (at least 10 characters)",
        }
    }

    /// Applies this field's rule to a raw (untrimmed) value.
    #[must_use]
    pub fn accepts(self, raw: &str) -> bool {
        let value = raw.trim();
        match self {
            FieldId::Name => rules::is_valid_name(value),
            FieldId::Email => rules::is_valid_email(value),
            FieldId::Phone => rules::is_valid_phone(value),
            FieldId::Service => rules::is_valid_service(value),
            FieldId::Message => rules::is_valid_message(value),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldParseError(s.to_string()))
    }
}
