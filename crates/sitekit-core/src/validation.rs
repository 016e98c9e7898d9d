//! Whole-form validation over plain values.

use crate::field::FieldId;
use serde::{Deserialize, Serialize};

/// Raw values of the five contact-form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl FormValues {
    /// Returns the raw value of one field.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Service => &self.service,
            FieldId::Message => &self.message,
        }
    }

    /// Replaces the raw value of one field.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::Service => &mut self.service,
            FieldId::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Builder-style variant of [`FormValues::set`].
    #[must_use]
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

/// One failing field and the message shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    pub(crate) fn for_field(field: FieldId) -> Self {
        Self {
            field,
            message: field.error_message().to_string(),
        }
    }
}

/// Outcome of validating every field once.
///
/// `errors` holds one entry per failing field, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub overall_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            overall_valid: errors.is_empty(),
            errors,
        }
    }

    /// The message of the earliest failing field, if any.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Failing fields in declaration order.
    pub fn failed_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.errors.iter().map(|e| e.field)
    }

    /// Returns true if the given field failed.
    #[must_use]
    pub fn has_error(&self, field: FieldId) -> bool {
        self.failed_fields().any(|f| f == field)
    }
}

/// Validates all five fields in declaration order without side effects.
#[must_use]
pub fn validate_values(values: &FormValues) -> ValidationResult {
    let errors = FieldId::ALL
        .into_iter()
        .filter(|field| !field.accepts(values.get(*field)))
        .map(FieldError::for_field)
        .collect();

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> FormValues {
        FormValues {
            name: "Priya Raman".into(),
            email: "priya@example.com".into(),
            phone: "+91 98765 43210".into(),
            service: "wealth-advisory".into(),
            message: "I would like to discuss a retirement plan.".into(),
        }
    }

    #[test]
    fn all_valid_has_no_errors() {
        let result = validate_values(&valid_values());
        assert!(result.overall_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.first_message(), None);
    }

    #[test]
    fn only_name_invalid_reports_name_first() {
        let values = valid_values().with(FieldId::Name, "P");
        let result = validate_values(&values);

        assert!(!result.overall_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.first_message(), Some("Please enter a valid name"));
    }

    #[test]
    fn errors_follow_declaration_order() {
        let values = FormValues {
            message: "short".into(),
            email: "nope".into(),
            ..valid_values()
        };
        let result = validate_values(&values);

        let failed: Vec<_> = result.failed_fields().collect();
        assert_eq!(failed, vec![FieldId::Email, FieldId::Message]);
        assert_eq!(
            result.first_message(),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn empty_form_fails_every_field() {
        let result = validate_values(&FormValues::default());
        assert_eq!(result.errors.len(), 5);
        assert!(FieldId::ALL.iter().all(|f| result.has_error(*f)));
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = validate_values(&FormValues::default().with(FieldId::Name, "Al"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallValid"], false);
        assert_eq!(json["errors"][0]["field"], "email");
    }
}
