//! Errors crossing the WASM boundary.
//!
//! Validation never produces an error; an invalid form is a
//! `ValidationResult`. What can fail is reaching the document and
//! converting values between Rust and JavaScript.

use serde::{Deserialize, Serialize};
use sitekit_core::FieldParseError;
use std::fmt;
use wasm_bindgen::prelude::*;

/// Error categories seen by JavaScript callers.
///
/// Serialized with a `kind` tag, e.g. `{"kind": "domError", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[allow(clippy::enum_variant_names)]
pub enum WasmError {
    /// `window`, `document` or a DOM call was unavailable.
    #[serde(rename_all = "camelCase")]
    DomError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// A field identifier outside the contact-form field set.
    #[serde(rename_all = "camelCase")]
    FieldError { field: String, message: String },

    /// A value could not be converted to or from JavaScript.
    #[serde(rename_all = "camelCase")]
    SerializationError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl WasmError {
    pub fn dom(message: impl Into<String>) -> Self {
        Self::DomError {
            message: message.into(),
            details: None,
        }
    }

    /// A DOM failure with the JavaScript exception attached.
    pub fn dom_with_cause(message: impl Into<String>, cause: &JsValue) -> Self {
        Self::DomError {
            message: message.into(),
            details: Some(describe(cause)),
        }
    }

    pub fn serialization(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::DomError { .. } => "DomError",
            Self::FieldError { .. } => "FieldError",
            Self::SerializationError { .. } => "SerializationError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::DomError { message, .. }
            | Self::FieldError { message, .. }
            | Self::SerializationError { message, .. } => message,
        }
    }
}

impl fmt::Display for WasmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomError { message, details } => {
                write!(f, "DOM Error: {message}")?;
                if let Some(d) = details {
                    write!(f, "\nDetails: {d}")?;
                }
            }
            Self::FieldError { field, message } => {
                write!(f, "Field Error: {message} ('{field}')")?;
            }
            Self::SerializationError { message, details } => {
                write!(f, "Serialization Error: {message}")?;
                if let Some(d) = details {
                    write!(f, "\nDetails: {d}")?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for WasmError {}

impl From<FieldParseError> for WasmError {
    fn from(err: FieldParseError) -> Self {
        Self::FieldError {
            message: err.to_string(),
            field: err.0,
        }
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::serialization("Failed to convert value", err.to_string())
    }
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        match serde_wasm_bindgen::to_value(&err) {
            Ok(js_value) => js_value,
            Err(serialization_err) => JsValue::from_str(&format!(
                "Error serialization failed: {serialization_err} (original error: {err})"
            )),
        }
    }
}

/// Best-effort text of a thrown JavaScript value.
fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub type Result<T, E = WasmError> = std::result::Result<T, E>;
