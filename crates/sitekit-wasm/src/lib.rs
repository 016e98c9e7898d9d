//! # sitekit-wasm
//!
//! Browser bindings for `sitekit-core`: attaches the contact form and the
//! page widgets to the live document.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { mount_site, validate_contact } from './pkg/sitekit_wasm.js';
//!
//! await init();
//! document.addEventListener('DOMContentLoaded', () => mount_site());
//!
//! const result = validate_contact({ name: 'Jo', email: 'jo@example.com' });
//! console.log(result.overallValid, result.errors);
//! ```

pub mod contact;
pub mod dom;
pub mod error;
mod log;
pub mod timers;
pub mod widgets;

pub use contact::ContactBinding;
pub use error::WasmError;

use sitekit_core::{FieldId, FormValues, validate_values};
use std::str::FromStr;
use wasm_bindgen::prelude::*;

/// Installs the panic hook so panics show up in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

type Init = fn(&web_sys::Document) -> error::Result<()>;

const WIDGETS: [(&str, Init); 9] = [
    ("animation styles", widgets::init_animation_styles),
    ("mobile menu", widgets::init_mobile_menu),
    ("header scroll", widgets::init_header_scroll),
    ("scroll reveal", widgets::init_scroll_reveal),
    ("smooth scroll", widgets::init_smooth_scroll),
    ("faq", widgets::init_faq),
    ("chart", widgets::init_chart),
    ("testimonials", widgets::init_testimonials),
    ("back to top", widgets::init_back_to_top),
];

/// Wires every widget and the contact form on the current page.
///
/// A widget that fails to initialize is logged and skipped; the rest of the
/// page still gets wired. Only a missing `document` is an error.
#[wasm_bindgen]
pub fn mount_site() -> Result<(), JsValue> {
    let document = dom::document()?;

    for (name, init) in WIDGETS {
        if let Err(err) = init(&document) {
            log::warn(&format!("{name}: {err}"));
        }
    }

    match ContactBinding::attach(&document) {
        Ok(Some(_)) => log::debug("contact form attached"),
        Ok(None) => {}
        Err(err) => log::warn(&format!("contact form: {err}")),
    }
    Ok(())
}

/// Validates a plain `{ name, email, phone, service, message }` object.
///
/// Missing keys read as empty. Returns `{ overallValid, errors: [{ field,
/// message }] }` with errors in field order.
#[wasm_bindgen]
pub fn validate_contact(values: JsValue) -> Result<JsValue, JsValue> {
    let values: FormValues = serde_wasm_bindgen::from_value(values).map_err(WasmError::from)?;
    let result = validate_values(&values);
    Ok(serde_wasm_bindgen::to_value(&result).map_err(WasmError::from)?)
}

/// Applies one field's rule to a raw value. Unknown field ids are valid.
#[wasm_bindgen]
pub fn is_valid_field(field_id: &str, value: &str) -> bool {
    FieldId::from_str(field_id).map_or(true, |field| field.accepts(value))
}

/// The message shown when a field fails.
#[wasm_bindgen]
pub fn field_error_message(field_id: &str) -> Result<String, JsValue> {
    let field = FieldId::from_str(field_id).map_err(WasmError::from)?;
    Ok(field.error_message().to_string())
}
