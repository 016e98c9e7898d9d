//! `web-sys` implementations of the core presentation traits.

use crate::error::{Result, WasmError};
use sitekit_core::notify::NotificationKind;
use sitekit_core::surface::ERROR_CLASS;
use sitekit_core::{
    Decoration, FieldId, FormSurface, Notification, NotificationId, NotificationSurface,
};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Window,
};

/// Id of the contact form element.
pub const CONTACT_FORM_ID: &str = "contactForm";

/// Selector of the submit control inside the form.
pub const SUBMIT_SELECTOR: &str = ".form-submit";

const NOTIFICATION_STYLES_ID: &str = "notification-styles";

const NOTIFICATION_KEYFRAMES: &str = "@keyframes slideInRight { from { transform: translateX(100%); opacity: 0; } to { transform: translateX(0); opacity: 1; } } \
@keyframes slideOutRight { from { transform: translateX(0); opacity: 1; } to { transform: translateX(100%); opacity: 0; } }";

const NOTIFICATION_CSS: &str = "position: fixed; top: 100px; right: 20px; padding: 16px 24px; border-radius: 8px; \
display: flex; align-items: center; gap: 12px; z-index: 9999; animation: slideInRight 0.3s ease; \
max-width: 400px; box-shadow: 0 10px 25px rgba(0,0,0,0.2);";

const NOTIFICATION_EXIT_ANIMATION: &str = "slideOutRight 0.3s ease forwards";

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| WasmError::dom("no global `window`"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| WasmError::dom("window has no document"))
}

pub fn body(document: &Document) -> Result<HtmlElement> {
    document
        .body()
        .ok_or_else(|| WasmError::dom("document has no body"))
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Result<Vec<HtmlElement>> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| WasmError::dom_with_cause(format!("invalid selector '{selector}'"), &e))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn query(root: &Document, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Sets an inline style property. Failures are ignored: the element keeps
/// its previous style.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Injects a `<style>` block once, keyed by its id.
pub fn ensure_style(document: &Document, id: &str, css: &str) -> Result<()> {
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let style = document
        .create_element("style")
        .map_err(|e| WasmError::dom_with_cause("cannot create <style>", &e))?;
    style.set_id(id);
    style.set_text_content(Some(css));
    let head = document
        .head()
        .ok_or_else(|| WasmError::dom("document has no head"))?;
    head.append_child(&style)
        .map_err(|e| WasmError::dom_with_cause("cannot append <style>", &e))?;
    Ok(())
}

/// The contact form in the live document.
///
/// Fields are looked up by id on every access, so markup without one of the
/// fields keeps working: its value reads as absent and decorating it does
/// nothing.
pub struct DomForm {
    document: Document,
    form: HtmlFormElement,
}

impl DomForm {
    /// Finds `#contactForm`; `None` if the page has no contact form.
    pub fn find(document: &Document) -> Option<Self> {
        let form = document
            .get_element_by_id(CONTACT_FORM_ID)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(Self {
            document: document.clone(),
            form,
        })
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn field(&self, field: FieldId) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(field.as_str())?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn submit(&self) -> Option<Element> {
        self.form.query_selector(SUBMIT_SELECTOR).ok().flatten()
    }
}

/// Reads `.value` from whichever form control the element is.
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        element
            .dyn_ref::<HtmlTextAreaElement>()
            .map(HtmlTextAreaElement::value)
    }
}

impl FormSurface for DomForm {
    fn value(&self, field: FieldId) -> Option<String> {
        control_value(&self.field(field)?)
    }

    fn decorate(&mut self, field: FieldId, decoration: Decoration) {
        let Some(element) = self.field(field) else {
            return;
        };
        set_style(&element, "border-color", decoration.border_color());
        set_style(&element, "background-color", decoration.background_color());
        let classes = element.class_list();
        let _ = if decoration.is_errored() {
            classes.add_1(ERROR_CLASS)
        } else {
            classes.remove_1(ERROR_CLASS)
        };
    }

    fn decoration(&self, field: FieldId) -> Decoration {
        self.field(field)
            .map(|el| Decoration::from_valid(!el.class_list().contains(ERROR_CLASS)))
            .unwrap_or_default()
    }

    fn reset(&mut self) {
        self.form.reset();
    }

    fn submit_label(&self) -> Option<String> {
        self.submit()?.text_content()
    }

    fn set_submit(&mut self, label: &str, disabled: bool) {
        let Some(submit) = self.submit() else {
            return;
        };
        submit.set_text_content(Some(label));
        if let Some(button) = submit.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = submit.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        }
    }
}

/// Called with the id of a notification whose close control was clicked.
pub type CloseHandler = Rc<dyn Fn(NotificationId)>;

/// Toasts appended to `<body>`.
pub struct DomToasts {
    document: Document,
    mounted: HashMap<NotificationId, HtmlElement>,
    on_close: CloseHandler,
}

impl DomToasts {
    pub fn new(document: &Document, on_close: CloseHandler) -> Self {
        Self {
            document: document.clone(),
            mounted: HashMap::new(),
            on_close,
        }
    }

    /// Number of toasts currently in the document.
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    fn build(&self, notification: &Notification) -> Result<HtmlElement> {
        ensure_style(&self.document, NOTIFICATION_STYLES_ID, NOTIFICATION_KEYFRAMES)?;

        let toast = self
            .document
            .create_element("div")
            .map_err(|e| WasmError::dom_with_cause("cannot create notification", &e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WasmError::dom("notification is not an HTML element"))?;
        toast.set_class_name(&format!("notification {}", notification.kind.css_class()));

        let text = self
            .document
            .create_element("span")
            .map_err(|e| WasmError::dom_with_cause("cannot create notification text", &e))?;
        text.set_text_content(Some(&notification.message));

        let close = self
            .document
            .create_element("button")
            .map_err(|e| WasmError::dom_with_cause("cannot create close button", &e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WasmError::dom("close button is not an HTML element"))?;
        close.set_inner_html(r#"<i class="fas fa-times"></i>"#);
        let on_close = Rc::clone(&self.on_close);
        let id = notification.id;
        let handler = Closure::once_into_js(move || on_close(id));
        close.set_onclick(Some(handler.unchecked_ref()));

        toast
            .append_child(&text)
            .and_then(|_| toast.append_child(&close))
            .map_err(|e| WasmError::dom_with_cause("cannot assemble notification", &e))?;

        toast.style().set_css_text(NOTIFICATION_CSS);
        style_for_kind(&toast, notification.kind);
        Ok(toast)
    }
}

fn style_for_kind(toast: &HtmlElement, kind: NotificationKind) {
    set_style(toast, "background-color", kind.background_color());
    set_style(toast, "color", kind.text_color());
}

impl NotificationSurface for DomToasts {
    fn mount(&mut self, notification: &Notification) {
        let mounted = self.build(notification).and_then(|toast| {
            body(&self.document)?
                .append_child(&toast)
                .map_err(|e| WasmError::dom_with_cause("cannot show notification", &e))?;
            Ok(toast)
        });
        match mounted {
            Ok(toast) => {
                self.mounted.insert(notification.id, toast);
            }
            Err(err) => crate::log::warn(&err.to_string()),
        }
    }

    fn start_exit(&mut self, id: NotificationId) {
        if let Some(toast) = self.mounted.get(&id) {
            set_style(toast, "animation", NOTIFICATION_EXIT_ANIMATION);
        }
    }

    fn unmount(&mut self, id: NotificationId) {
        if let Some(toast) = self.mounted.remove(&id) {
            toast.remove();
        }
    }
}
