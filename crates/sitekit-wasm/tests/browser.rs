//! Browser tests for the DOM bindings.
//!
//! Run with `wasm-pack test --headless --chrome crates/sitekit-wasm`.

use sitekit_core::SUCCESS_MESSAGE;
use sitekit_wasm::{ContactBinding, field_error_message, validate_contact};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

const FORM: &str = r#"
<form id="contactForm">
  <input id="name">
  <input id="email">
  <input id="phone">
  <select id="service">
    <option value="">Select a service</option>
    <option value="wealth">Wealth management</option>
  </select>
  <textarea id="message"></textarea>
  <button type="submit" class="form-submit">Send Message</button>
</form>
"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn page_with_form() -> Document {
    let document = document();
    document.body().unwrap().set_inner_html(FORM);
    document
}

fn input(document: &Document, id: &str) -> HtmlInputElement {
    document
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap()
}

fn set_message(document: &Document, value: &str) {
    document
        .get_element_by_id("message")
        .unwrap()
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .unwrap()
        .set_value(value);
}

fn fill_valid(document: &Document) {
    input(document, "name").set_value("Jane Doe");
    input(document, "email").set_value("jane@example.com");
    input(document, "phone").set_value("123-456-7890");
    document
        .get_element_by_id("service")
        .unwrap()
        .dyn_into::<HtmlSelectElement>()
        .unwrap()
        .set_value("wealth");
    set_message(document, "I would like to talk about my portfolio.");
}

fn submit_button(document: &Document) -> HtmlButtonElement {
    document
        .query_selector(".form-submit")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlButtonElement>()
        .unwrap()
}

fn notifications(document: &Document) -> Vec<HtmlElement> {
    let list = document.query_selector_all(".notification").unwrap();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|n| n.dyn_into::<HtmlElement>().unwrap())
        .collect()
}

async fn sleep(millis: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn get(object: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(object, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn validate_contact_reports_errors_in_field_order() {
    let values = js_sys::Object::new();
    js_sys::Reflect::set(&values, &"name".into(), &"A".into()).unwrap();
    js_sys::Reflect::set(&values, &"email".into(), &"a@b.co".into()).unwrap();

    let result = validate_contact(values.into()).unwrap();
    assert_eq!(get(&result, "overallValid"), JsValue::FALSE);

    let errors: js_sys::Array = get(&result, "errors").dyn_into().unwrap();
    assert_eq!(errors.length(), 4);
    assert_eq!(get(&errors.get(0), "field"), JsValue::from_str("name"));
    assert_eq!(
        get(&errors.get(0), "message"),
        JsValue::from_str("Please enter a valid name")
    );
    assert_eq!(get(&errors.get(1), "field"), JsValue::from_str("phone"));
}

#[wasm_bindgen_test]
fn unknown_field_message_is_a_field_error() {
    let err = field_error_message("nickname").unwrap_err();
    assert_eq!(get(&err, "kind"), JsValue::from_str("fieldError"));
    assert_eq!(get(&err, "field"), JsValue::from_str("nickname"));
}

#[wasm_bindgen_test]
fn page_without_form_is_not_attached() {
    let document = document();
    document.body().unwrap().set_inner_html("<main></main>");
    assert!(ContactBinding::attach(&document).unwrap().is_none());
}

#[wasm_bindgen_test]
fn invalid_submit_decorates_and_shows_first_error() {
    let document = page_with_form();
    let binding = ContactBinding::attach(&document).unwrap().unwrap();

    input(&document, "name").set_value("A");
    binding.submit();

    let name = input(&document, "name");
    assert!(name.class_list().contains("error"));
    assert_eq!(name.style().get_property_value("border-color").unwrap(), "rgb(239, 68, 68)");
    assert!(input(&document, "email").class_list().contains("error"));

    let shown = notifications(&document);
    assert_eq!(shown.len(), 1);
    assert!(shown[0].class_list().contains("error"));
    assert_eq!(shown[0].text_content().unwrap(), "Please enter a valid name");
    assert!(document.get_element_by_id("notification-styles").is_some());
}

#[wasm_bindgen_test]
fn second_toast_replaces_the_first() {
    let document = page_with_form();
    let binding = ContactBinding::attach(&document).unwrap().unwrap();

    binding.submit();
    input(&document, "name").set_value("Jane");
    binding.submit();

    let shown = notifications(&document);
    assert_eq!(shown.len(), 1);
    assert_eq!(
        shown[0].text_content().unwrap(),
        "Please enter a valid email address"
    );
    assert_eq!(binding.notification_count(), 1);
}

#[wasm_bindgen_test]
fn close_control_removes_the_toast() {
    let document = page_with_form();
    let binding = ContactBinding::attach(&document).unwrap().unwrap();

    binding.submit();
    let toast = notifications(&document).remove(0);
    toast
        .query_selector("button")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();

    assert!(notifications(&document).is_empty());
    assert_eq!(binding.notification_count(), 0);
}

#[wasm_bindgen_test]
fn fixing_a_field_clears_its_decoration() {
    let document = page_with_form();
    let binding = ContactBinding::attach(&document).unwrap().unwrap();

    assert!(!binding.validate_field("name"));
    assert!(input(&document, "name").class_list().contains("error"));

    input(&document, "name").set_value("Jo");
    assert!(binding.validate_field("name"));
    let name = input(&document, "name");
    assert!(!name.class_list().contains("error"));
    assert_eq!(name.style().get_property_value("border-color").unwrap(), "");
    assert!(binding.validate_field("not-a-field"));
}

#[wasm_bindgen_test]
async fn valid_submit_sends_then_resets() {
    let document = page_with_form();
    let binding = ContactBinding::attach(&document).unwrap().unwrap();
    fill_valid(&document);

    binding.submit();
    let button = submit_button(&document);
    assert!(binding.is_submitting());
    assert!(button.disabled());
    assert_eq!(button.text_content().unwrap(), "Sending...");
    assert!(notifications(&document).is_empty());

    sleep(1700).await;

    assert!(!binding.is_submitting());
    assert!(!button.disabled());
    assert_eq!(button.text_content().unwrap(), "Send Message");
    assert_eq!(input(&document, "name").value(), "");

    let shown = notifications(&document);
    assert_eq!(shown.len(), 1);
    assert!(shown[0].class_list().contains("success"));
    assert_eq!(shown[0].text_content().unwrap(), SUCCESS_MESSAGE);
}
