#![cfg(all(target_arch = "wasm32", feature = "web"))]

use std::cell::RefCell;
use std::rc::Rc;

use theme_switcher::models::{Theme, ThemeSettings, THEME_CHANGED_EVENT};
use theme_switcher::services::{install, write_error, StorageError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{CustomEvent, Document, DomException, HtmlInputElement, Storage};

wasm_bindgen_test_configure!(run_in_browser);

const KEY: &str = "daisy-theme";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn local_storage() -> Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

fn add_controls(document: &Document, values: &[&str]) -> Vec<HtmlInputElement> {
    let body = document.body().unwrap();
    values
        .iter()
        .map(|value| {
            let input: HtmlInputElement = document
                .create_element("input")
                .unwrap()
                .dyn_into()
                .unwrap();
            input.set_type("radio");
            input.set_class_name("theme-controller");
            input.set_value(value);
            body.append_child(&input).unwrap();
            input
        })
        .collect()
}

fn remove_controls(controls: &[HtmlInputElement]) {
    for control in controls {
        control.remove();
    }
}

#[wasm_bindgen_test]
fn apply_updates_page_storage_and_listeners() {
    let document = document();
    let storage = local_storage();
    storage.remove_item(KEY).unwrap();
    let controls = add_controls(&document, &["light", "dark", "nord"]);

    let mut controller = install(ThemeSettings::default());
    assert_eq!(controller.current(), Theme::Light);

    let previous: Rc<RefCell<Vec<String>>> = Rc::default();
    let seen = previous.clone();
    let listener = Closure::<dyn FnMut(CustomEvent)>::new(move |event: CustomEvent| {
        let value = js_sys::Reflect::get(&event.detail(), &JsValue::from_str("previousTheme"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        seen.borrow_mut().push(value);
    });
    document
        .add_event_listener_with_callback(THEME_CHANGED_EVENT, listener.as_ref().unchecked_ref())
        .unwrap();

    assert!(controller.apply("dark", true));

    let root = document.document_element().unwrap();
    let body = document.body().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(body.get_attribute("data-theme").as_deref(), Some("dark"));
    let checked: Vec<bool> = controls.iter().map(HtmlInputElement::checked).collect();
    assert_eq!(checked, vec![false, true, false]);
    assert_eq!(storage.get_item(KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(*previous.borrow(), vec!["light".to_string()]);

    document
        .remove_event_listener_with_callback(
            THEME_CHANGED_EVENT,
            listener.as_ref().unchecked_ref(),
        )
        .unwrap();
    remove_controls(&controls);
    storage.remove_item(KEY).unwrap();
}

#[wasm_bindgen_test]
fn install_restores_saved_theme() {
    let document = document();
    let storage = local_storage();
    storage.set_item(KEY, "nord").unwrap();
    let controls = add_controls(&document, &["light", "nord"]);

    let controller = install(ThemeSettings::default());

    assert_eq!(controller.current(), Theme::Nord);
    assert!(controls[1].checked());
    assert!(!controls[0].checked());

    remove_controls(&controls);
    storage.remove_item(KEY).unwrap();
}

#[wasm_bindgen_test]
fn reset_clears_local_storage() {
    let storage = local_storage();
    storage.remove_item(KEY).unwrap();

    let mut controller = install(ThemeSettings::default());
    assert!(controller.apply("aqua", true));
    assert!(controller.forget_saved_theme());

    assert_eq!(storage.get_item(KEY).unwrap(), None);
}

#[wasm_bindgen_test]
fn quota_errors_are_recognized_by_name() {
    let quota = DomException::new_with_message_and_name("full", "QuotaExceededError").unwrap();
    assert!(matches!(write_error(quota.into()), StorageError::QuotaExceeded));

    let security = DomException::new_with_message_and_name("Quota denied", "SecurityError").unwrap();
    assert!(matches!(write_error(security.into()), StorageError::Unavailable(_)));

    assert!(matches!(
        write_error(JsValue::from_str("QuotaExceededError")),
        StorageError::Unavailable(_)
    ));
}
