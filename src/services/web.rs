// Browser Adapters
// web-sys backed document, localStorage and CustomEvent dispatch

use std::sync::Arc;

use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, DomException, HtmlInputElement};

use crate::models::ThemeSettings;
use crate::services::{
    DocumentError, EventSink, KeyValueStore, StorageError, StorageResult, ThemeControl,
    ThemeController, ThemeDocument, THEME_ATTRIBUTE, THEME_CONTROL_SELECTOR,
};

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn page_document() -> Result<Document, DocumentError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| DocumentError::MissingElement("document".to_string()))
}

/// The live page. Elements are looked up on every call so swapped-in
/// controls are picked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebDocument;

impl ThemeDocument for WebDocument {
    fn theme_attribute(&self) -> Option<String> {
        page_document()
            .ok()?
            .document_element()?
            .get_attribute(THEME_ATTRIBUTE)
    }

    fn set_theme_attribute(&mut self, theme: &str) -> Result<(), DocumentError> {
        let root = page_document()?
            .document_element()
            .ok_or_else(|| DocumentError::MissingElement("html".to_string()))?;
        root.set_attribute(THEME_ATTRIBUTE, theme)
            .map_err(|e| DocumentError::Rejected(js_error(e)))
    }

    fn set_body_theme_attribute(&mut self, theme: &str) -> Result<(), DocumentError> {
        let body = page_document()?
            .body()
            .ok_or_else(|| DocumentError::MissingElement("body".to_string()))?;
        body.set_attribute(THEME_ATTRIBUTE, theme)
            .map_err(|e| DocumentError::Rejected(js_error(e)))
    }

    fn for_each_theme_control(
        &mut self,
        visit: &mut dyn FnMut(&mut dyn ThemeControl),
    ) -> Result<(), DocumentError> {
        let nodes = page_document()?
            .query_selector_all(THEME_CONTROL_SELECTOR)
            .map_err(|e| DocumentError::Rejected(js_error(e)))?;

        for index in 0..nodes.length() {
            let Some(node) = nodes.item(index) else {
                continue;
            };
            if let Ok(input) = node.dyn_into::<HtmlInputElement>() {
                visit(&mut WebThemeControl(input));
            }
        }
        Ok(())
    }
}

struct WebThemeControl(HtmlInputElement);

impl ThemeControl for WebThemeControl {
    fn value(&self) -> String {
        self.0.value()
    }

    fn is_checked(&self) -> bool {
        self.0.checked()
    }

    fn set_checked(&mut self, checked: bool) {
        self.0.set_checked(checked);
    }
}

/// Classify an exception thrown by `Storage.setItem`.
pub fn write_error(error: JsValue) -> StorageError {
    let name = error.dyn_ref::<DomException>().map(DomException::name);
    match name.as_deref() {
        Some("QuotaExceededError") => StorageError::QuotaExceeded,
        _ => StorageError::Unavailable(js_error(error)),
    }
}

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_error(e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_error(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::storage()?.set_item(key, value).map_err(write_error)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(js_error(e)))
    }
}

/// Dispatches each event as a `CustomEvent` on `document`, payload in `detail`
#[derive(Debug, Default, Clone, Copy)]
pub struct DomEventSink;

impl EventSink for DomEventSink {
    fn emit(&self, event: &str, payload: Value) {
        let document = match page_document() {
            Ok(document) => document,
            Err(e) => {
                log::warn!("Cannot dispatch '{event}': {e}");
                return;
            }
        };

        let detail = match js_sys::JSON::parse(&payload.to_string()) {
            Ok(detail) => detail,
            Err(e) => {
                log::warn!("Cannot convert '{event}' payload: {}", js_error(e));
                return;
            }
        };

        let init = CustomEventInit::new();
        init.set_detail(&detail);

        let result = CustomEvent::new_with_event_init_dict(event, &init)
            .and_then(|custom| document.dispatch_event(&custom));
        if let Err(e) = result {
            log::warn!("Failed to dispatch '{event}': {}", js_error(e));
        }
    }
}

/// Build a controller over the live page and restore the saved theme.
pub fn install(settings: ThemeSettings) -> ThemeController<WebDocument> {
    let mut controller = ThemeController::new(
        WebDocument,
        Arc::new(LocalStorage),
        Arc::new(DomEventSink),
        settings,
    );
    controller.initialize();
    controller
}
