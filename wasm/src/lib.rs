//! WebAssembly module for the weather classification frontend
//!
//! Provides client-side helpers for:
//! - Tabular form validation (same bounds as the server)
//! - Field name mapping
//! - Class and advisory catalogs

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Validate a tabular form; returns `{}` when valid, field → messages otherwise
#[wasm_bindgen]
pub fn validate_tabular_form(form_json: &str) -> Result<String, JsValue> {
    let input: TabularInput = serde_json::from_str(form_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid form JSON: {}", e)))?;

    let details = input.check().err().unwrap_or_default();
    serde_json::to_string(&details).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal model feature name for a form field, empty when unknown
#[wasm_bindgen]
pub fn feature_name_for_field(field: &str) -> String {
    internal_name(field).unwrap_or_default().to_string()
}

/// Label of an image-model class index
#[wasm_bindgen]
pub fn cnn_class_label(index: usize) -> String {
    cnn_label(index).to_string()
}

/// Advisory JSON for a category; `tabular` selects the tabular-model table
#[wasm_bindgen]
pub fn advice_for(category: &str, tabular: bool) -> String {
    let table = if tabular {
        AdvisoryTable::Tabular
    } else {
        AdvisoryTable::Image
    };
    serde_json::to_string(&lookup(table, category)).unwrap_or_else(|_| "{}".to_string())
}

/// Log a message to the browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Tabular field names in form order
#[wasm_bindgen]
pub fn tabular_fields() -> js_sys::Array {
    FIELD_MAPPING
        .iter()
        .map(|(field, _)| JsValue::from_str(field))
        .collect()
}
