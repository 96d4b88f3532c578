//! Shared helpers for the WASM API
//!
//! Console logging with a common prefix, option decoding and error
//! conversion for everything that crosses the JS boundary.

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::error::ViewerError;
use crate::models::DiagramMetadata;

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [SLD] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [SLD] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [SLD] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [SLD] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[SLD] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[SLD] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[SLD] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[SLD] ❌ {}", msg));
}

// ============================================================================
// Decoding Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Metadata given either as a parsed object or as JSON text
pub fn metadata_from_js(value: JsValue) -> Result<DiagramMetadata, JsValue> {
    match value.as_string() {
        Some(json) => DiagramMetadata::from_json(&json).map_err(to_js_error),
        None => deserialize(value, "Invalid diagram metadata"),
    }
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert a viewer error to a JsValue, logging it first
pub fn to_js_error(err: ViewerError) -> JsValue {
    let msg = err.to_string();
    log_error(&msg);
    JsValue::from_str(&msg)
}
