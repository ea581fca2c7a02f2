//! Shared helpers for WASM API operations
//!
//! Serialization, deserialization and error conversion used by every
//! exported function. Messages go through the `log` facade, which the
//! start hook routes to the browser console.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        ::log::info!("[WASM] {}", format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        ::log::error!("[WASM] ❌ {}", format!($($arg)*))
    };
}

/// Log a failure and turn it into the string JavaScript receives
pub fn js_error(context: &str, err: impl Display) -> JsValue {
    let msg = format!("{}: {}", context, err);
    wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Serialize a result as a JSON string
pub fn to_json<T: Serialize>(value: &T, context: &str) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error(context, e))
}

/// Deserialize a value from JavaScript; `undefined` and `null` give the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(error_context, e))
}
