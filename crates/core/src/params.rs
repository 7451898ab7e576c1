//! Typed extraction of animation parameters from a `serde_json::Value`.
//!
//! Host applications hand over loosely-typed JSON overrides. These helpers
//! never fail: a missing key or a value of the wrong type falls back to the
//! built-in default, so a bad override degrades to the stock animation
//! instead of refusing to start.

use crate::color::Rgba;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, accepting any JSON number.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`. Only non-negative integers
/// qualify; floats and negatives fall back to the default.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a hex color string from `params[name]`. Unparseable colors
/// fall back to the default like any other malformed value.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Rgba {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| Rgba::from_hex(s).ok())
        .unwrap_or(default)
}
