//! CLI command implementations.

pub mod demo;
pub mod run;

use txkv_core::Value;

/// Renders a read result the way every command prints it.
pub fn format_value(value: Option<Value>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}
