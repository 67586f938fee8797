//! Purpose: Define a stable, structured schema for non-fatal parse warnings.
//! Exports: `ParseWarning`, `WarningCode`, `warning_json`, `warnings_json`.
//! Role: Shared contract for parse diagnostics surfaced by the API, ABI, and CLI.
//! Invariants: Warnings are non-fatal and are never removed by a failing parse.
//! Invariants: Code labels are stable once published; fields are additive-only.
use serde_json::{Map, Value, json};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WarningCode {
    UnknownElementType,
    InvalidValue,
    MissingInputErrorMessage,
}

impl WarningCode {
    pub fn label(self) -> &'static str {
        match self {
            WarningCode::UnknownElementType => "unknown-element-type",
            WarningCode::InvalidValue => "invalid-value",
            WarningCode::MissingInputErrorMessage => "missing-input-error-message",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseWarning {
    pub code: WarningCode,
    pub message: String,
}

impl ParseWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

pub fn warning_json(warning: &ParseWarning) -> Value {
    let mut map = Map::new();
    map.insert("code".to_string(), json!(warning.code.label()));
    map.insert("message".to_string(), json!(warning.message));
    Value::Object(map)
}

pub fn warnings_json(warnings: &[ParseWarning]) -> Value {
    Value::Array(warnings.iter().map(warning_json).collect())
}
