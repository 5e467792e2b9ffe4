use serde_json::Value;
use thiserror::Error;

/// Errors raised while validating and filtering partner data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A top-level argument has the wrong shape. Fatal to the call.
    #[error("expected {field} to be {expected} but found {found}")]
    TypeValidation {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// A partner record lacks a required field. Fatal to the whole call,
    /// not just that partner.
    #[error("expected partner {field} to be {expected} but found {found}")]
    SchemaValidation {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// A single office carries unusable coordinate data. Recoverable, the
    /// office is logged and skipped.
    #[error("office {address:?} has invalid coordinates: {reason}")]
    OfficeValidation { address: String, reason: String },
}

/// A specialized Result type for partner filtering operations
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
