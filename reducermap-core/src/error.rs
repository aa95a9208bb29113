//! Error types for reducermap.
//!
//! Every fault is cycle-aborting: the engine performs no retries and no
//! silent recovery, and the container decides what to show afterwards.
//!
//! - [`ReducerError`] - the single error type surfaced by the engine
//! - [`ValueKind`] - the observed kind named by shape faults

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A boxed error type for handler-origin failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The runtime kind of a value found where a handler or options object was
/// expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A JSON `null`. Reported as `object` in error messages.
    Null,
    /// A JSON boolean.
    Boolean,
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// A registered handler.
    Function,
    /// A missing value.
    Undefined,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The lowercase name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null | Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Function => "function",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while building an engine or running a cycle.
#[derive(Error, Debug)]
pub enum ReducerError {
    /// The engine was constructed without a handler map.
    #[error("ActionMap is not defined")]
    ActionMapUndefined,

    /// No entry exists for the action type, or the entry is an empty sequence.
    #[error("No action handler for type: {0}")]
    NoActionHandler(String),

    /// An entry, sequence element or tuple head is not of the kind its
    /// position requires.
    #[error("Handler is an invalid type: {0}")]
    InvalidHandlerType(ValueKind),

    /// An options object bound to a handler is not map-shaped.
    #[error("Helper object is an invalid type: {0}")]
    InvalidHelperType(ValueKind),

    /// A handler returned an error of its own.
    #[error("handler for type {kind} failed")]
    Handler {
        /// The action type whose cycle failed.
        kind: String,
        /// The handler's error.
        #[source]
        source: BoxError,
    },
}

impl ReducerError {
    /// Whether this fault comes from the shape of the handler map rather than
    /// from a handler's own failure.
    pub fn is_shape_fault(&self) -> bool {
        matches!(
            self,
            Self::NoActionHandler(_) | Self::InvalidHandlerType(_) | Self::InvalidHelperType(_)
        )
    }
}
