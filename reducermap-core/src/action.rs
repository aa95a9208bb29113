//! Typed actions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The default payload type: the remaining fields of a JSON action.
pub type Payload = Map<String, Value>;

/// A typed event: a `type` discriminator plus payload fields.
///
/// Serialized form is flat, `{"type": "add", "amount": 2}`, with every field
/// other than `type` forming the payload.
///
/// # Example
///
/// ```rust,ignore
/// let action: Action = serde_json::from_value(json!({"type": "add", "amount": 2}))?;
/// assert_eq!(action.kind(), "add");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action<P = Payload> {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    payload: P,
}

impl<P> Action<P> {
    /// Create an action with the given type and payload.
    pub fn with_payload(kind: impl Into<String>, payload: P) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// The action type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The payload fields.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Split into `(type, payload)`.
    pub fn split(self) -> (String, P) {
        (self.kind, self.payload)
    }
}

impl Action<Payload> {
    /// Create an action with an empty JSON payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self::with_payload(kind, Payload::new())
    }

    /// Add a payload field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}
