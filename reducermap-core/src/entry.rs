//! Handler-map entries.
//!
//! Entries are tagged once, when they are registered. Typed registration
//! (closures, [`SharedHandler`]s, options maps) always yields a well-formed
//! shape; entries converted from raw JSON keep the [`ValueKind`] of whatever
//! was found, so the fault raised at dispatch can name it.

use crate::{
    action::Payload,
    error::ValueKind,
    handler::SharedHandler,
    meta::Options,
};
use serde_json::Value;
use std::fmt;

/// The handler registration for one action type.
pub enum HandlerEntry<S, P = Payload> {
    /// A single handler.
    Single(SharedHandler<S, P>),
    /// An ordered sequence, run left to right against the running state.
    Sequence(Vec<Element<S, P>>),
    /// A malformed entry of the given kind.
    Invalid(ValueKind),
}

/// One element of a [`HandlerEntry::Sequence`].
pub enum Element<S, P = Payload> {
    /// A bare handler. It binds to an immediately following options object.
    Handler(SharedHandler<S, P>),
    /// A handler paired with its own options value.
    Tuple(SharedHandler<S, P>, Value),
    /// A bare options object, bound to the preceding bare handler.
    Options(Options),
    /// An unclassified JSON value.
    Raw(Value),
    /// An unfilled slot.
    Vacant,
}

impl<S, P> HandlerEntry<S, P> {
    /// The kind this entry presents as.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Single(_) => ValueKind::Function,
            Self::Sequence(_) => ValueKind::Array,
            Self::Invalid(kind) => *kind,
        }
    }
}

impl<S, P> Element<S, P> {
    /// Pair a handler with an options value.
    pub fn tuple(handler: SharedHandler<S, P>, options: impl Into<Value>) -> Self {
        Self::Tuple(handler, options.into())
    }

    /// The kind this element presents as.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Handler(_) => ValueKind::Function,
            Self::Tuple(..) => ValueKind::Array,
            Self::Options(_) => ValueKind::Object,
            Self::Raw(value) => ValueKind::of(value),
            Self::Vacant => ValueKind::Undefined,
        }
    }
}

impl<S, P> From<SharedHandler<S, P>> for HandlerEntry<S, P> {
    fn from(handler: SharedHandler<S, P>) -> Self {
        Self::Single(handler)
    }
}

impl<S, P> From<Vec<Element<S, P>>> for HandlerEntry<S, P> {
    fn from(elements: Vec<Element<S, P>>) -> Self {
        Self::Sequence(elements)
    }
}

/// A JSON array becomes a sequence of raw elements; any other value is
/// malformed.
impl<S, P> From<Value> for HandlerEntry<S, P> {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.into_iter().map(Element::from).collect()),
            other => Self::Invalid(ValueKind::of(&other)),
        }
    }
}

impl<S, P> From<SharedHandler<S, P>> for Element<S, P> {
    fn from(handler: SharedHandler<S, P>) -> Self {
        Self::Handler(handler)
    }
}

impl<S, P> From<Options> for Element<S, P> {
    fn from(options: Options) -> Self {
        Self::Options(options)
    }
}

/// A JSON object becomes an options element; any other value stays raw.
impl<S, P> From<Value> for Element<S, P> {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(options) => Self::Options(options),
            other => Self::Raw(other),
        }
    }
}

impl<S, P> fmt::Debug for HandlerEntry<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Single(<handler>)"),
            Self::Sequence(elements) => f.debug_tuple("Sequence").field(elements).finish(),
            Self::Invalid(kind) => f.debug_tuple("Invalid").field(kind).finish(),
        }
    }
}

impl<S, P> fmt::Debug for Element<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(<handler>)"),
            Self::Tuple(_, options) => f.debug_tuple("Tuple").field(&"<handler>").field(options).finish(),
            Self::Options(options) => f.debug_tuple("Options").field(options).finish(),
            Self::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
            Self::Vacant => f.write_str("Vacant"),
        }
    }
}
