//! # Handler Resolver
//!
//! Classifies the entry registered for an action type and turns it into an
//! ordered execution [`Plan`].
//!
//! Sequences are walked left to right by a [`Stacker`], a small state machine
//! with a one-slot pending-handler stack:
//!
//! - a bare handler flushes whatever is pending, then becomes pending itself
//!   (it may still bind to a following options object);
//! - a tuple flushes whatever is pending, then runs with its own options;
//! - a bare options object pops the pending handler and runs with it; with
//!   nothing pending it is an [`InvalidHandlerType`] fault;
//! - anything left pending after the last element is flushed.
//!
//! This lets an author write `[h1, h2]` for two independent handlers, or
//! `[h1, options_for_h1, h2]` to configure only the handler that needs it.
//!
//! Planning never runs a handler, so a malformed sequence aborts its cycle
//! before any of its handlers has executed.
//!
//! [`InvalidHandlerType`]: ReducerError::InvalidHandlerType

use crate::{
    action::Payload,
    entry::{Element, HandlerEntry},
    error::{ReducerError, ValueKind},
    handler::SharedHandler,
    meta::Options,
};
use serde_json::Value;

/// One planned invocation: a handler plus the options bound to it.
pub struct Step<'a, S, P = Payload> {
    handler: &'a SharedHandler<S, P>,
    helpers: Option<&'a Options>,
}

impl<'a, S, P> Step<'a, S, P> {
    /// The handler to invoke.
    pub fn handler(&self) -> &'a SharedHandler<S, P> {
        self.handler
    }

    /// The options object surfaced as `meta.helpers`.
    pub fn helpers(&self) -> Option<&'a Options> {
        self.helpers
    }
}

/// The ordered steps of one entry.
pub type Plan<'a, S, P = Payload> = Vec<Step<'a, S, P>>;

/// The pairing state machine over a handler sequence.
pub struct Stacker<'a, S, P = Payload> {
    pending: Option<&'a SharedHandler<S, P>>,
    steps: Plan<'a, S, P>,
}

impl<'a, S, P> Stacker<'a, S, P> {
    /// Create an empty stacker.
    pub fn new() -> Self {
        Self {
            pending: None,
            steps: Vec::new(),
        }
    }

    /// Whether a bare handler is waiting for a possible options object.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Emit the pending handler, if any, as a solo step.
    pub fn flush(&mut self) {
        if let Some(handler) = self.pending.take() {
            self.steps.push(Step {
                handler,
                helpers: None,
            });
        }
    }

    /// Stage a bare handler.
    pub fn push_handler(&mut self, handler: &'a SharedHandler<S, P>) {
        self.flush();
        self.pending = Some(handler);
    }

    /// Emit a handler with its own options value.
    pub fn push_tuple(
        &mut self,
        handler: &'a SharedHandler<S, P>,
        options: &'a Value,
    ) -> Result<(), ReducerError> {
        self.flush();
        let helpers = as_options(options)?;
        self.steps.push(Step {
            handler,
            helpers: Some(helpers),
        });
        Ok(())
    }

    /// Bind an options object to the pending handler.
    pub fn bind_options(&mut self, options: &'a Options) -> Result<(), ReducerError> {
        let handler = self
            .pending
            .take()
            .ok_or(ReducerError::InvalidHandlerType(ValueKind::Object))?;
        self.steps.push(Step {
            handler,
            helpers: Some(options),
        });
        Ok(())
    }

    /// Flush and return the plan.
    pub fn finish(mut self) -> Plan<'a, S, P> {
        self.flush();
        self.steps
    }
}

impl<S, P> Default for Stacker<'_, S, P> {
    fn default() -> Self {
        Self::new()
    }
}

fn as_options(value: &Value) -> Result<&Options, ReducerError> {
    match value {
        Value::Object(options) => Ok(options),
        other => Err(ReducerError::InvalidHelperType(ValueKind::of(other))),
    }
}

/// Plan a sequence entry.
pub fn plan_sequence<'a, S, P>(
    kind: &str,
    elements: &'a [Element<S, P>],
) -> Result<Plan<'a, S, P>, ReducerError> {
    if elements.is_empty() {
        return Err(ReducerError::NoActionHandler(kind.to_string()));
    }

    let mut stacker = Stacker::new();
    for element in elements {
        match element {
            Element::Handler(handler) => stacker.push_handler(handler),
            Element::Tuple(handler, options) => stacker.push_tuple(handler, options)?,
            Element::Options(options) => stacker.bind_options(options)?,
            Element::Raw(Value::Object(options)) => stacker.bind_options(options)?,
            // A raw array is a tuple whose head was never a handler.
            Element::Raw(Value::Array(items)) => {
                let head = items.first().map_or(ValueKind::Undefined, ValueKind::of);
                return Err(ReducerError::InvalidHandlerType(head));
            }
            Element::Raw(other) => {
                return Err(ReducerError::InvalidHandlerType(ValueKind::of(other)));
            }
            Element::Vacant => return Err(ReducerError::NoActionHandler(kind.to_string())),
        }
    }
    Ok(stacker.finish())
}

/// Plan the entry registered for `kind`.
pub fn resolve<'a, S, P>(
    kind: &str,
    entry: Option<&'a HandlerEntry<S, P>>,
) -> Result<Plan<'a, S, P>, ReducerError> {
    match entry {
        None => Err(ReducerError::NoActionHandler(kind.to_string())),
        Some(HandlerEntry::Single(handler)) => Ok(vec![Step {
            handler,
            helpers: None,
        }]),
        Some(HandlerEntry::Sequence(elements)) => plan_sequence(kind, elements),
        Some(HandlerEntry::Invalid(observed)) => Err(ReducerError::InvalidHandlerType(*observed)),
    }
}
