//! # reducermap - Typed State-Transition Engine
//!
//! `reducermap` maps action types to handlers. Dispatching an action runs the
//! optional `pre` interceptor, the handlers registered for the action's type,
//! and the optional `post` interceptor, shallow-merging every partial result
//! into the next state.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reducermap::prelude::*;
//!
//! let map: HandlerMap<State> = handler_map! {
//!     "inc" => |s: &State, _: &Payload, _: &Meta<'_>| {
//!         let n = s.get("n").and_then(|v| v.as_i64()).unwrap_or(0);
//!         let mut partial = State::new();
//!         partial.insert("n".into(), (n + 1).into());
//!         partial
//!     },
//! };
//!
//! let mut store = Store::new(map, State::new());
//! store.dispatch(Action::new("inc"))?;
//! ```
//!
//! ## Handler Shapes
//!
//! An entry is a single handler or a sequence. In a sequence, an options
//! object binds to the bare handler right before it and reaches it as
//! `meta.helpers()`; a `(handler, options)` tuple carries its own options.
//!
//! ## Reentrant Dispatch
//!
//! Type-scoped handlers receive the container's stable [`Dispatcher`] through
//! `meta.dispatch()`. Dispatching from a handler queues a new cycle that runs
//! after the current one; `pre` and `post` never receive it.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use reducermap_core::{
    // Actions
    Action,
    // Errors
    BoxError,
    // Meta
    Dispatcher,
    // Entries
    Element,
    // Handlers
    Handler,
    HandlerEntry,
    // Map
    HandlerMap,
    HandlerMapBuilder,
    IntoPartial,
    // State
    Merge,
    Meta,
    Options,
    Payload,
    // Resolution
    Plan,
    ReducerError,
    SharedHandler,
    Stacker,
    State,
    Step,
    ValueKind,
    handler,
};

pub use reducermap_std::{Engine, Store, handler_map};

/// Handler resolution: the options-pairing state machine and planning.
pub mod resolver {
    pub use reducermap_core::resolver::{Plan, Stacker, Step, plan_sequence, resolve};
}

/// Standard interceptors.
pub mod hooks {
    pub use reducermap_std::hooks::LoggingHook;
}

/// Testing utilities.
pub mod testing {
    pub use reducermap_std::testing::{CountingHandler, Invocation, RecordingHandler};
}

/// Prelude module - common imports for reducermap.
///
/// # Usage
///
/// ```rust,ignore
/// use reducermap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Action, Dispatcher, Element, Engine, HandlerEntry, HandlerMap, Meta, Payload,
        ReducerError, State, Store, handler, handler_map,
    };
}
