//! # reducermap-core
//!
//! Core types for the reducermap state-transition engine.
//!
//! This crate holds the data model and the handler-resolution algorithm. It
//! has no engine loop and no container; those live in `reducermap-std`.
//!
//! # Data Model
//!
//! - [`Action`] - a `type` discriminator plus payload fields
//! - [`Handler`] - `(state, payload, meta) -> partial state`
//! - [`Meta`] - per-cycle metadata: type, [`Dispatcher`], helpers
//! - [`HandlerEntry`] / [`Element`] - the tagged shapes a handler map holds
//! - [`HandlerMap`] - entries keyed by action type plus `pre`/`post`
//! - [`Merge`] - shallow-merge contract for state
//!
//! # Resolution
//!
//! [`resolver::resolve`] turns an entry into an ordered [`Plan`], pairing
//! bare options objects with the handler immediately before them.
//!
//! # Error Types
//!
//! - [`ReducerError`] - every cycle-aborting fault
//! - [`ValueKind`] - the observed kind named by shape faults

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod entry;
mod error;
mod handler;
mod map;
mod meta;
pub mod resolver;
mod state;

// Re-exports
pub use action::{Action, Payload};
pub use entry::{Element, HandlerEntry};
pub use error::{BoxError, ReducerError, ValueKind};
pub use handler::{Handler, IntoPartial, SharedHandler, handler};
pub use map::{HandlerMap, HandlerMapBuilder};
pub use meta::{Dispatcher, Meta, Options};
pub use resolver::{Plan, Stacker, Step};
pub use state::{Merge, State};
