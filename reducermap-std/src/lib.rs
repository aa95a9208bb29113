//! # reducermap-std
//!
//! Standard implementations for the reducermap state-transition engine.
//!
//! This crate provides:
//! - **Engine**: [`Engine`] runs one `pre` → handlers → `post` cycle
//! - **Container**: [`Store`], an in-memory state holder with a FIFO dispatch queue
//! - **Standard hooks**: [`LoggingHook`](hooks::LoggingHook)
//! - **Testing**: recording and counting handlers
//! - **Construction**: the [`handler_map!`] macro

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use reducermap_core;

#[doc(hidden)]
pub use serde_json;

// Modules
pub mod engine;
pub mod hooks;
mod macros;
pub mod store;
pub mod testing;

pub use engine::Engine;
pub use store::Store;
