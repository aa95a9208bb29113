//! Standard interceptors for the `pre`/`post` slots.

pub mod logging;

pub use logging::LoggingHook;
