//! Logging interceptor for cycle observation.

use reducermap_core::{BoxError, Handler, Merge, Meta};
use std::fmt::Debug;

/// An interceptor that logs every action and leaves the state unchanged.
///
/// It logs through `tracing` when the `tracing` feature is enabled and is a
/// no-op otherwise.
///
/// # Example
///
/// ```rust,ignore
/// let map = HandlerMap::builder()
///     .pre_handler(Arc::new(LoggingHook::named("before")))
///     .on("add", add)
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    name: &'static str,
}

impl LoggingHook {
    /// Create a new `LoggingHook` with a default name.
    pub const fn new() -> Self {
        Self { name: "reducer" }
    }

    /// Create a new `LoggingHook` with a custom name.
    ///
    /// The name identifies the interceptor slot in log records.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log records.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> Handler<S, P> for LoggingHook
where
    S: Merge,
    P: Debug + Send + Sync + 'static,
{
    fn call(&self, _state: &S, payload: &P, meta: &Meta<'_, P>) -> Result<S, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, action = %meta.kind(), ?payload, "action observed");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (payload, meta);
        }

        Ok(S::default())
    }
}
