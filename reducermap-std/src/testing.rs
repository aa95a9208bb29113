//! Testing utilities for reducermap.
//!
//! - [`RecordingHandler`]: records every invocation and returns a fixed partial
//! - [`CountingHandler`]: counts invocations and leaves the state unchanged

use reducermap_core::{BoxError, Handler, Merge, Meta, Options, Payload, SharedHandler};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Recording Handler
// ============================================================================

/// What a handler saw during one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<S, P = Payload> {
    /// The action type from `meta`.
    pub kind: String,
    /// The running state passed in.
    pub state: S,
    /// The payload passed in.
    pub payload: P,
    /// The options object bound to this invocation.
    pub helpers: Option<Options>,
    /// Whether `meta.dispatch` was present.
    pub saw_dispatch: bool,
}

/// A handler that records every invocation.
///
/// Clones share the same log, so one clone can be registered while the
/// test keeps the other.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::returning(partial);
/// let map = HandlerMap::builder().entry("a", recorder.shared()).build();
///
/// // Run cycles...
///
/// assert_eq!(recorder.count(), 1);
/// assert!(recorder.invocations()[0].saw_dispatch);
/// ```
pub struct RecordingHandler<S, P = Payload> {
    invocations: Arc<Mutex<Vec<Invocation<S, P>>>>,
    partial: S,
}

impl<S: Merge, P> RecordingHandler<S, P> {
    /// Create a recording handler that leaves the state unchanged.
    pub fn new() -> Self {
        Self::returning(S::default())
    }

    /// Create a recording handler that returns `partial` every time.
    pub fn returning(partial: S) -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
            partial,
        }
    }
}

impl<S: Clone, P: Clone> RecordingHandler<S, P> {
    /// Get a clone of the recorded invocations.
    pub fn invocations(&self) -> Vec<Invocation<S, P>> {
        lock(&self.invocations).clone()
    }

    /// Get the number of recorded invocations.
    pub fn count(&self) -> usize {
        lock(&self.invocations).len()
    }

    /// Clear all recorded invocations.
    pub fn clear(&self) {
        lock(&self.invocations).clear();
    }
}

impl<S, P> RecordingHandler<S, P>
where
    S: Merge,
    P: Clone + Send + 'static,
{
    /// A shared handle for registration; it records into this handler's log.
    pub fn shared(&self) -> SharedHandler<S, P> {
        Arc::new(self.clone())
    }
}

impl<S: Merge, P> Default for RecordingHandler<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, P> Clone for RecordingHandler<S, P> {
    fn clone(&self) -> Self {
        Self {
            invocations: self.invocations.clone(),
            partial: self.partial.clone(),
        }
    }
}

impl<S, P> Handler<S, P> for RecordingHandler<S, P>
where
    S: Merge,
    P: Clone + Send + 'static,
{
    fn call(&self, state: &S, payload: &P, meta: &Meta<'_, P>) -> Result<S, BoxError> {
        lock(&self.invocations).push(Invocation {
            kind: meta.kind().to_string(),
            state: state.clone(),
            payload: payload.clone(),
            helpers: meta.helpers().cloned(),
            saw_dispatch: meta.dispatch().is_some(),
        });
        Ok(self.partial.clone())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let map = HandlerMap::builder().pre_handler(Arc::new(counter.clone())).build();
///
/// // Run cycles...
///
/// assert_eq!(counter.count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<S: Merge, P> Handler<S, P> for CountingHandler {
    fn call(&self, _state: &S, _payload: &P, _meta: &Meta<'_, P>) -> Result<S, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reducermap_core::State;
    use serde_json::{Value, json};

    #[test]
    fn test_recording_handler_shares_log_between_clones() {
        let mut partial = State::new();
        partial.insert("x".into(), json!(1));
        let recorder: RecordingHandler<State> = RecordingHandler::returning(partial);
        let registered = recorder.shared();

        let out = registered
            .call(&State::new(), &Payload::new(), &Meta::intercept("a"))
            .unwrap();

        assert_eq!(Value::Object(out), json!({"x": 1}));
        assert_eq!(recorder.count(), 1);
        let invocations = recorder.invocations();
        let seen = &invocations[0];
        assert_eq!(seen.kind, "a");
        assert!(!seen.saw_dispatch);
        assert!(seen.helpers.is_none());

        recorder.clear();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_counting_handler() {
        let counter = CountingHandler::new();
        let meta = Meta::intercept("a");
        for _ in 0..3 {
            let partial: State = counter.call(&State::new(), &Payload::new(), &meta).unwrap();
            assert!(partial.is_empty());
        }
        assert_eq!(counter.count(), 3);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}
