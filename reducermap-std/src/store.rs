//! In-memory state container.
//!
//! [`Store`] holds the last committed state, owns the FIFO queue behind its
//! stable [`Dispatcher`], and feeds queued actions to the [`Engine`] one
//! cycle at a time. A handler that dispatches never re-enters the engine:
//! its action waits in the queue until the current cycle has finished.
//!
//! Each cycle commits on its own. When a cycle faults, nothing from it is
//! committed, the rest of the queue is dropped, and the fault is returned.

use crate::engine::Engine;
use reducermap_core::{Action, Dispatcher, HandlerMap, Merge, Payload, ReducerError};
use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

type Queue<P> = Arc<Mutex<VecDeque<Action<P>>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A container pairing the current state with a stable dispatch function.
///
/// # Example
/// ```ignore
/// let mut store = Store::create(Some(map), Some(State::new()))?;
/// store.dispatch(Action::new("a"))?;
/// let dispatch = store.dispatcher();
/// ```
pub struct Store<S, P = Payload> {
    engine: Engine<S, P>,
    state: Option<S>,
    queue: Queue<P>,
    dispatcher: Dispatcher<P>,
}

impl<S: Merge, P: Send + 'static> Store<S, P> {
    /// Create a store, faulting with [`ReducerError::ActionMapUndefined`]
    /// when no map is supplied. An absent initial state stays absent until
    /// the first cycle commits.
    pub fn create(map: Option<HandlerMap<S, P>>, initial: Option<S>) -> Result<Self, ReducerError> {
        let engine = Engine::create(map)?;
        Ok(Self::from_engine(engine, initial))
    }

    /// Create a store over `map` starting from `initial`.
    pub fn new(map: HandlerMap<S, P>, initial: S) -> Self {
        Self::from_engine(Engine::new(map), Some(initial))
    }

    fn from_engine(engine: Engine<S, P>, initial: Option<S>) -> Self {
        let queue: Queue<P> = Arc::new(Mutex::new(VecDeque::new()));
        let sink = queue.clone();
        let dispatcher = Dispatcher::new(move |action| lock(&sink).push_back(action));
        Self {
            engine: engine.with_dispatcher(dispatcher.clone()),
            state: initial,
            queue,
            dispatcher,
        }
    }

    /// The last committed state.
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    /// The stable dispatch reference. Every call returns the same identity.
    ///
    /// Actions sent through a detached handle are queued until the next
    /// [`Store::dispatch`] or [`Store::flush`].
    pub fn dispatcher(&self) -> Dispatcher<P> {
        self.dispatcher.clone()
    }

    /// The engine running this store's cycles.
    pub fn engine(&self) -> &Engine<S, P> {
        &self.engine
    }

    /// Get the number of queued actions.
    pub fn pending(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Dispatch an action and run every cycle it causes.
    pub fn dispatch(&mut self, action: Action<P>) -> Result<&S, ReducerError> {
        self.dispatcher.dispatch(action);
        self.flush()?;
        // At least one cycle has committed, so the state is present.
        Ok(self.state.get_or_insert_with(S::default))
    }

    /// Run queued cycles until the queue is empty, returning how many
    /// committed.
    pub fn flush(&mut self) -> Result<usize, ReducerError> {
        let mut committed = 0;
        while let Some(action) = self.next_queued() {
            match self.engine.run(self.state.as_ref(), action) {
                Ok(next) => {
                    self.state = Some(next);
                    committed += 1;
                }
                Err(err) => {
                    let dropped = {
                        let mut queue = lock(&self.queue);
                        let dropped = queue.len();
                        queue.clear();
                        dropped
                    };

                    #[cfg(feature = "tracing")]
                    {
                        tracing::warn!(
                            committed,
                            dropped,
                            shape_fault = err.is_shape_fault(),
                            error = %err,
                            "dispatch queue discarded"
                        );
                    }
                    #[cfg(not(feature = "tracing"))]
                    {
                        let _ = dropped;
                    }

                    return Err(err);
                }
            }
        }
        Ok(committed)
    }

    fn next_queued(&self) -> Option<Action<P>> {
        lock(&self.queue).pop_front()
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Store<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("engine", &self.engine)
            .field("state", &self.state)
            .field("pending", &lock(&self.queue).len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reducermap_core::{Element, Meta, State, handler};
    use serde_json::{Value, json};

    fn object(value: Value) -> State {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn counter() -> HandlerMap<State> {
        HandlerMap::builder()
            .on("inc", |s: &State, _: &Payload, _: &Meta<'_>| {
                let n = s.get("n").and_then(Value::as_i64).unwrap_or(0);
                object(json!({"n": n + 1}))
            })
            .on("fail", |_: &State, _: &Payload, _: &Meta<'_>| {
                Err::<State, _>(std::io::Error::other("intentional failure"))
            })
            .build()
    }

    #[test]
    fn test_create_without_map() {
        let err = Store::<State>::create(None, None).unwrap_err();
        assert_eq!(err.to_string(), "ActionMap is not defined");
    }

    #[test]
    fn test_absent_initial_state() {
        let mut store = Store::create(Some(counter()), None).unwrap();
        assert!(store.state().is_none());
        let state = store.dispatch(Action::new("inc")).unwrap();
        assert_eq!(Value::Object(state.clone()), json!({"n": 1}));
    }

    #[test]
    fn test_fault_keeps_last_committed_state() {
        let mut store = Store::new(counter(), State::new());
        store.dispatch(Action::new("inc")).unwrap();
        assert!(store.dispatch(Action::new("fail")).is_err());
        assert!(store.dispatch(Action::new("missing")).is_err());
        assert_eq!(store.state().cloned().map(Value::Object), Some(json!({"n": 1})));
    }

    #[test]
    fn test_detached_dispatcher_queues_until_flush() {
        let mut store = Store::new(counter(), State::new());
        let dispatch = store.dispatcher();
        dispatch.dispatch(Action::new("inc"));
        dispatch.dispatch(Action::new("inc"));
        assert_eq!(store.pending(), 2);
        assert_eq!(store.flush().unwrap(), 2);
        assert_eq!(store.pending(), 0);
        assert!(store.dispatcher().same_as(&dispatch));
        assert_eq!(store.state().cloned().map(Value::Object), Some(json!({"n": 2})));
    }

    #[test]
    fn test_faulting_sequence_commits_nothing() {
        let map = HandlerMap::builder()
            .sequence(
                "a",
                vec![
                    Element::Handler(handler(|_: &State, _: &Payload, m: &Meta<'_>| {
                        if let Some(dispatch) = m.dispatch() {
                            dispatch.dispatch(Action::new("b"));
                        }
                        object(json!({"x": 1}))
                    })),
                    Element::Handler(handler(|_: &State, _: &Payload, _: &Meta<'_>| {
                        Err::<State, _>(std::io::Error::other("second step failed"))
                    })),
                ],
            )
            .on("b", |_: &State, _: &Payload, _: &Meta<'_>| object(json!({"b": true})))
            .build();
        let mut store = Store::new(map, State::new());

        let err = store.dispatch(Action::new("a")).unwrap_err();
        assert!(matches!(&err, ReducerError::Handler { kind, .. } if kind == "a"));
        assert!(!err.is_shape_fault());
        assert_eq!(store.pending(), 0);
        assert_eq!(store.state().cloned().map(Value::Object), Some(json!({})));
    }

    #[test]
    fn test_fault_discards_remaining_queue() {
        let mut store = Store::new(counter(), State::new());
        let dispatch = store.dispatcher();
        dispatch.dispatch(Action::new("inc"));
        dispatch.dispatch(Action::new("fail"));
        dispatch.dispatch(Action::new("inc"));
        assert!(store.flush().is_err());
        assert_eq!(store.pending(), 0);
        assert_eq!(store.state().cloned().map(Value::Object), Some(json!({"n": 1})));
    }
}
