//! # Dispatch Engine
//!
//! Runs one full action cycle: `pre` interceptor, the planned handlers for
//! the action type, `post` interceptor. Every partial result is shallow-merged
//! into a cycle-local accumulator, so the caller's state is never touched and
//! a failed cycle has no visible effect.

use reducermap_core::{
    Action, Dispatcher, HandlerMap, Merge, Meta, Payload, ReducerError, SharedHandler, resolver,
};
use std::{fmt, sync::OnceLock};

/// The state-transition engine for one handler map.
///
/// # Example
/// ```ignore
/// let engine = Engine::new(map);
/// let next = engine.run(Some(&state), Action::new("add").field("amount", 2))?;
/// ```
pub struct Engine<S, P = Payload> {
    map: HandlerMap<S, P>,
    dispatcher: OnceLock<Dispatcher<P>>,
}

impl<S, P> Engine<S, P> {
    /// Create an engine over `map`.
    pub fn new(map: HandlerMap<S, P>) -> Self {
        Self {
            map,
            dispatcher: OnceLock::new(),
        }
    }

    /// Create an engine, faulting with [`ReducerError::ActionMapUndefined`]
    /// when no map is supplied.
    pub fn create(map: Option<HandlerMap<S, P>>) -> Result<Self, ReducerError> {
        map.map(Self::new).ok_or(ReducerError::ActionMapUndefined)
    }

    /// Bind the dispatch reference at construction.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher<P>) -> Self {
        self.dispatcher = OnceLock::from(dispatcher);
        self
    }

    /// Assign the stable dispatch reference handed to type-scoped handlers.
    ///
    /// The reference can be assigned once; a second call hands the rejected
    /// dispatcher back.
    pub fn attach(&self, dispatcher: Dispatcher<P>) -> Result<(), Dispatcher<P>> {
        self.dispatcher.set(dispatcher)
    }

    /// The attached dispatch reference.
    pub fn dispatcher(&self) -> Option<&Dispatcher<P>> {
        self.dispatcher.get()
    }

    /// The handler map.
    pub fn map(&self) -> &HandlerMap<S, P> {
        &self.map
    }
}

impl<S: Merge, P: 'static> Engine<S, P> {
    /// Run one cycle and return the next state.
    ///
    /// An absent `state` starts the cycle from `S::default()`.
    pub fn run(&self, state: Option<&S>, action: Action<P>) -> Result<S, ReducerError> {
        let (kind, payload) = action.split();
        let start = state.cloned().unwrap_or_default();

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(action = %kind, "cycle started");
        }

        let result = self.cycle(&kind, &payload, start);

        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(_) => tracing::debug!(action = %kind, "cycle finished"),
                Err(err) => tracing::warn!(action = %kind, error = %err, "cycle aborted"),
            }
        }

        result
    }

    fn cycle(&self, kind: &str, payload: &P, mut state: S) -> Result<S, ReducerError> {
        if let Some(pre) = self.map.pre() {
            let partial = invoke(pre, &state, payload, &Meta::intercept(kind))?;
            state.merge(partial);
        }

        let meta = Meta::scoped(kind, self.dispatcher.get());
        let plan = resolver::resolve(kind, self.map.get(kind))?;

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(action = %kind, steps = plan.len(), "entry resolved");
        }

        for (_index, step) in plan.iter().enumerate() {
            #[cfg(feature = "tracing")]
            {
                tracing::trace!(action = %kind, step = _index, helpers = step.helpers().is_some(), "step");
            }

            let partial = invoke(
                step.handler(),
                &state,
                payload,
                &meta.with_helpers(step.helpers()),
            )?;
            state.merge(partial);
        }

        if let Some(post) = self.map.post() {
            let partial = invoke(post, &state, payload, &Meta::intercept(kind))?;
            state.merge(partial);
        }

        Ok(state)
    }
}

fn invoke<S: 'static, P: 'static>(
    handler: &SharedHandler<S, P>,
    state: &S,
    payload: &P,
    meta: &Meta<'_, P>,
) -> Result<S, ReducerError> {
    handler
        .call(state, payload, meta)
        .map_err(|source| ReducerError::Handler {
            kind: meta.kind().to_string(),
            source,
        })
}

impl<S, P> fmt::Debug for Engine<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("map", &self.map)
            .field("dispatcher", &self.dispatcher.get())
            .finish()
    }
}
