//! Handler map and its builder.
//!
//! The map is assembled once with [`HandlerMapBuilder`] and is read-only
//! afterwards, so it can be shared by reference with every cycle.

use crate::{
    action::Payload,
    entry::{Element, HandlerEntry},
    error::ReducerError,
    handler::{IntoPartial, SharedHandler, handler},
    meta::Meta,
    resolver,
};
use serde_json::Value;
use std::{collections::HashMap, fmt};

/// Handlers keyed by action type, plus the optional `pre`/`post` interceptors.
///
/// The interceptors are separate fields, so an action type named `"pre"` or
/// `"post"` is an ordinary entry.
///
/// # Example
/// ```ignore
/// let map = HandlerMap::builder()
///     .on("add", |s: &State, p: &Payload, _: &Meta<'_>| { ... })
///     .sequence("reset", vec![Element::Handler(clear), Element::from(json!({"keep": ["id"]}))])
///     .post(|s: &State, _: &Payload, _: &Meta<'_>| { ... })
///     .build();
/// ```
pub struct HandlerMap<S, P = Payload> {
    entries: HashMap<String, HandlerEntry<S, P>>,
    pre: Option<SharedHandler<S, P>>,
    post: Option<SharedHandler<S, P>>,
}

impl<S, P> HandlerMap<S, P> {
    /// Start building a map.
    pub fn builder() -> HandlerMapBuilder<S, P> {
        HandlerMapBuilder::new()
    }

    /// The entry registered for `kind`.
    pub fn get(&self, kind: &str) -> Option<&HandlerEntry<S, P>> {
        self.entries.get(kind)
    }

    /// The interceptor run before every cycle's handlers.
    pub fn pre(&self) -> Option<&SharedHandler<S, P>> {
        self.pre.as_ref()
    }

    /// The interceptor run after every cycle's handlers.
    pub fn post(&self) -> Option<&SharedHandler<S, P>> {
        self.post.as_ref()
    }

    /// Registered action types, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Get the number of registered action types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no action type is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plan every entry ahead of dispatch and report the first shape fault,
    /// in sorted action-type order.
    ///
    /// A map that validates can still fault at dispatch for unregistered
    /// action types.
    pub fn validate(&self) -> Result<(), ReducerError> {
        for kind in self.kinds() {
            resolver::resolve(kind, self.get(kind))?;
        }
        Ok(())
    }
}

impl<S, P> fmt::Debug for HandlerMap<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMap")
            .field("kinds", &self.kinds())
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .finish()
    }
}

/// Builder for constructing a [`HandlerMap`].
///
/// Registering the same action type twice keeps the later entry.
pub struct HandlerMapBuilder<S, P = Payload> {
    entries: HashMap<String, HandlerEntry<S, P>>,
    pre: Option<SharedHandler<S, P>>,
    post: Option<SharedHandler<S, P>>,
}

impl<S, P> HandlerMapBuilder<S, P> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            pre: None,
            post: None,
        }
    }

    /// Register an entry (mutable version).
    pub fn insert(&mut self, kind: impl Into<String>, entry: impl Into<HandlerEntry<S, P>>) {
        self.entries.insert(kind.into(), entry.into());
    }

    /// Register an entry.
    pub fn entry(mut self, kind: impl Into<String>, entry: impl Into<HandlerEntry<S, P>>) -> Self {
        self.insert(kind, entry);
        self
    }

    /// Register a sequence of elements.
    pub fn sequence(self, kind: impl Into<String>, elements: Vec<Element<S, P>>) -> Self {
        self.entry(kind, HandlerEntry::Sequence(elements))
    }

    /// Register an entry described by a raw JSON value.
    ///
    /// Arrays become sequences of raw elements; anything else is a
    /// malformed entry that faults when dispatched.
    pub fn entry_value(self, kind: impl Into<String>, value: Value) -> Self {
        self.entry(kind, HandlerEntry::from(value))
    }

    /// Set the `pre` interceptor from a shared handler.
    pub fn pre_handler(mut self, pre: SharedHandler<S, P>) -> Self {
        self.pre = Some(pre);
        self
    }

    /// Set the `post` interceptor from a shared handler.
    pub fn post_handler(mut self, post: SharedHandler<S, P>) -> Self {
        self.post = Some(post);
        self
    }

    /// Build the immutable map.
    pub fn build(self) -> HandlerMap<S, P> {
        HandlerMap {
            entries: self.entries,
            pre: self.pre,
            post: self.post,
        }
    }

    /// Build the map, rejecting it if any entry is malformed.
    pub fn build_validated(self) -> Result<HandlerMap<S, P>, ReducerError> {
        let map = self.build();
        map.validate()?;
        Ok(map)
    }
}

impl<S: 'static, P: 'static> HandlerMapBuilder<S, P> {
    /// Register a single closure handler.
    pub fn on<F, R>(self, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(&S, &P, &Meta<'_, P>) -> R + Send + Sync + 'static,
        R: IntoPartial<S>,
    {
        self.entry(kind, handler(f))
    }

    /// Set the `pre` interceptor. It never sees `meta.dispatch`.
    pub fn pre<F, R>(self, f: F) -> Self
    where
        F: Fn(&S, &P, &Meta<'_, P>) -> R + Send + Sync + 'static,
        R: IntoPartial<S>,
    {
        self.pre_handler(handler(f))
    }

    /// Set the `post` interceptor. It never sees `meta.dispatch`.
    pub fn post<F, R>(self, f: F) -> Self
    where
        F: Fn(&S, &P, &Meta<'_, P>) -> R + Send + Sync + 'static,
        R: IntoPartial<S>,
    {
        self.post_handler(handler(f))
    }
}

impl<S, P> Default for HandlerMapBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
