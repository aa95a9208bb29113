//! Per-cycle metadata and the stable dispatch reference.

use crate::action::{Action, Payload};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// An options object bound to a handler, surfaced as [`Meta::helpers`].
pub type Options = Map<String, Value>;

/// A cloneable handle that enqueues a new action cycle on the container.
///
/// Clones share identity: [`Dispatcher::same_as`] holds for every clone of
/// the handle a container hands out, across the container's lifetime.
/// Calling it never re-enters the engine; the container runs the queued
/// cycle after the current one finishes.
pub struct Dispatcher<P = Payload> {
    inner: Arc<dyn Fn(Action<P>) + Send + Sync>,
}

impl<P> Dispatcher<P> {
    /// Wrap an enqueue function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Action<P>) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Request a new cycle for `action`.
    pub fn dispatch(&self, action: Action<P>) {
        (self.inner)(action);
    }

    /// Whether both handles refer to the same dispatch function.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P> Clone for Dispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P> fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

/// Metadata handed to every handler and interceptor during one cycle.
///
/// `dispatch` is present only for type-scoped handlers; `pre` and `post`
/// never see it. `helpers` is present only for handlers invoked with an
/// options object.
#[derive(Debug)]
pub struct Meta<'a, P = Payload> {
    kind: &'a str,
    dispatch: Option<&'a Dispatcher<P>>,
    helpers: Option<&'a Options>,
}

impl<'a, P> Meta<'a, P> {
    /// Metadata for the `pre`/`post` interceptors: type only.
    pub const fn intercept(kind: &'a str) -> Self {
        Self {
            kind,
            dispatch: None,
            helpers: None,
        }
    }

    /// Metadata for a type-scoped handler.
    pub const fn scoped(kind: &'a str, dispatch: Option<&'a Dispatcher<P>>) -> Self {
        Self {
            kind,
            dispatch,
            helpers: None,
        }
    }

    /// A copy of this metadata carrying `helpers`.
    pub const fn with_helpers(&self, helpers: Option<&'a Options>) -> Self {
        Self {
            kind: self.kind,
            dispatch: self.dispatch,
            helpers,
        }
    }

    /// The action type of the current cycle.
    pub const fn kind(&self) -> &'a str {
        self.kind
    }

    /// The stable dispatch reference, if visible to this handler.
    pub const fn dispatch(&self) -> Option<&'a Dispatcher<P>> {
        self.dispatch
    }

    /// The options object bound to this invocation.
    pub const fn helpers(&self) -> Option<&'a Options> {
        self.helpers
    }
}
