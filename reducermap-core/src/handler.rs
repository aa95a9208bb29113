//! # Handlers
//!
//! A handler maps `(state, payload, meta)` to a partial state update. It
//! receives shared references only: the running state is never mutated in
//! place, the engine merges the returned partial into its own accumulator.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|state: &State, payload: &Payload, meta: &Meta<'_>| { ... }`
//! 2. **Struct implementation**: `impl Handler<State, Payload> for MyHandler`
//!
//! The return value only has to implement [`IntoPartial`], so a closure may
//! return the partial itself, `Option<S>`, `()` or a `Result`.

use crate::{
    action::Payload,
    error::BoxError,
    meta::Meta,
    state::{Merge, State},
};
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
    sync::Arc,
};

/// Conversion of a handler's return value into a partial state update.
///
/// # Default Implementations
///
/// - `S` → merged as is
/// - `Option<S>` → `None` leaves the state unchanged
/// - `()` → leaves the state unchanged
/// - `Result<T, E>` → delegates to `T` or aborts the cycle with `E`
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be merged into state `{S}`",
    label = "missing `IntoPartial<{S}>` implementation",
    note = "Handlers must return the state type, an Option or Result of it, or `()`."
)]
pub trait IntoPartial<S> {
    /// Convert into the partial update, or the handler's error.
    fn into_partial(self) -> Result<S, BoxError>;
}

macro_rules! impl_into_partial_for_state {
    ($($state:ty),* $(,)?) => {
        $(
            impl IntoPartial<$state> for $state {
                fn into_partial(self) -> Result<$state, BoxError> {
                    Ok(self)
                }
            }
        )*
    };
}

impl_into_partial_for_state!(State);

impl<K, V> IntoPartial<HashMap<K, V>> for HashMap<K, V>
where
    HashMap<K, V>: Merge,
    K: Hash + Eq,
{
    fn into_partial(self) -> Result<HashMap<K, V>, BoxError> {
        Ok(self)
    }
}

impl<K, V> IntoPartial<BTreeMap<K, V>> for BTreeMap<K, V>
where
    BTreeMap<K, V>: Merge,
    K: Ord,
{
    fn into_partial(self) -> Result<BTreeMap<K, V>, BoxError> {
        Ok(self)
    }
}

impl<S: Merge> IntoPartial<S> for () {
    fn into_partial(self) -> Result<S, BoxError> {
        Ok(S::default())
    }
}

impl<S: Merge> IntoPartial<S> for Option<S> {
    fn into_partial(self) -> Result<S, BoxError> {
        Ok(self.unwrap_or_default())
    }
}

impl<S, T, E> IntoPartial<S> for Result<T, E>
where
    T: IntoPartial<S>,
    E: Into<BoxError>,
{
    fn into_partial(self) -> Result<S, BoxError> {
        self.map_err(Into::into)?.into_partial()
    }
}

/// A state-transition handler.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle actions for state `{S}`",
    label = "missing `Handler<{S}, {P}>` implementation",
    note = "Handlers are `Fn(&S, &P, &Meta<P>) -> impl IntoPartial<S>`."
)]
pub trait Handler<S, P = Payload>: Send + Sync + 'static {
    /// Compute a partial update for the current cycle.
    fn call(&self, state: &S, payload: &P, meta: &Meta<'_, P>) -> Result<S, BoxError>;
}

// Blanket impl for closures
impl<S, P, F, R> Handler<S, P> for F
where
    F: Fn(&S, &P, &Meta<'_, P>) -> R + Send + Sync + 'static,
    R: IntoPartial<S>,
{
    fn call(&self, state: &S, payload: &P, meta: &Meta<'_, P>) -> Result<S, BoxError> {
        (self)(state, payload, meta).into_partial()
    }
}

/// A registered handler, shareable across the entries that reference it.
pub type SharedHandler<S, P = Payload> = Arc<dyn Handler<S, P>>;

/// Erase a closure or handler value into a [`SharedHandler`].
///
/// The explicit `Fn` bound lets closure parameter types be inferred.
pub fn handler<S, P, F, R>(f: F) -> SharedHandler<S, P>
where
    S: 'static,
    P: 'static,
    F: Fn(&S, &P, &Meta<'_, P>) -> R + Send + Sync + 'static,
    R: IntoPartial<S>,
{
    Arc::new(f)
}
