//! Shallow-merge state accumulation.

use serde_json::{Map, Value};
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// The default state type: a JSON object.
pub type State = Map<String, Value>;

/// A map-shaped state that partial updates can be shallow-merged into.
///
/// A partial update has the same type as the state. Every top-level key of
/// the partial overwrites the same key of the state; all other keys are kept.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as reducer state",
    label = "missing `Merge` implementation",
    note = "State must be a map-shaped type that partial updates can be merged into."
)]
pub trait Merge: Clone + Default + Send + Sync + 'static {
    /// Merge `partial` into `self`.
    fn merge(&mut self, partial: Self);
}

impl Merge for Map<String, Value> {
    fn merge(&mut self, partial: Self) {
        for (key, value) in partial {
            self.insert(key, value);
        }
    }
}

impl<K, V> Merge for HashMap<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn merge(&mut self, partial: Self) {
        self.extend(partial);
    }
}

impl<K, V> Merge for BTreeMap<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn merge(&mut self, partial: Self) {
        self.extend(partial);
    }
}
