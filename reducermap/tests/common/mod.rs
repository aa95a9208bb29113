#![allow(dead_code)]

use reducermap::{Action, Engine, HandlerMap, Meta, Payload, ReducerError, State};
use serde_json::Value;

// ============================================================================
// Fixtures
// ============================================================================

/// Unwrap a `json!` object literal into a state map.
pub fn object(value: Value) -> State {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Read an integer field, treating a missing field as zero.
pub fn int(state: &State, key: &str) -> i64 {
    state.get(key).and_then(Value::as_i64).unwrap_or(0)
}

/// A handler that increments `key` by one.
pub fn increment(key: &'static str) -> impl Fn(&State, &Payload, &Meta<'_>) -> State {
    move |s: &State, _: &Payload, _: &Meta<'_>| {
        let mut partial = State::new();
        partial.insert(key.to_string(), Value::from(int(s, key) + 1));
        partial
    }
}

/// Run a single action of type `kind` against an empty state.
pub fn run_once(map: HandlerMap<State>, kind: &str) -> Result<State, ReducerError> {
    Engine::new(map).run(Some(&State::new()), Action::new(kind))
}

/// The error message of a cycle that must fault.
pub fn fault_message(result: Result<State, ReducerError>) -> String {
    match result {
        Ok(state) => panic!("expected a fault, got state {state:?}"),
        Err(err) => err.to_string(),
    }
}
