//! `handler_map!` through the facade, and the logging interceptor.

use reducermap::{
    Action, HandlerMap, Meta, Payload, State, Store, handler_map, hooks::LoggingHook,
    testing::RecordingHandler,
};
use serde_json::{Value, json};
use std::sync::Arc;

mod common;
use common::{increment, int, object};

fn clamp(s: &State, _: &Payload, m: &Meta<'_>) -> State {
    let max = m
        .helpers()
        .and_then(|h| h.get("max"))
        .and_then(Value::as_i64)
        .unwrap_or(i64::MAX);
    object(json!({"n": int(s, "n").min(max)}))
}

#[test]
fn test_macro_map_drives_a_store() {
    let audit = RecordingHandler::<State>::new();
    let recorded = audit.shared();
    let map: HandlerMap<State> = handler_map! {
        post => increment("cycles"),
        "inc" => [increment("n"), increment("n"), clamp, { "max": 3 }],
        "audit" => move |s: &State, p: &Payload, m: &Meta<'_>| recorded.call(s, p, m),
    };
    let mut store = Store::new(map, State::new());

    store.dispatch(Action::new("inc")).unwrap();
    let state = store.dispatch(Action::new("inc")).unwrap();
    assert_eq!(int(state, "n"), 3);
    assert_eq!(int(state, "cycles"), 2);

    store.dispatch(Action::new("audit").field("who", "ops")).unwrap();
    let invocations = audit.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].payload["who"], json!("ops"));
    assert_eq!(int(&invocations[0].state, "n"), 3);
}

#[test]
fn test_logging_hook_leaves_state_unchanged() {
    let map = HandlerMap::<State>::builder()
        .pre_handler(Arc::new(LoggingHook::named("audit")))
        .post_handler(Arc::new(LoggingHook::new()))
        .on("inc", increment("n"))
        .build();
    let mut store = Store::new(map, object(json!({"keep": true})));

    let state = store.dispatch(Action::new("inc")).unwrap();
    assert_eq!(Value::Object(state.clone()), json!({"keep": true, "n": 1}));
}
