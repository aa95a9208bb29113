//! Declarative construction of handler maps.

/// Construct a [`HandlerMap`] from action types and handlers.
///
/// - `"type" => handler` registers a single handler (closure or fn item).
/// - `"type" => [h1, { "step": 2 }, h2, (h3, { "mode": "x" })]` registers a
///   sequence. A bare `{ ... }` is a JSON options object bound to the handler
///   right before it; `(handler, { ... })` pairs a handler with its own
///   options.
/// - `pre => handler` and `post => handler` set the interceptors.
///
/// # Example
/// ```ignore
/// let map: HandlerMap<State> = handler_map! {
///     pre => count_cycles,
///     "add" => [add, { "by": 2 }, clamp],
///     "reset" => |_: &State, _: &Payload, _: &Meta<'_>| State::new(),
/// };
/// ```
///
/// [`HandlerMap`]: crate::reducermap_core::HandlerMap
#[macro_export]
macro_rules! handler_map {
    (@entries $builder:expr; ) => { $builder.build() };
    (@entries $builder:expr; pre => $pre:expr $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @entries $builder.pre_handler($crate::reducermap_core::handler($pre));
            $($($rest)*)?
        )
    };
    (@entries $builder:expr; post => $post:expr $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @entries $builder.post_handler($crate::reducermap_core::handler($post));
            $($($rest)*)?
        )
    };
    (@entries $builder:expr; $kind:literal => [$($seq:tt)*] $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @entries $builder.sequence($kind, $crate::handler_map!(@seq [] $($seq)*));
            $($($rest)*)?
        )
    };
    (@entries $builder:expr; $kind:literal => $handler:expr $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @entries $builder.entry($kind, $crate::reducermap_core::handler($handler));
            $($($rest)*)?
        )
    };

    (@seq [$($done:expr),*]) => { ::std::vec![$($done),*] };
    (@seq [$($done:expr),*] { $($json:tt)* } $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @seq [$($done,)* $crate::reducermap_core::Element::from(
                $crate::serde_json::json!({ $($json)* })
            )]
            $($($rest)*)?
        )
    };
    (@seq [$($done:expr),*] ($handler:expr, { $($json:tt)* }) $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @seq [$($done,)* $crate::reducermap_core::Element::tuple(
                $crate::reducermap_core::handler($handler),
                $crate::serde_json::json!({ $($json)* }),
            )]
            $($($rest)*)?
        )
    };
    (@seq [$($done:expr),*] $handler:expr $(, $($rest:tt)*)?) => {
        $crate::handler_map!(
            @seq [$($done,)* $crate::reducermap_core::Element::Handler(
                $crate::reducermap_core::handler($handler)
            )]
            $($($rest)*)?
        )
    };

    ($($body:tt)*) => {
        $crate::handler_map!(@entries $crate::reducermap_core::HandlerMap::builder(); $($body)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use reducermap_core::{Action, HandlerMap, Meta, Payload, State};
    use serde_json::{Value, json};

    fn bump(s: &State, _: &Payload, m: &Meta<'_>) -> State {
        let by = m
            .helpers()
            .and_then(|h| h.get("by"))
            .and_then(Value::as_i64)
            .unwrap_or(1);
        let n = s.get("n").and_then(Value::as_i64).unwrap_or(0);
        let mut partial = State::new();
        partial.insert("n".into(), json!(n + by));
        partial
    }

    #[test]
    fn test_handler_map_macro() {
        let map: HandlerMap<State> = crate::handler_map! {
            post => |s: &State, _: &Payload, _: &Meta<'_>| {
                let mut partial = State::new();
                partial.insert("keys".into(), json!(s.len()));
                partial
            },
            "one" => bump,
            "seq" => [bump, { "by": 10 }, bump, (bump, { "by": 100 })],
        };

        assert_eq!(map.kinds(), vec!["one", "seq"]);
        assert!(map.pre().is_none());
        assert!(map.validate().is_ok());

        let engine = Engine::new(map);
        let next = engine.run(None, Action::new("seq")).unwrap();
        assert_eq!(Value::Object(next), json!({"n": 111, "keys": 1}));
    }

    #[test]
    fn test_handler_map_macro_empty() {
        let map: HandlerMap<State> = crate::handler_map! {};
        assert!(map.is_empty());
    }
}
