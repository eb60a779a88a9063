//! Store-bound dispatcher holding a state/dispatch strategy
//!
//! The free-function binders in [`bind`](crate::bind) receive their
//! dispatch and state accessors per call. Applications that own a single
//! store usually want to wire those up once; [`Dispatcher`] holds them
//! as a [`Strategy`] supplied at construction and exposes the same
//! operations against it.
//!
//! # Example
//!
//! ```ignore
//! use flux_bind_core::dispatcher::{Dispatcher, Strategy};
//!
//! let strategy = Strategy::new(
//!     move || store.state().clone(),
//!     move |action| { store.dispatch(action.clone()); action },
//! );
//! let dispatcher = Dispatcher::new(strategy);
//!
//! dispatcher
//!     .dispatch_future(
//!         |(id,): (u32,)| async move { api::fetch_user(id).await },
//!         "GET_USER",
//!         |state: &AppState| state.user_loading,
//!         (42,),
//!     )
//!     .await;
//! ```

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use crate::action::{create_action, Action, LifecycleType};
use crate::bind::{bind_callback, bind_future, BindConfig, Completion, Response};

/// Strategy for talking to the store layer.
///
/// `dispatch` returns the action it was given, so a pass-through
/// strategy composes with middleware-style wrappers.
pub struct Strategy<S> {
    get_state: Box<dyn Fn() -> S + Send + Sync>,
    dispatch: Box<dyn Fn(Action) -> Action + Send + Sync>,
}

impl<S> Strategy<S> {
    /// Create a strategy from state and dispatch accessors.
    pub fn new(
        get_state: impl Fn() -> S + Send + Sync + 'static,
        dispatch: impl Fn(Action) -> Action + Send + Sync + 'static,
    ) -> Self {
        Self {
            get_state: Box::new(get_state),
            dispatch: Box::new(dispatch),
        }
    }

    /// Read the current state.
    pub fn state(&self) -> S {
        (self.get_state)()
    }

    /// Send an action to the store layer.
    pub fn dispatch(&self, action: Action) -> Action {
        (self.dispatch)(action)
    }
}

impl<S: Default + 'static> Default for Strategy<S> {
    /// Default state and identity dispatch: nothing is considered
    /// loading unless the guard says otherwise, and dispatching has no
    /// effect beyond returning the action.
    fn default() -> Self {
        Self::new(S::default, |action| action)
    }
}

impl<S> std::fmt::Debug for Strategy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").finish_non_exhaustive()
    }
}

/// Action dispatcher bound to a [`Strategy`].
///
/// Semantics match the free-function binders, with the guard and
/// dispatch read from the held strategy instead of passed per call.
/// FAIL actions are flagged `error: true` by default; use
/// [`with_config`](Dispatcher::with_config) to opt out.
pub struct Dispatcher<S> {
    strategy: Strategy<S>,
    config: BindConfig,
}

impl<S: Default + 'static> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl<S> Dispatcher<S> {
    /// Create a dispatcher over a strategy.
    pub fn new(strategy: Strategy<S>) -> Self {
        Self {
            strategy,
            config: BindConfig::flagging_errors(),
        }
    }

    /// Create a dispatcher with an explicit binder configuration.
    pub fn with_config(strategy: Strategy<S>, config: BindConfig) -> Self {
        Self { strategy, config }
    }

    /// The held strategy.
    pub fn strategy(&self) -> &Strategy<S> {
        &self.strategy
    }

    /// Build and dispatch a pure action.
    pub fn dispatch_action(
        &self,
        kind: impl Into<String>,
        payload: Option<Value>,
        meta: Option<Value>,
    ) -> Action {
        self.strategy.dispatch(create_action(kind, payload, meta, None))
    }

    /// Run a future-returning operation as a lifecycle triad against the
    /// held strategy.
    pub async fn dispatch_future<Op, Fut, T, E, G, Args>(
        &self,
        operation: Op,
        base: impl Into<LifecycleType>,
        is_loading: G,
        args: Args,
    ) where
        Op: FnOnce(Args) -> Fut,
        Fut: Future<Output = Result<Response<T>, E>>,
        T: Serialize,
        E: Serialize,
        Args: Serialize,
        G: FnOnce(&S) -> bool,
    {
        bind_future(operation, base, is_loading, args)
            .with_config(self.config)
            .invoke(
                |action| {
                    self.strategy.dispatch(action);
                },
                || self.strategy.state(),
            )
            .await;
    }

    /// Run a callback-style operation as a lifecycle triad against the
    /// held strategy.
    pub async fn dispatch_callback<Op, T, E, G, Args>(
        &self,
        operation: Op,
        base: impl Into<LifecycleType>,
        is_loading: G,
        args: Args,
    ) where
        Op: FnOnce(Args, Completion<T, E>),
        T: Serialize,
        E: Serialize,
        Args: Serialize,
        G: FnOnce(&S) -> bool,
    {
        bind_callback(operation, base, is_loading, args)
            .with_config(self.config)
            .invoke(
                |action| {
                    self.strategy.dispatch(action);
                },
                || self.strategy.state(),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Debug, Default)]
    struct TestState {
        loading: bool,
    }

    fn recording_strategy(state: TestState) -> (Strategy<TestState>, Arc<Mutex<Vec<Action>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let strategy = Strategy::new(
            move || state,
            move |action| {
                sink.lock().unwrap().push(action.clone());
                action
            },
        );
        (strategy, seen)
    }

    #[test]
    fn test_default_strategy_is_identity() {
        let strategy = Strategy::<TestState>::default();

        assert!(!strategy.state().loading);
        let action = strategy.dispatch(Action::new("NOOP"));
        assert_eq!(action.kind, "NOOP");
    }

    #[tokio::test]
    async fn test_default_dispatcher_runs_triads() {
        let dispatcher = Dispatcher::<TestState>::default();

        // Identity dispatch: nothing observable, but the full sequence
        // runs without a store attached.
        dispatcher
            .dispatch_future(
                |_: ()| async move { Ok::<_, String>(Response::new(json!(1))) },
                "GET_USER",
                |state: &TestState| state.loading,
                (),
            )
            .await;

        let action = dispatcher.dispatch_action("RESET", None, None);
        assert_eq!(action.kind, "RESET");
    }

    #[test]
    fn test_dispatch_action_goes_through_strategy() {
        let (strategy, seen) = recording_strategy(TestState::default());
        let dispatcher = Dispatcher::new(strategy);

        let returned = dispatcher.dispatch_action("RESET", Some(json!(0)), None);

        assert_eq!(returned.kind, "RESET");
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, "RESET");
    }

    #[tokio::test]
    async fn test_dispatch_future_success() {
        let (strategy, seen) = recording_strategy(TestState::default());
        let dispatcher = Dispatcher::new(strategy);

        dispatcher
            .dispatch_future(
                |(id,): (u32,)| async move { Ok::<_, String>(Response::new(json!({"id": id}))) },
                "GET_USER",
                |state: &TestState| state.loading,
                (42,),
            )
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind, "GET_USER_PENDING");
        assert_eq!(seen[1].kind, "GET_USER_SUCCESS");
        assert_eq!(seen[1].payload, Some(json!({"id": 42})));
        assert_eq!(seen[1].meta, Some(json!([42])));
    }

    #[tokio::test]
    async fn test_dispatch_future_fail_flags_error_by_default() {
        let (strategy, seen) = recording_strategy(TestState::default());
        let dispatcher = Dispatcher::new(strategy);

        dispatcher
            .dispatch_future(
                |_: ()| async move { Err::<Response, _>("timeout".to_string()) },
                "GET_USER",
                |state: &TestState| state.loading,
                (),
            )
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen[1].kind, "GET_USER_FAIL");
        assert_eq!(seen[1].payload, Some(json!("timeout")));
        assert!(seen[1].is_error());
    }

    #[tokio::test]
    async fn test_dispatch_future_guard_blocks() {
        let (strategy, seen) = recording_strategy(TestState { loading: true });
        let dispatcher = Dispatcher::new(strategy);

        dispatcher
            .dispatch_future(
                |_: ()| async move { Ok::<_, String>(Response::new(json!(1))) },
                "GET_USER",
                |state: &TestState| state.loading,
                (),
            )
            .await;

        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_callback_fail() {
        let (strategy, seen) = recording_strategy(TestState::default());
        let dispatcher = Dispatcher::new(strategy);

        dispatcher
            .dispatch_callback(
                |_: (), done: Completion<Value, String>| done.fail("denied".into()),
                "SAVE",
                |state: &TestState| state.loading,
                (),
            )
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].kind, "SAVE_FAIL");
        assert!(seen[1].is_error());
    }

    #[tokio::test]
    async fn test_unflagged_config() {
        let (strategy, seen) = recording_strategy(TestState::default());
        let dispatcher = Dispatcher::with_config(strategy, BindConfig::default());

        dispatcher
            .dispatch_future(
                |_: ()| async move { Err::<Response, _>("boom".to_string()) },
                "SAVE",
                |state: &TestState| state.loading,
                (),
            )
            .await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen[1].kind, "SAVE_FAIL");
        assert_eq!(seen[1].error, None);
    }
}
