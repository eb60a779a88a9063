//! Binders that turn a long-running operation into a lifecycle triad
//!
//! A binder pairs an operation with a base action type and a loading
//! guard, producing an invocable that drives the three-phase dispatch
//! sequence:
//!
//! 1. Evaluate the guard against the current state. If the operation is
//!    already in flight, nothing is dispatched at all.
//! 2. Dispatch `{base}_PENDING` synchronously, before the first await.
//! 3. Run the operation.
//! 4. Dispatch `{base}_SUCCESS` with the response data, or `{base}_FAIL`
//!    with the error value.
//!
//! The operation arguments are recorded as the `meta` of every action in
//! the triad so that reducers can correlate the three phases of one
//! invocation.
//!
//! The guard check and the PENDING dispatch are not atomic with respect
//! to other invocations sharing the same state container: two
//! near-simultaneous calls can both observe "not loading" and both
//! dispatch PENDING. That window is an accepted property of the design.
//!
//! # Example
//!
//! ```ignore
//! use flux_bind_core::bind::{bind_future, Response};
//!
//! let bound = bind_future(
//!     |(id,): (u32,)| async move { api::fetch_user(id).await },
//!     "GET_USER",
//!     |state: &AppState| state.user_loading,
//!     (42,),
//! );
//!
//! bound.invoke(|action| store.dispatch(action), || store.state().clone()).await;
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::action::{create_action, to_json, Action, LifecycleType, Phase};

/// Configuration shared by the binders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindConfig {
    /// When set, FAIL actions carry `error: true` alongside the error
    /// payload.
    pub flag_errors: bool,
}

impl BindConfig {
    /// Configuration that tags FAIL actions with `error: true`.
    pub fn flagging_errors() -> Self {
        Self { flag_errors: true }
    }
}

/// Successful operation response.
///
/// The binders dispatch `data` as the SUCCESS payload, mirroring the
/// `{ data }` envelope of axios-style HTTP clients. Operations that do
/// not use such an envelope can wrap their result at the call site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response<T = Value> {
    /// The value forwarded as the SUCCESS payload.
    pub data: T,
}

impl<T> Response<T> {
    /// Wrap a value as a response envelope.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A pure action paired with nothing but its dispatch.
///
/// Built by [`bind_action`]; useful when a call site wants the same
/// invocable shape for plain and lifecycle dispatches.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundAction {
    action: Action,
}

impl BoundAction {
    /// Dispatch the bound action.
    pub fn invoke<D: FnMut(Action)>(self, mut dispatch: D) {
        dispatch(self.action);
    }
}

/// Bind a pure action for later dispatch.
pub fn bind_action(
    kind: impl Into<String>,
    payload: Option<Value>,
    meta: Option<Value>,
) -> BoundAction {
    BoundAction {
        action: create_action(kind, payload, meta, None),
    }
}

/// A future-returning operation bound to a lifecycle triad.
///
/// Built by [`bind_future`].
pub struct BoundFuture<Op, G, Args> {
    operation: Op,
    base: LifecycleType,
    is_loading: G,
    args: Args,
    config: BindConfig,
}

/// Bind a future-returning operation to a lifecycle triad.
///
/// `operation` receives `args` by value and must resolve to
/// `Result<Response<T>, E>`. `is_loading` is the externally owned guard,
/// consulted once per invocation before the PENDING dispatch. `args` is
/// additionally recorded as the `meta` of every dispatched action.
pub fn bind_future<Op, G, Args>(
    operation: Op,
    base: impl Into<LifecycleType>,
    is_loading: G,
    args: Args,
) -> BoundFuture<Op, G, Args> {
    BoundFuture {
        operation,
        base: base.into(),
        is_loading,
        args,
        config: BindConfig::default(),
    }
}

impl<Op, G, Args> BoundFuture<Op, G, Args> {
    /// Replace the binder configuration.
    pub fn with_config(mut self, config: BindConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the guard-then-dispatch sequence.
    ///
    /// Dispatches nothing when the guard reports the operation as
    /// already loading; otherwise dispatches PENDING synchronously and
    /// exactly one of SUCCESS/FAIL once the operation settles. A panic
    /// inside the operation is not caught and propagates to the caller.
    pub async fn invoke<Fut, T, E, D, GS, S>(self, mut dispatch: D, get_state: GS)
    where
        Op: FnOnce(Args) -> Fut,
        Fut: Future<Output = Result<Response<T>, E>>,
        T: Serialize,
        E: Serialize,
        Args: Serialize,
        G: FnOnce(&S) -> bool,
        GS: FnOnce() -> S,
        D: FnMut(Action),
    {
        let state = get_state();
        if (self.is_loading)(&state) {
            tracing::trace!(base = self.base.base(), "operation already loading, skipping");
            return;
        }

        let meta = to_json(&self.args);
        tracing::debug!(base = self.base.base(), "dispatching lifecycle triad");
        dispatch(
            self.base
                .action(Phase::Pending, Some(Value::Null), Some(meta.clone())),
        );

        match (self.operation)(self.args).await {
            Ok(response) => {
                dispatch(self.base.action(
                    Phase::Success,
                    Some(to_json(&response.data)),
                    Some(meta),
                ));
            }
            Err(error) => {
                let mut action =
                    self.base
                        .action(Phase::Fail, Some(to_json(&error)), Some(meta));
                if self.config.flag_errors {
                    action.error = Some(true);
                }
                dispatch(action);
            }
        }
    }
}

/// One-shot completion handle passed to callback-style operations.
///
/// Resolving the handle settles the binder: [`fail`](Completion::fail)
/// produces the FAIL action, [`succeed`](Completion::succeed) the
/// SUCCESS action. Move semantics guarantee at most one resolution.
/// Dropping the handle unresolved leaves the triad open at PENDING.
#[derive(Debug)]
pub struct Completion<T, E> {
    tx: oneshot::Sender<Result<T, E>>,
}

impl<T, E> Completion<T, E> {
    /// Resolve with a success value; dispatches SUCCESS.
    pub fn succeed(self, data: T) {
        let _ = self.tx.send(Ok(data));
    }

    /// Resolve with an error value; dispatches FAIL.
    pub fn fail(self, error: E) {
        let _ = self.tx.send(Err(error));
    }

    /// Resolve from a `Result`.
    pub fn complete(self, result: Result<T, E>) {
        let _ = self.tx.send(result);
    }
}

/// A callback-style operation bound to a lifecycle triad.
///
/// Built by [`bind_callback`].
pub struct BoundCallback<Op, G, Args> {
    operation: Op,
    base: LifecycleType,
    is_loading: G,
    args: Args,
    config: BindConfig,
}

/// Bind a callback-style operation to a lifecycle triad.
///
/// `operation` receives `args` plus a [`Completion`] handle instead of
/// returning a future. Semantics otherwise match [`bind_future`].
pub fn bind_callback<Op, G, Args>(
    operation: Op,
    base: impl Into<LifecycleType>,
    is_loading: G,
    args: Args,
) -> BoundCallback<Op, G, Args> {
    BoundCallback {
        operation,
        base: base.into(),
        is_loading,
        args,
        config: BindConfig::default(),
    }
}

impl<Op, G, Args> BoundCallback<Op, G, Args> {
    /// Replace the binder configuration.
    pub fn with_config(mut self, config: BindConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the guard-then-dispatch sequence.
    ///
    /// The operation is handed a [`Completion`] and the binder awaits its
    /// resolution. An operation that drops the handle without resolving
    /// it dispatches no SUCCESS/FAIL action.
    pub async fn invoke<T, E, D, GS, S>(self, mut dispatch: D, get_state: GS)
    where
        Op: FnOnce(Args, Completion<T, E>),
        T: Serialize,
        E: Serialize,
        Args: Serialize,
        G: FnOnce(&S) -> bool,
        GS: FnOnce() -> S,
        D: FnMut(Action),
    {
        let state = get_state();
        if (self.is_loading)(&state) {
            tracing::trace!(base = self.base.base(), "operation already loading, skipping");
            return;
        }

        let meta = to_json(&self.args);
        tracing::debug!(base = self.base.base(), "dispatching lifecycle triad");
        dispatch(
            self.base
                .action(Phase::Pending, Some(Value::Null), Some(meta.clone())),
        );

        let (tx, rx) = oneshot::channel();
        (self.operation)(self.args, Completion { tx });

        match rx.await {
            Ok(Ok(data)) => {
                dispatch(
                    self.base
                        .action(Phase::Success, Some(to_json(&data)), Some(meta)),
                );
            }
            Ok(Err(error)) => {
                let mut action =
                    self.base
                        .action(Phase::Fail, Some(to_json(&error)), Some(meta));
                if self.config.flag_errors {
                    action.error = Some(true);
                }
                dispatch(action);
            }
            Err(_) => {
                tracing::warn!(
                    base = self.base.base(),
                    "completion handle dropped without resolving, triad left at pending"
                );
            }
        }
    }
}
