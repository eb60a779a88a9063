//! Core types for flux-bind
//!
//! This crate provides the building blocks for dispatching asynchronous
//! operations as Flux/Redux action lifecycles:
//!
//! - **Action**: a Flux Standard Action record (`type`, optional
//!   `payload`/`meta`/`error`)
//! - **Lifecycle triad**: PENDING/SUCCESS/FAIL type strings derived from
//!   one base type
//! - **Binders**: pair an operation with a base type and a loading
//!   guard, dispatching the triad as the operation runs
//! - **Dispatcher**: the same operations bound to a held
//!   state/dispatch strategy
//!
//! The library manages no state of its own. The store, the business
//! operations, and the "is loading" predicate are all supplied by the
//! caller; the sole contract is that every permitted invocation
//! dispatches PENDING followed by exactly one of SUCCESS or FAIL.
//!
//! # Example
//!
//! ```
//! use flux_bind_core::prelude::*;
//! use serde_json::json;
//!
//! # #[derive(Clone, Copy, Default)]
//! # struct AppState { user_loading: bool }
//! # async fn demo() {
//! let mut recorder = ActionRecorder::new();
//!
//! bind_future(
//!     |(id,): (u32,)| async move {
//!         Ok::<_, String>(Response::new(json!({"id": id, "name": "A"})))
//!     },
//!     "GET_USER",
//!     |state: &AppState| state.user_loading,
//!     (42,),
//! )
//! .invoke(recorder.dispatch_fn(), AppState::default)
//! .await;
//!
//! recorder.assert_kinds(&["GET_USER_PENDING", "GET_USER_SUCCESS"]);
//! # }
//! ```
//!
//! # Duplicate-dispatch guard
//!
//! The loading guard is consulted once per invocation, before the
//! PENDING dispatch. A guarded call is a silent no-op: zero actions are
//! dispatched. The check-then-dispatch pair is not atomic across
//! invocations sharing one state container; callers that need mutual
//! exclusion must provide it in their own state layer.

pub mod action;
pub mod bind;
pub mod dispatcher;
pub mod testing;

// Action exports
pub use action::{
    create_action, to_json, Action, LifecycleType, Phase, FAIL_SUFFIX, PENDING_SUFFIX,
    SUCCESS_SUFFIX,
};

// Binder exports
pub use bind::{
    bind_action, bind_callback, bind_future, BindConfig, BoundAction, BoundCallback, BoundFuture,
    Completion, Response,
};

// Dispatcher exports
pub use dispatcher::{Dispatcher, Strategy};

// Testing exports
pub use testing::ActionRecorder;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{create_action, Action, LifecycleType, Phase};
    pub use crate::bind::{
        bind_action, bind_callback, bind_future, BindConfig, Completion, Response,
    };
    pub use crate::dispatcher::{Dispatcher, Strategy};
    pub use crate::testing::ActionRecorder;
}
