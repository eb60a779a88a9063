//! flux-bind: lifecycle action binding for Flux/Redux-style state management
//!
//! Wraps asynchronous operations in a PENDING/SUCCESS/FAIL action triad,
//! with a caller-supplied guard against duplicate concurrent dispatch.
//!
//! # Example
//! ```ignore
//! use flux_bind::prelude::*;
//!
//! bind_future(
//!     |(id,): (u32,)| async move { api::fetch_user(id).await },
//!     "GET_USER",
//!     |state: &AppState| state.user_loading,
//!     (42,),
//! )
//! .invoke(|action| store.dispatch(action), || store.state().clone())
//! .await;
//! ```

// Re-export everything from core
pub use flux_bind_core::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use flux_bind_core::prelude::*;
}
