//! Test utilities for flux-bind consumers
//!
//! [`ActionRecorder`] captures everything sent through a dispatch
//! closure so tests can assert on the dispatched sequence:
//!
//! ```
//! use flux_bind_core::bind::bind_action;
//! use flux_bind_core::testing::ActionRecorder;
//!
//! let mut recorder = ActionRecorder::new();
//!
//! bind_action("RESET", None, None).invoke(recorder.dispatch_fn());
//!
//! recorder.assert_kinds(&["RESET"]);
//! ```

use tokio::sync::mpsc;

use crate::action::Action;

/// Channel-backed recorder for dispatched actions.
///
/// The dispatch side is a cloneable closure, so a single recorder can
/// back several binders in one test.
pub struct ActionRecorder {
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            action_tx,
            action_rx,
        }
    }

    /// A dispatch closure that records into this recorder.
    pub fn dispatch_fn(&self) -> impl Fn(Action) + Clone {
        let tx = self.action_tx.clone();
        move |action| {
            let _ = tx.send(action);
        }
    }

    /// Drain all actions recorded so far, in dispatch order.
    pub fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.action_rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain and reduce to the type strings.
    pub fn drain_kinds(&mut self) -> Vec<String> {
        self.drain().into_iter().map(|action| action.kind).collect()
    }

    /// Assert the recorded type strings match `expected`, draining them.
    ///
    /// # Panics
    ///
    /// Panics on mismatch, test-assertion style.
    pub fn assert_kinds(&mut self, expected: &[&str]) {
        let kinds = self.drain_kinds();
        assert_eq!(kinds, expected, "dispatched action kinds mismatch");
    }
}

impl Default for ActionRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::create_action;
    use serde_json::json;

    #[test]
    fn test_records_in_dispatch_order() {
        let mut recorder = ActionRecorder::new();
        let dispatch = recorder.dispatch_fn();

        dispatch(create_action("A", None, None, None));
        dispatch(create_action("B", Some(json!(1)), None, None));

        let actions = recorder.drain();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].kind, "A");
        assert_eq!(actions[1].kind, "B");
        assert_eq!(actions[1].payload, Some(json!(1)));
    }

    #[test]
    fn test_drain_empties_recorder() {
        let mut recorder = ActionRecorder::new();
        recorder.dispatch_fn()(create_action("A", None, None, None));

        assert_eq!(recorder.drain_kinds(), vec!["A"]);
        assert!(recorder.drain().is_empty());
    }

    #[test]
    fn test_cloned_dispatch_shares_recorder() {
        let mut recorder = ActionRecorder::new();
        let d1 = recorder.dispatch_fn();
        let d2 = d1.clone();

        d1(create_action("A", None, None, None));
        d2(create_action("B", None, None, None));

        recorder.assert_kinds(&["A", "B"]);
    }
}
