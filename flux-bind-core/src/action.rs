//! Flux Standard Action record and the async lifecycle triad

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Suffix appended to a base type for the action dispatched before an
/// operation starts.
pub const PENDING_SUFFIX: &str = "_PENDING";
/// Suffix appended to a base type for the action dispatched on success.
pub const SUCCESS_SUFFIX: &str = "_SUCCESS";
/// Suffix appended to a base type for the action dispatched on failure.
pub const FAIL_SUFFIX: &str = "_FAIL";

/// A Flux Standard Action.
///
/// Actions are plain value records handed to a dispatch function and
/// never retained or mutated by this library afterwards. The `kind`
/// field serializes as `"type"` to match the wire shape expected by
/// Redux-family consumers; absent optional fields are omitted from the
/// serialized form rather than defaulted.
///
/// # Example
/// ```
/// use flux_bind_core::action::Action;
/// use serde_json::json;
///
/// let action = Action::new("SET_FILTER").with_payload(json!("active"));
/// assert_eq!(action.kind, "SET_FILTER");
/// assert_eq!(action.payload, Some(json!("active")));
/// assert_eq!(action.meta, None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action type string. Always present; content is not validated.
    #[serde(rename = "type")]
    pub kind: String,
    /// Data or error details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Additional action information, used by the binders to carry the
    /// operation arguments across a lifecycle triad.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Set to `true` when the payload is an error value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
}

impl Action {
    /// Create an action with only a type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
            meta: None,
            error: None,
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach meta information.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Mark the payload as an error value.
    pub fn flag_error(mut self) -> Self {
        self.error = Some(true);
        self
    }

    /// Whether this action is flagged as carrying an error payload.
    pub fn is_error(&self) -> bool {
        self.error == Some(true)
    }
}

/// Create a pure action.
///
/// Pure and total: any type string is accepted unchecked, omitted
/// parameters stay absent, and payload/meta pass through by identity.
///
/// See <https://github.com/redux-utilities/flux-standard-action> for the
/// record shape.
pub fn create_action(
    kind: impl Into<String>,
    payload: Option<Value>,
    meta: Option<Value>,
    error: Option<bool>,
) -> Action {
    Action {
        kind: kind.into(),
        payload,
        meta,
        error,
    }
}

/// Phase of an asynchronous operation's lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Operation dispatched, outcome not yet known.
    Pending,
    /// Operation fulfilled.
    Success,
    /// Operation rejected.
    Fail,
}

impl Phase {
    /// The type-string suffix for this phase.
    pub fn suffix(self) -> &'static str {
        match self {
            Phase::Pending => PENDING_SUFFIX,
            Phase::Success => SUCCESS_SUFFIX,
            Phase::Fail => FAIL_SUFFIX,
        }
    }
}

/// Base action type from which a PENDING/SUCCESS/FAIL triad is derived.
///
/// The suffixes are only ever appended to a caller-supplied base type;
/// a type string that already carries a bare meaning should be
/// dispatched through [`create_action`] instead.
///
/// # Example
/// ```
/// use flux_bind_core::action::{LifecycleType, Phase};
///
/// let base = LifecycleType::new("GET_USER");
/// assert_eq!(base.pending(), "GET_USER_PENDING");
/// assert_eq!(base.kind(Phase::Fail), "GET_USER_FAIL");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LifecycleType(String);

impl LifecycleType {
    /// Create a lifecycle type from a base type string.
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// The base type string.
    pub fn base(&self) -> &str {
        &self.0
    }

    /// Derive the type string for a phase.
    pub fn kind(&self, phase: Phase) -> String {
        format!("{}{}", self.0, phase.suffix())
    }

    /// Type string of the PENDING member.
    pub fn pending(&self) -> String {
        self.kind(Phase::Pending)
    }

    /// Type string of the SUCCESS member.
    pub fn success(&self) -> String {
        self.kind(Phase::Success)
    }

    /// Type string of the FAIL member.
    pub fn fail(&self) -> String {
        self.kind(Phase::Fail)
    }

    /// Build the triad member for a phase.
    pub fn action(&self, phase: Phase, payload: Option<Value>, meta: Option<Value>) -> Action {
        create_action(self.kind(phase), payload, meta, None)
    }
}

impl From<&str> for LifecycleType {
    fn from(base: &str) -> Self {
        Self::new(base)
    }
}

impl From<String> for LifecycleType {
    fn from(base: String) -> Self {
        Self(base)
    }
}

/// Lower any serializable value into a JSON payload.
///
/// Values that fail to serialize (non-string map keys and the like)
/// degrade to `Value::Null` with a warning so the dispatch flow stays
/// total.
pub fn to_json<T: Serialize>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(json) => json,
        Err(error) => {
            tracing::warn!(%error, "value not representable as JSON, substituting null");
            Value::Null
        }
    }
}
