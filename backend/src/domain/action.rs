//! Outcomes of form-driven actions.
//!
//! An action either completes with a navigation instruction or returns an
//! [`ActionError`] for the form to render inline. Failures that should abort
//! the request entirely travel as [`crate::domain::Error`] instead.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inline, user-facing failure of an action. An empty `field` marks a
/// form-level message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionError {
    pub field: String,
    pub message: String,
}

impl ActionError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error not tied to any single form field.
    pub fn form(message: impl Into<String>) -> Self {
        Self::new("", message)
    }
}

/// Result of a successfully dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Navigate the client to the given path.
    Redirect(String),
    /// The cached rendering of the given path was invalidated.
    Revalidated(String),
    /// The action declined to proceed.
    Failed(ActionError),
}

impl From<ActionError> for ActionOutcome {
    fn from(value: ActionError) -> Self {
        Self::Failed(value)
    }
}
