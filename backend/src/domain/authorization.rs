//! Caller checks shared by actions.

use super::{ActionError, User};

pub const NOT_LOGGED_IN: &str = "You must be logged in";
pub const NOT_ALLOWED: &str = "You are not allowed to do that";

/// Return the caller when present and accepted by `predicate`.
///
/// # Examples
/// ```
/// use feedback_board::domain::{ActionError, require_user};
///
/// let denied = require_user(None, |_| true).unwrap_err();
/// assert_eq!(denied, ActionError::form("You must be logged in"));
/// ```
pub fn require_user<'a, F>(caller: Option<&'a User>, predicate: F) -> Result<&'a User, ActionError>
where
    F: FnOnce(&User) -> bool,
{
    let user = caller.ok_or_else(|| ActionError::form(NOT_LOGGED_IN))?;
    if predicate(user) {
        Ok(user)
    } else {
        Err(ActionError::form(NOT_ALLOWED))
    }
}
