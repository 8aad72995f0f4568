//! Login sessions issued by the authentication library.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::UserId;

/// Validation errors for [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenError {
    Empty,
}

impl fmt::Display for SessionTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session token must not be empty"),
        }
    }
}

impl std::error::Error for SessionTokenError {}

/// Opaque bearer token identifying a session.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Result<Self, SessionTokenError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionTokenError::Empty);
        }
        Ok(Self(Zeroizing::new(token)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0.as_str().to_owned()
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub session_token: SessionToken,
    pub user_id: UserId,
    pub expires: DateTime<Utc>,
}

impl AuthSession {
    /// A session is usable strictly before its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Partial update addressed by session token; `None` leaves a field as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    pub session_token: SessionToken,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}
