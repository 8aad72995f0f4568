//! Port for persisted login sessions.
use async_trait::async_trait;

use crate::domain::{AuthSession, SessionToken, SessionUpdate, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "session repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "session repository query failed: {message}",
        /// The session token is already in use.
        Conflict { message: String } => "session already exists: {message}",
        /// The referenced user row does not exist.
        UnknownUser => "session owner does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &AuthSession) -> Result<AuthSession, SessionRepositoryError>;

    /// Session and its owner in a single read.
    async fn find_with_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(AuthSession, User)>, SessionRepositoryError>;

    /// Apply the populated fields of `update`; `None` when no row matched.
    async fn update(
        &self,
        update: &SessionUpdate,
    ) -> Result<Option<AuthSession>, SessionRepositoryError>;

    /// Delete by token. Deleting an absent session is not an error.
    async fn delete(&self, token: &SessionToken) -> Result<(), SessionRepositoryError>;
}
