//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, ProviderAccountRef, User, UserId, UserUpdate};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column (the e-mail address) already holds this value.
        Conflict { message: String } => "user already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user row.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by e-mail address.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserRepositoryError>;

    /// Fetch the user owning a linked provider account.
    async fn find_by_account(
        &self,
        account: &ProviderAccountRef,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Apply the populated fields of `update`; `None` when no row matched.
    async fn update(&self, update: &UserUpdate) -> Result<Option<User>, UserRepositoryError>;

    /// Delete a user and, by cascade, everything they own. Deleting an absent
    /// user is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError>;
}
