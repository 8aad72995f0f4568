//! Port for provider accounts linked to users.
use async_trait::async_trait;

use crate::domain::{Account, ProviderAccountRef};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// The provider account is already linked.
        Conflict { message: String } => "account already linked: {message}",
        /// The owning user row does not exist.
        UnknownUser => "account owner does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store a provider account under a freshly generated row id.
    async fn link(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Remove a provider account, reporting whether a row was deleted.
    async fn unlink(&self, account: &ProviderAccountRef) -> Result<bool, AccountRepositoryError>;
}
