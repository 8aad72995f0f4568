//! Driving port for the authentication library's storage contract.
//!
//! The authentication library calls these fourteen operations to persist
//! users, linked accounts, sessions and verification tokens. Missing rows are
//! reported as [`Error`] with code `not_found`; storage failures map to
//! `service_unavailable`, `internal_error` or `conflict`.

use async_trait::async_trait;

use crate::domain::{
    Account, AuthSession, EmailAddress, Error, NewUser, ProviderAccountRef, SessionToken,
    SessionUpdate, User, UserId, UserUpdate, VerificationToken, VerificationTokenParams,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthAdapter: Send + Sync {
    /// Create a user with a generated id and the default role.
    async fn create_user(&self, user: &NewUser) -> Result<User, Error>;

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, Error>;

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, Error>;

    /// Resolve the user owning a provider account.
    async fn get_user_by_account(
        &self,
        account: &ProviderAccountRef,
    ) -> Result<Option<User>, Error>;

    /// Fails with "User not found" when no row matched.
    async fn update_user(&self, update: &UserUpdate) -> Result<User, Error>;

    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;

    /// Fails with "User not found" when the owner does not exist.
    async fn link_account(&self, account: &Account) -> Result<(), Error>;

    /// Fails with "Account not found" when nothing was unlinked.
    async fn unlink_account(&self, account: &ProviderAccountRef) -> Result<(), Error>;

    async fn get_session_and_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(AuthSession, User)>, Error>;

    /// Fails with "User not found" when the owner does not exist.
    async fn create_session(&self, session: &AuthSession) -> Result<AuthSession, Error>;

    /// Fails with "Session not found" when no row matched.
    async fn update_session(&self, update: &SessionUpdate) -> Result<AuthSession, Error>;

    async fn delete_session(&self, token: &SessionToken) -> Result<(), Error>;

    async fn create_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<VerificationToken, Error>;

    /// Redeem a token once. Absent pairs yield `None` and delete nothing.
    async fn use_verification_token(
        &self,
        params: &VerificationTokenParams,
    ) -> Result<Option<VerificationToken>, Error>;
}
