//! Auth adapter service.
//!
//! Implements the [`AuthAdapter`] driving port over the user, account,
//! session and verification token repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AuthAdapter, SessionRepository,
    SessionRepositoryError, UserRepository, UserRepositoryError, VerificationTokenRepository,
    VerificationTokenRepositoryError,
};
use crate::domain::{
    Account, AuthSession, EmailAddress, Error, NewUser, ProviderAccountRef, Role, SessionToken,
    SessionUpdate, User, UserId, UserUpdate, VerificationToken, VerificationTokenParams,
};

pub(crate) const USER_NOT_FOUND: &str = "User not found";
pub(crate) const ACCOUNT_NOT_FOUND: &str = "Account not found";
pub(crate) const SESSION_NOT_FOUND: &str = "Session not found";

/// Storage contract for the authentication library, backed by repositories.
#[derive(Clone)]
pub struct RepositoryAuthAdapter<U, A, S, V> {
    users: Arc<U>,
    accounts: Arc<A>,
    sessions: Arc<S>,
    tokens: Arc<V>,
}

impl<U, A, S, V> RepositoryAuthAdapter<U, A, S, V> {
    pub fn new(users: Arc<U>, accounts: Arc<A>, sessions: Arc<S>, tokens: Arc<V>) -> Self {
        Self {
            users,
            accounts,
            sessions,
            tokens,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Conflict { message } => {
            Error::conflict(format!("user already exists: {message}"))
        }
    }
}

fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::Conflict { message } => {
            Error::conflict(format!("account already linked: {message}"))
        }
        AccountRepositoryError::UnknownUser => Error::not_found(USER_NOT_FOUND),
    }
}

fn map_session_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("session repository unavailable: {message}"))
        }
        SessionRepositoryError::Query { message } => {
            Error::internal(format!("session repository error: {message}"))
        }
        SessionRepositoryError::Conflict { message } => {
            Error::conflict(format!("session already exists: {message}"))
        }
        SessionRepositoryError::UnknownUser => Error::not_found(USER_NOT_FOUND),
    }
}

fn map_token_error(error: VerificationTokenRepositoryError) -> Error {
    match error {
        VerificationTokenRepositoryError::Connection { message } => Error::service_unavailable(
            format!("verification token repository unavailable: {message}"),
        ),
        VerificationTokenRepositoryError::Query { message } => {
            Error::internal(format!("verification token repository error: {message}"))
        }
        VerificationTokenRepositoryError::Conflict { message } => {
            Error::conflict(format!("verification token already exists: {message}"))
        }
    }
}

#[async_trait]
impl<U, A, S, V> AuthAdapter for RepositoryAuthAdapter<U, A, S, V>
where
    U: UserRepository,
    A: AccountRepository,
    S: SessionRepository,
    V: VerificationTokenRepository,
{
    async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        let created = User {
            id: UserId::random(),
            name: user.name.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            image: user.image.clone(),
            role: Role::Default,
        };
        self.users.insert(&created).await.map_err(map_user_error)?;
        info!(user_id = %created.id, "user created");
        Ok(created)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, Error> {
        self.users.find_by_email(email).await.map_err(map_user_error)
    }

    async fn get_user_by_account(
        &self,
        account: &ProviderAccountRef,
    ) -> Result<Option<User>, Error> {
        self.users
            .find_by_account(account)
            .await
            .map_err(map_user_error)
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<User, Error> {
        if update.is_empty() {
            debug!(user_id = %update.id, "empty user update; returning current row");
            return self
                .users
                .find_by_id(&update.id)
                .await
                .map_err(map_user_error)?
                .ok_or_else(|| Error::not_found(USER_NOT_FOUND));
        }
        self.users
            .update(update)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        self.users.delete(id).await.map_err(map_user_error)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn link_account(&self, account: &Account) -> Result<(), Error> {
        self.accounts
            .link(account)
            .await
            .map_err(map_account_error)?;
        info!(
            user_id = %account.user_id,
            provider = %account.provider,
            "provider account linked"
        );
        Ok(())
    }

    async fn unlink_account(&self, account: &ProviderAccountRef) -> Result<(), Error> {
        let removed = self
            .accounts
            .unlink(account)
            .await
            .map_err(map_account_error)?;
        if !removed {
            return Err(Error::not_found(ACCOUNT_NOT_FOUND));
        }
        info!(provider = %account.provider, "provider account unlinked");
        Ok(())
    }

    async fn get_session_and_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(AuthSession, User)>, Error> {
        self.sessions
            .find_with_user(token)
            .await
            .map_err(map_session_error)
    }

    async fn create_session(&self, session: &AuthSession) -> Result<AuthSession, Error> {
        let created = self
            .sessions
            .create(session)
            .await
            .map_err(map_session_error)?;
        info!(user_id = %created.user_id, "session created");
        Ok(created)
    }

    async fn update_session(&self, update: &SessionUpdate) -> Result<AuthSession, Error> {
        self.sessions
            .update(update)
            .await
            .map_err(map_session_error)?
            .ok_or_else(|| Error::not_found(SESSION_NOT_FOUND))
    }

    async fn delete_session(&self, token: &SessionToken) -> Result<(), Error> {
        self.sessions
            .delete(token)
            .await
            .map_err(map_session_error)
    }

    async fn create_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<VerificationToken, Error> {
        self.tokens.create(token).await.map_err(map_token_error)
    }

    async fn use_verification_token(
        &self,
        params: &VerificationTokenParams,
    ) -> Result<Option<VerificationToken>, Error> {
        let redeemed = self.tokens.take(params).await.map_err(map_token_error)?;
        if redeemed.is_none() {
            debug!(identifier = %params.identifier, "verification token not found");
        }
        Ok(redeemed)
    }
}
