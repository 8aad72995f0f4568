//! PostgreSQL-backed `SessionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{AuthSession, SessionToken, SessionUpdate, User};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewSessionRow, SessionChangeset, SessionRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{sessions, users};

/// Diesel-backed implementation of the [`SessionRepository`] port.
#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionRepositoryError {
    SessionRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> SessionRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => SessionRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => SessionRepositoryError::conflict(constraint),
        DieselFailure::ForeignKeyViolation(_) => SessionRepositoryError::unknown_user(),
        DieselFailure::Query(message) => SessionRepositoryError::query(message),
    }
}

fn decode_session(row: SessionRow) -> Result<AuthSession, SessionRepositoryError> {
    AuthSession::try_from(row).map_err(|err| SessionRepositoryError::query(err.to_string()))
}

fn decode_user(row: UserRow) -> Result<User, SessionRepositoryError> {
    User::try_from(row).map_err(|err| SessionRepositoryError::query(err.to_string()))
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn create(&self, session: &AuthSession) -> Result<AuthSession, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewSessionRow {
            id: Uuid::new_v4(),
            session_token: session.session_token.as_str(),
            user_id: *session.user_id.as_uuid(),
            expires: session.expires,
        };
        let stored = diesel::insert_into(sessions::table)
            .values(&row)
            .returning(SessionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        decode_session(stored)
    }

    async fn find_with_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(AuthSession, User)>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<(SessionRow, UserRow)> = sessions::table
            .inner_join(users::table)
            .filter(sessions::session_token.eq(token.as_str()))
            .select((SessionRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        found
            .map(|(session, user)| Ok((decode_session(session)?, decode_user(user)?)))
            .transpose()
    }

    async fn update(
        &self,
        update: &SessionUpdate,
    ) -> Result<Option<AuthSession>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = sessions::table.filter(sessions::session_token.eq(update.session_token.as_str()));
        let changes = SessionChangeset {
            user_id: update.user_id.map(|id| *id.as_uuid()),
            expires: update.expires,
        };

        let row = if changes.user_id.is_none() && changes.expires.is_none() {
            // Diesel rejects empty changesets; read the row instead.
            target
                .select(SessionRow::as_select())
                .first(&mut conn)
                .await
                .optional()
        } else {
            diesel::update(target)
                .set(&changes)
                .returning(SessionRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
        }
        .map_err(map_diesel_error)?;

        row.map(decode_session).transpose()
    }

    async fn delete(&self, token: &SessionToken) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.filter(sessions::session_token.eq(token.as_str())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
