//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain. Conversions into domain types live next to the rows they
//! convert.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{
    AuthSession, EmailAddress, FeedbackBody, FeedbackPost, FeedbackPostId, FeedbackStatus,
    FeedbackTitle, NewFeedbackPost, Role, SessionToken, User, UserId, VerificationToken,
};
use crate::domain::feedback::UnknownStatus;

use super::schema::{
    accounts, feedback_posts, feedback_votes, sessions, users, verification_tokens,
};

/// Raised when a stored row no longer satisfies the domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {key}: {reason}")]
pub(crate) struct RowDecodeError {
    pub table: &'static str,
    pub key: String,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = RowDecodeError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|err| RowDecodeError {
            table: "users",
            key: row.id.to_string(),
            reason: err.to_string(),
        })?;
        let role = Role::parse(&row.role).unwrap_or_else(|| {
            warn!(
                value = %row.role,
                user_id = %row.id,
                "unrecognised role value, treating as default"
            );
            Role::Default
        });
        Ok(User {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email,
            email_verified: row.email_verified,
            image: row.image,
            role,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<&'a str>,
    pub role: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name.as_deref(),
            email: user.email.as_ref(),
            email_verified: user.email_verified,
            image: user.image.as_deref(),
            role: user.role.as_str(),
        }
    }
}

/// Partial user update; `None` fields are skipped by Diesel.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_type: &'a str,
    pub provider: &'a str,
    pub provider_account_id: &'a str,
    pub refresh_token: Option<&'a str>,
    pub access_token: Option<&'a str>,
    pub expires_at: Option<i64>,
    pub token_type: Option<&'a str>,
    pub scope: Option<&'a str>,
    pub id_token: Option<&'a str>,
    pub session_state: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub session_token: String,
    pub user_id: Uuid,
    pub expires: DateTime<Utc>,
}

impl TryFrom<SessionRow> for AuthSession {
    type Error = RowDecodeError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let session_token = SessionToken::new(row.session_token).map_err(|err| RowDecodeError {
            table: "sessions",
            key: row.user_id.to_string(),
            reason: err.to_string(),
        })?;
        Ok(AuthSession {
            session_token,
            user_id: UserId::from_uuid(row.user_id),
            expires: row.expires,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub id: Uuid,
    pub session_token: &'a str,
    pub user_id: Uuid,
    pub expires: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = sessions)]
pub(crate) struct SessionChangeset {
    pub user_id: Option<Uuid>,
    pub expires: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Verification tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = verification_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VerificationTokenRow {
    pub identifier: String,
    pub token: String,
    pub expires: DateTime<Utc>,
}

impl From<VerificationTokenRow> for VerificationToken {
    fn from(row: VerificationTokenRow) -> Self {
        Self {
            identifier: row.identifier,
            token: row.token,
            expires: row.expires,
        }
    }
}

impl From<&VerificationToken> for VerificationTokenRow {
    fn from(token: &VerificationToken) -> Self {
        Self {
            identifier: token.identifier.clone(),
            token: token.token.clone(),
            expires: token.expires,
        }
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = feedback_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackPostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub status: String,
    pub num_votes: i32,
    pub num_comments: i32,
    pub posted_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl TryFrom<FeedbackPostRow> for FeedbackPost {
    type Error = RowDecodeError;

    fn try_from(row: FeedbackPostRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| RowDecodeError {
            table: "feedback_posts",
            key: row.id.to_string(),
            reason,
        };
        let status: FeedbackStatus = row
            .status
            .parse()
            .map_err(|err: UnknownStatus| corrupt(err.to_string()))?;
        let title = FeedbackTitle::new(row.title).map_err(|err| corrupt(err.to_string()))?;
        let body = FeedbackBody::new(row.body).map_err(|err| corrupt(err.to_string()))?;
        Ok(FeedbackPost {
            id: FeedbackPostId::from_uuid(row.id),
            author_id: UserId::from_uuid(row.author_id),
            title,
            body,
            status,
            num_votes: row.num_votes,
            num_comments: row.num_comments,
            posted_at: row.posted_at,
            last_active_at: row.last_active_at,
        })
    }
}

impl From<&NewFeedbackPost> for FeedbackPostRow {
    fn from(post: &NewFeedbackPost) -> Self {
        Self {
            id: *post.id.as_uuid(),
            author_id: *post.author_id.as_uuid(),
            title: post.title.as_ref().to_owned(),
            body: post.body.as_ref().to_owned(),
            status: post.status.as_str().to_owned(),
            num_votes: post.num_votes,
            num_comments: post.num_comments,
            posted_at: post.posted_at,
            last_active_at: post.last_active_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedback_votes)]
pub(crate) struct NewFeedbackVoteRow {
    pub post_id: Uuid,
    pub user_id: Uuid,
}
