//! Feedback posts and votes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Error, UserId};

/// Minimum title length in characters.
pub const TITLE_MIN: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 255;
/// Minimum body length in characters.
pub const BODY_MIN: usize = 80;
/// Maximum body length in characters.
pub const BODY_MAX: usize = 8_000;

/// Identifier of a feedback post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackPostId(Uuid);

impl FeedbackPostId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Path of the page rendering this post.
    pub fn page_path(&self) -> String {
        format!("/feedback/{}", self.0)
    }
}

impl fmt::Display for FeedbackPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for FeedbackPostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<FeedbackPostId> for String {
    fn from(value: FeedbackPostId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for FeedbackPostId {
    type Error = uuid::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    #[default]
    Open,
    UnderReview,
    Planned,
    InProgress,
    Completed,
    Declined,
    Withdrawn,
}

impl FeedbackStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::UnderReview => "under_review",
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Declined => "declined",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feedback status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for FeedbackStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "open" => Self::Open,
            "under_review" => Self::UnderReview,
            "planned" => Self::Planned,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "declined" => Self::Declined,
            "withdrawn" => Self::Withdrawn,
            other => return Err(UnknownStatus(other.to_owned())),
        })
    }
}

/// Validation failures for a feedback submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackValidationError {
    #[error("title must be at least {min} characters")]
    TitleTooShort { min: usize },
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("body must be at least {min} characters")]
    BodyTooShort { min: usize },
    #[error("body must be at most {max} characters")]
    BodyTooLong { max: usize },
}

impl FeedbackValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } | Self::TitleTooLong { .. } => "title",
            Self::BodyTooShort { .. } | Self::BodyTooLong { .. } => "body",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } | Self::BodyTooShort { .. } => "too_short",
            Self::TitleTooLong { .. } | Self::BodyTooLong { .. } => "too_long",
        }
    }
}

impl From<FeedbackValidationError> for Error {
    fn from(err: FeedbackValidationError) -> Self {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "code": err.code(),
        }))
    }
}

fn check_length(
    value: &str,
    min: usize,
    max: usize,
    too_short: impl FnOnce(usize) -> FeedbackValidationError,
    too_long: impl FnOnce(usize) -> FeedbackValidationError,
) -> Result<(), FeedbackValidationError> {
    let length = value.chars().count();
    if length < min {
        return Err(too_short(min));
    }
    if length > max {
        return Err(too_long(max));
    }
    Ok(())
}

/// Post title, 3 to 255 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackTitle(String);

impl FeedbackTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, FeedbackValidationError> {
        let title = title.into();
        check_length(
            &title,
            TITLE_MIN,
            TITLE_MAX,
            |min| FeedbackValidationError::TitleTooShort { min },
            |max| FeedbackValidationError::TitleTooLong { max },
        )?;
        Ok(Self(title))
    }
}

/// Post body, 80 to 8000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackBody(String);

impl FeedbackBody {
    pub fn new(body: impl Into<String>) -> Result<Self, FeedbackValidationError> {
        let body = body.into();
        check_length(
            &body,
            BODY_MIN,
            BODY_MAX,
            |min| FeedbackValidationError::BodyTooShort { min },
            |max| FeedbackValidationError::BodyTooLong { max },
        )?;
        Ok(Self(body))
    }
}

macro_rules! text_newtype_conversions {
    ($($ty:ident),+) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = FeedbackValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )+
    };
}

text_newtype_conversions!(FeedbackTitle, FeedbackBody);

/// Validated title and body of a new submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub title: FeedbackTitle,
    pub body: FeedbackBody,
}

impl FeedbackDraft {
    /// Validate raw form input; the title is checked first.
    pub fn try_from_parts(title: &str, body: &str) -> Result<Self, FeedbackValidationError> {
        Ok(Self {
            title: FeedbackTitle::new(title)?,
            body: FeedbackBody::new(body)?,
        })
    }
}

/// Row inserted when a post is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedbackPost {
    pub id: FeedbackPostId,
    pub author_id: UserId,
    pub title: FeedbackTitle,
    pub body: FeedbackBody,
    pub status: FeedbackStatus,
    pub num_votes: i32,
    pub num_comments: i32,
    pub posted_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl NewFeedbackPost {
    /// Fresh open post credited with its author's own vote.
    pub fn with_self_vote(author_id: UserId, draft: FeedbackDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: FeedbackPostId::random(),
            author_id,
            title: draft.title,
            body: draft.body,
            status: FeedbackStatus::Open,
            num_votes: 1,
            num_comments: 0,
            posted_at: now,
            last_active_at: now,
        }
    }
}

/// Stored feedback post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPost {
    #[schema(value_type = String, format = Uuid)]
    pub id: FeedbackPostId,
    #[schema(value_type = String, format = Uuid)]
    pub author_id: UserId,
    #[schema(value_type = String)]
    pub title: FeedbackTitle,
    #[schema(value_type = String)]
    pub body: FeedbackBody,
    pub status: FeedbackStatus,
    pub num_votes: i32,
    pub num_comments: i32,
    pub posted_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl FeedbackPost {
    /// Fingerprint of the mutable columns, stable across process restarts.
    pub fn state_tag(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.status,
            self.num_votes,
            self.num_comments,
            self.last_active_at.timestamp_millis()
        )
    }
}

impl From<NewFeedbackPost> for FeedbackPost {
    fn from(value: NewFeedbackPost) -> Self {
        Self {
            id: value.id,
            author_id: value.author_id,
            title: value.title,
            body: value.body,
            status: value.status,
            num_votes: value.num_votes,
            num_comments: value.num_comments,
            posted_at: value.posted_at,
            last_active_at: value.last_active_at,
        }
    }
}

/// One user's vote on one post; unique per `(post_id, user_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackVote {
    pub post_id: FeedbackPostId,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests;
