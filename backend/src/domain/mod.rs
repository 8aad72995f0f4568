//! Domain primitives, services and ports.
//!
//! Types here are transport agnostic: inbound adapters translate requests
//! into these types and outbound adapters persist them. Services implement
//! the driving ports on top of the driven ones.

pub mod account;
pub mod action;
pub mod auth;
pub mod auth_adapter;
pub mod authorization;
pub mod error;
pub mod feedback;
pub mod feedback_service;
pub mod ports;
pub mod session;
pub mod trace_id;
pub mod user;
pub mod verification_token;

pub use self::account::{Account, ProviderAccountRef};
pub use self::action::{ActionError, ActionOutcome};
pub use self::auth::{NewUser, UserUpdate};
pub use self::auth_adapter::RepositoryAuthAdapter;
pub use self::authorization::require_user;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{
    FeedbackBody, FeedbackDraft, FeedbackPost, FeedbackPostId, FeedbackStatus, FeedbackTitle,
    FeedbackValidationError, FeedbackVote, NewFeedbackPost,
};
pub use self::feedback_service::FeedbackService;
pub use self::session::{AuthSession, SessionToken, SessionTokenError, SessionUpdate};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, Role, User, UserId, UserValidationError};
pub use self::verification_token::{VerificationToken, VerificationTokenParams};
