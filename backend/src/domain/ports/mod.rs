//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, page cache) are implemented by outbound
//! adapters; driving ports ([`AuthAdapter`], [`FeedbackActions`]) are what
//! inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod auth_adapter;
mod feedback_actions;
mod feedback_post_repository;
mod feedback_vote_repository;
mod page_cache;
mod session_repository;
mod user_repository;
mod verification_token_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use auth_adapter::MockAuthAdapter;
pub use auth_adapter::AuthAdapter;
pub use feedback_actions::FeedbackActions;
#[cfg(test)]
pub use feedback_post_repository::MockFeedbackPostRepository;
pub use feedback_post_repository::{FeedbackPostRepository, FeedbackPostRepositoryError};
#[cfg(test)]
pub use feedback_vote_repository::MockFeedbackVoteRepository;
pub use feedback_vote_repository::{FeedbackVoteRepository, FeedbackVoteRepositoryError};
#[cfg(test)]
pub use page_cache::MockPageCache;
pub use page_cache::{FixturePageCache, PageCache, PageCacheError};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use verification_token_repository::MockVerificationTokenRepository;
pub use verification_token_repository::{
    VerificationTokenRepository, VerificationTokenRepositoryError,
};
