//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures are classified once (`diesel_error_mapping.rs`) and
//!   mapped onto each port's error enum.
//!
//! ```ignore
//! use feedback_board::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/feedback")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_feedback_post_repository;
mod diesel_feedback_vote_repository;
mod diesel_session_repository;
mod diesel_user_repository;
mod diesel_verification_token_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_feedback_post_repository::DieselFeedbackPostRepository;
pub use diesel_feedback_vote_repository::DieselFeedbackVoteRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_verification_token_repository::DieselVerificationTokenRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
