//! Port for single-use verification tokens.
use async_trait::async_trait;

use crate::domain::{VerificationToken, VerificationTokenParams};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by verification token adapters.
    pub enum VerificationTokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "verification token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "verification token repository query failed: {message}",
        /// The `(identifier, token)` pair already exists.
        Conflict { message: String } => "verification token already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    async fn create(
        &self,
        token: &VerificationToken,
    ) -> Result<VerificationToken, VerificationTokenRepositoryError>;

    /// Atomically delete and return the token matching both `identifier` and
    /// `token`. Nothing is deleted when the pair is absent.
    async fn take(
        &self,
        params: &VerificationTokenParams,
    ) -> Result<Option<VerificationToken>, VerificationTokenRepositoryError>;
}
