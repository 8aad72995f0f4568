//! Single-use e-mail verification tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token issued for an e-mail sign-in link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    pub identifier: String,
    pub token: String,
    pub expires: DateTime<Utc>,
}

/// Lookup key for redeeming a [`VerificationToken`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationTokenParams {
    pub identifier: String,
    pub token: String,
}
