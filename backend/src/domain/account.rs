//! OAuth provider accounts linked to users.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Identifies an account by the provider that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAccountRef {
    pub provider: String,
    pub provider_account_id: String,
}

/// Provider account as handed over by the authentication library.
///
/// `(provider, provider_account_id)` is unique; the storage row id is
/// generated on link and never leaves the persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub account_type: String,
    pub provider: String,
    pub provider_account_id: String,
    #[serde(default, rename = "refresh_token")]
    pub refresh_token: Option<String>,
    #[serde(default, rename = "access_token")]
    pub access_token: Option<String>,
    #[serde(default, rename = "expires_at")]
    pub expires_at: Option<i64>,
    #[serde(default, rename = "token_type")]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default, rename = "id_token")]
    pub id_token: Option<String>,
    #[serde(default, rename = "session_state")]
    pub session_state: Option<String>,
}

impl Account {
    pub fn provider_ref(&self) -> ProviderAccountRef {
        ProviderAccountRef {
            provider: self.provider.clone(),
            provider_account_id: self.provider_account_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialises_oauth_token_fields_in_snake_case() {
        let account: Account = serde_json::from_value(json!({
            "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "type": "oauth",
            "provider": "github",
            "providerAccountId": "42",
            "access_token": "gho_abc",
            "expires_at": 1_700_000_000,
        }))
        .expect("deserialise account");

        assert_eq!(account.account_type, "oauth");
        assert_eq!(account.access_token.as_deref(), Some("gho_abc"));
        assert_eq!(account.expires_at, Some(1_700_000_000));
        assert!(account.refresh_token.is_none());
        assert_eq!(
            account.provider_ref(),
            ProviderAccountRef {
                provider: "github".to_owned(),
                provider_account_id: "42".to_owned(),
            }
        );
    }
}
