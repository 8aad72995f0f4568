//! Inbound records for the authentication storage contract.
//!
//! The authentication library hands these to the auth adapter. They validate
//! on deserialisation through the typed fields ([`UserId`], [`EmailAddress`]),
//! so malformed ids or addresses never reach a repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmailAddress, UserId};

/// Profile for a user that does not exist yet; the id is generated on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    pub email: EmailAddress,
    #[serde(default)]
    pub email_verified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<EmailAddress>,
    #[serde(default)]
    pub email_verified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
}

impl UserUpdate {
    /// Update touching no column besides the key.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.email_verified.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn new_user_defaults_optional_fields() {
        let user: NewUser =
            serde_json::from_value(json!({ "email": "ada@example.com" })).expect("deserialise");
        assert_eq!(user.email.as_ref(), "ada@example.com");
        assert!(user.name.is_none());
        assert!(user.email_verified.is_none());
    }

    #[rstest]
    fn new_user_rejects_invalid_email() {
        let result = serde_json::from_value::<NewUser>(json!({ "email": "nobody" }));
        assert!(result.is_err());
    }

    #[rstest]
    #[case(json!({ "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6" }), true)]
    #[case(json!({ "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "Ada" }), false)]
    fn update_emptiness(#[case] payload: serde_json::Value, #[case] empty: bool) {
        let update: UserUpdate = serde_json::from_value(payload).expect("deserialise");
        assert_eq!(update.is_empty(), empty);
    }

    #[rstest]
    fn update_rejects_non_uuid_id() {
        let result = serde_json::from_value::<UserUpdate>(json!({ "id": "42" }));
        assert!(result.is_err());
    }
}
