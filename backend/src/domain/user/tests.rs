//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn user() -> User {
    User {
        id: UserId::new(VALID_ID).expect("valid id"),
        name: Some("Ada".to_owned()),
        email: EmailAddress::new("ada@example.com").expect("valid email"),
        email_verified: None,
        image: None,
        role: Role::Default,
    }
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_round_trips_through_string() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(String::from(id), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("ada.example.com", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
#[case("a da@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
#[case("default", Some(Role::Default))]
#[case("ADMIN", Some(Role::Admin))]
#[case("admin", None)]
#[case("moderator", None)]
fn role_parse_is_case_sensitive(#[case] raw: &str, #[case] expected: Option<Role>) {
    assert_eq!(Role::parse(raw), expected);
}

#[rstest]
fn user_serialises_camel_case(user: User) {
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "name": "Ada",
            "email": "ada@example.com",
            "emailVerified": null,
            "image": null,
            "role": "default",
        })
    );
}

#[rstest]
fn admin_role_is_reported(mut user: User) {
    assert!(!user.is_admin());
    user.role = Role::Admin;
    assert!(user.is_admin());
}

#[rstest]
fn deserialising_rejects_bad_email() {
    let payload = json!({
        "id": VALID_ID,
        "name": null,
        "email": "nope",
        "emailVerified": null,
        "image": null,
        "role": "ADMIN",
    });
    assert!(serde_json::from_value::<User>(payload).is_err());
}
