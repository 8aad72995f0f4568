//! Tests for feedback primitives.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

use crate::domain::ErrorCode;

#[fixture]
fn long_body() -> String {
    "This would make late-night reading much easier on the eyes for everyone. ".repeat(2)
}

#[rstest]
#[case("ab", FeedbackValidationError::TitleTooShort { min: TITLE_MIN })]
#[case(&"x".repeat(TITLE_MAX + 1), FeedbackValidationError::TitleTooLong { max: TITLE_MAX })]
fn title_bounds(#[case] title: &str, #[case] expected: FeedbackValidationError) {
    assert_eq!(FeedbackTitle::new(title), Err(expected));
}

#[rstest]
#[case("abc")]
#[case(&"x".repeat(TITLE_MAX))]
fn title_accepts_inclusive_bounds(#[case] title: &str) {
    assert!(FeedbackTitle::new(title).is_ok());
}

#[rstest]
fn title_counts_characters_not_bytes() {
    assert!(FeedbackTitle::new("ééé").is_ok());
    assert!(FeedbackTitle::new("éé").is_err());
}

#[rstest]
#[case(BODY_MIN - 1, Some(FeedbackValidationError::BodyTooShort { min: BODY_MIN }))]
#[case(BODY_MIN, None)]
#[case(BODY_MAX, None)]
#[case(BODY_MAX + 1, Some(FeedbackValidationError::BodyTooLong { max: BODY_MAX }))]
fn body_bounds(#[case] length: usize, #[case] expected: Option<FeedbackValidationError>) {
    let result = FeedbackBody::new("b".repeat(length));
    assert_eq!(result.err(), expected);
}

#[rstest]
fn draft_reports_title_before_body() {
    let err = FeedbackDraft::try_from_parts("x", "short").expect_err("invalid draft");
    assert_eq!(err.field(), "title");
}

#[rstest]
fn validation_error_maps_to_invalid_request_with_details() {
    let err: Error = FeedbackValidationError::BodyTooShort { min: BODY_MIN }.into();
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "body");
    assert_eq!(details["code"], "too_short");
}

#[rstest]
fn new_post_starts_open_with_self_vote(long_body: String) {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 18, 9, 30, 0)
        .single()
        .expect("valid time");
    let draft = FeedbackDraft::try_from_parts("Add dark mode", &long_body).expect("valid draft");
    let author = UserId::random();

    let post = NewFeedbackPost::with_self_vote(author, draft, now);

    assert_eq!(post.status, FeedbackStatus::Open);
    assert_eq!(post.num_votes, 1);
    assert_eq!(post.num_comments, 0);
    assert_eq!(post.posted_at, now);
    assert_eq!(post.last_active_at, now);
    assert_eq!(post.author_id, author);
}

#[rstest]
#[case(FeedbackStatus::Open)]
#[case(FeedbackStatus::UnderReview)]
#[case(FeedbackStatus::InProgress)]
#[case(FeedbackStatus::Withdrawn)]
fn status_parses_its_own_spelling(#[case] status: FeedbackStatus) {
    assert_eq!(status.as_str().parse::<FeedbackStatus>(), Ok(status));
}

#[rstest]
fn status_rejects_unknown_value() {
    assert_eq!(
        "archived".parse::<FeedbackStatus>(),
        Err(UnknownStatus("archived".to_owned()))
    );
}

#[rstest]
fn page_path_uses_uuid() {
    let id: FeedbackPostId = "6f1c7a9e-3c1b-4d5e-8f00-0123456789ab"
        .parse()
        .expect("valid id");
    assert_eq!(id.page_path(), "/feedback/6f1c7a9e-3c1b-4d5e-8f00-0123456789ab");
}
