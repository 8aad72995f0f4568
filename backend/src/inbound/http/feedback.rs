//! Feedback board form endpoints.
//!
//! ```text
//! POST /feedback/new         title=...&body=...
//! POST /feedback/vote        data={"post_id":"<uuid>"}
//! POST /feedback/withdraw    post_id=<uuid>
//! POST /feedback/unwithdraw  post_id=<uuid>
//! GET  /feedback/{id}
//! ```

use actix_web::http::header::{self, ETag, EntityTag, IfNoneMatch};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::PageCacheError;
use crate::domain::{ActionError, ActionOutcome, Error, FeedbackPost, FeedbackPostId};

use super::ApiResult;
use super::error::action_error_response;
use super::session::SessionContext;
use super::state::HttpState;

/// Header naming the page whose cached rendering a vote invalidated.
pub const REVALIDATED_PATH_HEADER: &str = "x-revalidated-path";

const POST_NOT_FOUND: &str = "Post not found";
const NOT_LOGGED_IN: &str = "Not logged in";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewFeedbackForm {
    pub title: String,
    pub body: String,
}

/// Vote form; `data` holds a JSON document naming the post.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct VoteForm {
    #[schema(example = r#"{"post_id":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}"#)]
    pub data: String,
}

#[derive(Debug, Deserialize)]
struct VotePayload {
    post_id: FeedbackPostId,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PostIdForm {
    #[schema(value_type = String, format = Uuid)]
    pub post_id: FeedbackPostId,
}

fn respond(outcome: ActionOutcome) -> HttpResponse {
    match outcome {
        ActionOutcome::Redirect(path) => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, path))
            .finish(),
        ActionOutcome::Revalidated(path) => HttpResponse::NoContent()
            .insert_header((REVALIDATED_PATH_HEADER, path))
            .finish(),
        ActionOutcome::Failed(failure) => action_error_response(&failure),
    }
}

fn parse_vote_payload(raw: &str) -> Result<FeedbackPostId, Error> {
    serde_json::from_str::<VotePayload>(raw)
        .map(|payload| payload.post_id)
        .map_err(|error| {
            debug!(%error, "rejecting malformed vote payload");
            Error::invalid_request("Malformed vote payload")
                .with_details(json!({ "field": "data", "code": "malformed" }))
        })
}

fn map_cache_error(error: PageCacheError) -> Error {
    Error::internal(error.to_string())
}

fn is_fresh(condition: Option<&IfNoneMatch>, etag: &EntityTag) -> bool {
    match condition {
        Some(IfNoneMatch::Any) => true,
        Some(IfNoneMatch::Items(tags)) => tags.iter().any(|tag| tag.weak_eq(etag)),
        None => false,
    }
}

/// Create a post with the author's vote.
#[utoipa::path(
    post,
    path = "/feedback/new",
    request_body(content = NewFeedbackForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Post created", headers(("Location" = String, description = "Post page"))),
        (status = 400, description = "Title or body out of bounds", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "postFeedback"
)]
#[post("/feedback/new")]
pub async fn post_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<NewFeedbackForm>,
) -> ApiResult<HttpResponse> {
    let caller = session.current_user(&state).await?;
    let NewFeedbackForm { title, body } = form.into_inner();
    let outcome = state
        .feedback
        .post_feedback(caller.as_ref(), &title, &body)
        .await?;
    Ok(respond(outcome))
}

/// Vote for a post.
#[utoipa::path(
    post,
    path = "/feedback/vote",
    request_body(content = VoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 204, description = "Vote recorded", headers(("X-Revalidated-Path" = String, description = "Invalidated page"))),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "Unknown post", body = Error),
        (status = 409, description = "Already voted", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "votePost"
)]
#[post("/feedback/vote")]
pub async fn vote_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<VoteForm>,
) -> ApiResult<HttpResponse> {
    let Some(caller) = session.current_user(&state).await? else {
        return Err(Error::unauthorized(NOT_LOGGED_IN));
    };
    let post_id = parse_vote_payload(&form.data)?;
    let outcome = state.feedback.vote_post(Some(&caller), &post_id).await?;
    Ok(respond(outcome))
}

/// Withdraw a post.
#[utoipa::path(
    post,
    path = "/feedback/withdraw",
    request_body(content = PostIdForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Post withdrawn"),
        (status = 422, description = "Action refused", body = ActionError)
    ),
    tags = ["feedback"],
    operation_id = "withdrawPost"
)]
#[post("/feedback/withdraw")]
pub async fn withdraw_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostIdForm>,
) -> ApiResult<HttpResponse> {
    let caller = session.current_user(&state).await?;
    let outcome = state
        .feedback
        .withdraw_post(caller.as_ref(), &form.post_id)
        .await?;
    Ok(respond(outcome))
}

/// Reopen a withdrawn post.
#[utoipa::path(
    post,
    path = "/feedback/unwithdraw",
    request_body(content = PostIdForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Post reopened"),
        (status = 422, description = "Action refused", body = ActionError)
    ),
    tags = ["feedback"],
    operation_id = "unwithdrawPost"
)]
#[post("/feedback/unwithdraw")]
pub async fn unwithdraw_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostIdForm>,
) -> ApiResult<HttpResponse> {
    let caller = session.current_user(&state).await?;
    let outcome = state
        .feedback
        .unwithdraw_post(caller.as_ref(), &form.post_id)
        .await?;
    Ok(respond(outcome))
}

/// Fetch a post. The `ETag` covers the stored post state and the page
/// revision, so it changes on any status or vote update.
#[utoipa::path(
    get,
    path = "/feedback/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = FeedbackPost),
        (status = 304, description = "Unchanged since the supplied ETag"),
        (status = 404, description = "Post not found", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "getPost",
    security([])
)]
#[get("/feedback/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    if_none_match: Option<web::Header<IfNoneMatch>>,
) -> ApiResult<HttpResponse> {
    let post_id: FeedbackPostId = path
        .parse()
        .map_err(|_| Error::not_found(POST_NOT_FOUND))?;
    let post = state
        .feedback
        .get_post(&post_id)
        .await?
        .ok_or_else(|| Error::not_found(POST_NOT_FOUND))?;
    let revision = state
        .page_cache
        .revision(&post_id.page_path())
        .await
        .map_err(map_cache_error)?;

    let etag = EntityTag::new_strong(format!("{post_id}-{}-{revision}", post.state_tag()));
    if is_fresh(if_none_match.as_deref(), &etag) {
        return Ok(HttpResponse::NotModified().insert_header(ETag(etag)).finish());
    }
    Ok(HttpResponse::Ok().insert_header(ETag(etag)).json(post))
}
