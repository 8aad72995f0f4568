//! OpenAPI document for the HTTP interface.
//!
//! Served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ActionError, Error, ErrorCode, FeedbackPost, FeedbackStatus};
use crate::inbound::http::feedback::{NewFeedbackForm, PostIdForm, VoteForm};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "feedback_session",
                "Encrypted cookie holding the session token.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Feedback board API",
        description = "Form actions for posting, voting on and withdrawing feedback."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::feedback::post_feedback,
        crate::inbound::http::feedback::vote_post,
        crate::inbound::http::feedback::withdraw_post,
        crate::inbound::http::feedback::unwithdraw_post,
        crate::inbound::http::feedback::get_post,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::styles::base_css,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ActionError,
        FeedbackPost,
        FeedbackStatus,
        NewFeedbackForm,
        VoteForm,
        PostIdForm
    )),
    tags(
        (name = "feedback", description = "Feedback board actions"),
        (name = "auth", description = "Session management"),
        (name = "styles", description = "Global stylesheet"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("FeedbackPost", &["id", "authorId", "title", "status", "numVotes"])]
    #[case("ActionError", &["field", "message"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = object_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    #[case("/feedback/new")]
    #[case("/feedback/vote")]
    #[case("/feedback/withdraw")]
    #[case("/feedback/unwithdraw")]
    #[case("/feedback/{id}")]
    #[case("/auth/signout")]
    #[case("/styles/base.css")]
    fn paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }
}
