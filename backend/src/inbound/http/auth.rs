//! Sign-out endpoint.
//!
//! Sign-in flows belong to the external auth library; it creates sessions
//! through the auth adapter and stores the token in the session cookie.

use actix_web::{HttpResponse, post, web};
use tracing::info;

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Delete the current session row and clear the cookie.
#[utoipa::path(
    post,
    path = "/auth/signout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 503, description = "Session store unavailable", body = crate::domain::Error)
    ),
    tags = ["auth"],
    operation_id = "signOut"
)]
#[post("/auth/signout")]
pub async fn sign_out(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(token) = session.token()? {
        state.auth.delete_session(&token).await?;
        info!("session signed out");
    }
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockAuthAdapter;
    use crate::inbound::http::test_utils::{
        SESSION_FIXTURE_TOKEN, login_route, session_cookie, state_with_auth,
        test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[actix_web::test]
    async fn sign_out_deletes_the_session_and_clears_the_cookie() {
        let mut auth = MockAuthAdapter::new();
        auth.expect_delete_session()
            .withf(|token| token.as_str() == SESSION_FIXTURE_TOKEN)
            .times(1)
            .returning(|_| Ok(()));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state_with_auth(auth, Arc::default())))
                .route("/login", login_route())
                .service(sign_out),
        )
        .await;
        let login = test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/signout")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&res);
        assert_eq!(cleared.value(), "");
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_out_without_session_is_a_no_op() {
        let mut auth = MockAuthAdapter::new();
        auth.expect_delete_session().never();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state_with_auth(auth, Arc::default())))
                .service(sign_out),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::post().uri("/auth/signout").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_out_surfaces_store_failures() {
        let mut auth = MockAuthAdapter::new();
        auth.expect_delete_session()
            .returning(|_| Err(Error::service_unavailable("session repository unavailable")));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state_with_auth(auth, Arc::default())))
                .route("/login", login_route())
                .service(sign_out),
        )
        .await;
        let login = test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/signout")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
