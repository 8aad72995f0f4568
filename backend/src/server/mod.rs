//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use feedback_board::Trace;
#[cfg(debug_assertions)]
use feedback_board::doc::ApiDoc;
use feedback_board::inbound::http::auth::sign_out;
use feedback_board::inbound::http::feedback::{
    get_post, post_feedback, unwithdraw_post, vote_post, withdraw_post,
};
use feedback_board::inbound::http::health::{HealthState, live, ready};
use feedback_board::inbound::http::state::HttpState;
use feedback_board::inbound::http::styles::{Stylesheet, base_css};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    stylesheet: web::Data<Stylesheet>,
}

fn build_app(
    deps: AppDependencies,
    session: SessionMiddleware<CookieSessionStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        stylesheet,
    } = deps;

    let actions = web::scope("")
        .wrap(session)
        .service(post_feedback)
        .service(vote_post)
        .service(withdraw_post)
        .service(unwithdraw_post)
        .service(get_post)
        .service(sign_out);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(stylesheet)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(base_css);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // The catch-all scope goes last so the fixed paths above match first.
    app.service(actions)
}

/// Bind the listener and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        db_pool,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(build_http_state(&db_pool)),
        stylesheet: web::Data::new(Stylesheet::default()),
    };

    let server = HttpServer::new(move || build_app(deps.clone(), session.middleware()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
