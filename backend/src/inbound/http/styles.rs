//! Global stylesheet endpoint.

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, get, web};

use crate::style::{BaseStyleTokens, base_styles};

/// Stylesheet rendered once at startup.
#[derive(Debug, Clone)]
pub struct Stylesheet(String);

impl Stylesheet {
    pub fn render(tokens: &BaseStyleTokens) -> Self {
        Self(base_styles(tokens))
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::render(&BaseStyleTokens::default())
    }
}

/// Serve the base stylesheet.
#[utoipa::path(
    get,
    path = "/styles/base.css",
    responses((status = 200, description = "Base stylesheet", content_type = "text/css", body = String)),
    tags = ["styles"],
    security([])
)]
#[get("/styles/base.css")]
pub async fn base_css(sheet: web::Data<Stylesheet>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(3600),
        ]))
        .body(sheet.0.clone())
}
