//! OpenAPI document, served at `/openapi.json`

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::{convert, health};
use crate::error::ErrorResponse;
use crate::models::{HtmlConversionRequest, UrlConversionRequest};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HTML to PDF Microservice",
        description = "Convert URLs or HTML content to PDF",
        version = "1.0.0"
    ),
    paths(health::health_check, convert::convert_url, convert::convert_html),
    components(schemas(
        UrlConversionRequest,
        HtmlConversionRequest,
        health::HealthResponse,
        ErrorResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Liveness"),
        (name = "convert", description = "URL and HTML to PDF conversion")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the conversion routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "HTML to PDF Microservice");
        assert_eq!(doc.info.version, "1.0.0");
        for path in ["/health", "/convert/url", "/convert/html"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
