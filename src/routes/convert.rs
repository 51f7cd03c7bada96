//! Conversion endpoints
//!
//! - `POST /convert/url`  `{"url": "..."}`
//! - `POST /convert/html` `{"html": "..."}`
//!
//! Both require a bearer token and answer with the PDF as an attachment.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use crate::auth::Authorized;
use crate::error::{AppError, ErrorResponse, Result, SourceKind};
use crate::models::{HtmlConversionRequest, UrlConversionRequest, ValidJson};
use crate::state::AppState;

/// Create the conversion router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/convert/url", post(convert_url))
        .route("/convert/html", post(convert_html))
}

/// Convert a URL to PDF
#[utoipa::path(
    post,
    path = "/convert/url",
    tag = "convert",
    request_body = UrlConversionRequest,
    responses(
        (status = 200, description = "Rendered PDF attachment", content_type = "application/pdf", body = Vec<u8>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 422, description = "Invalid request body or URL", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "convert",
    skip_all,
    fields(request_id = %uuid::Uuid::new_v4(), kind = "URL")
)]
pub async fn convert_url(
    State(state): State<AppState>,
    _auth: Authorized,
    ValidJson(request): ValidJson<UrlConversionRequest>,
) -> Result<Response> {
    tracing::info!(host = request.url.host(), "Converting URL to PDF");
    let bytes = state
        .renderer()
        .render_url(&request.url)
        .await
        .map_err(|e| AppError::conversion(SourceKind::Url, e))?;
    Ok(pdf_response(bytes))
}

/// Convert HTML content to PDF
#[utoipa::path(
    post,
    path = "/convert/html",
    tag = "convert",
    request_body = HtmlConversionRequest,
    responses(
        (status = 200, description = "Rendered PDF attachment", content_type = "application/pdf", body = Vec<u8>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "convert",
    skip_all,
    fields(request_id = %uuid::Uuid::new_v4(), kind = "HTML")
)]
pub async fn convert_html(
    State(state): State<AppState>,
    _auth: Authorized,
    ValidJson(request): ValidJson<HtmlConversionRequest>,
) -> Result<Response> {
    tracing::info!(html_bytes = request.html.len(), "Converting HTML to PDF");
    let bytes = state
        .renderer()
        .render_html(&request.html)
        .await
        .map_err(|e| AppError::conversion(SourceKind::Html, e))?;
    Ok(pdf_response(bytes))
}

fn pdf_response(bytes: Vec<u8>) -> Response {
    tracing::info!(pdf_bytes = bytes.len(), "PDF rendered");
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=output.pdf"),
        ],
        bytes,
    )
        .into_response()
}
