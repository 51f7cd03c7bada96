//! Error types for the PDF Render Server

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::render::RenderError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// What a failed conversion was converting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Url,
    Html,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Url => "URL",
            SourceKind::Html => "HTML",
        }
    }
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(#[from] AuthError),

    #[error("{message}")]
    Validation { status: StatusCode, message: String },

    #[error("Failed to convert {}: {error}", .source_kind.as_str())]
    Conversion {
        source_kind: SourceKind,
        error: RenderError,
    },
}

impl AppError {
    pub fn conversion(source_kind: SourceKind, error: RenderError) -> Self {
        AppError::Conversion { source_kind, error }
    }
}

// Missing content type, unparsable JSON and invalid fields are all
// request validation failures to the client
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: rejection.body_text(),
        }
    }
}

/// Error response body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    #[schema(example = "unauthorized")]
    pub error: String,
    /// Human-readable description
    #[schema(example = "Invalid token")]
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AppError::Unauthorized(e) => {
                tracing::debug!("Rejected request: {}", e);
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            AppError::Validation { status, message } => {
                tracing::debug!("Validation failed ({}): {}", status, message);
                (*status, "validation_error")
            }
            AppError::Conversion { error, .. } => {
                tracing::error!("Render error: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "conversion_failed")
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            detail: self.to_string(),
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_messages() {
        assert_eq!(
            AppError::from(AuthError::MalformedHeader).to_string(),
            "Invalid authorization header"
        );
        assert_eq!(AppError::from(AuthError::TokenMismatch).to_string(), "Invalid token");
    }

    #[test]
    fn test_conversion_message_embeds_render_error() {
        let err = AppError::conversion(
            SourceKind::Url,
            RenderError::Navigation("net::ERR_NAME_NOT_RESOLVED".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Failed to convert URL: Navigation failed: net::ERR_NAME_NOT_RESOLVED"
        );

        let err = AppError::conversion(SourceKind::Html, RenderError::Launch("no chrome".to_string()));
        assert!(err.to_string().starts_with("Failed to convert HTML: "));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::from(AuthError::TokenMismatch).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let response = AppError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "bad url".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response =
            AppError::conversion(SourceKind::Html, RenderError::Export("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_body_carries_detail() {
        let response = AppError::from(AuthError::TokenMismatch).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "unauthorized", "detail": "Invalid token"}));
    }
}
