//! Authorization
//!
//! Every conversion route requires `Authorization: Bearer <API_TOKEN>`.
//! [`Authorized`] is the axum extractor that enforces it; it must appear
//! before any body extractor so unauthorized requests never reach
//! validation or rendering.

mod guard;

pub use guard::{AuthError, TokenGuard};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the configured bearer token
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

#[async_trait]
impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // A header that is not visible ASCII cannot carry a valid token
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        state.guard().authorize(header)?;
        Ok(Authorized)
    }
}
