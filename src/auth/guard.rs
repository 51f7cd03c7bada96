//! Bearer token verification

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::ApiToken;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Header absent or not of the form `Bearer <token>`
    #[error("Invalid authorization header")]
    MalformedHeader,

    /// Well-formed header carrying the wrong token
    #[error("Invalid token")]
    TokenMismatch,
}

/// Checks `Authorization` header values against the configured secret.
#[derive(Debug, Clone)]
pub struct TokenGuard {
    expected: [u8; 32],
}

impl TokenGuard {
    pub fn new(secret: &ApiToken) -> Self {
        Self {
            expected: digest(secret.as_str()),
        }
    }

    /// Verify a raw header value and return the presented token.
    ///
    /// The prefix match is case-sensitive and the token is everything after
    /// `"Bearer "`, whitespace included.
    pub fn authorize<'h>(&self, header: Option<&'h str>) -> Result<&'h str, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MalformedHeader)?;

        if constant_time_eq(&digest(token), &self.expected) {
            Ok(token)
        } else {
            Err(AuthError::TokenMismatch)
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

// Both sides are fixed-length digests, so neither the secret's length nor the
// position of the first differing byte affects the running time.
fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
