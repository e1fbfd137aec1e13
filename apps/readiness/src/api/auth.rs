//! # Authentication Module
//!
//! Optional API key authentication for the Readiness HTTP API.
//!
//! ## Configuration
//!
//! - `READINESS_API_KEY`: If set, all requests except `/health` require this key
//!
//! The key is read from the environment only, never from the config file.
//!
//! ## Usage
//!
//! ```text
//! Authorization: Bearer <your-api-key>
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "READINESS_API_KEY";

/// Paths reachable without a key (load balancer checks).
const PUBLIC_PATHS: &[&str] = &["/health"];

// =============================================================================
// API KEY
// =============================================================================

/// A configured API key.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// Create a key. Empty keys are treated as "not configured".
    pub fn new(key: impl AsRef<str>) -> Option<Self> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(Arc::from(key)))
        }
    }

    /// Read `READINESS_API_KEY`.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV).ok().and_then(Self::new)
    }

    /// Compare a provided key in constant time.
    ///
    /// Both sides are padded to the same length so the comparison always
    /// covers the same number of bytes.
    pub fn matches(&self, provided: &str) -> bool {
        let expected = self.0.as_bytes();
        let provided = provided.as_bytes();

        let len = expected.len().max(provided.len());
        let mut lhs = vec![0u8; len];
        let mut rhs = vec![0u8; len];
        lhs[..expected.len()].copy_from_slice(expected);
        rhs[..provided.len()].copy_from_slice(provided);

        let equal: bool = lhs.ct_eq(&rhs).into();
        equal && expected.len() == provided.len()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Reject requests without a matching `Authorization` header.
///
/// Accepts both `Bearer <key>` and a raw `<key>`.
pub async fn api_key_auth_middleware(
    State(key): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if PUBLIC_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v));

    match provided {
        Some(value) if key.matches(value) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(
                event = "auth_failure",
                reason = "invalid_api_key",
                "Authentication failed: invalid API key"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
