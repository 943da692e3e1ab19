use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use log::warn;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Decides whether a presented credential may use the API.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, credential: &str) -> bool;
}

/// The single shared key, fixed for the life of the process.
pub struct StaticApiKey {
    key: String,
}

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Authorizer for StaticApiKey {
    fn is_authorized(&self, credential: &str) -> bool {
        constant_time_eq(self.key.as_bytes(), credential.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Rejects requests that do not carry a valid `X-API-Key` header.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = match request.headers().get(API_KEY_HEADER) {
        Some(value) => value.to_str().unwrap_or_default(),
        None => {
            return Err(ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Missing X-API-Key header",
            ));
        }
    };

    if !state.authorizer.is_authorized(key) {
        warn!("Rejected request to {} with invalid API key", request.uri().path());
        return Err(ApiError::new(StatusCode::FORBIDDEN, "Invalid API key"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_key_matches_exactly() {
        let auth = StaticApiKey::new("0f3c9a1be2d44c7a8f00112233445566");
        assert!(auth.is_authorized("0f3c9a1be2d44c7a8f00112233445566"));
        assert!(!auth.is_authorized("0f3c9a1be2d44c7a8f0011223344556"));
        assert!(!auth.is_authorized("wrong"));
        assert!(!auth.is_authorized(""));
    }
}
