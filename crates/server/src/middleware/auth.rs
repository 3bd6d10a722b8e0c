use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use lang2fhir_core::OperationOutcome;

/// Header carrying the relay's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API Key authentication state
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Without a configured key every request is let through
    fn allows(&self, headers: &HeaderMap) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => headers
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|given| given == expected),
        }
    }
}

/// Reject requests that don't carry the configured API key
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let allowed = request
        .extensions()
        .get::<ApiKeyAuth>()
        .is_none_or(|auth| auth.allows(request.headers()));

    if !allowed {
        let outcome = OperationOutcome::unauthorized("Missing or invalid API key");
        return (StatusCode::UNAUTHORIZED, Json(outcome)).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(key: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = key {
            headers.insert(API_KEY_HEADER, key.parse().unwrap());
        }
        headers
    }

    #[test]
    fn open_without_configured_key() {
        let auth = ApiKeyAuth::new(None);
        assert!(auth.allows(&headers(None)));
    }

    #[test]
    fn key_must_match() {
        let auth = ApiKeyAuth::new(Some("secret".into()));
        assert!(auth.allows(&headers(Some("secret"))));
        assert!(!auth.allows(&headers(Some("wrong"))));
        assert!(!auth.allows(&headers(None)));
    }
}
