//! Audit logging for operation calls

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::request_id::RequestId;

/// Log every operation call (POST) with its request ID and outcome status
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;

    if method == Method::POST {
        let status = response.status();
        if status.is_success() {
            tracing::info!(
                target: "audit",
                request_id = %request_id,
                operation = %path,
                status = status.as_u16(),
                "Operation call"
            );
        } else {
            tracing::warn!(
                target: "audit",
                request_id = %request_id,
                operation = %path,
                status = status.as_u16(),
                "Operation call failed"
            );
        }
    }

    response
}
