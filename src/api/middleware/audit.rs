//! Audit logging middleware.
//!
//! Logs every API request with the caller, method, path, response status
//! and latency. Runs innermost (after auth has injected `Principal`).

use std::time::Instant;

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::Principal;

/// Log API access for audit trail.
pub async fn log_access(
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let subject = req
        .extensions()
        .get::<Principal>()
        .map(|p| p.username.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let started = Instant::now();
    let response = next.run(req).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::info!(
        target: "patient_analytics::audit",
        subject = %subject,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "API access"
    );

    response
}
