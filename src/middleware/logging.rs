//! Request logging middleware

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::ConnectInfo, extract::Request, middleware::Next, response::Response};

/// Middleware for logging every request before it is forwarded.
///
/// Records the client address, protocol version, method, and full request
/// target. Logging is best-effort: it can never fail the request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let client = client_addr(&request);
    let proto = format!("{:?}", request.version());
    let method = request.method().clone();
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::info!(
        client = %client,
        proto = %proto,
        method = %method,
        target = %target,
        "Request started"
    );

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            target = %target,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed with error"
        );
    } else {
        tracing::info!(
            method = %method,
            target = %target,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

/// Peer address from the connection, falling back to proxy headers.
fn client_addr(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.to_string();
    }
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
        .unwrap_or_else(|| "-".to_string())
}
