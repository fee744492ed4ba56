//! Request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::constants::USER_ID_HEADER;

/// Log method, path, caller, status and latency of every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let caller = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    log_completion(
        &method,
        &path,
        &caller,
        response.status(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    response
}

fn log_completion(method: &Method, path: &str, caller: &str, status: StatusCode, duration_ms: f64) {
    let duration_ms = format!("{duration_ms:.2}");

    if status.is_server_error() {
        warn!(
            method = %method,
            path,
            user_id = caller,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(
            method = %method,
            path,
            user_id = caller,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request rejected"
        );
    } else {
        info!(
            method = %method,
            path,
            user_id = caller,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }
}
