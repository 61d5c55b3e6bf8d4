// Response bodies shared by the handlers and the request logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// `{"message": "..."}` body returned by every enveloped route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> axum::response::Response {
        // Failures are reported in the body, the status stays 200
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Fixed body of the health probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Logs method, path, status and duration of every request.
///
/// The body is passed through untouched, so forwarded upstream bodies
/// reach the caller byte for byte.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response<Body> {
    let start_time: Instant = Instant::now();
    let method: Method = req.method().clone();
    let path: String = req.uri().path().to_owned();

    let response: Response<Body> = next.run(req).await;

    let status: StatusCode = response.status();
    let duration_ms: u64 = start_time.elapsed().as_millis() as u64;
    let date: String = Utc::now().to_rfc3339();

    if status.is_success() {
        info!(%method, %path, status = status.as_u16(), duration_ms, %date, "Request handled");
    } else {
        warn!(%method, %path, status = status.as_u16(), duration_ms, %date, "Request failed");
    }

    response
}
