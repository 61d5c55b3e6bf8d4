// Handlers for the four public routes

use std::error::Error;

use axum::{
    body::Body,
    extract::{Query, RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderValue, Uri},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument, warn};

use crate::config::environment::{INTERNAL_URL_VAR, NAME_SERVICE_VAR};
use crate::config::state::AppState;
use crate::utils::response_handler::{HealthResponse, MessageResponse};

/// Greets with the configured service name, if any
#[instrument(skip(state))]
pub async fn hello_handler(State(state): State<AppState>) -> MessageResponse {
    match state.lookup.get_non_empty(NAME_SERVICE_VAR) {
        Some(name) => MessageResponse::new(format!("Hello World from service: {name}")),
        None => MessageResponse::new("Hello World!"),
    }
}

/// Always healthy; no dependency is probed
pub async fn health_handler() -> HealthResponse {
    HealthResponse::healthy()
}

/// Echoes the value of the variable named by `?key=`.
///
/// An unset variable and an empty one both yield an empty message.
/// When `key` is repeated, the first well-formed occurrence wins.
#[instrument(skip(state, raw_query))]
pub async fn var_handler(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> MessageResponse {
    let params: Vec<(String, String)> = parse_query(raw_query.as_deref().unwrap_or_default());

    let key: Option<&str> = params
        .iter()
        .find(|(name, _)| name == "key")
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty());

    match key {
        Some(key) => {
            info!("Looking up variable {key}");
            MessageResponse::new(state.lookup.get(key).unwrap_or_default())
        }
        None => MessageResponse::new("Invalid key, not found"),
    }
}

/// Decodes a query string, dropping malformed pairs instead of keeping
/// them literally. A pair is malformed when it holds a `;` or a `%` not
/// followed by two hex digits.
fn parse_query(raw: &str) -> Vec<(String, String)> {
    let well_formed: String = raw
        .split('&')
        .filter(|pair| !pair.contains(';') && has_valid_escapes(pair))
        .collect::<Vec<&str>>()
        .join("&");

    // Only the query part is inspected, the path is a placeholder
    let uri: Uri = match format!("/?{well_formed}").parse() {
        Ok(uri) => uri,
        Err(err) => {
            warn!("Unparseable query string: {err}");
            return Vec::new();
        }
    };

    match Query::<Vec<(String, String)>>::try_from_uri(&uri) {
        Ok(Query(params)) => params,
        Err(err) => {
            warn!("Failed to decode query string: {err}");
            Vec::new()
        }
    }
}

fn has_valid_escapes(pair: &str) -> bool {
    let bytes: &[u8] = pair.as_bytes();
    let mut i: usize = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escaped: Option<&[u8]> = bytes.get(i + 1..i + 3);
            if !escaped.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    true
}

/// Calls the URL in `internalUrlMicroservice` and relays its body
#[instrument(skip(state))]
pub async fn call_internal_microservice_handler(State(state): State<AppState>) -> Response {
    let Some(url) = state.lookup.get_non_empty(INTERNAL_URL_VAR) else {
        warn!("{INTERNAL_URL_VAR} is not set");
        return MessageResponse::new(format!("Missing env var: {INTERNAL_URL_VAR}")).into_response();
    };

    info!("Calling internal microservice at {url}");

    match state.http_client.get(&url).send().await {
        Ok(upstream) => relay_upstream(upstream),
        Err(err) => {
            let reason: String = error_chain(&err);
            warn!("Call to {url} failed: {reason}");
            MessageResponse::new(format!("Failed to call service: {reason}")).into_response()
        }
    }
}

/// Streams the upstream body unchanged; status is always 200
fn relay_upstream(upstream: reqwest::Response) -> Response {
    let content_type: HeaderValue = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let mut response: Response = Response::new(Body::from_stream(upstream.bytes_stream()));
    response.headers_mut().insert(CONTENT_TYPE, content_type);
    response
}

/// Joins an error with all of its sources, outermost first
fn error_chain(err: &dyn Error) -> String {
    let mut reason: String = err.to_string();
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        reason.push_str(": ");
        reason.push_str(&s.to_string());
        source = s.source();
    }

    reason
}
