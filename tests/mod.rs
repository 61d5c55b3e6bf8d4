//! tests/mod.rs
//! Shared test helpers: spawn the app (and fake upstreams) on ephemeral ports.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{http::header::CONTENT_TYPE, routing::get, serve, Router};
use cluster_example_app::core::server::create_app;
use cluster_example_app::{AppState, EnvironmentVariables, MapEnv};
use tokio::net::TcpListener as TokioTcpListener;

/// Binds an ephemeral port and serves `app` on it in a background task.
fn serve_on_random_port(app: Router) -> String {
    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener = TokioTcpListener::from_std(std_listener)
        .expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    tokio::spawn(async move {
        serve(tokio_listener, app)
            .await
            .expect("Server failed");
    });

    format!("http://{}", addr)
}

/// Spawns the app with `vars` as its environment and returns its base URL.
pub fn spawn_app(vars: MapEnv) -> String {
    let state: AppState = AppState::new(EnvironmentVariables::default(), Arc::new(vars));
    serve_on_random_port(create_app(state))
}

/// Spawns a stand-in for the internal microservice answering `GET /` with `body`.
pub fn spawn_upstream(body: &'static str, content_type: &'static str) -> String {
    let app: Router = Router::new().route(
        "/",
        get(move || async move { ([(CONTENT_TYPE, content_type)], body) }),
    );
    serve_on_random_port(app)
}

/// A URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener: std::net::TcpListener = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Sends a GET and returns status, content type and raw body.
pub async fn get_raw(url: &str) -> (reqwest::StatusCode, String, String) {
    send_raw(reqwest::Method::GET, url).await
}

/// Sends a bodiless request with `method` and returns status, content type and raw body.
pub async fn send_raw(method: reqwest::Method, url: &str) -> (reqwest::StatusCode, String, String) {
    let resp: reqwest::Response = reqwest::Client::new()
        .request(method, url)
        .send()
        .await
        .expect("Failed to execute request.");

    let status: reqwest::StatusCode = resp.status();
    let content_type: String = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body: String = resp.text().await.unwrap();

    (status, content_type, body)
}
