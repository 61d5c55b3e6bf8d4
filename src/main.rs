// Start of file: src/main.rs

use axum::{serve, Router};
use tokio::net::TcpListener;

use cluster_example_app::core::{logging, server};
use cluster_example_app::{AppState, EnvironmentVariables, MemoryReservation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let environment: EnvironmentVariables = EnvironmentVariables::load()?;

    // Held until the server exits; only its footprint matters
    let reservation: MemoryReservation =
        MemoryReservation::allocate(environment.memory_reservation_bytes);

    let listener: TcpListener = server::setup_listener(&environment).await?;
    let app: Router = server::create_app(AppState::from_process_env(environment));

    let instance: String = hostname::get()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());

    tracing::info!(
        "Server listening on: {} (instance: {}, reserved: {} bytes)",
        listener.local_addr()?,
        instance,
        reservation.len()
    );

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    drop(reservation);

    Ok(())
}

// End of file: src/main.rs
