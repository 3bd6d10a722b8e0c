//! lang2fhir-server: natural language FHIR relay binary entrypoint.

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lang2fhir_server::config::Config;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = Config::from_env();

    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("API key authentication disabled (no API_KEY env var)");
    }
    match config.credentials.backend() {
        Ok(backend) => tracing::info!(backend = backend.name(), url = %backend.fhir_base_url(), "FHIR backend configured"),
        Err(e) => tracing::warn!(error = %e, "FHIR backend not configured, operations will fail"),
    }
    if config.credentials.phenoml_token.is_none() {
        tracing::warn!("PHENOML_TOKEN not set, lang2fhir operations will fail");
    }
    tracing::info!(url = %config.lang2fhir_url, "Using lang2fhir service");
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    let app = lang2fhir_server::build_app(&config);

    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting lang2fhir relay on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Resolve on SIGINT or SIGTERM so in-flight upstream calls can finish
async fn shutdown_signal() {
    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");

    #[cfg(unix)]
    let signal = tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        _ = sigterm.recv() => Ok("SIGTERM"),
    };

    #[cfg(not(unix))]
    let signal = tokio::signal::ctrl_c().await.map(|_| "Ctrl+C");

    match signal {
        Ok(name) => tracing::info!(signal = name, "Starting graceful shutdown"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
