mod app;
mod config;
mod routes;
mod services;
mod state;

use std::path::Path;

use palpite_shared::{BuildDiagnostic, MunicipalityRegistry};
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let data_path = config::data_path();
    let features = match services::feature_loader::load_features(
        Path::new(&data_path),
        config::NAME_PROPERTY,
    ) {
        Ok(features) => features,
        Err(e) => {
            tracing::error!(error = %e, %data_path, "failed to load municipality features");
            return;
        }
    };

    let (registry, diagnostics) = MunicipalityRegistry::build(features);
    for diagnostic in &diagnostics {
        match diagnostic {
            BuildDiagnostic::DuplicateKey { key, kept, discarded } => {
                tracing::warn!(%key, %kept, %discarded, "duplicate municipality key, last one wins");
            }
            BuildDiagnostic::UnusableName { display_name } => {
                tracing::warn!(%display_name, "municipality name normalizes to nothing, skipped");
            }
        }
    }
    if registry.is_empty() {
        // Degraded mode per the game rules: with no names there is no
        // deterministic daily target, so refuse to serve.
        tracing::error!(%data_path, "no usable municipalities loaded, refusing to start");
        return;
    }
    tracing::info!("loaded {} municipalities from {data_path}", registry.len());

    let state = AppState::new(registry, config::game_name());

    tokio::spawn(services::session_evictor::run(state.clone()));

    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("Palpite server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
