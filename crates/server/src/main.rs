//! Pushboard server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{Router, middleware, routing::get};
use pushboard_api::{AppState, middleware::auth_middleware, router as api_router};
use pushboard_common::Config;
use pushboard_core::{InMemoryNotificationStore, NotificationService, SessionService};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upper bound for a single request. Must exceed the simulated dispatch delay.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(30);

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pushboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting pushboard server...");

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    info!(
        submit_delay_ms = config.notifications.submit_delay_ms,
        clear_hidden_fields = config.notifications.clear_hidden_fields,
        "Configuration loaded"
    );

    // Initialize services
    let store = Arc::new(InMemoryNotificationStore::with_sample_history());
    let notification_service = NotificationService::from_config(&config.notifications, store);
    let session_service = SessionService::new(config.auth.clone());

    let state = AppState {
        session_service,
        notification_service,
    };

    let request_timeout =
        Duration::from_millis(config.notifications.submit_delay_ms) + REQUEST_TIMEOUT_SLACK;

    // Build router
    let app = Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {:?}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}
