//! Study Assist - AI backend for a student dashboard
//!
//! Serves the chat, quiz and timetable endpoints in front of the Gemini API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_assist::api::routes::create_router_for_origin;
use study_assist::gateway::GeminiClient;
use study_assist::{AppState, Config};

/// Main entry point for the study assistant server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the Gemini client and the response cache
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_assist=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Study Assist server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_capacity={}, chat_timeout={}ms, quiz_timeout={}ms, timetable_timeout={}ms, model={}, port={}",
        config.cache_capacity,
        config.chat_timeout_ms,
        config.quiz_timeout_ms,
        config.timetable_timeout_ms,
        config.model,
        config.server_port
    );

    let client = GeminiClient::new(&config.api_url, &config.model, config.api_key.clone());
    if !client.is_configured() {
        warn!("GOOGLE_API_KEY is not set; model calls will fail and fallbacks will be served");
    }

    let state = AppState::from_config(&config, Arc::new(client));
    let app = create_router_for_origin(state, &config.frontend_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
