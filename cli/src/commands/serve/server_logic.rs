//! # CardBot HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! Binds the listener, prints where the webhooks can be reached, and serves the
//! router from `cardbot::web` until Ctrl+C or SIGTERM. In-flight requests are
//! allowed to finish before the process exits.
//!
use anyhow::Context;
use axum::Router;
use cardbot::core::config::ServerSettings;
use cardbot::core::error::Result;
use cardbot::web::{create_app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// # Run HTTP Server (`run_server`)
///
/// ## Errors
///
/// Fails when the address cannot be bound (port in use, missing permissions)
/// or when the server itself stops with an error.
pub async fn run_server(settings: &ServerSettings, state: Arc<AppState>) -> Result<()> {
    let addr = SocketAddr::new(settings.host, settings.port);
    let assistant_enabled = state.assistant.is_some();
    let app = create_app(state, settings);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;
    let local_addr = listener.local_addr().unwrap_or(addr);

    println!("\n=================================================================");
    println!("📇 Contact webhook:   http://{}/contact", local_addr);
    if assistant_enabled {
        println!("🤖 Assistant webhook: http://{}/assistant", local_addr);
    } else {
        println!("🤖 Assistant webhook: disabled (no AI API key)");
    }
    println!("💓 Health check:      http://{}/healthz", local_addr);
    println!("🔒 CORS enabled:      {}", settings.enable_cors);
    println!("=================================================================\n");

    info!("Starting server on {}", local_addr);
    println!("Server starting! Press Ctrl+C to stop.");

    serve(listener, app).await?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Serves `app` on an already bound listener until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

/// Resolves on Ctrl+C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardbot::dialog::DialogController;
    use std::net::Ipv4Addr;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            dialog: DialogController::default(),
            assistant: None,
        })
    }

    #[tokio::test]
    async fn test_served_router_answers_health_check() -> Result<()> {
        let listener = TcpListener::bind(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)).await?;
        let addr = listener.local_addr()?;
        let app = create_app(state(), &ServerSettings::default());
        let server = tokio::spawn(serve(listener, app));

        let body = reqwest::get(format!("http://{}/healthz", addr))
            .await?
            .text()
            .await?;
        assert_eq!(body, "ok");

        server.abort();
        Ok(())
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() -> Result<()> {
        let taken = TcpListener::bind(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)).await?;
        let settings = ServerSettings {
            port: taken.local_addr()?.port(),
            ..ServerSettings::default()
        };

        let err = run_server(&settings, state()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind"));
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_signal_creation() {
        let shutdown_future = shutdown_signal();
        drop(shutdown_future);
    }
}
