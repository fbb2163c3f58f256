//! # CardBot Webhook Server
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! `cardbot serve` runs both webhooks behind one HTTP listener. The contact
//! dialog needs nothing but configuration. The assistant needs an AI API key;
//! without one the server still starts and `/assistant` answers 503.
//!
//! ## Architecture
//!
//! - `config.rs`: CLI flags and their merge with the configuration files
//! - `server_logic.rs`: binding, serving, and graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cardbot serve --host 0.0.0.0 --port 8080
//! cardbot -vv serve --config ./dev.toml --cors
//! ```
//!
use cardbot::ai::{AiService, OpenAiClient};
use cardbot::assistant::AssistantController;
use cardbot::core::config::Config;
use cardbot::core::error::{CardbotError, Result};
use cardbot::dialog::DialogController;
use cardbot::web::AppState;
use std::sync::Arc;
use tracing::{info, warn};

pub use config::ServeArgs;

/// Handles configuration loading and merging for the server.
pub mod config;

/// Contains the axum server loop.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Loads the configuration, builds the controllers once, and serves them until
/// shutdown.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let config = config::load_and_merge_config(&args)?;
    let state = build_state(&config)?;

    server_logic::run_server(&config.server, Arc::new(state)).await
}

/// Builds the shared handler state. A missing AI API key disables the
/// assistant instead of failing; any other AI setup error is fatal.
pub fn build_state(config: &Config) -> Result<AppState> {
    let dialog = DialogController::new(&config.dialog)?;

    let assistant = match OpenAiClient::from_settings(&config.ai) {
        Ok(client) => {
            info!("Assistant enabled with model {}", config.ai.model);
            let ai: Arc<dyn AiService> = Arc::new(client);
            Some(AssistantController::new(ai, dialog.clone()))
        }
        Err(err) => match err.downcast_ref::<CardbotError>() {
            Some(CardbotError::AiUnavailable(reason)) => {
                warn!("Assistant disabled: {}", reason);
                None
            }
            _ => return Err(err),
        },
    };

    Ok(AppState { dialog, assistant })
}
