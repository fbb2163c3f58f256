//! # Serve Command Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! Command-line arguments of `cardbot serve` and their merge with the layered
//! configuration files. A flag only overrides the file layers when it was
//! actually given, so every flag is optional here.
//!
//! ```bash
//! cardbot serve --port 9000 --no-cors --config ./staging.toml
//! ```
//!
use cardbot::core::config::{self, Config};
use cardbot::core::error::Result;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Serve Command Arguments (`ServeArgs`)
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind to. Defaults to the configured host (127.0.0.1).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on. Defaults to the configured port (8080).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Send permissive CORS headers.
    #[arg(long, conflicts_with = "no_cors")]
    pub cors: bool,

    /// Never send CORS headers, whatever the configuration says.
    #[arg(long)]
    pub no_cors: bool,

    /// Read this file instead of searching for `.cardbot.toml`.
    #[arg(long, env = "CARDBOT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Loads the file layers and applies the flags from `args` on top.
pub fn load_and_merge_config(args: &ServeArgs) -> Result<Config> {
    let mut config = config::load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    info!(
        "Effective server settings: {}:{} (CORS {})",
        config.server.host,
        config.server.port,
        if config.server.enable_cors { "on" } else { "off" }
    );
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &ServeArgs) {
    if let Some(host) = args.host {
        debug!("--host overrides configured host {}", config.server.host);
        config.server.host = host;
    }
    if let Some(port) = args.port {
        debug!("--port overrides configured port {}", config.server.port);
        config.server.port = port;
    }
    if args.cors {
        config.server.enable_cors = true;
    }
    if args.no_cors {
        config.server.enable_cors = false;
    }
}
