//! # CardBot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for CardBot, handling loading,
//! merging, validation, and access to configuration data. It supports a multi-level
//! configuration approach that combines defaults, user settings, and project-specific
//! overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the command handlers, not here)
//! 2. An explicit `--config FILE`, or else a project `.cardbot.toml` in the
//!    current directory or its ancestors (the search stops at a `.git` directory)
//! 3. User-specific `<config dir>/cardbot/config.toml`
//! 4. Default values defined in the code
//!
//! Every file layer is deserialized into an all-optional `ConfigFile`, so a layer
//! only overrides the keys it actually names.
//!
//! ## Examples
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [dialog]
//! utc_offset_minutes = -300
//!
//! [ai]
//! model = "gpt-4o-mini"
//! prompts_dir = "~/.config/cardbot/prompts"
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config(None)?;
//! let offset = cfg.dialog.offset()?;
//! ```
//!
use crate::core::error::{CardbotError, Result};
use anyhow::{anyhow, Context};
use chrono::FixedOffset;
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Name of the project-level configuration file.
pub const PROJECT_CONFIG_FILENAME: &str = ".cardbot.toml";

/// Largest timezone offset accepted for birthdate formatting (UTC±14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// The effective configuration after all layers are merged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub server: ServerSettings,
    pub dialog: DialogSettings,
    pub ai: AiSettings,
}

/// Settings for the HTTP listener (`cardbot serve`).
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Interface to bind to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Send permissive CORS headers.
    pub enable_cors: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            enable_cors: false,
        }
    }
}

/// Settings for the contact-form dialog.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DialogSettings {
    /// Offset from UTC, in minutes, applied before a birthdate is rendered.
    pub utc_offset_minutes: i32,
}

impl DialogSettings {
    /// The configured offset as a `chrono` timezone.
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            anyhow!(CardbotError::Config(format!(
                "utc_offset_minutes {} is out of range",
                self.utc_offset_minutes
            )))
        })
    }
}

/// Settings for the chat-completion collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSettings {
    /// Base URL of an OpenAI-compatible API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Directory with `*.tera` files overriding the built-in prompts.
    pub prompts_dir: Option<PathBuf>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.2,
            prompts_dir: None,
        }
    }
}

/// One configuration file as written on disk. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerFile,
    #[serde(default)]
    pub dialog: DialogFile,
    #[serde(default)]
    pub ai: AiFile,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerFile {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub enable_cors: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DialogFile {
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AiFile {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub prompts_dir: Option<String>,
}

impl ConfigFile {
    /// Overrides every key of `config` that this layer sets.
    pub fn apply_to(self, config: &mut Config) {
        let ConfigFile { server, dialog, ai } = self;

        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
        if let Some(enable_cors) = server.enable_cors {
            config.server.enable_cors = enable_cors;
        }

        if let Some(offset) = dialog.utc_offset_minutes {
            config.dialog.utc_offset_minutes = offset;
        }

        if let Some(base_url) = ai.base_url {
            config.ai.base_url = base_url;
        }
        if let Some(model) = ai.model {
            config.ai.model = model;
        }
        if let Some(api_key_env) = ai.api_key_env {
            config.ai.api_key_env = api_key_env;
        }
        if let Some(temperature) = ai.temperature {
            config.ai.temperature = temperature;
        }
        if let Some(prompts_dir) = ai.prompts_dir {
            config.ai.prompts_dir = Some(PathBuf::from(prompts_dir));
        }
    }
}

/// Loads, merges, expands, and validates the configuration.
///
/// `explicit` replaces the project-file search when given; it is an error for it
/// to be missing.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config()?,
    };
    let mut merged_config = merge_layers(user_config, project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

/// Applies the user layer and then the project layer on top of the defaults.
pub fn merge_layers(user: Option<ConfigFile>, project: Option<ConfigFile>) -> Config {
    let mut merged = Config::default();
    for layer in [user, project].into_iter().flatten() {
        layer.apply_to(&mut merged);
    }
    merged
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "CardBot", "cardbot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks from `start` towards the filesystem root looking for `.cardbot.toml`.
/// The search ends at the first directory containing `.git`.
pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads and parses a single configuration file.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.ai.prompts_dir.take() {
        let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
        debug!("Expanded prompts directory: {}", expanded);
        config.ai.prompts_dir = Some(PathBuf::from(expanded));
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let offset = config.dialog.utc_offset_minutes;
    if offset.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
        return Err(anyhow!(CardbotError::Config(format!(
            "utc_offset_minutes must be within ±{}, got {}",
            MAX_UTC_OFFSET_MINUTES, offset
        ))));
    }
    if config.ai.model.trim().is_empty() {
        return Err(anyhow!(CardbotError::Config(
            "ai.model must not be empty".to_string()
        )));
    }
    if config.ai.api_key_env.trim().is_empty() {
        return Err(anyhow!(CardbotError::Config(
            "ai.api_key_env must not be empty".to_string()
        )));
    }
    if !(config.ai.base_url.starts_with("http://") || config.ai.base_url.starts_with("https://"))
    {
        return Err(anyhow!(CardbotError::Config(format!(
            "ai.base_url must be an http(s) URL, got '{}'",
            config.ai.base_url
        ))));
    }
    if !(0.0..=2.0).contains(&config.ai.temperature) {
        return Err(anyhow!(CardbotError::Config(format!(
            "ai.temperature must be between 0 and 2, got {}",
            config.ai.temperature
        ))));
    }
    if let Some(dir) = &config.ai.prompts_dir {
        if !dir.exists() {
            warn!(
                "Configured prompts directory '{}' does not exist; using built-in prompts.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(CardbotError::Config(format!(
                "Configured prompts path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
