mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./vidstream.toml",
        "./config.toml",
        "~/.config/vidstream/config.toml",
        "/etc/vidstream/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.streaming.chunk_size == 0 {
        anyhow::bail!("Streaming chunk_size must be greater than 0");
    }

    if config.streaming.content_type.trim().is_empty() {
        anyhow::bail!("Streaming content_type cannot be empty");
    }
    if axum::http::HeaderValue::from_str(&config.streaming.content_type).is_err() {
        anyhow::bail!(
            "Streaming content_type is not a valid header value: {:?}",
            config.streaming.content_type
        );
    }

    if !config.library.media_dir.exists() {
        tracing::warn!(
            "Media directory does not exist: {:?}",
            config.library.media_dir
        );
    }

    let mut seen = HashSet::new();
    for video in &config.library.videos {
        if !seen.insert(video.id.as_str()) {
            anyhow::bail!("Duplicate video id in library: '{}'", video.id);
        }
        vidstream_common::paths::join_under_root(&config.library.media_dir, &video.destination)
            .with_context(|| format!("Video '{}' has an invalid destination", video.id))?;
    }

    Ok(())
}
