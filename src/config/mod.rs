mod types;

pub use types::*;

use anyhow::{Context, Result};
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
        "./config.toml",
        "./awesome.toml",
        "~/.config/awesome/config.toml",
        "/etc/awesome/config.toml",
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

    if config.server.page_size == 0 {
        anyhow::bail!("Server page_size cannot be 0");
    }

    if config.database.max_size == 0 {
        anyhow::bail!("Database max_size cannot be 0");
    }

    if config.database.min_idle > config.database.max_size {
        anyhow::bail!(
            "Database min_idle ({}) cannot exceed max_size ({})",
            config.database.min_idle,
            config.database.max_size
        );
    }

    Ok(())
}
