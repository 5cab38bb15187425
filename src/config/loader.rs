// Configuration loader
// Defaults, then ~/.mindit/config.toml (or an explicit path), then environment

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::CONFIG_FILE_RELATIVE;
use super::settings::Config;

/// Load configuration from the config file and environment.
///
/// `path` overrides the default `~/.mindit/config.toml`. An explicit path
/// must exist; the default location is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] but with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(explicit) => read_config_file(explicit)?,
        None => match default_config_path() {
            Some(default_path) if default_path.exists() => read_config_file(&default_path)?,
            _ => Config::default(),
        },
    };

    apply_env_overrides(&mut config, env);

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_RELATIVE))
}

fn read_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config TOML at {}", path.display()))?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Environment variables win over file values; empty values are ignored.
fn apply_env_overrides<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(api_key) = get("OPENAI_API_KEY") {
        config.llm.api_key = api_key;
    }
    if let Some(model) = get("OPENAI_MODEL") {
        config.llm.model = model;
    }
    if let Some(base_url) = get("OPENAI_BASE_URL") {
        config.llm.base_url = base_url;
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.log_level = level;
    }
    if let Some(addr) = get("MINDIT_BIND_ADDR") {
        config.server.bind_address = addr;
    }
}
