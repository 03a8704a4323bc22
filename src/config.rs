//! Locating and loading the configuration file for the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use legalai_core::config::Config;

/// Searched in order when `--config` is not given.
const DEFAULT_PATHS: &[&str] = &[
    "./legalai.json",
    "./config.json",
    "~/.config/legalai/config.json",
    "/etc/legalai/config.json",
];

/// First default config location that exists.
pub fn find_config() -> Option<PathBuf> {
    DEFAULT_PATHS.iter().find_map(|path_str| {
        let path = PathBuf::from(shellexpand::tilde(path_str).as_ref());
        path.exists().then_some(path)
    })
}

/// Load configuration and apply environment overrides.
///
/// An explicit path must exist. Without one, the default locations are
/// searched and built-in defaults are used when none exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let found = find_config();
            Config::load_or_default(found.as_deref()).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    found.as_deref().unwrap_or(Path::new("<defaults>")).display()
                )
            })?
        }
    };

    config.apply_env_overrides();
    Ok(config)
}

/// Apply `legalai start` flags on top of the loaded configuration.
pub fn apply_start_overrides(
    config: &mut Config,
    host: Option<String>,
    port: Option<u16>,
    debug: bool,
) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if debug {
        config.server.debug = true;
    }
}
