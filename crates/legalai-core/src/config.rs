//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, auth, and database settings. Every section defaults sensibly so a
//! completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Database path that selects a private in-memory database.
pub const IN_MEMORY_DB: &str = ":memory:";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    ///
    /// This is intentionally string-based so the caller can read the file
    /// however it sees fit.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| {
            Error::Validation(format!("{}: {e}", path.display()))
        })
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents)
                .map_err(|e| Error::Validation(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Recognised keys: `PORT`, `LEGALAI_HOST`, `LEGALAI_DB_PATH`,
    /// `LEGALAI_DEBUG`. Values that fail to parse are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PORT value '{port}'"),
            }
        }

        if let Some(host) = lookup("LEGALAI_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host.trim().to_string();
            }
        }

        if let Some(db_path) = lookup("LEGALAI_DB_PATH") {
            if !db_path.trim().is_empty() {
                self.server.db_path = PathBuf::from(db_path.trim());
            }
        }

        // Not named `debug`: tracing's macros import a `debug` fn that would shadow it.
        if let Some(raw) = lookup("LEGALAI_DEBUG") {
            match parse_bool(&raw) {
                Some(d) => self.server.debug = d,
                None => tracing::warn!("Ignoring invalid LEGALAI_DEBUG value '{raw}'"),
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.server.debug && !is_loopback(&self.server.host) {
            warnings.push(format!(
                "server.debug is enabled on non-loopback host '{}'; error details will be visible to clients",
                self.server.host
            ));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            warnings.push(format!(
                "auth.bcrypt_cost {} is outside the supported range 4..=31",
                self.auth.bcrypt_cost
            ));
        }

        if self.auth.session_timeout_hours == 0 {
            warnings.push("auth.session_timeout_hours is 0; tokens expire immediately".into());
        }

        if !self.auth.enabled {
            warnings.push(
                "auth is disabled; every request acts as the built-in anonymous judge".into(),
            );
        }

        warnings
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn is_loopback(host: &str) -> bool {
    matches!(host, "127.0.0.1" | "::1" | "localhost")
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Include error details in server-error responses and log verbosely.
    pub debug: bool,
    /// SQLite database file, or `:memory:` for a throwaway database.
    pub db_path: PathBuf,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Whether the database should live in memory instead of on disk.
    pub fn in_memory_db(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY_DB
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4001,
            debug: false,
            db_path: PathBuf::from("./data/legalai.db"),
            cors_origins: Vec::new(),
        }
    }
}

/// Authentication settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    pub session_timeout_hours: u64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            session_timeout_hours: 24,
            bcrypt_cost: 12,
        }
    }
}
