#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::io;
use sustain::session::TokenStore;

pub const APP_NAME: &str = "sustainlite";

/// Named confy config holding the persisted session token. This is the one
/// well-known storage location for it; only the session store writes here.
const SESSION_CONFIG: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_true")]
    pub refresh_on_start: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            refresh_on_start: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub default_username: Option<String>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

impl Default for SustainConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_username: None,
            display: DisplayConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8000/api/".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_recent_limit() -> usize {
    5
}

#[derive(Debug, thiserror::Error)]
pub enum SusConfigError {
    #[error("config error: {0}")]
    Confy(#[from] confy::ConfyError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SusConfigError>;

impl SustainConfig {
    /// Loads the config file from the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or deserialized.
    pub fn load() -> Result<Self> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Stores the config to the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn store(&self) -> Result<()> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSession {
    token: Option<String>,
}

/// Confy-backed [`TokenStore`] keeping the session token in the OS config
/// directory, next to the main config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenFile;

impl TokenFile {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read() -> StoredSession {
        confy::load(APP_NAME, Some(SESSION_CONFIG)).unwrap_or_default()
    }

    fn write(session: &StoredSession) -> io::Result<()> {
        confy::store(APP_NAME, Some(SESSION_CONFIG), session).map_err(io::Error::other)
    }
}

impl TokenStore for TokenFile {
    fn load(&self) -> Option<String> {
        Self::read().token.filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        Self::write(&StoredSession {
            token: Some(token.to_string()),
        })
    }

    fn clear(&self) {
        if let Err(err) = Self::write(&StoredSession::default()) {
            tracing::warn!("failed to clear persisted session token: {err}");
        }
    }
}
