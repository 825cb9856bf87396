//! Core configuration types and loading.

use serde::Deserialize;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Who we claim to be when logging in.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Runtime behaviour.
    #[serde(default)]
    pub client: ClientConfig,
    /// Log file and word lists.
    #[serde(default)]
    pub files: FilesConfig,
    /// Server to connect to at startup.
    pub autoconnect: Option<AutoconnectConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.as_ref().display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}

/// Login identity.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Nickname requested at login.
    #[serde(default = "default_nick")]
    pub nick: String,
    /// Username (ident) sent in USER.
    #[serde(default = "default_user")]
    pub user: String,
    /// Real name sent as the USER trailing parameter.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Local hostname sent in USER.
    #[serde(default = "default_hostname")]
    pub hostname: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            nick: default_nick(),
            user: default_user(),
            realname: default_realname(),
            hostname: default_hostname(),
        }
    }
}

/// Runtime behaviour of the processing loop.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Reason sent with QUIT.
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
    /// Upper bound on resolving and connecting (default: 10).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// How long one network poll may wait for a line (default: 10).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Give each nick its own terminal colour (default: true).
    #[serde(default = "default_nick_colors")]
    pub nick_colors: bool,
}

impl ClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            quit_message: default_quit_message(),
            connect_timeout_secs: default_connect_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            nick_colors: default_nick_colors(),
        }
    }
}

/// Paths of auxiliary files. An empty path disables the feature.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Raw inbound traffic log, truncated on first write.
    #[serde(default = "default_log_file")]
    pub log: Option<String>,
    /// Words to censor, one per line.
    #[serde(default = "default_badwords_file")]
    pub badwords: Option<String>,
    /// Words to highlight, one per line.
    #[serde(default = "default_hilites_file")]
    pub hilites: Option<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            log: default_log_file(),
            badwords: default_badwords_file(),
            hilites: default_hilites_file(),
        }
    }
}

/// Server (and optionally a room) to join at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoconnectConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub channel: Option<String>,
}
