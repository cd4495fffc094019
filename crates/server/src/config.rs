//! Server configuration.
//!
//! Settings come from an optional TOML file named by [`CONFIG_ENV`], and are
//! then overridden by environment variables:
//!
//! | Variable             | Field          |
//! |----------------------|----------------|
//! | `PORT`               | `port`         |
//! | `ROOTLAB_HOST`       | `host`         |
//! | `ROOTLAB_HISTORY`    | `history_path` |
//! | `ROOTLAB_STATIC_DIR` | `static_dir`   |

use std::{
    fs, io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "ROOTLAB_CONFIG";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// JSON file holding the solve history
    pub history_path: PathBuf,

    /// Maximum number of history entries kept
    pub history_capacity: usize,

    /// Directory of static front-end files served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            history_path: PathBuf::from("history.json"),
            history_capacity: 30,
            static_dir: None,
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {name}")]
    Env { name: &'static str, value: String },

    #[error("history capacity must be at least 1")]
    ZeroCapacity,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or an
    /// environment override is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())
    }

    /// Reads a TOML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// sets an unknown or invalid field.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Self>(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()
    }

    /// Applies environment overrides, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed.
    pub fn apply_env<L>(mut self, lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PORT") {
            self.port = parse_env("PORT", value)?;
        }
        if let Some(value) = lookup("ROOTLAB_HOST") {
            self.host = parse_env("ROOTLAB_HOST", value)?;
        }
        if let Some(value) = lookup("ROOTLAB_HISTORY") {
            self.history_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("ROOTLAB_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(value));
        }
        self.validate()
    }

    /// Returns the socket address to listen on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(self)
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { name, value })
}
