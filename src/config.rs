//! read configuration from a file or the environment

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub enum ConfigLocation {
    File(String),
    Env,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validated()
    }

    /// Reads configuration from environment variables.
    /// * `TODO_API_URL` - backend base URL (required)
    /// * `TODO_USERNAME` / `TODO_PASSWORD` - login credentials
    /// * `TODO_TOKEN_FILE` - where the token pair is persisted
    /// * `TODO_TIMEOUT_SECS` - per-request timeout
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("TODO_API_URL")
            .map_err(|_| Error::Config("Missing TODO_API_URL env var".to_string()))?;
        let timeout_secs = match std::env::var("TODO_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid TODO_TIMEOUT_SECS '{}': {}", raw, e))
            })?),
            Err(_) => None,
        };
        Config {
            base_url,
            username: std::env::var("TODO_USERNAME").ok(),
            password: std::env::var("TODO_PASSWORD").ok(),
            token_file: std::env::var("TODO_TOKEN_FILE").ok().map(PathBuf::from),
            timeout_secs,
            user_agent: None,
        }
        .validated()
    }

    pub fn from_values(
        base_url: impl Into<String>,
        username: Option<String>,
        password: Option<String>,
        token_file: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, Error> {
        Config {
            base_url: base_url.into(),
            username,
            password,
            token_file,
            timeout_secs,
            user_agent: None,
        }
        .validated()
    }

    fn validated(mut self) -> Result<Self, Error> {
        let base = if self.base_url.starts_with("http") {
            self.base_url.clone()
        } else {
            format!("https://{}", self.base_url)
        };
        reqwest::Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base, e)))?;
        self.base_url = base.trim_end_matches('/').to_string();
        if self.timeout_secs == Some(0) {
            return Err(Error::Config("timeout_secs must be > 0".into()));
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| concat!("todo-client/", env!("CARGO_PKG_VERSION")).to_string())
    }

    /// Token file from config, falling back to the platform data directory.
    pub fn token_path(&self) -> Result<PathBuf, Error> {
        if let Some(path) = &self.token_file {
            return Ok(path.clone());
        }
        let dirs = ProjectDirs::from("", "", "todo-client")
            .ok_or_else(|| Error::Config("Could not determine data directory".into()))?;
        Ok(dirs.data_dir().join("tokens.json"))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("token_file", &self.token_file)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

pub fn read_config(loc: ConfigLocation) -> Result<Config, Error> {
    match loc {
        ConfigLocation::File(path) => Config::from_file(path),
        ConfigLocation::Env => Config::from_env(),
    }
}
