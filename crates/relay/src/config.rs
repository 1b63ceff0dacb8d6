use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Bot credential. Never printed, not even through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BotToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    ChatId(i64),
    Channel(String),
}

impl Destination {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(Self::ChatId(id));
        }
        if raw.len() > 1 && raw.starts_with('@') && !raw.contains(char::is_whitespace) {
            return Ok(Self::Channel(raw.to_string()));
        }
        Err(ConfigError::Invalid {
            key: "TELEGRAM_CHAT_ID",
            reason: "expected a numeric chat id or an @channel username".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bot_token: BotToken,
    pub destination: Destination,
    pub bind_addr: SocketAddr,
    pub api_url: Url,
    pub request_timeout: Duration,
    pub static_dir: Option<PathBuf>,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("TELEGRAM_BOT_TOKEN")
            .map(BotToken)
            .ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let destination = get("TELEGRAM_CHAT_ID")
            .ok_or(ConfigError::Missing("TELEGRAM_CHAT_ID"))
            .and_then(|raw| Destination::parse(&raw))?;

        let bind_addr = get("RELAY_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "RELAY_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let api_url = get("TELEGRAM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .parse::<Url>()
            .map_err(|e| ConfigError::Invalid {
                key: "TELEGRAM_API_URL",
                reason: e.to_string(),
            })?;

        let timeout_secs = match get("TELEGRAM_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "TELEGRAM_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "TELEGRAM_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            bot_token,
            destination,
            bind_addr,
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }
}
