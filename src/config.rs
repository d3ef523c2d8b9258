use std::{env, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
#[error("{name} has an invalid value '{value}'")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name lookup; unset or blank values take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => parse("PORT", &value)?,
            None => DEFAULT_PORT,
        };

        let backend_url = get("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError {
                name: "BACKEND_URL",
                value: backend_url,
            });
        }

        let timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(value) => parse::<u64>("BACKEND_TIMEOUT_SECS", &value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            backend_url,
            backend_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        name,
        value: value.to_string(),
    })
}
