use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{PlannerError, Result};
use crate::services::gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

/// Runtime configuration for the planner and its HTTP server
#[derive(Clone)]
pub struct PlannerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: usize,
    pub listen: SocketAddr,
}

impl std::fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("listen", &self.listen)
            .finish()
    }
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 0,
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }

    /// Load from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_key(None)
    }

    /// Like [`PlannerConfig::from_env`], but an explicit API key wins over the environment
    pub fn from_env_with_key(api_key: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(api_key, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(api_key: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = api_key
            .or_else(|| lookup("GOOGLE_API_KEY"))
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlannerError::Config(
                    "Missing GOOGLE_API_KEY or GEMINI_API_KEY environment variable".to_string(),
                )
            })?;

        let timeout_secs: u64 = parse_var(&lookup, "PLANNER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_retries: usize = parse_var(&lookup, "PLANNER_MAX_RETRIES", 0)?;
        let listen: SocketAddr = match lookup("PLANNER_LISTEN") {
            Some(raw) => parse_value("PLANNER_LISTEN", &raw)?,
            None => parse_value("PLANNER_LISTEN", DEFAULT_LISTEN)?,
        };

        Ok(Self {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
            listen,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_listen(mut self, listen: SocketAddr) -> Self {
        self.listen = listen;
        self
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|err| PlannerError::Config(format!("Invalid {name} value `{raw}`: {err}")))
}
