//! Typed environment variable overrides
//!
//! None of these variables are required. Each one, when set, replaces the
//! matching default in [`crate::config::WorkerConfig`].

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::level_filters::LevelFilter;

/// Environment variable parse error
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// Environment variable accessor
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    /// `Ok(None)` when the variable is unset or empty
    fn get() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value).map(Some),
            _ => Ok(None),
        }
    }

    fn error(message: impl Into<String>) -> EnvError {
        EnvError {
            variable: Self::NAME.to_string(),
            message: message.into(),
        }
    }
}

/// Directory holding `pending.txt` and `cache.db`
pub struct DataDir;
impl EnvVar<PathBuf> for DataDir {
    const NAME: &'static str = "LLM_CACHE_DATA_DIR";
    const DESCRIPTION: &'static str = "Directory holding pending.txt and cache.db";

    fn parse(value: &str) -> EnvResult<PathBuf> {
        Ok(PathBuf::from(value.trim()))
    }
}

/// Model identifier sent with every request
pub struct Model;
impl EnvVar<String> for Model {
    const NAME: &'static str = "LLM_CACHE_MODEL";
    const DESCRIPTION: &'static str = "Model name passed to the chat endpoint";

    fn parse(value: &str) -> EnvResult<String> {
        Ok(value.trim().to_string())
    }
}

/// Chat endpoint
pub struct Endpoint;
impl EnvVar<String> for Endpoint {
    const NAME: &'static str = "LLM_CACHE_ENDPOINT";
    const DESCRIPTION: &'static str = "Chat completion endpoint URL";

    fn parse(value: &str) -> EnvResult<String> {
        let url = value.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(url.to_string())
        } else {
            Err(Self::error("URL must start with http:// or https://"))
        }
    }
}

/// Per-request timeout
pub struct TimeoutSecs;
impl EnvVar<Duration> for TimeoutSecs {
    const NAME: &'static str = "LLM_CACHE_TIMEOUT_SECS";
    const DESCRIPTION: &'static str = "Translation request timeout in seconds";

    fn parse(value: &str) -> EnvResult<Duration> {
        let seconds: u64 = value
            .trim()
            .parse()
            .map_err(|_| Self::error("Must be a valid number of seconds"))?;
        if seconds == 0 {
            return Err(Self::error("Timeout must be greater than 0"));
        }
        if seconds > 600 {
            return Err(Self::error("Timeout too long (max 600 seconds)"));
        }
        Ok(Duration::from_secs(seconds))
    }
}

/// Log verbosity
pub struct LogLevel;
impl EnvVar<LevelFilter> for LogLevel {
    const NAME: &'static str = "LLM_CACHE_LOG_LEVEL";
    const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

    fn parse(value: &str) -> EnvResult<LevelFilter> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Ok(LevelFilter::TRACE),
            "debug" => Ok(LevelFilter::DEBUG),
            "info" => Ok(LevelFilter::INFO),
            "warn" => Ok(LevelFilter::WARN),
            "error" => Ok(LevelFilter::ERROR),
            other => Err(Self::error(format!(
                "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                other
            ))),
        }
    }
}

/// Every override found in the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub data_dir: Option<PathBuf>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Option<Duration>,
}

impl EnvOverrides {
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            data_dir: DataDir::get()?,
            model: Model::get()?,
            endpoint: Endpoint::get()?,
            timeout: TimeoutSecs::get()?,
        })
    }
}

/// Markdown list of the supported variables
pub fn generate_env_docs() -> String {
    [
        (DataDir::NAME, DataDir::DESCRIPTION),
        (Model::NAME, Model::DESCRIPTION),
        (Endpoint::NAME, Endpoint::DESCRIPTION),
        (TimeoutSecs::NAME, TimeoutSecs::DESCRIPTION),
        (LogLevel::NAME, LogLevel::DESCRIPTION),
    ]
    .iter()
    .map(|(name, description)| format!("- `{}`: {}\n", name, description))
    .collect()
}
