//! Worker configuration
//!
//! Every component receives the paths and service settings it needs from a
//! [`WorkerConfig`] instead of reading globals, so tests can point the
//! translator at a stub server and the store at a temporary directory.

use std::path::PathBuf;
use std::time::Duration;

use crate::env::{EnvOverrides, EnvResult};

pub mod constants {
    use std::time::Duration;

    pub const DEFAULT_DATA_DIR: &str = "df-ptbr-llm-mod/data";
    pub const PENDING_FILE_NAME: &str = "pending.txt";
    pub const CACHE_FILE_NAME: &str = "cache.db";

    pub const DEFAULT_MODEL: &str = "qwen2.5:3b";
    pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/chat";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(50);

    pub const SYSTEM_PROMPT: &str = "You are a professional translator. Translate Dwarf Fortress UI/game text \
from English to Brazilian Portuguese (pt-BR). Use natural Brazilian Portuguese, \
preserve names of dwarves, places, items and deities, preserve formatting, \
and avoid literal translations that sound unnatural.";

    pub const INSPECT_SAMPLE_SIZE: usize = 10;
    pub const LOG_TAG: &str = "LLM WORKER";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub data_dir: PathBuf,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    /// Pause after every translation request
    pub throttle: Duration,
    pub system_prompt: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            model: constants::DEFAULT_MODEL.to_string(),
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            timeout: constants::DEFAULT_TIMEOUT,
            throttle: constants::DEFAULT_THROTTLE,
            system_prompt: constants::SYSTEM_PROMPT.to_string(),
        }
    }
}

impl WorkerConfig {
    /// Defaults with any `LLM_CACHE_*` variables applied on top
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self::default().with_overrides(EnvOverrides::from_env()?))
    }

    pub fn with_overrides(mut self, overrides: EnvOverrides) -> Self {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn pending_file(&self) -> PathBuf {
        self.data_dir.join(constants::PENDING_FILE_NAME)
    }

    pub fn cache_file(&self) -> PathBuf {
        self.data_dir.join(constants::CACHE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_ollama_setup() {
        let config = WorkerConfig::default();
        assert_eq!(config.model, "qwen2.5:3b");
        assert_eq!(config.endpoint, "http://localhost:11434/api/chat");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.throttle, Duration::from_millis(50));
        assert!(config.system_prompt.contains("pt-BR"));
    }

    #[test]
    fn files_live_in_the_data_dir() {
        let config = WorkerConfig::default().with_data_dir("/srv/df/data");
        assert_eq!(config.pending_file(), PathBuf::from("/srv/df/data/pending.txt"));
        assert_eq!(config.cache_file(), PathBuf::from("/srv/df/data/cache.db"));
    }

    #[test]
    fn overrides_replace_only_what_is_set() {
        let config = WorkerConfig::default().with_overrides(EnvOverrides {
            model: Some("llama3:8b".to_string()),
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        });
        assert_eq!(config.model, "llama3:8b");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.endpoint, constants::DEFAULT_ENDPOINT);
        assert_eq!(config.data_dir, PathBuf::from(constants::DEFAULT_DATA_DIR));
    }
}
