//! Blocking translator for the local chat endpoint

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use super::types::{ChatRequest, ChatResponse};
use crate::config::WorkerConfig;
use crate::core::{WorkerError, WorkerResult};

/// Anything that can turn one line of text into its translation
///
/// `None` means "no result": the item is dropped from this run and the
/// batch carries on.
pub trait Translate {
    fn translate(&self, text: &str) -> Option<String>;
}

impl<F> Translate for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Translator backed by an Ollama-style `/api/chat` endpoint
pub struct Translator {
    client: Client,
    endpoint: String,
    model: String,
    system_prompt: String,
}

impl Translator {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        timeout: Duration,
    ) -> WorkerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WorkerError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            system_prompt: system_prompt.into(),
        })
    }

    pub fn from_config(config: &WorkerConfig) -> WorkerResult<Self> {
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            config.system_prompt.clone(),
            config.timeout,
        )
    }

    /// One request, surfacing every failure
    pub fn request(&self, text: &str) -> WorkerResult<Option<String>> {
        let request = ChatRequest::translation(&self.model, &self.system_prompt, text);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        debug!("Response for '{}': {}", text, body);

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_content())
    }
}

impl Translate for Translator {
    fn translate(&self, text: &str) -> Option<String> {
        match self.request(text) {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to translate '{}': {}", text, e);
                None
            }
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}
