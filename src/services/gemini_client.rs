use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    config::PlannerConfig,
    core::settings::GenerationSettings,
    error::{PlannerError, Result},
    services::TextGenerator,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
const INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds one pooled HTTP client; clone it freely to share between tasks.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    settings: GenerationSettings,
    max_retries: usize,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("settings", &self.settings)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            settings: GenerationSettings::default(),
            max_retries: 0,
        })
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        Ok(Self::new(config.api_key.clone(), config.timeout)?
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_max_retries(config.max_retries))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Retry 429 and 5xx responses up to `max_retries` times with exponential backoff
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let request_url = build_generate_url(&self.base_url, &self.model);
        let body = GenerateContentRequest::new(prompt, &self.settings).into_value();

        let mut attempt = 0;
        let mut backoff = INITIAL_BACKOFF;

        loop {
            let response = self
                .http
                .post(&request_url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|err| PlannerError::Generation(format!("HTTP request failed: {err}")))?;

            let status = response.status();
            let headers = response.headers().clone();
            let response_text = response.text().await.map_err(|err| {
                PlannerError::Generation(format!("Failed to read response: {err}"))
            })?;

            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < self.max_retries {
                let wait = headers
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(backoff);

                warn!(
                    target: "tripplanner::gemini",
                    %status,
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    "retrying generateContent"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                backoff *= 2;
                continue;
            }

            if !status.is_success() {
                let api_message = serde_json::from_str::<Value>(&response_text)
                    .ok()
                    .and_then(|json| {
                        json.get("error")
                            .and_then(|error| error.get("message"))
                            .and_then(|value| value.as_str())
                            .map(|s| s.to_string())
                    })
                    .unwrap_or(response_text);

                return Err(PlannerError::Generation(format!(
                    "HTTP {} error: {}",
                    status, api_message
                )));
            }

            let response_json: Value = serde_json::from_str(&response_text)
                .map_err(|err| PlannerError::Generation(format!("Failed to parse JSON: {err}")))?;

            if let Some(reason) = response_json
                .get("promptFeedback")
                .and_then(|feedback| feedback.get("blockReason"))
                .and_then(|value| value.as_str())
            {
                warn!(target: "tripplanner::gemini", reason, "prompt blocked");
            }

            let text = extract_text(&response_json);
            debug!(
                target: "tripplanner::gemini",
                model = %self.model,
                chars = text.len(),
                "generateContent finished"
            );
            return Ok(text);
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

/// Concatenated text parts of the first candidate; empty when there are none
fn extract_text(response: &Value) -> String {
    response
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[derive(Clone, Debug)]
struct GenerateContentRequest<'a> {
    prompt: &'a str,
    settings: &'a GenerationSettings,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, settings: &'a GenerationSettings) -> Self {
        Self { prompt, settings }
    }

    fn into_value(self) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": self.prompt }]
            }],
            "generationConfig": {
                "temperature": self.settings.temperature
            },
            "safetySettings": self.settings.safety_settings,
        });

        if !self.settings.system_instruction.is_empty() {
            body["systemInstruction"] = json!({
                "parts": [{ "text": self.settings.system_instruction }]
            });
        }

        if self.settings.search_grounding {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        body
    }
}
