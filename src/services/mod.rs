pub mod gemini_client;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini_client::GeminiClient;

/// A hosted text-generation capability.
///
/// Implementations carry their own shared configuration (system instruction,
/// sampling, safety thresholds) and return the generated text for a single
/// prompt. An empty string means the service answered without usable text;
/// callers decide whether that is an error.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
