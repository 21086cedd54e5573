//! The generative-text service behind the curator prompt.
//!
//! [`Oracle`] is the seam the ranking pipeline depends on; [`LlmOracle`]
//! talks to Ollama or an OpenAI-compatible API, and tests plug in canned
//! implementations.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// A free-text completion service that may fail.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String>;
}

/// HTTP-backed oracle for the configured provider.
#[derive(Clone)]
pub struct LlmOracle {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmOracle {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Oracle for LlmOracle {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> Result<String> {
        let messages = vec![
            ChatMessage::text("system", system),
            ChatMessage::text("user", user),
        ];
        match self.config.provider.as_str() {
            "ollama" => call_ollama(&self.client, &self.config, messages, temperature).await,
            "openai" => call_openai(&self.client, &self.config, messages, temperature).await,
            other => anyhow::bail!("Unknown LLM provider: {other}"),
        }
    }
}

/// Stand-in used when no provider is configured; every call fails, which the
/// pipeline turns into lexical-only ranking.
pub struct DisabledOracle;

#[async_trait]
impl Oracle for DisabledOracle {
    async fn complete(&self, _system: &str, _user: &str, _temperature: f32) -> Result<String> {
        anyhow::bail!("AI recommendations are not configured")
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
    /// Base64 images, Ollama's multimodal form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ChatMessage {
    pub(crate) fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
            images: None,
        }
    }
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

pub(crate) async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: Vec<ChatMessage>,
    temperature: f32,
) -> Result<String> {
    call_ollama_model(client, config, &config.chat_model, messages, temperature).await
}

pub(crate) async fn call_ollama_model(
    client: &reqwest::Client,
    config: &LlmConfig,
    model: &str,
    messages: Vec<ChatMessage>,
    temperature: f32,
) -> Result<String> {
    let url = format!("{}/api/chat", config.base_url.trim_end_matches('/'));

    let req = OllamaChatRequest {
        model: model.to_string(),
        messages,
        stream: false,
        options: OllamaOptions { temperature },
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama chat API returned {status}: {body}");
    }

    let body: OllamaChatResponse = resp
        .json()
        .await
        .context("Failed to parse Ollama chat response")?;
    Ok(body.message.content)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest<M: Serialize> {
    model: String,
    messages: Vec<M>,
    temperature: f32,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: Vec<ChatMessage>,
    temperature: f32,
) -> Result<String> {
    let messages = messages
        .into_iter()
        .map(|m| OpenAiMessage {
            role: m.role,
            content: m.content,
        })
        .collect();
    call_openai_model(client, config, &config.chat_model, messages, temperature).await
}

/// Post any serializable message list to `/v1/chat/completions`.
pub(crate) async fn call_openai_model<M: Serialize>(
    client: &reqwest::Client,
    config: &LlmConfig,
    model: &str,
    messages: Vec<M>,
    temperature: f32,
) -> Result<String> {
    let url = format!("{}/v1/chat/completions", config.base_url.trim_end_matches('/'));
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: model.to_string(),
        messages,
        temperature,
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI chat API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI chat API returned {status}: {body}");
    }

    let body: OpenAiChatResponse = resp
        .json()
        .await
        .context("Failed to parse OpenAI chat response")?;
    Ok(body
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_oracle_always_fails() {
        let err = DisabledOracle.complete("sys", "user", 0.2).await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[tokio::test]
    async fn test_unknown_provider_fails() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            ..LlmConfig::default()
        };
        let oracle = LlmOracle::new(reqwest::Client::new(), config);
        let err = oracle.complete("sys", "user", 0.2).await.unwrap_err();
        assert!(err.to_string().contains("Unknown LLM provider"));
    }

    #[test]
    fn test_text_message_omits_images() {
        let json = serde_json::to_value(ChatMessage::text("user", "hi")).unwrap();
        assert!(json.get("images").is_none());
        assert_eq!(json["role"], "user");
    }
}
