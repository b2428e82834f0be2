//! Hosted LLM client for category suggestions
//!
//! Talks to any OpenAI-compatible chat-completions endpoint. The reply is
//! free text; callers canonicalize it through the synonym table.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::http::client_with_timeout;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("LLM returned HTTP {0}")]
    Status(u16),
    #[error("LLM reply had no content")]
    EmptyReply,
    #[error("Could not create LLM client: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = client_with_timeout(settings.timeout).map_err(|e| LlmError::Client(e.message()))?;
        Ok(Self { client, settings })
    }

    /// Ask the model which catalog categories fit the query; returns its raw text
    pub async fn suggest_categories(&self, query: &str, catalog: &Catalog) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: build_prompt(catalog),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: query.to_string(),
                },
            ],
            temperature: 0.0,
        };

        let mut builder = self.client.post(&self.settings.endpoint).json(&request);
        if let Some(key) = &self.settings.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyReply)?;

        debug!("LLM suggestion reply: {:?}", content);
        Ok(content)
    }
}

/// System prompt listing the catalog the model must choose from
pub fn build_prompt(catalog: &Catalog) -> String {
    let names: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
    format!(
        "Sos un asistente de un directorio de oficios de Bahía Blanca. \
         Dado el problema que describe el usuario, respondé solo con hasta 3 \
         categorías de esta lista, separadas por comas y sin texto adicional: {}.",
        names.join(", ")
    )
}

/// Split a model reply into candidate category names
pub fn split_reply(reply: &str) -> Vec<&str> {
    reply
        .split([',', '\n', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
